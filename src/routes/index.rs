use axum::extract::State;
use axum::response::IntoResponse;
use maud::html;
use crate::error::RollbookResult;
use crate::state::RollbookState;

pub async fn get_index_route(State(state): State<RollbookState>) -> RollbookResult<impl IntoResponse> {
    let student_count = state.roster().await.len();

    Ok(state.render(html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
            h1 class="text-2xl font-semibold mb-6 text-center" {
                "Rollbook"
            }
            p class="text-gray-400 text-center mb-6" {
                (student_count)
                " students on the roster"
            }

            div class="flex flex-row space-x-4 justify-center" {
                a href="/students" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {
                    "View Students"
                }
            }
        }
    }))
}
