use crate::{
    data::{
        IdForm,
        student::{StudentDraft, StudentRecord, StudentStatus},
    },
    editor::{EditorMode, EditorSession, SubmitOutcome, confirm_and_delete},
    error::{MissingStudentSnafu, PersistenceSnafu, RollbookResult},
    gateway::StudentGateway,
    maud_conveniences::{Notification, form_element, simple_form_element, title, toast},
    roster::Roster,
    state::RollbookState,
};
use axum::{
    Form,
    extract::{Query, State},
};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::{OptionExt, ResultExt};
use uuid::Uuid;

pub async fn get_students(State(state): State<RollbookState>) -> Markup {
    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-6xl w-full flex flex-col space-y-4" {
            div class="flex flex-row justify-between items-center" {
                div {
                    (title("Students"))
                    p class="text-gray-400" {"Manage student records and information"}
                }
                button class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" hx-get="/internal/students/new_form" hx-target="#in_focus" {
                    "Add Student"
                }
            }
            div class="container flex flex-row justify-center space-x-4" {
                div id="all_students" hx-get="/internal/get_students" hx-trigger="load" {}
                div id="in_focus" {}
            }
        }
    })
}

pub async fn internal_get_students(State(state): State<RollbookState>) -> Markup {
    render_roster(&*state.roster().await)
}

pub async fn internal_get_student(
    State(state): State<RollbookState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RollbookResult<Markup> {
    let roster = state.roster().await;
    let record = roster.get(id).context(MissingStudentSnafu { id })?;
    Ok(render_student_detail(record))
}

pub async fn internal_get_new_student_form(State(state): State<RollbookState>) -> Markup {
    let mut session = EditorSession::new(state.gateway().clone());
    session.open_for_create();
    render_editor_form(&session)
}

pub async fn internal_get_edit_student_form(
    State(state): State<RollbookState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RollbookResult<Markup> {
    let record = state
        .roster()
        .await
        .get(id)
        .cloned()
        .context(MissingStudentSnafu { id })?;

    let mut session = EditorSession::new(state.gateway().clone());
    session.open_for_edit(record);
    Ok(render_editor_form(&session))
}

pub async fn internal_put_new_student(
    State(state): State<RollbookState>,
    Form(draft): Form<StudentDraft>,
) -> RollbookResult<Markup> {
    let mut session = EditorSession::new(state.gateway().clone());
    session.open_for_create();
    session.set_draft(draft);

    match session.submit().await {
        SubmitOutcome::Saved(stored) => {
            state.roster_mut().await.insert_at_front(stored.clone());
            let all_students = render_roster(&*state.roster().await);
            Ok(html! {
                (render_student_detail(&stored))
                div hx-swap-oob="outerHTML:#all_students" id="all_students" {
                    (all_students)
                }
                (toast(&Notification::success("Success", "Student created successfully.")))
            })
        }
        outcome => Ok(render_rejected_submit(&session, &outcome, "Failed to create student.")),
    }
}

#[derive(Deserialize)]
pub struct EditStudentForm {
    pub id: Uuid,
    #[serde(flatten)]
    pub draft: StudentDraft,
}

pub async fn internal_post_edit_student(
    State(state): State<RollbookState>,
    Form(form): Form<EditStudentForm>,
) -> RollbookResult<Markup> {
    let record = state
        .roster()
        .await
        .get(form.id)
        .cloned()
        .context(MissingStudentSnafu { id: form.id })?;

    let mut session = EditorSession::new(state.gateway().clone());
    session.open_for_edit(record);
    session.set_draft(form.draft);

    match session.submit().await {
        SubmitOutcome::Saved(stored) => {
            state.roster_mut().await.replace(stored.id, stored.clone());
            let all_students = render_roster(&*state.roster().await);
            Ok(html! {
                (render_student_detail(&stored))
                div hx-swap-oob="outerHTML:#all_students" id="all_students" {
                    (all_students)
                }
                (toast(&Notification::success("Success", "Student updated successfully.")))
            })
        }
        outcome => Ok(render_rejected_submit(&session, &outcome, "Failed to update student.")),
    }
}

pub async fn delete_student(
    State(state): State<RollbookState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RollbookResult<Markup> {
    // the yes/no prompt already happened client-side via hx-confirm
    confirm_and_delete(state.gateway(), id, || true)
        .await
        .context(PersistenceSnafu)?;

    state.roster_mut().await.remove_by_id(id);
    let all_students = render_roster(&*state.roster().await);
    Ok(html! {
        div hx-swap-oob="outerHTML:#all_students" id="all_students" {
            (all_students)
        }
        (toast(&Notification::success("Success", "Student deleted successfully.")))
    })
}

fn render_rejected_submit<G: StudentGateway>(
    session: &EditorSession<G>,
    outcome: &SubmitOutcome,
    fallback: &str,
) -> Markup {
    let form = render_editor_form(session);
    match outcome {
        SubmitOutcome::Failed => {
            let message = session.gateway_error().unwrap_or(fallback).to_owned();
            html! {
                (form)
                (toast(&Notification::error("Error", message)))
            }
        }
        _ => form,
    }
}

fn render_roster(roster: &Roster) -> Markup {
    if roster.is_empty() {
        return html! {
            div class="flex flex-col items-center justify-center py-12 text-center" {
                p class="text-lg text-gray-400 mb-4" {
                    "No students found. Add your first student to get started."
                }
                button class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" hx-get="/internal/students/new_form" hx-target="#in_focus" {
                    "Add Your First Student"
                }
            }
        };
    }

    html! {
        div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4" {
            @for record in roster.records() {
                (render_student_card(record))
            }
        }
    }
}

fn render_student_card(record: &StudentRecord) -> Markup {
    html! {
        div class="rounded-lg shadow-md p-4 bg-gray-700 flex flex-col space-y-2" {
            div class="flex flex-row justify-between items-start" {
                h2 class="text-lg font-semibold" {(record.full_name())}
                (status_badge(record.status))
            }
            p class="text-sm text-gray-300" {(record.email)}
            p class="text-sm text-gray-300" {
                "Grade: "
                (record.grade_level)
            }
            @if let Some(gpa) = record.gpa {
                p class="text-sm text-gray-300" {
                    "GPA: "
                    (gpa)
                }
            }
            div class="flex flex-row space-x-2 pt-2" {
                button class="bg-slate-600 hover:bg-slate-800 text-sm font-bold py-1 px-3 rounded" hx-get="/internal/get_student" hx-target="#in_focus" hx-vals={"{\"id\": \"" (record.id) "\"}"} {
                    "View"
                }
                button class="bg-blue-600 hover:bg-blue-800 text-sm font-bold py-1 px-3 rounded" hx-get="/internal/students/edit_form" hx-target="#in_focus" hx-vals={"{\"id\": \"" (record.id) "\"}"} {
                    "Edit"
                }
                button class="bg-red-600 hover:bg-red-800 text-sm font-bold py-1 px-3 rounded" hx-delete="/students" hx-target="#in_focus" hx-confirm="Are you sure you want to delete this student?" hx-vals={"{\"id\": \"" (record.id) "\"}"} {
                    "Delete"
                }
            }
        }
    }
}

fn status_badge(status: StudentStatus) -> Markup {
    let colours = match status {
        StudentStatus::Active => "bg-green-200 text-green-900",
        StudentStatus::Inactive => "bg-gray-300 text-gray-900",
        StudentStatus::Graduated => "bg-blue-200 text-blue-900",
        StudentStatus::Withdrawn => "bg-red-200 text-red-900",
    };

    html! {
        span class={"text-xs font-semibold px-2 py-1 rounded-full " (colours)} {(status.label())}
    }
}

fn optional_row(label: &str, value: Option<&str>) -> Markup {
    html! {
        @if let Some(value) = value {
            p class="text-gray-200" {
                span class="font-semibold" {(label) ": "}
                (value)
            }
        }
    }
}

fn render_student_detail(record: &StudentRecord) -> Markup {
    html! {
        div class="rounded-lg shadow-md overflow-hidden bg-gray-800 max-w-md" {
            div class="p-4 flex flex-col space-y-1" {
                div class="flex flex-row justify-between items-start" {
                    h1 class="text-2xl font-semibold mb-2" {(record.full_name())}
                    (status_badge(record.status))
                }
                p {
                    a href={"mailto:" (record.email)} class="text-blue-500" {(record.email)}
                }
                (optional_row("Phone", record.phone.as_deref()))
                p class="text-gray-200" {
                    span class="font-semibold" {"Date of birth: "}
                    (record.date_of_birth)
                }
                p class="text-gray-200" {
                    span class="font-semibold" {"Enrolled: "}
                    (record.enrollment_date)
                }
                p class="text-gray-200" {
                    span class="font-semibold" {"Grade level: "}
                    (record.grade_level)
                }
                (optional_row("Major", record.major.as_deref()))
                @if let Some(gpa) = record.gpa {
                    p class="text-gray-200" {
                        span class="font-semibold" {"GPA: "}
                        (gpa)
                    }
                }
                (optional_row("Address", record.address.as_deref()))
                (optional_row("City", record.city.as_deref()))
                (optional_row("State", record.state.as_deref()))
                (optional_row("Zip code", record.zip_code.as_deref()))
                (optional_row("Emergency contact", record.emergency_contact_name.as_deref()))
                (optional_row("Emergency phone", record.emergency_contact_phone.as_deref()))
                br;
                div class="flex flex-row space-x-2" {
                    button class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" hx-get="/internal/students/edit_form" hx-target="#in_focus" hx-vals={"{\"id\": \"" (record.id) "\"}"} {
                        "Edit student"
                    }
                    button class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" hx-delete="/students" hx-target="#in_focus" hx-confirm="Are you sure you want to delete this student?" hx-vals={"{\"id\": \"" (record.id) "\"}"} {
                        "Delete student"
                    }
                }
            }
        }
    }
}

fn render_editor_form<G: StudentGateway>(session: &EditorSession<G>) -> Markup {
    let (Some(mode), Some(draft)) = (session.mode(), session.draft()) else {
        return html! {};
    };
    let errors = session.field_errors();
    let error_for = |field: &str| errors.and_then(|errors| errors.get(field));

    let select_classes = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";

    let heading = match mode {
        EditorMode::Create => "Add New Student",
        EditorMode::Edit(_) => "Edit Student",
    };

    let fields = html! {
        @if let Some(message) = session.gateway_error() {
            div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4" role="alert" {(message)}
        }

        div class="grid grid-cols-1 sm:grid-cols-2 gap-x-4" {
            (simple_form_element("first_name", "First Name", true, None, &draft.first_name, error_for("first_name")))
            (simple_form_element("last_name", "Last Name", true, None, &draft.last_name, error_for("last_name")))
            (simple_form_element("email", "Email", true, Some("email"), &draft.email, error_for("email")))
            (simple_form_element("phone", "Phone", false, Some("tel"), &draft.phone, error_for("phone")))
            (simple_form_element("date_of_birth", "Date of Birth", true, Some("date"), &draft.date_of_birth, error_for("date_of_birth")))
            (simple_form_element("enrollment_date", "Enrollment Date", true, Some("date"), &draft.enrollment_date, error_for("enrollment_date")))
            (simple_form_element("grade_level", "Grade Level", true, None, &draft.grade_level, error_for("grade_level")))
            (simple_form_element("major", "Major", false, None, &draft.major, error_for("major")))
            (simple_form_element("gpa", "GPA", false, None, &draft.gpa, error_for("gpa")))
            (simple_form_element("address", "Address", false, None, &draft.address, error_for("address")))
            (simple_form_element("city", "City", false, None, &draft.city, error_for("city")))
            (simple_form_element("state", "State", false, None, &draft.state, error_for("state")))
            (simple_form_element("zip_code", "Zip Code", false, None, &draft.zip_code, error_for("zip_code")))
            (simple_form_element("emergency_contact_name", "Emergency Contact Name", false, None, &draft.emergency_contact_name, error_for("emergency_contact_name")))
            (simple_form_element("emergency_contact_phone", "Emergency Contact Phone", false, Some("tel"), &draft.emergency_contact_phone, error_for("emergency_contact_phone")))
            (form_element("status", "Status", error_for("status"), html! {
                select id="status" name="status" class=(select_classes) {
                    @for status in StudentStatus::ALL {
                        option value=(status) selected[draft.status == status.as_str()] {(status.label())}
                    }
                }
            }))
        }

        div class="flex items-center justify-between" {
            button type="submit" hx-disabled-elt="this" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                @match mode {
                    EditorMode::Create => { "Add Student" }
                    EditorMode::Edit(_) => { "Save Changes" }
                }
            }
        }
    };

    html! {
        (title(heading))
        @match mode {
            EditorMode::Create => {
                form hx-put="/internal/students/new_form" hx-trigger="submit" hx-target="#in_focus" class="p-4" {
                    (fields)
                }
            }
            EditorMode::Edit(record) => {
                form hx-post="/internal/students/edit_form" hx-trigger="submit" hx-target="#in_focus" class="p-4" {
                    input type="hidden" value=(record.id) name="id" id="id" {}
                    (fields)
                }
            }
        }
    }
}
