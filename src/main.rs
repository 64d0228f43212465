#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    routes::{
        index::get_index_route,
        students::{
            delete_student, get_students, internal_get_edit_student_form,
            internal_get_new_student_form, internal_get_student, internal_get_students,
            internal_post_edit_student, internal_put_new_student,
        },
    },
    state::RollbookState,
};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod editor;
mod error;
mod gateway;
mod maud_conveniences;
mod roster;
mod routes;
mod state;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().expect("unable to load env vars");

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");

    let config = RuntimeConfiguration::new().expect("unable to create config");
    let options = PgPoolOptions::new().max_connections(config.db_config().pool_size());
    let state = RollbookState::new(options, config)
        .await
        .expect("unable to create state");

    let trace_layer = TraceLayer::new_for_http();

    let app = Router::new()
        .route("/", get(get_index_route))
        .route("/students", get(get_students).delete(delete_student))
        .route("/internal/get_students", get(internal_get_students))
        .route("/internal/get_student", get(internal_get_student))
        .route(
            "/internal/students/new_form",
            get(internal_get_new_student_form).put(internal_put_new_student),
        )
        .route(
            "/internal/students/edit_form",
            get(internal_get_edit_student_form).post(internal_post_edit_student),
        )
        .layer(trace_layer)
        .with_state(state.clone());

    let server_ip = state.config().server_ip();
    let listener = TcpListener::bind(server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("unable to serve app");
}
