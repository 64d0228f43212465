use crate::gateway::GatewayError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;
use uuid::Uuid;

pub type RollbookResult<T> = Result<T, RollbookError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RollbookError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unable to parse DB pool size"))]
    ParsePoolSize { source: ParseIntError },
    #[snafu(display("Unable to find student with UUID: {}", id))]
    MissingStudent { id: Uuid },
    #[snafu(display("{}", source))]
    Persistence { source: GatewayError },
}

impl IntoResponse for RollbookError {
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Rollbook Error"}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::OpenDatabase { .. } | Self::MigrateError { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParsePort { .. } | Self::ParsePoolSize { .. } => ISE,
            Self::MissingStudent { .. } => NF,
            Self::Persistence { source } => match source {
                GatewayError::StudentNotFound { .. } => NF,
                GatewayError::Query { .. } => ISE,
            },
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}
