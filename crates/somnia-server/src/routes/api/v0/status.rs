use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use http::StatusCode;
use sea_orm::DatabaseConnection;
use somnia_model::status::Status;
use std::error::Error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(get_status)).with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/status",
    responses(
        (status = OK, description = "Server is ok", body = Status),
    ),
    tag = "util"
)]
pub(crate) async fn get_status(Extension(conn): Extension<DatabaseConnection>) -> Response {
    match conn.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Status {
                database: "ok".to_owned(),
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(error = &error as &dyn Error, "database ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Status {
                    database: "unreachable".to_owned(),
                }),
            )
                .into_response()
        }
    }
}
