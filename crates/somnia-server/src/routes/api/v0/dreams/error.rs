use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use sea_orm::DbErr;
use serde::Serialize;
use somnia_db::dream_entry::InsertDreamEntryError;
use somnia_model::dream::partial::MissingField;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Error, Debug)]
pub(crate) enum DreamError {
    #[error("Database error.")]
    Db(#[from] DbErr),

    #[error(transparent)]
    Validation(#[from] MissingField),

    #[error("an entry was already submitted for this date")]
    DuplicateSubmitDate,

    #[error("Request path id ({path}) and request body id ({body}) must match")]
    IdMismatch { path: Uuid, body: Uuid },

    #[error("Dream entry could not be found")]
    NotFound,
}

impl From<InsertDreamEntryError> for DreamError {
    fn from(error: InsertDreamEntryError) -> Self {
        match error {
            InsertDreamEntryError::DuplicateSubmitDate => Self::DuplicateSubmitDate,
            InsertDreamEntryError::Db(error) => Self::Db(error),
        }
    }
}

/// The structured body carried by 422 validation failures.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ValidationBody {
    pub code: u16,
    pub reason: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'static str>,
}

impl IntoResponse for DreamError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(MissingField(location)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationBody {
                    code: 422,
                    reason: "ValidationError",
                    message: "Missing field",
                    location: Some(location),
                }),
            )
                .into_response(),
            Self::DuplicateSubmitDate => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationBody {
                    code: 422,
                    reason: "ValidationError",
                    message: "already submitted for this date",
                    location: None,
                }),
            )
                .into_response(),
            Self::IdMismatch { .. } => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Db(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
