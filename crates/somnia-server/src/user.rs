use crate::auth::AuthConfig;
use axum::extract::FromRequestParts;
use axum::{Extension, RequestPartsExt};
use axum_auth::AuthBearer;
use axum_extra::extract::Cached;
use http::StatusCode;
use http::request::Parts;
use sea_orm::DatabaseConnection;
use somnia_db::user;
use std::error::Error;
use uuid::Uuid;

type Rejection = (StatusCode, &'static str);

#[derive(Clone)]
struct Session {
    user_id: Uuid,
}

#[derive(Clone)]
pub(crate) struct ExtractUserId(pub Uuid);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Ok(AuthBearer(token)) = parts.extract::<AuthBearer>().await else {
            return Err((StatusCode::UNAUTHORIZED, "No authentication token provided"));
        };

        let Extension::<AuthConfig>(auth) = parts.extract::<Extension<AuthConfig>>().await.map_err(|error| {
            tracing::error!(error = &error as &dyn Error, "auth config not found in app data");
            (StatusCode::INTERNAL_SERVER_ERROR, "Auth config not found")
        })?;

        let Extension::<DatabaseConnection>(conn) =
            parts
                .extract::<Extension<DatabaseConnection>>()
                .await
                .map_err(|error| {
                    tracing::error!(
                        error = &error as &dyn Error,
                        "database connection not found in app data"
                    );
                    (StatusCode::INTERNAL_SERVER_ERROR, "Database Connection not found")
                })?;

        let claims = auth.validate_token(&token).map_err(|error| {
            tracing::debug!(error = &error as &dyn Error, "token validation failed");
            (StatusCode::UNAUTHORIZED, "Invalid token")
        })?;

        let user = user::Mutation::get_or_create_user(&conn, &claims.sub)
            .await
            .map_err(|error| {
                tracing::error!(error = &error as &dyn Error, "failed to resolve user");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error resolving user")
            })?;

        Ok(Self { user_id: user.id })
    }
}

impl<S> FromRequestParts<S> for ExtractUserId
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session: Session = Cached::<Session>::from_request_parts(parts, state).await?.0;
        Ok(Self(session.user_id))
    }
}
