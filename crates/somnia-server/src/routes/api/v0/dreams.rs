pub(crate) mod error;

use crate::routes::api::v0::dreams::error::DreamError;
use crate::user::ExtractUserId;
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::routing::{Router, get, post};
use axum::{Extension, Json};
use chrono::{Days, Utc};
use http::StatusCode;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use somnia_db::dream_entry;
use somnia_db::dream_entry::{DreamEntryData, DreamEntryPatch};
use somnia_model::convert::FromDbModel;
use somnia_model::dream::partial::{NewDreamEntry, UpdateDreamEntry};
use somnia_model::dream::{DreamEntry, DreamEntryRecord};
use somnia_model::search::SearchTerms;
use utoipa::ToSchema;
use uuid::Uuid;

const RECENT_WINDOW_DAYS: u64 = 30;
const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_recent_dreams).post(create_dream))
        .route("/dream-log", post(search_dream_log))
        .route("/{id}", get(get_dream).put(update_dream).delete(delete_dream))
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/dreams",
    responses(
        (status = OK, description = "List dream entries from the last 30 days", body = [DreamEntry]),
    ),
    tag = "v0/dreams",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn list_recent_dreams(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<impl IntoResponse, DreamError> {
    let today = Utc::now().date_naive();
    let cutoff = today - Days::new(RECENT_WINDOW_DAYS);

    let entries = dream_entry::Query::get_user_dream_entries_between(
        &conn,
        user,
        &cutoff.format(DATE_FORMAT).to_string(),
        &today.format(DATE_FORMAT).to_string(),
    )
    .await?;

    let entries = entries
        .into_iter()
        .map(FromDbModel::from_db_model)
        .collect::<Vec<DreamEntry>>();
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/v0/dreams/{id}",
    responses(
        (status = OK, description = "Get a single dream entry", body = DreamEntry),
    ),
    tag = "v0/dreams",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_dream(
    ExtractUserId(user): ExtractUserId,
    Path(id): Path<Uuid>,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<impl IntoResponse, DreamError> {
    let entry = dream_entry::Query::get_user_dream_entry(&conn, user, id)
        .await?
        .ok_or(DreamError::NotFound)?;

    Ok(Json(DreamEntry::from_db_model(entry)))
}

#[utoipa::path(
    post,
    path = "/api/v0/dreams",
    request_body = NewDreamEntry,
    responses(
        (status = CREATED, description = "Create a dream entry", body = DreamEntry),
        (status = UNPROCESSABLE_ENTITY, description = "Missing field or duplicate submit date"),
    ),
    tag = "v0/dreams",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn create_dream(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Json(payload): Json<NewDreamEntry>,
) -> Result<impl IntoResponse, DreamError> {
    let entry = payload.validate()?;
    let entry = dream_entry::Mutation::create_dream_entry(
        &conn,
        user,
        DreamEntryData {
            submit_date: entry.submit_date,
            keywords: entry.keywords,
            mood: entry.mood,
            nightmare: entry.nightmare,
            life_events: entry.life_events,
            content: entry.content,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DreamEntry::from_db_model(entry))))
}

#[utoipa::path(
    put,
    path = "/api/v0/dreams/{id}",
    request_body = UpdateDreamEntry,
    responses(
        (status = NO_CONTENT, description = "Update a dream entry"),
        (status = BAD_REQUEST, description = "Path id and body id differ"),
    ),
    tag = "v0/dreams",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn update_dream(
    ExtractUserId(user): ExtractUserId,
    Path(id): Path<Uuid>,
    Extension(conn): Extension<DatabaseConnection>,
    Json(payload): Json<UpdateDreamEntry>,
) -> Result<impl IntoResponse, DreamError> {
    if payload.id != id {
        return Err(DreamError::IdMismatch {
            path: id,
            body: payload.id,
        });
    }

    dream_entry::Mutation::update_dream_entry(
        &conn,
        user,
        id,
        DreamEntryPatch {
            submit_date: payload.submit_date,
            keywords: payload.keywords,
            mood: payload.mood,
            nightmare: payload.nightmare,
            life_events: payload.life_events,
            content: payload.content,
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v0/dreams/{id}",
    responses(
        (status = NO_CONTENT, description = "Delete a dream entry"),
    ),
    tag = "v0/dreams",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn delete_dream(
    ExtractUserId(user): ExtractUserId,
    Path(id): Path<Uuid>,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<impl IntoResponse, DreamError> {
    dream_entry::Mutation::delete_dream_entry(&conn, user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchRequest {
    pub search: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SearchResults {
    pub query: SearchTerms,
    pub entries: Vec<DreamEntryRecord>,
}

#[utoipa::path(
    post,
    path = "/api/v0/dreams/dream-log",
    request_body = SearchRequest,
    responses(
        (status = OK, description = "Search dream entries", body = SearchResults),
    ),
    tag = "v0/dreams",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn search_dream_log(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Json(request): Json<SearchRequest>,
) -> Result<impl IntoResponse, DreamError> {
    let query = SearchTerms::parse(&request.search);

    let entries = dream_entry::Query::get_user_dream_entries(&conn, user).await?;
    let entries = entries
        .into_iter()
        .filter(|entry| query.matches_entry(entry))
        .map(FromDbModel::from_db_model)
        .collect::<Vec<DreamEntryRecord>>();

    Ok(Json(SearchResults { query, entries }))
}
