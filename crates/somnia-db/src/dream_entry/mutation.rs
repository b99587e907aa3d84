use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, SqlErr};
use somnia_entity::dream_entry::{self, Model as DreamEntryModel, StringList};
use std::error::Error;
use thiserror::Error as ThisError;
use uuid::Uuid;

pub struct Mutation;

/// A complete entry body for insertion.
#[derive(Debug, Clone)]
pub struct DreamEntryData {
    pub submit_date: String,
    pub keywords: Vec<String>,
    pub mood: Vec<String>,
    pub nightmare: bool,
    pub life_events: String,
    pub content: String,
}

/// A sparse field set; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct DreamEntryPatch {
    pub submit_date: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub mood: Option<Vec<String>>,
    pub nightmare: Option<bool>,
    pub life_events: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, ThisError)]
pub enum InsertDreamEntryError {
    /// The unique index on (user_id, submit_date) rejected the row.
    #[error("an entry for this user and submit date already exists")]
    DuplicateSubmitDate,

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl Mutation {
    pub async fn create_dream_entry<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        data: DreamEntryData,
    ) -> Result<DreamEntryModel, InsertDreamEntryError> {
        let now = Utc::now().fixed_offset();
        let entry = dream_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            submit_date: Set(data.submit_date),
            keywords: Set(StringList(data.keywords)),
            mood: Set(StringList(data.mood)),
            nightmare: Set(data.nightmare),
            life_events: Set(data.life_events),
            content: Set(data.content),
            created_at: Set(now),
            updated_at: Set(now),
        };

        entry.insert(conn).await.map_err(|error| {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = error.sql_err() {
                return InsertDreamEntryError::DuplicateSubmitDate;
            }
            tracing::error!(error = &error as &dyn Error, "failed to insert dream entry");
            error.into()
        })
    }

    /// Overwrites only the fields present in `patch`, scoped to the
    /// owning user. Returns the number of rows touched; zero is not an
    /// error.
    pub async fn update_dream_entry<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        entry_id: Uuid,
        patch: DreamEntryPatch,
    ) -> Result<u64, DbErr> {
        let entry = dream_entry::ActiveModel {
            id: NotSet,
            user_id: NotSet,
            submit_date: patch.submit_date.map_or(NotSet, Set),
            keywords: patch.keywords.map_or(NotSet, |keywords| Set(StringList(keywords))),
            mood: patch.mood.map_or(NotSet, |mood| Set(StringList(mood))),
            nightmare: patch.nightmare.map_or(NotSet, Set),
            life_events: patch.life_events.map_or(NotSet, Set),
            content: patch.content.map_or(NotSet, Set),
            created_at: NotSet,
            updated_at: Set(Utc::now().fixed_offset()),
        };

        let res = dream_entry::Entity::update_many()
            .set(entry)
            .filter(dream_entry::Column::Id.eq(entry_id))
            .filter(dream_entry::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to update dream entry"))?;
        Ok(res.rows_affected)
    }

    /// Removes the entry if it exists; deleting an absent entry is not
    /// an error.
    pub async fn delete_dream_entry<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> Result<u64, DbErr> {
        let res = dream_entry::Entity::delete_many()
            .filter(dream_entry::Column::Id.eq(entry_id))
            .filter(dream_entry::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to delete dream entry"))?;
        Ok(res.rows_affected)
    }
}
