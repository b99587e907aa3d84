use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use somnia_entity::dream_entry::{self, Entity as DreamEntry, Model as DreamEntryModel};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get_user_dream_entries<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
    ) -> Result<Vec<DreamEntryModel>, DbErr> {
        DreamEntry::find()
            .filter(dream_entry::Column::UserId.eq(user_id))
            .order_by_asc(dream_entry::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to load user dream entries"))
    }

    /// Entries with `submit_date` in `[since, until)`. ISO-8601 date
    /// strings order lexicographically, so plain string comparison is
    /// the date comparison.
    pub async fn get_user_dream_entries_between<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        since: &str,
        until: &str,
    ) -> Result<Vec<DreamEntryModel>, DbErr> {
        DreamEntry::find()
            .filter(dream_entry::Column::UserId.eq(user_id))
            .filter(dream_entry::Column::SubmitDate.gte(since))
            .filter(dream_entry::Column::SubmitDate.lt(until))
            .order_by_asc(dream_entry::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to load recent dream entries"))
    }

    pub async fn get_user_dream_entry<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> Result<Option<DreamEntryModel>, DbErr> {
        DreamEntry::find_by_id(entry_id)
            .filter(dream_entry::Column::UserId.eq(user_id))
            .one(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to load dream entry"))
    }
}
