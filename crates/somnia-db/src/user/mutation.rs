use crate::user::Query;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use somnia_entity::user::{self, Model as UserModel};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    /// Resolves a token subject to a user row, creating it on first
    /// sight. Concurrent first sights race on the unique `subject`
    /// column; the losing insert is a no-op and both resolve to the
    /// same row.
    pub async fn get_or_create_user<C: ConnectionTrait>(conn: &C, subject: &str) -> Result<UserModel, DbErr> {
        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject: Set(subject.to_owned()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let mut on_conflict = OnConflict::column(user::Column::Subject);
        on_conflict.do_nothing();
        user::Entity::insert(new_user)
            .on_conflict(on_conflict)
            .do_nothing()
            .exec(conn)
            .await?;

        Query::find_by_subject(conn, subject).await?.ok_or_else(|| {
            tracing::error!(subject, "user not found after insertion");
            DbErr::RecordNotFound("User not found after insertion".to_string())
        })
    }
}
