use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use somnia_entity::user::{self, Entity as User, Model as UserModel};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_user_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<UserModel>, DbErr> {
        User::find_by_id(id)
            .one(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "error loading user"))
    }

    pub async fn find_by_subject<C: ConnectionTrait>(conn: &C, subject: &str) -> Result<Option<UserModel>, DbErr> {
        User::find()
            .filter(user::Column::Subject.eq(subject))
            .one(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "error finding user by subject"))
    }
}
