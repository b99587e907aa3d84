use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, IntoActiveModel};
use somnia_entity::user::{Entity as User, Model as UserModel};
use uuid::Uuid;

#[allow(dead_code)]
pub async fn create_test_user(db: &DatabaseConnection, subject: &str) -> UserModel {
    let user = UserModel {
        id: Uuid::new_v4(),
        subject: subject.to_owned(),
        created_at: Utc::now().fixed_offset(),
    };
    User::insert(user.clone().into_active_model()).exec(db).await.unwrap();
    user
}
