pub mod user;

use sea_orm::{DbConn, DbErr};
use somnia_migration::{Migrator, MigratorTrait};

pub async fn setup_schema(db: &DbConn) -> Result<(), DbErr> {
    Migrator::up(db, None).await
}
