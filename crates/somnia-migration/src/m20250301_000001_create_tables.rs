use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Subject).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DreamEntry::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DreamEntry::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(DreamEntry::UserId).uuid().not_null())
                    .col(ColumnDef::new(DreamEntry::SubmitDate).string().not_null())
                    .col(ColumnDef::new(DreamEntry::Keywords).json().not_null())
                    .col(ColumnDef::new(DreamEntry::Mood).json().not_null())
                    .col(ColumnDef::new(DreamEntry::Nightmare).boolean().not_null())
                    .col(ColumnDef::new(DreamEntry::LifeEvents).text().not_null())
                    .col(ColumnDef::new(DreamEntry::Content).text().not_null())
                    .col(
                        ColumnDef::new(DreamEntry::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DreamEntry::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-dream-entry-user-id")
                            .from(DreamEntry::Table, DreamEntry::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One entry per user per day, enforced by the store instead of a
        // read-then-write check in the creation handler.
        manager
            .create_index(
                Index::create()
                    .name("idx-dream-entry-user-submit-date")
                    .table(DreamEntry::Table)
                    .col(DreamEntry::UserId)
                    .col(DreamEntry::SubmitDate)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DreamEntry::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Subject,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DreamEntry {
    Table,
    Id,
    UserId,
    SubmitDate,
    Keywords,
    Mood,
    Nightmare,
    LifeEvents,
    Content,
    CreatedAt,
    UpdatedAt,
}
