use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// JWT `sub` claim this user was first seen with.
    #[sea_orm(unique)]
    pub subject: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::dream_entry::Entity")]
    DreamEntry,
}

impl Related<crate::dream_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DreamEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
