pub mod partial;

use crate::convert::FromDbModel;
use serde::{Deserialize, Serialize};
use somnia_entity::dream_entry::Model as DreamEntryModel;
use utoipa::ToSchema;
use uuid::Uuid;

/// The read shape of an entry. `nightmare` and `lifeEvents` are accepted
/// on write but never serialized back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DreamEntry {
    pub submit_date: String,
    pub keywords: Vec<String>,
    pub mood: Vec<String>,
    pub content: String,
}

impl FromDbModel<DreamEntryModel> for DreamEntry {
    fn from_db_model(model: DreamEntryModel) -> Self {
        Self {
            submit_date: model.submit_date,
            keywords: model.keywords.0,
            mood: model.mood.0,
            content: model.content,
        }
    }
}

/// The full stored representation, returned unprojected by the search
/// endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DreamEntryRecord {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub submit_date: String,
    pub keywords: Vec<String>,
    pub mood: Vec<String>,
    pub nightmare: bool,
    pub life_events: String,
    pub content: String,
}

impl FromDbModel<DreamEntryModel> for DreamEntryRecord {
    fn from_db_model(model: DreamEntryModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            submit_date: model.submit_date,
            keywords: model.keywords.0,
            mood: model.mood.0,
            nightmare: model.nightmare,
            life_events: model.life_events,
            content: model.content,
        }
    }
}
