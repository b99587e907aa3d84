use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Creation payload. Every field is optional at the serde level so that
/// validation, not deserialization, reports which key is missing.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDreamEntry {
    #[serde(default)]
    pub submit_date: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub mood: Option<Vec<String>>,
    #[serde(default)]
    pub nightmare: Option<bool>,
    #[serde(default)]
    pub life_events: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A creation payload with all required fields confirmed present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDreamEntry {
    pub submit_date: String,
    pub keywords: Vec<String>,
    pub mood: Vec<String>,
    pub nightmare: bool,
    pub life_events: String,
    pub content: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Missing field `{0}`")]
pub struct MissingField(pub &'static str);

impl NewDreamEntry {
    /// Checks the six required keys in a fixed order and reports the
    /// first one absent by its wire name.
    pub fn validate(self) -> Result<ValidDreamEntry, MissingField> {
        Ok(ValidDreamEntry {
            submit_date: self.submit_date.ok_or(MissingField("submitDate"))?,
            keywords: self.keywords.ok_or(MissingField("keywords"))?,
            mood: self.mood.ok_or(MissingField("mood"))?,
            nightmare: self.nightmare.ok_or(MissingField("nightmare"))?,
            life_events: self.life_events.ok_or(MissingField("lifeEvents"))?,
            content: self.content.ok_or(MissingField("content"))?,
        })
    }
}

/// Sparse update payload; only fields present in the body are
/// overwritten. The embedded `id` must match the path id.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDreamEntry {
    pub id: Uuid,
    #[serde(default)]
    pub submit_date: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub mood: Option<Vec<String>>,
    #[serde(default)]
    pub nightmare: Option<bool>,
    #[serde(default)]
    pub life_events: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> NewDreamEntry {
        NewDreamEntry {
            submit_date: Some("2024-01-01".to_owned()),
            keywords: Some(vec!["a".to_owned()]),
            mood: Some(vec!["calm".to_owned()]),
            nightmare: Some(false),
            life_events: Some("none".to_owned()),
            content: Some("slept well".to_owned()),
        }
    }

    #[test]
    fn valid_payload_passes() {
        let valid = full().validate().unwrap();
        assert_eq!(valid.submit_date, "2024-01-01");
        assert_eq!(valid.mood, vec!["calm".to_owned()]);
    }

    #[test]
    fn reports_first_missing_field_in_fixed_order() {
        let mut payload = full();
        payload.mood = None;
        payload.content = None;
        assert_eq!(payload.validate().unwrap_err(), MissingField("mood"));

        let mut payload = full();
        payload.submit_date = None;
        payload.keywords = None;
        assert_eq!(payload.validate().unwrap_err(), MissingField("submitDate"));

        let mut payload = full();
        payload.life_events = None;
        assert_eq!(payload.validate().unwrap_err(), MissingField("lifeEvents"));
    }

    #[test]
    fn missing_keys_deserialize_as_absent() {
        let payload: NewDreamEntry = serde_json::from_str(r#"{"submitDate": "2024-01-01"}"#).unwrap();
        assert_eq!(payload.validate().unwrap_err(), MissingField("keywords"));
    }
}
