use serde::{Deserialize, Serialize};
use somnia_entity::dream_entry::Model as DreamEntryModel;
use utoipa::ToSchema;

/// A normalized search query. A raw string containing a comma is split
/// on `", "` into an ordered term list; anything else is a single term.
/// Echoed back to the caller as a string or an array accordingly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SearchTerms {
    Single(String),
    Many(Vec<String>),
}

impl SearchTerms {
    pub fn parse(raw: &str) -> Self {
        if raw.contains(',') {
            Self::Many(raw.split(", ").map(str::to_owned).collect())
        } else {
            Self::Single(raw.to_owned())
        }
    }

    fn terms(&self) -> &[String] {
        match self {
            Self::Single(term) => std::slice::from_ref(term),
            Self::Many(terms) => terms,
        }
    }

    /// True iff at least one term case-insensitively substring-matches
    /// at least one of `mood`, `keywords`, `content`, `lifeEvents`.
    /// Terms are matched literally, never compiled into patterns.
    pub fn matches_entry(&self, entry: &DreamEntryModel) -> bool {
        self.terms().iter().any(|term| {
            let needle = term.to_lowercase();
            entry
                .mood
                .0
                .iter()
                .chain(entry.keywords.0.iter())
                .any(|value| value.to_lowercase().contains(&needle))
                || entry.content.to_lowercase().contains(&needle)
                || entry.life_events.to_lowercase().contains(&needle)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use somnia_entity::dream_entry::StringList;
    use uuid::Uuid;

    fn entry(keywords: &[&str], mood: &[&str], content: &str, life_events: &str) -> DreamEntryModel {
        DreamEntryModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            submit_date: "2024-01-01".to_owned(),
            keywords: StringList(keywords.iter().map(|s| (*s).to_owned()).collect()),
            mood: StringList(mood.iter().map(|s| (*s).to_owned()).collect()),
            nightmare: false,
            life_events: life_events.to_owned(),
            content: content.to_owned(),
            created_at: Utc::now().fixed_offset(),
            updated_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn parses_single_term() {
        assert_eq!(SearchTerms::parse("calm"), SearchTerms::Single("calm".to_owned()));
    }

    #[test]
    fn splits_on_comma_space() {
        assert_eq!(
            SearchTerms::parse("calm, falling"),
            SearchTerms::Many(vec!["calm".to_owned(), "falling".to_owned()])
        );
    }

    #[test]
    fn comma_without_space_stays_unsplit() {
        // `contains(',')` routes it to the list form, but the `", "`
        // separator never fires.
        assert_eq!(
            SearchTerms::parse("calm,falling"),
            SearchTerms::Many(vec!["calm,falling".to_owned()])
        );
    }

    #[test]
    fn matches_any_of_the_four_fields() {
        let model = entry(&["flying"], &["calm"], "slept well", "moved house");
        for term in ["flying", "calm", "slept", "house"] {
            assert!(SearchTerms::parse(term).matches_entry(&model), "term {term}");
        }
        assert!(!SearchTerms::parse("falling").matches_entry(&model));
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let model = entry(&[], &["Anxious"], "A LONG DREAM", "");
        assert!(SearchTerms::parse("anx").matches_entry(&model));
        assert!(SearchTerms::parse("long dream").matches_entry(&model));
        assert!(!SearchTerms::parse("short").matches_entry(&model));
    }

    #[test]
    fn multi_term_query_is_an_or() {
        let model = entry(&["flying"], &[], "", "");
        assert!(SearchTerms::parse("falling, flying").matches_entry(&model));
        assert!(!SearchTerms::parse("falling, sinking").matches_entry(&model));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let model = entry(&[], &[], "woke up at 3am", "");
        assert!(!SearchTerms::parse(".*").matches_entry(&model));
        let model = entry(&[], &[], "cost .* dollars", "");
        assert!(SearchTerms::parse(".*").matches_entry(&model));
    }

    #[test]
    fn echo_shape_follows_the_input_form() {
        let single = serde_json::to_value(SearchTerms::parse("calm")).unwrap();
        assert_eq!(single, serde_json::json!("calm"));
        let many = serde_json::to_value(SearchTerms::parse("calm, tense")).unwrap();
        assert_eq!(many, serde_json::json!(["calm", "tense"]));
    }
}
