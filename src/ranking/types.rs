//! Ranking payload and project records
//!
//! Upstream data is untrusted: every field except `token_name` may be
//! missing, null, or of an unexpected JSON type, and numbers sometimes
//! arrive as strings. Deserialization never fails on those fields; it maps
//! anything unusable to `None`.

use crate::logger::{self, LogTag};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One token-sale project from the ranking list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Identity key, also the entry stored in the seen-set
    #[serde(deserialize_with = "de_token_name")]
    pub token_name: String,
    #[serde(default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    /// Completion percentage of the sale (may exceed 100)
    #[serde(default, deserialize_with = "de_opt_f64", skip_serializing_if = "Option::is_none")]
    pub progress_buy: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64", skip_serializing_if = "Option::is_none")]
    pub current_price_sui: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub link_website: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub link_twitter: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub link_telegram: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub created_address: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Move coin type, used to build the detail page URL
    #[serde(default, deserialize_with = "de_opt_string", skip_serializing_if = "Option::is_none")]
    pub coin_type: Option<String>,
}

impl Project {
    /// Minimal record, mostly useful for tests and fixtures
    pub fn named(token_name: impl Into<String>) -> Self {
        Self {
            token_name: token_name.into(),
            token_symbol: None,
            progress_buy: None,
            current_price_sui: None,
            link_website: None,
            link_twitter: None,
            link_telegram: None,
            created_address: None,
            created_at: None,
            coin_type: None,
        }
    }

    /// Buy progress with absence treated as 0
    pub fn progress(&self) -> f64 {
        self.progress_buy.unwrap_or(0.0)
    }
}

/// Object embedded after the payload marker in the ranking response
///
/// `data` is kept as raw JSON so a single malformed entry does not discard
/// the whole list; `projects()` converts entries one by one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RankingPayload {
    #[serde(default)]
    pub data: Option<Value>,
    /// Everything else upstream sends (paging info, totals)
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl RankingPayload {
    /// Build a payload from already-typed projects
    pub fn from_projects(projects: &[Project]) -> Self {
        let data = projects
            .iter()
            .filter_map(|p| serde_json::to_value(p).ok())
            .collect();
        Self {
            data: Some(Value::Array(data)),
            meta: Map::new(),
        }
    }

    /// Projects in upstream order
    ///
    /// Returns `None` when `data` is absent or not a list. Entries that are
    /// not objects or carry no usable `token_name` are skipped with a warning.
    pub fn projects(&self) -> Option<Vec<Project>> {
        let entries = self.data.as_ref()?.as_array()?;

        let mut projects = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match Project::deserialize(entry) {
                Ok(project) => projects.push(project),
                Err(e) => logger::warning(
                    LogTag::Filter,
                    &format!("Skipping ranking entry #{}: {}", index, e),
                ),
            }
        }
        Some(projects)
    }
}

fn de_token_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match value_to_string(Value::deserialize(deserializer)?) {
        Some(name) => Ok(name),
        None => Err(serde::de::Error::custom("token_name is missing or empty")),
    }
}

fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|v| v.is_finite()))
}

/// Strings pass through, numbers are stringified, blank and other types are absent
fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_record() {
        let project: Project = serde_json::from_value(json!({
            "token_name": "Sui Frog",
            "token_symbol": "FROG",
            "progress_buy": 91.25,
            "current_price_sui": 0.0000123,
            "link_website": "https://frog.example",
            "link_twitter": "https://x.com/frog",
            "link_telegram": "https://t.me/frog",
            "created_address": "0xabc",
            "created_at": "2024-12-01T10:00:00Z",
            "coin_type": "0x1::frog::FROG",
            "unknown_extra": [1, 2, 3]
        }))
        .unwrap();

        assert_eq!(project.token_name, "Sui Frog");
        assert_eq!(project.progress(), 91.25);
        assert_eq!(project.coin_type.as_deref(), Some("0x1::frog::FROG"));
    }

    #[test]
    fn test_lenient_field_types() {
        let project: Project = serde_json::from_value(json!({
            "token_name": "X",
            "progress_buy": "85.5",
            "current_price_sui": null,
            "link_website": "",
            "link_twitter": 42,
            "created_at": 1733047200,
            "coin_type": {"nested": true}
        }))
        .unwrap();

        assert_eq!(project.progress_buy, Some(85.5));
        assert_eq!(project.current_price_sui, None);
        assert_eq!(project.link_website, None);
        assert_eq!(project.link_twitter.as_deref(), Some("42"));
        assert_eq!(project.created_at.as_deref(), Some("1733047200"));
        assert_eq!(project.coin_type, None);
    }

    #[test]
    fn test_missing_progress_defaults_to_zero() {
        let project: Project = serde_json::from_value(json!({"token_name": "X"})).unwrap();
        assert_eq!(project.progress_buy, None);
        assert_eq!(project.progress(), 0.0);
    }

    #[test]
    fn test_payload_skips_unusable_entries() {
        let payload: RankingPayload = serde_json::from_value(json!({
            "data": [
                {"token_name": "A", "progress_buy": 90},
                {"token_symbol": "NONAME"},
                "not an object",
                {"token_name": "  "},
                {"token_name": "B"}
            ],
            "total": 5
        }))
        .unwrap();

        let names: Vec<String> = payload
            .projects()
            .unwrap()
            .into_iter()
            .map(|p| p.token_name)
            .collect();
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(payload.meta.get("total"), Some(&json!(5)));
    }

    #[test]
    fn test_payload_without_data_list() {
        let missing: RankingPayload = serde_json::from_value(json!({"total": 0})).unwrap();
        assert!(missing.projects().is_none());

        let wrong_type: RankingPayload =
            serde_json::from_value(json!({"data": {"token_name": "A"}})).unwrap();
        assert!(wrong_type.projects().is_none());
    }

    #[test]
    fn test_from_projects_keeps_order() {
        let mut a = Project::named("A");
        a.progress_buy = Some(99.0);
        let payload = RankingPayload::from_projects(&[a.clone(), Project::named("B")]);

        let projects = payload.projects().unwrap();
        assert_eq!(projects[0], a);
        assert_eq!(projects[1].token_name, "B");
    }
}
