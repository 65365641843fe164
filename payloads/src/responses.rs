use crate::{ArticleId, UserId};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Raw paginated response from the backend list endpoints.
///
/// Converted into [`crate::ListResult`] before reaching the bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "type", default)]
    pub article_type: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<Timestamp>,
}

/// Directory entry returned by `GET /auth/users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
}

fn default_true() -> bool {
    true
}

impl User {
    /// "First Last" when the backend knows the name, else the username.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.first_name, &self.last_name]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            self.username.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Opaque statistics object from `GET /stats`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleStats(pub serde_json::Value);

impl ArticleStats {
    /// Read a numeric counter, if the backend reports one under `key`.
    pub fn counter(&self, key: &str) -> Option<u64> {
        self.0.get(key)?.as_u64()
    }
}

/// Envelope returned by `POST /api/rag/search`, whatever the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagSearchResponse {
    pub success: bool,
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RagSearchResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            context: String::new(),
            query: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, last: Option<&str>) -> User {
        User {
            id: UserId(7),
            username: "jdupont".into(),
            email: None,
            first_name: first.map(Into::into),
            last_name: last.map(Into::into),
            department: None,
            is_active: true,
            is_staff: false,
        }
    }

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(
            user(Some("Jeanne"), Some("Dupont")).display_name(),
            "Jeanne Dupont"
        );
        assert_eq!(user(None, Some("Dupont")).display_name(), "Dupont");
        assert_eq!(user(Some(" "), None).display_name(), "jdupont");
    }

    #[test]
    fn user_defaults_missing_flags() {
        let user: User =
            serde_json::from_str(r#"{"id": 3, "username": "m.leroy"}"#)
                .unwrap();
        assert!(user.is_active);
        assert!(!user.is_staff);
    }

    #[test]
    fn failure_envelope_omits_query() {
        let body =
            serde_json::to_value(RagSearchResponse::failure("boom")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "success": false,
                "context": "",
                "error": "boom",
            })
        );
    }

    #[test]
    fn article_reads_backend_type_field() {
        let article: Article = serde_json::from_str(
            r#"{"id": 12, "title": "Arrêt technique", "type": "actualite",
                "published_at": "2025-03-01T08:00:00Z", "views": 4}"#,
        )
        .unwrap();
        assert_eq!(article.article_type.as_deref(), Some("actualite"));
        assert!(article.published_at.is_some());
    }
}
