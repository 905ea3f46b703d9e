//! Data models for pages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Maximum number of pages returned by a single list call
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A rich-text document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    /// Editor nodes, stored as an opaque JSON array
    pub content: Vec<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_public: bool,
    #[serde(default)]
    pub share_token: Option<String>,
}

/// Database row for a page
#[derive(Debug, Clone, FromRow)]
pub struct DbPage {
    pub id: String,
    pub title: String,
    pub content_json: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_public: bool,
    pub share_token: Option<String>,
}

impl TryFrom<DbPage> for Page {
    type Error = serde_json::Error;

    fn try_from(row: DbPage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            title: row.title,
            content: serde_json::from_str(&row.content_json)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_public: row.is_public,
            share_token: row.share_token,
        })
    }
}

/// Create page request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCreate {
    pub title: String,
    #[serde(default)]
    pub content: Option<Vec<Value>>,
}

/// Partial page update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<Value>>,
}

/// Pagination for page listing
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    MAX_PAGE_LIMIT
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl ListParams {
    /// Offset and limit clamped to the accepted range
    pub fn bounds(&self) -> (i64, i64) {
        (self.skip.max(0), self.limit.clamp(0, MAX_PAGE_LIMIT))
    }
}

/// Share page response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub share_token: String,
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_uses_camel_case() {
        let now = Utc::now();
        let page = Page {
            id: "p1".to_string(),
            title: "Notes".to_string(),
            content: vec![json!({"type": "p", "children": [{"text": "hi"}]})],
            created_at: now,
            updated_at: now,
            is_public: true,
            share_token: Some("tok".to_string()),
        };

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["isPublic"], true);
        assert_eq!(value["shareToken"], "tok");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("is_public").is_none());
    }

    #[test]
    fn test_list_params_bounds() {
        let params = ListParams { skip: -5, limit: 500 };
        assert_eq!(params.bounds(), (0, MAX_PAGE_LIMIT));
        assert_eq!(ListParams::default().bounds(), (0, 100));
    }

    #[test]
    fn test_share_response_shape() {
        let value = serde_json::to_value(ShareResponse {
            share_token: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(value, json!({"shareToken": "abc"}));
    }
}
