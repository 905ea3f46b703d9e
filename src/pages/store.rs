//! Page store implementation using SQLite

use super::models::*;
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

const SELECT_COLUMNS: &str =
    "SELECT id, title, content_json, created_at, updated_at, is_public, share_token FROM pages";

/// Page store
#[derive(Clone)]
pub struct PageStore {
    pool: SqlitePool,
}

impl PageStore {
    /// Connect to the configured database and ensure the schema exists
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to page database");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database, mainly for tests
    pub async fn in_memory() -> Result<Self> {
        // Every connection to :memory: is a separate database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pages (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content_json TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                is_public INTEGER NOT NULL DEFAULT 0,
                share_token TEXT UNIQUE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_pages_updated_at ON pages(updated_at)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a page
    pub async fn create(&self, request: PageCreate) -> Result<Page> {
        validate_title(&request.title)?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        let content = request.content.unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO pages (id, title, content_json, created_at, updated_at, is_public, share_token)
            VALUES (?, ?, ?, ?, ?, 0, NULL)
            "#,
        )
        .bind(&id)
        .bind(&request.title)
        .bind(serde_json::to_string(&content)?)
        .bind(timestamp(now))
        .bind(timestamp(now))
        .execute(&self.pool)
        .await?;

        debug!("Created page: {}", id);

        Ok(Page {
            id,
            title: request.title,
            content,
            created_at: now,
            updated_at: now,
            is_public: false,
            share_token: None,
        })
    }

    /// Get a page by id
    pub async fn get(&self, id: &str) -> Result<Option<Page>> {
        let row: Option<DbPage> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Page::try_from).transpose().map_err(Error::from)
    }

    /// Get a page by share token; only public pages are returned
    pub async fn get_shared(&self, token: &str) -> Result<Option<Page>> {
        let row: Option<DbPage> = sqlx::query_as(&format!(
            "{} WHERE share_token = ? AND is_public = 1",
            SELECT_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        if row.is_none() {
            debug!("No public page for share token");
        }

        row.map(Page::try_from).transpose().map_err(Error::from)
    }

    /// List pages, most recently updated first
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Page>> {
        let (skip, limit) = params.bounds();

        let rows: Vec<DbPage> = sqlx::query_as(&format!(
            "{} ORDER BY updated_at DESC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Page::try_from(row).map_err(Error::from))
            .collect()
    }

    /// Apply a partial update
    pub async fn update(&self, id: &str, update: PageUpdate) -> Result<Option<Page>> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }

        let Some(mut page) = self.get(id).await? else {
            return Ok(None);
        };

        if let Some(title) = update.title {
            page.title = title;
        }
        if let Some(content) = update.content {
            page.content = content;
        }
        page.updated_at = Utc::now();

        sqlx::query("UPDATE pages SET title = ?, content_json = ?, updated_at = ? WHERE id = ?")
            .bind(&page.title)
            .bind(serde_json::to_string(&page.content)?)
            .bind(timestamp(page.updated_at))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Some(page))
    }

    /// Delete a page; returns whether it existed
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Make a page public under a fresh share token
    pub async fn share(&self, id: &str) -> Result<Option<String>> {
        let token = uuid::Uuid::new_v4().to_string();

        let result = sqlx::query(
            "UPDATE pages SET is_public = 1, share_token = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&token)
        .bind(timestamp(Utc::now()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        info!("Shared page: {}", id);
        Ok(Some(token))
    }

    /// Make a page private and drop its share token
    pub async fn unshare(&self, id: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE pages SET is_public = 0, share_token = NULL, updated_at = ? WHERE id = ?",
        )
        .bind(timestamp(Utc::now()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}

/// Fixed-width RFC 3339 so text ordering matches time ordering
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
