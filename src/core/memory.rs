//! Session storage using SQLite
//!
//! Keeps what the browser would otherwise hold in local storage: the
//! transcript, the conversation state, the current quick-reply chips, any
//! pending persona offer and the panel layout preference.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::config::clamp_panel_percent;
use crate::conversation::{ConversationState, Message, PersonaSuggestion};

/// A persona offer waiting for the user to accept or decline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPersona {
    pub suggestion: PersonaSuggestion,
    /// The message that triggered the offer, replayed on decline
    pub message: String,
    /// Budget validated in the same message, used if the offer is accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
}

/// Everything we know about one chat session except its transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub state: ConversationState,
    pub chips: Vec<String>,
    pub pending: Option<PendingPersona>,
    pub panel_percent: u8,
}

impl Session {
    pub fn new(panel_percent: u8) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state: ConversationState::new(),
            chips: Vec::new(),
            pending: None,
            panel_percent: clamp_panel_percent(panel_percent.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session not found: {0}")]
    NotFound(String),
}

type SessionRow = (String, String, String, Option<String>, i64);

/// Session store for conversation persistence
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    /// Create a new store with the given SQLite database path
    pub async fn new(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create an in-memory store (single connection so every query sees
    /// the same database)
    pub async fn new_in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                state TEXT NOT NULL,
                chips TEXT NOT NULL DEFAULT '[]',
                pending TEXT,
                panel_percent INTEGER NOT NULL DEFAULT 40,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                body TEXT NOT NULL,
                FOREIGN KEY (session_id) REFERENCES sessions(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_session
            ON messages(session_id, seq)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new session
    pub async fn create(&self, session: &Session) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, state, chips, pending, panel_percent)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.id)
        .bind(serde_json::to_string(&session.state)?)
        .bind(serde_json::to_string(&session.chips)?)
        .bind(encode_pending(&session.pending)?)
        .bind(i64::from(session.panel_percent))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Load a session by id
    pub async fn load(&self, session_id: &str) -> Result<Session, StoreError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, state, chips, pending, panel_percent
            FROM sessions
            WHERE id = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        let (id, state, chips, pending, panel_percent) =
            row.ok_or_else(|| StoreError::NotFound(session_id.to_string()))?;

        Ok(Session {
            id,
            state: serde_json::from_str(&state)?,
            chips: serde_json::from_str(&chips)?,
            pending: pending.as_deref().map(serde_json::from_str::<PendingPersona>).transpose()?,
            panel_percent: clamp_panel_percent(panel_percent),
        })
    }

    /// Persist the mutable parts of a session
    pub async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET state = ?, chips = ?, pending = ?, panel_percent = ?, updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(serde_json::to_string(&session.state)?)
        .bind(serde_json::to_string(&session.chips)?)
        .bind(encode_pending(&session.pending)?)
        .bind(i64::from(session.panel_percent))
        .bind(&session.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(session.id.clone()));
        }
        Ok(())
    }

    /// Append a message to a session's transcript
    pub async fn append_message(&self, session_id: &str, message: &Message) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO messages (session_id, body)
            VALUES (?, ?)
            "#,
        )
        .bind(session_id)
        .bind(serde_json::to_string(message)?)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// The full transcript in insertion order
    pub async fn transcript(&self, session_id: &str) -> Result<Vec<Message>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT body
            FROM messages
            WHERE session_id = ?
            ORDER BY seq ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(body,)| serde_json::from_str(&body).map_err(StoreError::from))
            .collect()
    }

    /// Drop every message of a session (used by "Start Over")
    pub async fn clear_transcript(&self, session_id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM messages WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Store the panel split, clamped to [30, 70]. Returns the stored value.
    pub async fn set_panel_percent(&self, session_id: &str, percent: i64) -> Result<u8, StoreError> {
        let clamped = clamp_panel_percent(percent);

        let result = sqlx::query(
            r#"
            UPDATE sessions SET panel_percent = ?, updated_at = datetime('now') WHERE id = ?
            "#,
        )
        .bind(i64::from(clamped))
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(session_id.to_string()));
        }
        Ok(clamped)
    }

    /// All session ids, most recently updated first
    pub async fn list_sessions(&self) -> Result<Vec<String>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT id FROM sessions ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Delete a session and its transcript
    pub async fn delete(&self, session_id: &str) -> Result<(), StoreError> {
        self.clear_transcript(session_id).await?;

        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn encode_pending(pending: &Option<PendingPersona>) -> Result<Option<String>, serde_json::Error> {
    pending.as_ref().map(serde_json::to_string).transpose()
}
