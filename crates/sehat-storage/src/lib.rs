//! Chat-history persistence.
//!
//! Every handled request logs two turns (user message, bot reply) to the
//! `chat_history` table. Persistence is best-effort by contract: the
//! gateway logs a warning and still answers when a write fails, so nothing
//! here is on the response critical path.
//!
//! Two backends behind one trait: SQLite via `sqlx` for real deployments,
//! and an in-memory store for tests and keyless local runs. The schema is
//! created explicitly at startup by [`SqliteStore::connect`], never lazily
//! per request.

use std::str::FromStr;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tracing::info;

use sehat_core::{BotReply, ChatQuery};

// ─────────────────────────────────────────────
// Turn model
// ─────────────────────────────────────────────

/// Who produced a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Bot,
}

impl TurnRole {
    /// Value stored in the `message_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Bot => "bot",
        }
    }
}

/// One logged chat turn.
#[derive(Clone, Debug)]
pub struct ChatTurn {
    pub user_id: Option<String>,
    pub message: String,
    pub role: TurnRole,
    pub is_voice_input: bool,
    pub is_voice_output: bool,
    pub created_at: DateTime<Utc>,
    pub session_id: Option<String>,
    pub query_category: Option<String>,
    pub response_confidence: Option<f32>,
}

impl ChatTurn {
    /// The user side of an exchange.
    pub fn user_turn(query: &ChatQuery) -> Self {
        ChatTurn {
            user_id: query.user_id.clone(),
            message: query.text.clone(),
            role: TurnRole::User,
            is_voice_input: query.is_voice_input,
            is_voice_output: false,
            created_at: Utc::now(),
            session_id: Some(query.session_id.clone()),
            query_category: None,
            response_confidence: None,
        }
    }

    /// The bot side of an exchange.
    pub fn bot_turn(query: &ChatQuery, reply: &BotReply, category: &str) -> Self {
        ChatTurn {
            user_id: query.user_id.clone(),
            message: reply.message.clone(),
            role: TurnRole::Bot,
            is_voice_input: false,
            is_voice_output: query.is_voice_input,
            created_at: Utc::now(),
            session_id: Some(query.session_id.clone()),
            query_category: Some(category.to_string()),
            response_confidence: Some(reply.confidence),
        }
    }
}

/// Storage failures. Memory writes never fail; SQLite ones can.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// What every chat-log backend offers.
#[async_trait]
pub trait ChatLogRepository {
    async fn append_turn(&self, turn: ChatTurn) -> Result<(), StorageError>;
    async fn turns_for_session(&self, session_id: &str) -> Result<Vec<ChatTurn>, StorageError>;
}

// ─────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────

/// Keeps turns in a `Vec`; used by tests and keyless local runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    turns: RwLock<Vec<ChatTurn>>,
}

#[async_trait]
impl ChatLogRepository for MemoryStore {
    async fn append_turn(&self, turn: ChatTurn) -> Result<(), StorageError> {
        // A poisoned lock still holds valid turn data; recover it rather
        // than panic inside the best-effort logging path.
        self.turns
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(turn);
        Ok(())
    }

    async fn turns_for_session(&self, session_id: &str) -> Result<Vec<ChatTurn>, StorageError> {
        let turns = self.turns.read().unwrap_or_else(|e| e.into_inner());
        Ok(turns
            .iter()
            .filter(|t| t.session_id.as_deref() == Some(session_id))
            .cloned()
            .collect())
    }
}

// ─────────────────────────────────────────────
// SQLite store
// ─────────────────────────────────────────────

/// SQLite-backed store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect and create the schema if it doesn't exist yet.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(sqlx::Error::from)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let store = SqliteStore { pool };
        store.ensure_schema().await?;
        info!("Chat history database ready");
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT,
                message TEXT NOT NULL,
                message_type TEXT NOT NULL,
                is_voice_input INTEGER NOT NULL DEFAULT 0,
                is_voice_output INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                session_id TEXT,
                query_category TEXT,
                response_confidence REAL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ChatLogRepository for SqliteStore {
    async fn append_turn(&self, turn: ChatTurn) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO chat_history
                (user_id, message, message_type, is_voice_input, is_voice_output,
                 created_at, session_id, query_category, response_confidence)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&turn.user_id)
        .bind(&turn.message)
        .bind(turn.role.as_str())
        .bind(turn.is_voice_input)
        .bind(turn.is_voice_output)
        .bind(turn.created_at.to_rfc3339())
        .bind(&turn.session_id)
        .bind(&turn.query_category)
        .bind(turn.response_confidence)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn turns_for_session(&self, session_id: &str) -> Result<Vec<ChatTurn>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, message, message_type, is_voice_input, is_voice_output,
                   created_at, session_id, query_category, response_confidence
            FROM chat_history
            WHERE session_id = ?
            ORDER BY id
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        let turns = rows
            .into_iter()
            .map(|row| {
                let message_type: String = row.get("message_type");
                let created_at: String = row.get("created_at");
                ChatTurn {
                    user_id: row.get("user_id"),
                    message: row.get("message"),
                    role: if message_type == "bot" {
                        TurnRole::Bot
                    } else {
                        TurnRole::User
                    },
                    is_voice_input: row.get("is_voice_input"),
                    is_voice_output: row.get("is_voice_output"),
                    created_at: DateTime::parse_from_rfc3339(&created_at)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now()),
                    session_id: row.get("session_id"),
                    query_category: row.get("query_category"),
                    response_confidence: row.get("response_confidence"),
                }
            })
            .collect();
        Ok(turns)
    }
}

// ─────────────────────────────────────────────
// Store — backend dispatch
// ─────────────────────────────────────────────

/// The configured backend, chosen once at startup.
#[derive(Debug)]
pub enum Store {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl Store {
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::default())
    }

    pub async fn sqlite(url: &str) -> Result<Self, StorageError> {
        Ok(Store::Sqlite(SqliteStore::connect(url).await?))
    }
}

#[async_trait]
impl ChatLogRepository for Store {
    async fn append_turn(&self, turn: ChatTurn) -> Result<(), StorageError> {
        match self {
            Store::Memory(s) => s.append_turn(turn).await,
            Store::Sqlite(s) => s.append_turn(turn).await,
        }
    }

    async fn turns_for_session(&self, session_id: &str) -> Result<Vec<ChatTurn>, StorageError> {
        match self {
            Store::Memory(s) => s.turns_for_session(session_id).await,
            Store::Sqlite(s) => s.turns_for_session(session_id).await,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
