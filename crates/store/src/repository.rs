use chrono::{DateTime, Utc};
use msgvault_core::{AccountStatus, NewMessage};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use sqlx::{FromRow, QueryBuilder, Sqlite};
use std::sync::Arc;

use crate::error::StoreResult;

/// Persisted account record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub source: String,
    pub label: String,
    pub identity: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Persisted message record. `ts` and `created_at` are unix milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredMessage {
    pub id: i64,
    pub source: String,
    pub account_label: String,
    pub thread_id: Option<String>,
    pub sender_id: Option<String>,
    pub sender_name: Option<String>,
    pub text: Option<String>,
    pub ts: i64,
    pub metadata_json: String,
    pub created_at: i64,
}

impl StoredMessage {
    /// Event time as a timezone-aware timestamp.
    pub fn ts_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.ts).unwrap_or_else(Utc::now)
    }

    /// Parsed metadata bag; malformed rows degrade to an empty object.
    pub fn metadata(&self) -> serde_json::Value {
        serde_json::from_str(&self.metadata_json)
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
    }
}

/// Filter set shared by the page query and the count query.
///
/// Unset fields are unconstrained. `query` is raw user text; it is turned
/// into an FTS match expression (or dropped when it has no tokens) at
/// query-build time so both queries agree on the predicate.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub source: Option<String>,
    pub query: Option<String>,
    pub account_label: Option<String>,
    pub thread_id: Option<String>,
    pub from_ts: Option<i64>,
    pub to_ts: Option<i64>,
}

impl SearchFilters {
    fn fts_match(&self) -> Option<String> {
        self.query.as_deref().and_then(fts_match_expression)
    }
}

/// Build an FTS5 match expression from free text.
///
/// Tokens are lowercased alphanumeric runs, individually quoted and
/// AND-joined so user input can never inject FTS syntax. Returns `None`
/// when the text yields no tokens, which the caller treats as "no text
/// constraint".
pub fn fts_match_expression(query: &str) -> Option<String> {
    let tokens: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{}\"", t.to_lowercase()))
        .collect();

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" AND "))
    }
}

const MESSAGE_COLUMNS: &str = "m.id, m.source, m.account_label, m.thread_id, m.sender_id, \
     m.sender_name, m.text, m.ts, m.metadata_json, m.created_at";

/// Data access layer over the shared connection pool.
pub struct Repository {
    pool: Arc<SqlitePool>,
}

impl Repository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Insert the account row if the label is absent; existing rows are
    /// never overwritten, so reconnects are idempotent.
    pub async fn upsert_account(&self, source: &str, label: &str, identity: &str) -> StoreResult<()> {
        let now = Utc::now().timestamp_millis();
        sqlx::query(
            r#"
            INSERT INTO accounts (source, label, identity, status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            ON CONFLICT(label) DO NOTHING
            "#,
        )
        .bind(source)
        .bind(label)
        .bind(identity)
        .bind(AccountStatus::Active.as_str())
        .bind(now)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_account(&self, label: &str) -> StoreResult<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, source, label, identity, status, created_at, updated_at
            FROM accounts WHERE label = ?1
            "#,
        )
        .bind(label)
        .fetch_optional(&*self.pool)
        .await?;
        Ok(row)
    }

    pub async fn account_count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&*self.pool)
            .await?;
        Ok(count)
    }

    /// Append one canonical message record. Always inserts; duplicates
    /// from overlapping backfill and live windows are preserved as-is.
    pub async fn append_message(&self, msg: &NewMessage) -> StoreResult<i64> {
        let metadata_json = serde_json::to_string(&msg.metadata)?;
        let now = Utc::now().timestamp_millis();
        let result = sqlx::query(
            r#"
            INSERT INTO messages
              (source, account_label, thread_id, sender_id, sender_name, text, ts, metadata_json, created_at)
            VALUES
              (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&msg.source)
        .bind(&msg.account_label)
        .bind(&msg.thread_id)
        .bind(&msg.sender_id)
        .bind(&msg.sender_name)
        .bind(&msg.text)
        .bind(msg.ts.timestamp_millis())
        .bind(metadata_json)
        .bind(now)
        .execute(&*self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// One result page, ordered by event time descending with the row id
    /// breaking ties for determinism.
    ///
    /// `limit` and `offset` are expected pre-clamped by the caller.
    pub async fn search_messages(
        &self,
        filters: &SearchFilters,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<StoredMessage>> {
        let mut builder = build_filtered_query(MESSAGE_COLUMNS, filters);
        builder.push(" ORDER BY m.ts DESC, m.id DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<StoredMessage>()
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows)
    }

    /// Total size of the filtered set, irrespective of pagination. Uses
    /// the same predicate builder as [`search_messages`] so the two
    /// cannot drift.
    ///
    /// [`search_messages`]: Repository::search_messages
    pub async fn count_messages(&self, filters: &SearchFilters) -> StoreResult<i64> {
        let mut builder = build_filtered_query("COUNT(*)", filters);
        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&*self.pool)
            .await?;
        Ok(count)
    }
}

fn build_filtered_query<'a>(
    select: &str,
    filters: &'a SearchFilters,
) -> QueryBuilder<'a, Sqlite> {
    let mut builder = QueryBuilder::new(format!("SELECT {select} FROM messages m"));
    let fts_match = filters.fts_match();

    if fts_match.is_some() {
        builder.push(" JOIN messages_fts ON messages_fts.rowid = m.id");
    }

    builder.push(" WHERE 1 = 1");

    if let Some(source) = &filters.source {
        builder.push(" AND m.source = ").push_bind(source);
    }
    if let Some(label) = &filters.account_label {
        builder.push(" AND m.account_label = ").push_bind(label);
    }
    if let Some(thread_id) = &filters.thread_id {
        builder.push(" AND m.thread_id = ").push_bind(thread_id);
    }
    if let Some(from_ts) = filters.from_ts {
        builder.push(" AND m.ts >= ").push_bind(from_ts);
    }
    if let Some(to_ts) = filters.to_ts {
        builder.push(" AND m.ts <= ").push_bind(to_ts);
    }
    if let Some(expr) = fts_match {
        builder.push(" AND messages_fts MATCH ").push_bind(expr);
    }

    builder
}
