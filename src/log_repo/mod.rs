// SQLite store for uploaded logs: upload metadata, parsed records keyed by log id,
// and rendered view CSVs cached per (log, view).

mod rows;

use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, Transaction};
use tracing::{debug, instrument};

use crate::error::GcError;
use crate::models::GcRecord;
use crate::projector::View;
use rows::EventRow;

/// One uploaded log.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i64,
    pub created_at: i64,
    pub filename: String,
    pub notes: String,
    pub event_count: i64,
}

/// SQLite's default cap on bound variables in one statement.
const SQLITE_MAX_VARIABLES: usize = 32766;

/// Largest batch that keeps one INSERT within SQLITE_MAX_VARIABLES.
pub const MAX_BATCH_SIZE: usize = SQLITE_MAX_VARIABLES / rows::BINDS_PER_ROW;

pub struct LogRepo {
    pool: SqlitePool,
    batch_size: usize,
}

impl LogRepo {
    pub async fn connect(path: &str, max_pool_size: u32, batch_size: usize) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self {
            pool,
            batch_size: batch_size.clamp(1, MAX_BATCH_SIZE),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Rows per INSERT, after clamping to 1..=MAX_BATCH_SIZE.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS gc_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at INTEGER NOT NULL,
                filename TEXT NOT NULL,
                notes TEXT NOT NULL,
                event_count INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS gc_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                log_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                timestamp REAL NOT NULL,
                gc_timestamp REAL NOT NULL,
                collector TEXT NOT NULL,
                yg_util_pre INTEGER,
                yg_util_post INTEGER,
                yg_size_post INTEGER,
                yg_pause_time REAL,
                tenured_util_pre INTEGER,
                tenured_util_post INTEGER,
                tenured_size_post INTEGER,
                tenured_pause_time REAL,
                heap_util_pre INTEGER NOT NULL,
                heap_util_post INTEGER NOT NULL,
                heap_size_post INTEGER NOT NULL,
                perm_util_pre INTEGER,
                perm_util_post INTEGER,
                perm_size_post INTEGER,
                perm_pause_time REAL,
                pause_time REAL,
                user_time REAL NOT NULL,
                sys_time REAL NOT NULL,
                real_time REAL NOT NULL,
                system INTEGER
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_events_log_timestamp ON gc_events(log_id, timestamp)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS gc_views (
                log_id INTEGER NOT NULL,
                view_id INTEGER NOT NULL,
                csv TEXT NOT NULL,
                PRIMARY KEY (log_id, view_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert the upload row; returns its id.
    #[instrument(skip(self, notes), fields(repo = "logs", operation = "create_log"))]
    pub async fn create_log(&self, filename: &str, notes: &str) -> anyhow::Result<i64> {
        let mut tx = self.pool.begin().await?;
        let log_id = insert_log(&mut tx, filename, notes).await?;
        tx.commit().await?;
        Ok(log_id)
    }

    /// Store records for `log_id` in one transaction, batch_size rows per INSERT.
    #[instrument(skip(self, records), fields(repo = "logs", operation = "store_records", records_count = records.len()))]
    pub async fn store_records(&self, log_id: i64, records: &[GcRecord]) -> anyhow::Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        self.insert_events(&mut tx, log_id, records).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Upload row and its records in one transaction; a failed insert leaves no log behind.
    #[instrument(skip(self, notes, records), fields(repo = "logs", operation = "create_log_with_records", records_count = records.len()))]
    pub async fn create_log_with_records(
        &self,
        filename: &str,
        notes: &str,
        records: &[GcRecord],
    ) -> anyhow::Result<i64> {
        let mut tx = self.pool.begin().await?;
        let log_id = insert_log(&mut tx, filename, notes).await?;
        self.insert_events(&mut tx, log_id, records).await?;
        tx.commit().await?;
        Ok(log_id)
    }

    async fn insert_events(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        log_id: i64,
        records: &[GcRecord],
    ) -> anyhow::Result<()> {
        for chunk in records.chunks(self.batch_size) {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
                "INSERT INTO gc_events (log_id, {}) ",
                rows::EVENT_COLUMNS
            ));
            qb.push_values(chunk, |b, record| rows::push_record(b, log_id, record));
            qb.build().execute(&mut **tx).await?;
            debug!(batch = chunk.len(), "stored gc event batch");
        }
        sqlx::query(
            "UPDATE gc_logs SET event_count = (SELECT COUNT(*) FROM gc_events WHERE log_id = $1) WHERE id = $1",
        )
        .bind(log_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Records for `log_id` ordered by timestamp. No rows is UnknownLog; an unknown kind
    /// tag aborts the load with UnsupportedKind.
    #[instrument(skip(self), fields(repo = "logs", operation = "get_records"))]
    pub async fn get_records(&self, log_id: i64) -> anyhow::Result<Vec<GcRecord>> {
        let rows: Vec<EventRow> = sqlx::query_as(&format!(
            "SELECT {} FROM gc_events WHERE log_id = $1 ORDER BY timestamp ASC, id ASC",
            rows::EVENT_COLUMNS
        ))
        .bind(log_id)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(GcError::UnknownLog(log_id).into());
        }
        rows.into_iter().map(EventRow::into_record).collect()
    }

    pub async fn get_log(&self, log_id: i64) -> anyhow::Result<Option<LogEntry>> {
        let entry = sqlx::query_as::<_, LogEntry>(
            "SELECT id, created_at, filename, notes, event_count FROM gc_logs WHERE id = $1",
        )
        .bind(log_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    /// Most recent uploads first.
    pub async fn list_logs(&self) -> anyhow::Result<Vec<LogEntry>> {
        let entries = sqlx::query_as::<_, LogEntry>(
            "SELECT id, created_at, filename, notes, event_count FROM gc_logs ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    #[instrument(skip(self, csv), fields(repo = "logs", operation = "save_view", view = %view))]
    pub async fn save_view(&self, log_id: i64, view: View, csv: &str) -> anyhow::Result<()> {
        sqlx::query("INSERT OR REPLACE INTO gc_views (log_id, view_id, csv) VALUES ($1, $2, $3)")
            .bind(log_id)
            .bind(view.id())
            .bind(csv)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_view(&self, log_id: i64, view: View) -> anyhow::Result<Option<String>> {
        let csv = sqlx::query_scalar::<_, String>(
            "SELECT csv FROM gc_views WHERE log_id = $1 AND view_id = $2",
        )
        .bind(log_id)
        .bind(view.id())
        .fetch_optional(&self.pool)
        .await?;
        Ok(csv)
    }

    /// Views already cached for a log, in id order.
    pub async fn cached_views(&self, log_id: i64) -> anyhow::Result<Vec<View>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT view_id FROM gc_views WHERE log_id = $1 ORDER BY view_id ASC",
        )
        .bind(log_id)
        .fetch_all(&self.pool)
        .await?;
        ids.into_iter()
            .map(|id| View::from_id(id).map_err(anyhow::Error::from))
            .collect()
    }

    /// Delete a log with its records and cached views. Returns false when the id is unknown.
    #[instrument(skip(self), fields(repo = "logs", operation = "delete_log"))]
    pub async fn delete_log(&self, log_id: i64) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM gc_events WHERE log_id = $1")
            .bind(log_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM gc_views WHERE log_id = $1")
            .bind(log_id)
            .execute(&mut *tx)
            .await?;
        let r = sqlx::query("DELETE FROM gc_logs WHERE id = $1")
            .bind(log_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(r.rows_affected() > 0)
    }
}

async fn insert_log(
    tx: &mut Transaction<'_, Sqlite>,
    filename: &str,
    notes: &str,
) -> anyhow::Result<i64> {
    let created_at = chrono::Utc::now().timestamp_millis();
    let r = sqlx::query("INSERT INTO gc_logs (created_at, filename, notes) VALUES ($1, $2, $3)")
        .bind(created_at)
        .bind(filename)
        .bind(notes)
        .execute(&mut **tx)
        .await?;
    Ok(r.last_insert_rowid())
}
