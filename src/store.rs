//! SQLite Store Access
//!
//! Per-operation connection scoping and statement execution. The engine
//! opens one connection at the start of each operation and releases it
//! before the outcome is delivered; nothing is pooled or reused across
//! calls.

use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Connection, Row, SqliteConnection};
use thiserror::Error;

/// Store-level failures. These never reach the engine's callers; the
/// engine logs them and maps them to the operation's negative outcome.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not open the database at the configured path
    #[error("failed to open database at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    /// Statement execution failed (malformed SQL, constraint violation,
    /// connection fault)
    #[error("statement execution failed: {0}")]
    Execute(#[from] sqlx::Error),

    /// The `auth_user` statement returned rows without a `usergroups`
    /// column
    #[error("result row is missing the usergroups column")]
    MissingGroupsColumn(#[source] sqlx::Error),
}

/// One row returned by the operator's `auth_user` statement.
#[derive(Debug)]
pub struct CredentialRow {
    /// Optional `username` column, used only for logging.
    pub username: Option<String>,
    /// Nullable `usergroups` column: a comma-delimited group list.
    pub usergroups: Option<String>,
}

impl CredentialRow {
    fn from_row(row: &SqliteRow) -> Result<Self, StoreError> {
        let usergroups = row
            .try_get::<Option<String>, _>("usergroups")
            .map_err(StoreError::MissingGroupsColumn)?;
        let username = row.try_get::<Option<String>, _>("username").ok().flatten();
        Ok(Self {
            username,
            usergroups,
        })
    }
}

/// A store connection scoped to a single engine operation.
///
/// Call [`release`](Self::release) on the normal path for a graceful
/// close. On early-exit paths dropping the scope closes the underlying
/// handle, so a connection is never leaked.
///
/// Opening does not create a missing database file; a missing store is a
/// per-call [`StoreError::Open`].
pub struct ConnectionScope {
    conn: SqliteConnection,
}

impl ConnectionScope {
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(false);

        let conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|source| StoreError::Open {
                path: path.to_string(),
                source,
            })?;

        Ok(Self { conn })
    }

    /// Run the `auth_user` statement and map its rows.
    pub async fn fetch_credentials(
        &mut self,
        sql: &str,
        username: &str,
        hashed_password: &str,
    ) -> Result<Vec<CredentialRow>, StoreError> {
        let rows = sqlx::query(sql)
            .bind(username)
            .bind(hashed_password)
            .fetch_all(&mut self.conn)
            .await?;

        rows.iter().map(CredentialRow::from_row).collect()
    }

    /// Run a write statement and report how many rows it touched.
    pub async fn execute(&mut self, sql: &str, params: &[&str]) -> Result<u64, StoreError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(*param);
        }

        Ok(query.execute(&mut self.conn).await?.rows_affected())
    }

    /// Gracefully close the connection. Close failures are logged rather
    /// than surfaced; the operation's outcome is already decided by this
    /// point.
    pub async fn release(self) {
        if let Err(error) = self.conn.close().await {
            tracing::warn!(error = %error, "failed to close store connection");
        }
    }
}
