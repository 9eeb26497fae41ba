//! Authentication Engine
//!
//! The facade the host calls. Each operation checks its template
//! precondition, hashes the supplied credentials, executes the bound
//! statement through a [`ConnectionScope`], and maps the result to the
//! operation's outcome.
//!
//! Callers never see store internals: connection faults, malformed SQL and
//! constraint violations are logged and collapse to `Denied` / `false`.
//! Operations hold no shared mutable state, so concurrent calls on one
//! engine are safe without locking.

use crate::config::EngineConfig;
use crate::hasher::CredentialHasher;
use crate::startup::{self, StartupReport};
use crate::store::ConnectionScope;

/// Outcome of a credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No single matching credential, or the operation is disabled or
    /// failed at the store.
    Denied,
    /// Authenticated; carries the user's group memberships.
    ///
    /// A matched row whose `usergroups` column is NULL grants a single
    /// empty-string group, which group-splitting callers rely on to tell
    /// "authenticated without groups" apart from a denial.
    Granted(Vec<String>),
}

/// Credential-verification engine over an operator-defined SQLite schema.
///
/// Construction never fails: the configuration is audited once (see
/// [`StartupReport`]) and missing capabilities degrade the affected
/// operation instead of blocking the engine.
pub struct AuthEngine {
    config: EngineConfig,
    hasher: CredentialHasher,
    startup: StartupReport,
}

impl AuthEngine {
    pub fn new(config: EngineConfig) -> Self {
        let startup = startup::audit(&config);
        let hasher = CredentialHasher::new(config.secret.clone());
        Self {
            config,
            hasher,
            startup,
        }
    }

    /// Capability snapshot taken at construction.
    pub fn startup_report(&self) -> &StartupReport {
        &self.startup
    }

    /// Check a credential and resolve the user's groups.
    ///
    /// Denies when the `auth_user` template is empty, when the store
    /// errors, or when the statement matches anything other than exactly
    /// one row.
    pub async fn authenticate(&self, username: &str, password: &str) -> Access {
        let sql = self.config.queries.auth_user();
        if sql.is_empty() {
            tracing::info!("cannot authenticate: auth_user template is empty");
            return Access::Denied;
        }

        let hashed = self.hasher.hash(password);

        let mut scope = match ConnectionScope::open(&self.config.path).await {
            Ok(scope) => scope,
            Err(error) => {
                tracing::error!(error = %error, "store unavailable for authentication");
                return Access::Denied;
            }
        };
        let fetched = scope.fetch_credentials(sql, username, &hashed).await;
        scope.release().await;

        let rows = match fetched {
            Ok(rows) => rows,
            Err(error) => {
                tracing::error!(error = %error, "auth_user statement failed");
                return Access::Denied;
            }
        };

        if rows.len() != 1 {
            tracing::debug!(
                matches = rows.len(),
                "credential did not match exactly one row"
            );
            return Access::Denied;
        }

        let row = &rows[0];
        let groups: Vec<String> = row
            .usergroups
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::to_string)
            .collect();

        let matched = row.username.as_deref().unwrap_or(username);
        tracing::debug!(username = %matched, groups = groups.len(), "authenticated");
        Access::Granted(groups)
    }

    /// Register a user through the operator's `add_user` statement.
    ///
    /// Uniqueness is the schema's concern: a duplicate-key violation
    /// surfaces as a store error and reports `false`.
    pub async fn add_user(&self, username: &str, password: &str) -> bool {
        let sql = self.config.queries.add_user();
        if sql.is_empty() {
            tracing::info!("cannot add user: add_user template is empty");
            return false;
        }

        let hashed = self.hasher.hash(password);

        let mut scope = match ConnectionScope::open(&self.config.path).await {
            Ok(scope) => scope,
            Err(error) => {
                tracing::error!(error = %error, "store unavailable for user registration");
                return false;
            }
        };
        let result = scope.execute(sql, &[username, &hashed]).await;
        scope.release().await;

        match result {
            Ok(_) => true,
            Err(error) => {
                tracing::error!(error = %error, username = %username, "add_user statement failed");
                false
            }
        }
    }

    /// Rotate a user's password through the operator's `update_user`
    /// statement, bound as `(hashed_new, username, hashed_old)`.
    ///
    /// The statement's `WHERE` clause is expected to match on the old
    /// hash, so a wrong old password updates zero rows. Zero matched rows
    /// still report `true`; only store errors report `false`.
    pub async fn change_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> bool {
        let sql = self.config.queries.update_user();
        if sql.is_empty() {
            tracing::info!("cannot change password: update_user template is empty");
            return false;
        }

        let hashed_new = self.hasher.hash(new_password);
        let hashed_old = self.hasher.hash(old_password);

        let mut scope = match ConnectionScope::open(&self.config.path).await {
            Ok(scope) => scope,
            Err(error) => {
                tracing::error!(error = %error, "store unavailable for password rotation");
                return false;
            }
        };
        let result = scope
            .execute(sql, &[&hashed_new, username, &hashed_old])
            .await;
        scope.release().await;

        match result {
            Ok(0) => {
                tracing::warn!(username = %username, "password rotation matched no rows");
                true
            }
            Ok(_) => true,
            Err(error) => {
                tracing::error!(
                    error = %error,
                    username = %username,
                    "update_user statement failed"
                );
                false
            }
        }
    }
}
