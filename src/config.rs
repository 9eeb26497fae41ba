//! Engine Configuration
//!
//! The host hands the engine one [`EngineConfig`] at construction and the
//! engine treats it as immutable from then on. The three SQL statement
//! templates are operator-supplied and optional; an unset or empty template
//! disables the corresponding operation rather than failing construction.

use std::fmt;

use serde::Deserialize;

/// Operator-supplied SQL statement templates.
///
/// Templates use positional `?` placeholders. Parameter order is fixed per
/// operation:
/// - `auth_user`: `(username, hashed_password)`; result rows must expose a
///   `usergroups` column and may expose `username` for logging
/// - `add_user`: `(username, hashed_password)`
/// - `update_user`: `(hashed_new_password, username, hashed_old_password)`
///
/// Unset and explicitly empty are equivalent: both disable the operation.
/// Syntactic correctness of the statements is the operator's responsibility.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryTemplates {
    auth_user: Option<String>,
    add_user: Option<String>,
    update_user: Option<String>,
}

impl QueryTemplates {
    pub fn new(
        auth_user: Option<String>,
        add_user: Option<String>,
        update_user: Option<String>,
    ) -> Self {
        Self {
            auth_user,
            add_user,
            update_user,
        }
    }

    /// Statement for credential checks, `""` when disabled.
    pub fn auth_user(&self) -> &str {
        self.auth_user.as_deref().unwrap_or("")
    }

    /// Statement for user registration, `""` when disabled.
    pub fn add_user(&self) -> &str {
        self.add_user.as_deref().unwrap_or("")
    }

    /// Statement for password rotation, `""` when disabled.
    pub fn update_user(&self) -> &str {
        self.update_user.as_deref().unwrap_or("")
    }
}

/// Engine configuration supplied by the host.
///
/// ## Fields
/// * `path` - location of the backing SQLite database
/// * `secret` - key material for password hashing; empty disables hashing
///   and the engine compares plaintext passwords
/// * `queries` - operator-supplied statement templates
#[derive(Clone, Deserialize)]
pub struct EngineConfig {
    pub path: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub queries: QueryTemplates,
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("path", &self.path)
            .field("secret", &"[REDACTED]")
            .field("queries", &self.queries)
            .finish()
    }
}
