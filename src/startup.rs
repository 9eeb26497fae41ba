//! Construction-Time Configuration Audit
//!
//! Runs exactly once when the engine is built. Every finding is reported
//! through `tracing` and recorded in a [`StartupReport`]; none of them
//! block construction. Each operation re-checks its own precondition per
//! call, so a capability that is missing here simply degrades that
//! operation to its negative outcome.

use std::path::Path;

use crate::config::EngineConfig;

/// Snapshot of the engine's capabilities taken at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    /// The backing database file exists on disk.
    pub store_present: bool,
    /// `auth_user` template supplied; without it every authentication
    /// attempt is denied.
    pub authenticate_enabled: bool,
    /// `add_user` template supplied.
    pub add_user_enabled: bool,
    /// `update_user` template supplied.
    pub change_password_enabled: bool,
    /// Secret supplied; without it passwords are compared in plaintext.
    pub hashing_enabled: bool,
}

pub(crate) fn audit(config: &EngineConfig) -> StartupReport {
    let store_present = Path::new(&config.path).exists();
    if !store_present {
        tracing::error!(
            path = %config.path,
            "database not found; store operations will fail until it exists"
        );
    }

    let authenticate_enabled = !config.queries.auth_user().is_empty();
    if !authenticate_enabled {
        tracing::error!("auth_user template is empty; all authentication attempts will be denied");
    }

    let hashing_enabled = !config.secret.is_empty();
    if !hashing_enabled {
        tracing::warn!("no secret configured; passwords are stored and compared in plaintext");
    }

    let add_user_enabled = !config.queries.add_user().is_empty();
    if !add_user_enabled {
        tracing::warn!("add_user template is empty; user registration is disabled");
    }

    let change_password_enabled = !config.queries.update_user().is_empty();
    if !change_password_enabled {
        tracing::warn!("update_user template is empty; password rotation is disabled");
    }

    StartupReport {
        store_present,
        authenticate_enabled,
        add_user_enabled,
        change_password_enabled,
        hashing_enabled,
    }
}
