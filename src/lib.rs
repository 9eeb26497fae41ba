//! Credential verification against a SQLite store.
//!
//! An embeddable authentication engine for hosts that own the request
//! lifecycle and only need pass/fail decisions plus group memberships.
//! The SQL schema is operator-supplied: each of the three operations is
//! bound to a statement template from the host configuration, and the
//! engine only validates that a template is present before binding its
//! parameters.
//!
//! ## Features
//! - `authenticate` / `add_user` / `change_password` over operator-supplied
//!   statement templates with positional parameters
//! - PBKDF2-HMAC-SHA512 credential hashing (10,000 iterations), with a
//!   documented plaintext fallback when no secret is configured
//! - Per-operation connection scoping: no pooled or long-lived handles
//! - Non-fatal startup audit: missing capabilities are logged and degrade
//!   the affected operation, never construction
//!
//! ## Error model
//! Callers never see store internals. Connection faults, malformed SQL and
//! constraint violations all collapse to the operation's negative outcome
//! (`Access::Denied` / `false`); diagnostics are emitted through `tracing`.
//!
//! ## Example
//! ```no_run
//! use sqlite_auth::{Access, AuthEngine, EngineConfig, QueryTemplates};
//!
//! # async fn run() {
//! let engine = AuthEngine::new(EngineConfig {
//!     path: "/var/db/users.db".to_string(),
//!     secret: "pepper".to_string(),
//!     queries: QueryTemplates::new(
//!         Some("SELECT username, usergroups FROM users \
//!               WHERE username = ? AND password = ?".to_string()),
//!         Some("INSERT INTO users (username, password) VALUES (?, ?)".to_string()),
//!         Some("UPDATE users SET password = ? \
//!               WHERE username = ? AND password = ?".to_string()),
//!     ),
//! });
//!
//! match engine.authenticate("alice", "pw1").await {
//!     Access::Granted(groups) => println!("groups: {groups:?}"),
//!     Access::Denied => println!("denied"),
//! }
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod hasher;
pub mod startup;
pub mod store;

pub use config::{EngineConfig, QueryTemplates};
pub use engine::{Access, AuthEngine};
pub use hasher::CredentialHasher;
pub use startup::StartupReport;
pub use store::{ConnectionScope, CredentialRow, StoreError};
