//! Tenebris Sync
//!
//! Persistence core of the Tenebris campaign manager. Synchronizes a
//! user-account collection and per-table game-session documents against
//! a versioned remote object store that offers only per-document
//! optimistic concurrency: every write must echo the version token
//! obtained by the paired read, and a stale token is reported as a
//! conflict rather than overwritten.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod security;
pub mod store;
pub mod sync;

pub use config::Config;
pub use error::{Result, SyncError};
pub use models::{Account, AccountCollection, GameTable, TableStatus};
pub use store::{Document, DocumentHandle, GitHubStore, MemoryStore, ObjectStore};
pub use sync::Synchronizer;
