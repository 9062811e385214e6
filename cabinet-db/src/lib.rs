//! SQLite persistence layer for the game library.
//!
//! Provides schema creation, upsert/delete operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature). The catalog owns
//! the durable copy of every [`cabinet_core::GameEntry`]; callers hold
//! disposable snapshots.

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{delete_game, upsert_game, OperationError};
pub use queries::{count_games, games_by_platform, get_game, list_games, search_games};
pub use schema::{open_database, open_memory};
