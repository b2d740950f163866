//! Database module - SQLite-backed vector collections
//!
//! Provides storage for:
//! - Conversation memories (one collection per agent store)
//! - The semantic search demo's document collection

mod collection;
mod sqlite;

pub use collection::VectorCollection;
pub use sqlite::{init_pool, migrations, SqliteStorePool, DB_FILE_NAME};
