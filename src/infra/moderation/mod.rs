// Word-list store implementations.

pub mod in_memory_word_store;
pub mod sqlite_word_store;

// Re-export for convenience
pub use in_memory_word_store::InMemoryWordStore;
pub use sqlite_word_store::SqliteWordStore;
