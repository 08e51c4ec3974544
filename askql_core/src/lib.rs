/// Module providing natural-language translation over HTTP and prompt construction.
pub mod bridge;

/// Module describing the one queryable table.
pub mod catalog;

/// Process-wide configuration.
pub mod config;

/// Error types shared across the pipeline.
pub mod error;

/// Module responsible for executing queries.
pub mod executor;

/// Table rendering for query results.
pub mod presenter;

/// The interactive question/answer loop.
pub mod session;

/// Module for SQL extraction, validation and value types.
pub mod sql;

/// Module loading the dataset into the store.
pub mod storage;

/// Re-exports for the natural language translator and its seam.
pub use bridge::{NLTranslator, Translate};

/// Re-export of the student table descriptor.
pub use catalog::{TableSchema, STUDENTS};

pub use config::AppConfig;

/// Re-export of the core Executor responsible for running queries.
pub use executor::Executor;

pub use session::{Session, SessionState};

/// Re-exports of statement extraction and the read-only guard.
pub use sql::extract::extract_statement;
pub use sql::guard::ReadOnlyGuard;

/// Re-export of the dataset loader.
pub use storage::DatasetLoader;
