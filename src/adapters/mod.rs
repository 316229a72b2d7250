//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `sqlite` - SQLite-backed repositories and the in-process session
//!   checker

pub mod sqlite;

pub use sqlite::{
    InProcessSessionChecker, SqliteChoiceRepository, SqliteQuestionRepository,
    SqliteSessionRepository, SqliteUserRepository,
};
