//! SQLite adapters - Database implementations for the repository ports.
//!
//! Each adapter holds a cloned [`SqlitePool`] and translates between the
//! domain entities and flat row DTOs: UUIDs as canonical text, booleans as
//! INTEGER 0/1, timestamps through the text codec in [`timestamp`].

mod choice_repository;
mod question_repository;
mod session_checker;
mod session_repository;
mod timestamp;
mod user_repository;

pub use choice_repository::SqliteChoiceRepository;
pub use question_repository::SqliteQuestionRepository;
pub use session_checker::InProcessSessionChecker;
pub use session_repository::SqliteSessionRepository;
pub use user_repository::SqliteUserRepository;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Executor;

use crate::config::DatabaseConfig;
use crate::domain::foundation::RepositoryError;

/// Table definitions the adapters rely on, cascades included.
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Opens a connection pool with foreign-key enforcement on.
///
/// Cascading deletes depend on the pragma; a pool opened elsewhere without
/// it would leave orphaned child rows behind.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, RepositoryError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| RepositoryError::database("open database", e))?
        .create_if_missing(config.create_if_missing)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await
        .map_err(|e| RepositoryError::database("open database", e))
}

/// Applies the embedded schema. Idempotent; intended for bootstrap and
/// tests, not as migration tooling.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    pool.execute(SCHEMA_SQL)
        .await
        .map_err(|e| RepositoryError::database("initialize schema", e))?;

    Ok(())
}

/// Maps a driver error to the repository taxonomy.
///
/// Uniqueness and foreign-key rejections become `ConstraintViolation` so
/// callers can react without string-matching; everything else stays a
/// transport failure wrapped with the interrupted operation.
pub(crate) fn map_store_error(operation: &'static str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() =>
        {
            RepositoryError::constraint(operation, db_err.message().to_string())
        }
        other => RepositoryError::database(operation, other),
    }
}
