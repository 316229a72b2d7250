//! SQLite implementation of the user repository and password sub-contract.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::domain::foundation::{RepositoryError, UserId};
use crate::domain::user::User;
use crate::ports::{PasswordRepository, UserRepository};

use super::timestamp;

/// SQLite implementation of [`UserRepository`] and [`PasswordRepository`].
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Creates a new SqliteUserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        debug!(id = %user.id(), "insert user");

        sqlx::query(
            r#"
            INSERT INTO "user" (id, name, email, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user.id().to_string())
        .bind(user.name())
        .bind(user.email())
        .bind(timestamp::encode(user.created_at()))
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("insert user", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at
            FROM "user"
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| super::map_store_error("query user", e))?;

        match row {
            Some(row) => row.into_domain(),
            None => Err(RepositoryError::not_found("user", id)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at
            FROM "user"
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| super::map_store_error("query user", e))?;

        match row {
            Some(row) => row.into_domain(),
            None => Err(RepositoryError::not_found("user", email)),
        }
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE "user"
            SET name = ?, email = ?
            WHERE id = ?
            "#,
        )
        .bind(user.name())
        .bind(user.email())
        .bind(user.id().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("update user", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("user", user.id()));
        }

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        debug!(id = %id, "delete user");

        // Password row goes with it through the cascade.
        sqlx::query(r#"DELETE FROM "user" WHERE id = ?"#)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| super::map_store_error("delete user", e))?;

        Ok(())
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at
            FROM "user"
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| super::map_store_error("list users", e))?;

        rows.into_iter().map(UserRow::into_domain).collect()
    }
}

#[async_trait]
impl PasswordRepository for SqliteUserRepository {
    async fn set_password(
        &self,
        user_id: &UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO user_password (user_id, password_hash, created_at, updated_at)
            VALUES (?, ?, datetime('now'), datetime('now'))
            ON CONFLICT(user_id) DO UPDATE SET
                password_hash = excluded.password_hash,
                updated_at = datetime('now')
            "#,
        )
        .bind(user_id.to_string())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("set password", e))?;

        Ok(())
    }

    async fn password_hash(&self, user_id: &UserId) -> Result<String, RepositoryError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT password_hash
            FROM user_password
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| super::map_store_error("query password", e))?;

        match row {
            Some((hash,)) => Ok(hash),
            None => Err(RepositoryError::not_found("user password", user_id)),
        }
    }

    async fn delete_password(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        sqlx::query(r#"DELETE FROM user_password WHERE user_id = ?"#)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| super::map_store_error("delete password", e))?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════
// Row DTO
// ════════════════════════════════════════════════════════════════════════

/// Flat image of one `"user"` row.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    created_at: String,
}

impl UserRow {
    fn into_domain(self) -> Result<User, RepositoryError> {
        let id: UserId =
            self.id
                .parse()
                .map_err(|source| RepositoryError::InvalidIdentifier {
                    entity: "user",
                    value: self.id.clone(),
                    source,
                })?;

        let created_at = timestamp::decode(&self.created_at)?;

        User::rehydrate(id, self.name, self.email, created_at)
            .map_err(|source| RepositoryError::invalid_row("user", id, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str, created_at: &str) -> UserRow {
        UserRow {
            id: id.to_string(),
            name: name.to_string(),
            email: "alice@example.com".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn row_converts_to_domain_user() {
        let user = row(
            "550e8400-e29b-41d4-a716-446655440000",
            "Alice",
            "2024-01-15T19:05:00Z",
        )
        .into_domain()
        .unwrap();

        assert_eq!(user.name(), "Alice");
        assert_eq!(
            user.id().to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn row_with_malformed_uuid_fails_with_invalid_identifier() {
        let err = row("not-a-uuid", "Alice", "2024-01-15T19:05:00Z")
            .into_domain()
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidIdentifier { .. }));
    }

    #[test]
    fn row_with_store_default_timestamp_converts() {
        let user = row(
            "550e8400-e29b-41d4-a716-446655440000",
            "Alice",
            "2025-11-30 14:42:19",
        )
        .into_domain()
        .unwrap();
        assert!(user.created_at().as_datetime().timestamp() > 0);
    }

    #[test]
    fn corrupted_row_surfaces_offending_identity() {
        let err = row(
            "550e8400-e29b-41d4-a716-446655440000",
            "",
            "2024-01-15T19:05:00Z",
        )
        .into_domain()
        .unwrap_err();

        assert!(err.is_validation());
        assert!(format!("{}", err).contains("550e8400"));
    }
}
