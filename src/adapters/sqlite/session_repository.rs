//! SQLite implementation of the vote session repository.
//!
//! Also owns the participant association: a `(user, session)` pair in
//! `session_and_participant` with an invitation timestamp. Deleting a
//! session lets the store cascade into questions, choices and participant
//! rows; only the root delete is issued here.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::domain::foundation::{RepositoryError, SessionId, Timestamp, UserId};
use crate::domain::session::Session;
use crate::domain::user::User;
use crate::ports::SessionRepository;

use super::timestamp;

/// SQLite implementation of [`SessionRepository`].
#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    /// Creates a new SqliteSessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), RepositoryError> {
        debug!(id = %session.id(), "insert session");

        sqlx::query(
            r#"
            INSERT INTO vote_session (id, title, description, created_at, ends_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.id().to_string())
        .bind(session.title())
        .bind(session.description())
        .bind(timestamp::encode(session.created_at()))
        .bind(timestamp::encode_opt(session.ends_at()))
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("insert session", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Session, RepositoryError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, title, description, created_at, ends_at
            FROM vote_session
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| super::map_store_error("query session", e))?;

        match row {
            Some(row) => row.into_domain(),
            None => Err(RepositoryError::not_found("session", id)),
        }
    }

    async fn sessions_for_user(&self, user_id: &UserId) -> Result<Vec<Session>, RepositoryError> {
        let rows = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT vs.id, vs.title, vs.description, vs.created_at, vs.ends_at
            FROM vote_session vs
            INNER JOIN session_and_participant sp ON vs.id = sp.session_id
            WHERE sp.user_id = ?
            ORDER BY vs.created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| super::map_store_error("query user sessions", e))?;

        rows.into_iter().map(SessionRow::into_domain).collect()
    }

    async fn update(&self, session: &Session) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE vote_session
            SET title = ?, description = ?, ends_at = ?
            WHERE id = ?
            "#,
        )
        .bind(session.title())
        .bind(session.description())
        .bind(timestamp::encode_opt(session.ends_at()))
        .bind(session.id().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("update session", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("session", session.id()));
        }

        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), RepositoryError> {
        debug!(id = %id, "delete session");

        // Questions, choices and participant rows cascade.
        sqlx::query(r#"DELETE FROM vote_session WHERE id = ?"#)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| super::map_store_error("delete session", e))?;

        Ok(())
    }

    async fn close(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let now = Timestamp::now();

        let result = sqlx::query(
            r#"
            UPDATE vote_session
            SET ends_at = ?
            WHERE id = ?
            "#,
        )
        .bind(timestamp::encode(&now))
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("close session", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("session", id));
        }

        Ok(())
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Session>, RepositoryError> {
        let rows = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, title, description, created_at, ends_at
            FROM vote_session
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| super::map_store_error("list sessions", e))?;

        rows.into_iter().map(SessionRow::into_domain).collect()
    }

    async fn add_participant(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        debug!(session = %session_id, user = %user_id, "add participant");

        sqlx::query(
            r#"
            INSERT INTO session_and_participant (user_id, session_id, invited_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(user_id.to_string())
        .bind(session_id.to_string())
        .bind(timestamp::encode(&Timestamp::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("add participant", e))?;

        Ok(())
    }

    async fn remove_participant(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            DELETE FROM session_and_participant
            WHERE session_id = ? AND user_id = ?
            "#,
        )
        .bind(session_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("remove participant", e))?;

        Ok(())
    }

    async fn participants(&self, session_id: &SessionId) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT u.id, u.name, u.email, u.created_at
            FROM "user" u
            INNER JOIN session_and_participant sp ON u.id = sp.user_id
            WHERE sp.session_id = ?
            ORDER BY sp.invited_at ASC
            "#,
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| super::map_store_error("query participants", e))?;

        rows.into_iter().map(ParticipantRow::into_domain).collect()
    }

    async fn is_participant(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM session_and_participant
            WHERE session_id = ? AND user_id = ?
            "#,
        )
        .bind(session_id.to_string())
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| super::map_store_error("check participant", e))?;

        Ok(count > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════
// Row DTOs
// ════════════════════════════════════════════════════════════════════════

/// Flat image of one `vote_session` row.
#[derive(sqlx::FromRow)]
struct SessionRow {
    id: String,
    title: String,
    description: String,
    created_at: String,
    ends_at: Option<String>,
}

impl SessionRow {
    fn into_domain(self) -> Result<Session, RepositoryError> {
        let id: SessionId =
            self.id
                .parse()
                .map_err(|source| RepositoryError::InvalidIdentifier {
                    entity: "session",
                    value: self.id.clone(),
                    source,
                })?;

        let created_at = timestamp::decode(&self.created_at)?;
        let ends_at = timestamp::decode_opt(self.ends_at.as_deref())?;

        Session::rehydrate(id, self.title, self.description, created_at, ends_at)
            .map_err(|source| RepositoryError::invalid_row("session", id, source))
    }
}

/// Flat image of one participant's `"user"` columns.
#[derive(sqlx::FromRow)]
struct ParticipantRow {
    id: String,
    name: String,
    email: String,
    created_at: String,
}

impl ParticipantRow {
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
