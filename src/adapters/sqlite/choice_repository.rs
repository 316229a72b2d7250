//! SQLite implementation of the choice repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::domain::foundation::{ChoiceId, QuestionId, RepositoryError, ValidationError};
use crate::domain::question::Choice;
use crate::ports::ChoiceRepository;

use super::timestamp;

/// SQLite implementation of [`ChoiceRepository`].
#[derive(Clone)]
pub struct SqliteChoiceRepository {
    pool: SqlitePool,
}

impl SqliteChoiceRepository {
    /// Creates a new SqliteChoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChoiceRepository for SqliteChoiceRepository {
    async fn create(&self, choice: &Choice) -> Result<ChoiceId, RepositoryError> {
        debug!(question = %choice.question_id(), order = choice.order_num(), "insert choice");

        let result = sqlx::query(
            r#"
            INSERT INTO choice (question_id, text, order_num)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(choice.question_id().as_i64())
        .bind(choice.text())
        .bind(choice.order_num() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("insert choice", e))?;

        Ok(ChoiceId::from_i64(result.last_insert_rowid()))
    }

    async fn find_by_id(&self, id: ChoiceId) -> Result<Choice, RepositoryError> {
        let row = sqlx::query_as::<_, ChoiceRow>(
            r#"
            SELECT id, question_id, text, order_num, created_at
            FROM choice
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| super::map_store_error("query choice", e))?;

        match row {
            Some(row) => row.into_domain(),
            None => Err(RepositoryError::not_found("choice", id)),
        }
    }

    async fn by_question(&self, question_id: QuestionId) -> Result<Vec<Choice>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChoiceRow>(
            r#"
            SELECT id, question_id, text, order_num, created_at
            FROM choice
            WHERE question_id = ?
            ORDER BY order_num ASC
            "#,
        )
        .bind(question_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| super::map_store_error("query choices", e))?;

        rows.into_iter().map(ChoiceRow::into_domain).collect()
    }

    async fn update(&self, choice: &Choice) -> Result<(), RepositoryError> {
        let id = choice
            .id()
            .ok_or_else(|| RepositoryError::not_found("choice", "unpersisted"))?;

        let result = sqlx::query(
            r#"
            UPDATE choice
            SET text = ?, order_num = ?
            WHERE id = ?
            "#,
        )
        .bind(choice.text())
        .bind(choice.order_num() as i64)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("update choice", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("choice", id));
        }

        Ok(())
    }

    async fn delete(&self, id: ChoiceId) -> Result<(), RepositoryError> {
        sqlx::query(r#"DELETE FROM choice WHERE id = ?"#)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| super::map_store_error("delete choice", e))?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════
// Row DTO
// ════════════════════════════════════════════════════════════════════════

/// Flat image of one `choice` row.
#[derive(sqlx::FromRow)]
struct ChoiceRow {
    id: i64,
    question_id: i64,
    text: String,
    order_num: i64,
    created_at: String,
}

impl ChoiceRow {
    fn into_domain(self) -> Result<Choice, RepositoryError> {
        let order_num = u32::try_from(self.order_num).map_err(|_| {
            RepositoryError::invalid_row(
                "choice",
                self.id,
                ValidationError::out_of_range("order_num", 1, self.order_num),
            )
        })?;

        let created_at = timestamp::decode(&self.created_at)?;

        Choice::rehydrate(
            ChoiceId::from_i64(self.id),
            QuestionId::from_i64(self.question_id),
            self.text,
            order_num,
            created_at,
        )
        .map_err(|source| RepositoryError::invalid_row("choice", self.id, source))
    }
}
