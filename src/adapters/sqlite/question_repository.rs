//! SQLite implementation of the question repository.
//!
//! `allow_multiple` travels as an INTEGER 0/1 and the surrogate key and
//! creation timestamp come back from the store; the entity never sees
//! either encoding.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::domain::foundation::{QuestionId, RepositoryError, SessionId, ValidationError};
use crate::domain::question::Question;
use crate::ports::QuestionRepository;

use super::timestamp;

/// SQLite implementation of [`QuestionRepository`].
#[derive(Clone)]
pub struct SqliteQuestionRepository {
    pool: SqlitePool,
}

impl SqliteQuestionRepository {
    /// Creates a new SqliteQuestionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for SqliteQuestionRepository {
    async fn create(&self, question: &Question) -> Result<QuestionId, RepositoryError> {
        debug!(session = %question.session_id(), order = question.order_num(), "insert question");

        // id and created_at are store-assigned; neither is bound here.
        let result = sqlx::query(
            r#"
            INSERT INTO question (session_id, text, order_num, allow_multiple, max_choices)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(question.session_id().to_string())
        .bind(question.text())
        .bind(question.order_num() as i64)
        .bind(bool_to_int(question.allow_multiple()))
        .bind(question.max_choices() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("insert question", e))?;

        Ok(QuestionId::from_i64(result.last_insert_rowid()))
    }

    async fn find_by_id(&self, id: QuestionId) -> Result<Question, RepositoryError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, session_id, text, order_num, allow_multiple, max_choices, created_at
            FROM question
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| super::map_store_error("query question", e))?;

        match row {
            Some(row) => row.into_domain(),
            None => Err(RepositoryError::not_found("question", id)),
        }
    }

    async fn by_session(&self, session_id: &SessionId) -> Result<Vec<Question>, RepositoryError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, session_id, text, order_num, allow_multiple, max_choices, created_at
            FROM question
            WHERE session_id = ?
            ORDER BY order_num ASC
            "#,
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| super::map_store_error("query questions", e))?;

        rows.into_iter().map(QuestionRow::into_domain).collect()
    }

    async fn update(&self, question: &Question) -> Result<(), RepositoryError> {
        let id = question
            .id()
            .ok_or_else(|| RepositoryError::not_found("question", "unpersisted"))?;

        let result = sqlx::query(
            r#"
            UPDATE question
            SET text = ?, order_num = ?, allow_multiple = ?, max_choices = ?
            WHERE id = ?
            "#,
        )
        .bind(question.text())
        .bind(question.order_num() as i64)
        .bind(bool_to_int(question.allow_multiple()))
        .bind(question.max_choices() as i64)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| super::map_store_error("update question", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("question", id));
        }

        Ok(())
    }

    async fn delete(&self, id: QuestionId) -> Result<(), RepositoryError> {
        debug!(id = %id, "delete question");

        // Choices cascade.
        sqlx::query(r#"DELETE FROM question WHERE id = ?"#)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| super::map_store_error("delete question", e))?;

        Ok(())
    }
}

fn bool_to_int(flag: bool) -> i64 {
    if flag {
        1
    } else {
        0
    }
}

// ════════════════════════════════════════════════════════════════════════
// Row DTO
// ════════════════════════════════════════════════════════════════════════

/// Flat image of one `question` row.
#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    session_id: String,
    text: String,
    order_num: i64,
    allow_multiple: i64,
    max_choices: i64,
    created_at: String,
}

impl QuestionRow {
    fn into_domain(self) -> Result<Question, RepositoryError> {
        let session_id: SessionId =
            self.session_id
                .parse()
                .map_err(|source| RepositoryError::InvalidIdentifier {
                    entity: "question",
                    value: self.session_id.clone(),
                    source,
                })?;

        let order_num = u32::try_from(self.order_num).map_err(|_| {
            RepositoryError::invalid_row(
                "question",
                self.id,
                ValidationError::out_of_range("order_num", 1, self.order_num),
            )
        })?;
        let max_choices = u32::try_from(self.max_choices).map_err(|_| {
            RepositoryError::invalid_row(
                "question",
                self.id,
                ValidationError::out_of_range("max_choices", 1, self.max_choices),
            )
        })?;

        let created_at = timestamp::decode(&self.created_at)?;

        Question::rehydrate(
            QuestionId::from_i64(self.id),
            session_id,
            self.text,
            order_num,
            self.allow_multiple != 0,
            max_choices,
            created_at,
        )
        .map_err(|source| RepositoryError::invalid_row("question", self.id, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> QuestionRow {
        QuestionRow {
            id: 1,
            session_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            text: "Budget?".to_string(),
            order_num: 1,
            allow_multiple: 0,
            max_choices: 1,
            created_at: "2025-11-30 14:42:19".to_string(),
        }
    }

    #[test]
    fn row_converts_to_domain_question() {
        let q = row().into_domain().unwrap();
        assert_eq!(q.id(), Some(QuestionId::from_i64(1)));
        assert_eq!(q.text(), "Budget?");
        assert!(!q.allow_multiple());
        assert!(q.created_at().is_some());
    }

    #[test]
    fn integer_flag_decodes_to_boolean() {
        let mut multiple = row();
        multiple.allow_multiple = 1;
        assert!(multiple.into_domain().unwrap().allow_multiple());

        let mut single = row();
        single.allow_multiple = 0;
        assert!(!single.into_domain().unwrap().allow_multiple());
    }

    #[test]
    fn row_with_malformed_session_uuid_fails_with_invalid_identifier() {
        let mut bad = row();
        bad.session_id = "oops".to_string();
        let err = bad.into_domain().unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidIdentifier { .. }));
    }

    #[test]
    fn corrupted_empty_text_surfaces_offending_row() {
        let mut bad = row();
        bad.text = String::new();
        let err = bad.into_domain().unwrap_err();
        assert!(err.is_validation());
        assert!(format!("{}", err).contains("row 1"));
    }

    #[test]
    fn negative_order_num_is_rejected() {
        let mut bad = row();
        bad.order_num = -3;
        assert!(bad.into_domain().is_err());
    }

    #[test]
    fn bool_to_int_encodes_both_values() {
        assert_eq!(bool_to_int(true), 1);
        assert_eq!(bool_to_int(false), 0);
    }
}
