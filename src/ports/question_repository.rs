//! Question repository port.

use async_trait::async_trait;

use crate::domain::foundation::{QuestionId, RepositoryError, SessionId};
use crate::domain::question::Question;

/// Repository port for question persistence.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persists a new question and returns the key the store assigned.
    ///
    /// # Errors
    ///
    /// - `ConstraintViolation` if the session already has a question at
    ///   this order position, or the session does not exist
    async fn create(&self, question: &Question) -> Result<QuestionId, RepositoryError>;

    /// Fetches a question by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no question has this id
    async fn find_by_id(&self, id: QuestionId) -> Result<Question, RepositoryError>;

    /// Lists the questions of a session, ascending by order position.
    async fn by_session(&self, session_id: &SessionId) -> Result<Vec<Question>, RepositoryError>;

    /// Updates text, order, flag and ceiling of an existing question.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the question no longer exists
    /// - `ConstraintViolation` if the new order position is taken
    async fn update(&self, question: &Question) -> Result<(), RepositoryError>;

    /// Deletes a question; its choices cascade.
    async fn delete(&self, id: QuestionId) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn QuestionRepository) {}
    }
}
