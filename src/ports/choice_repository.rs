//! Choice repository port.

use async_trait::async_trait;

use crate::domain::foundation::{ChoiceId, QuestionId, RepositoryError};
use crate::domain::question::Choice;

/// Repository port for choice persistence.
#[async_trait]
pub trait ChoiceRepository: Send + Sync {
    /// Persists a new choice and returns the key the store assigned.
    ///
    /// # Errors
    ///
    /// - `ConstraintViolation` if the question already has a choice at
    ///   this order position, or the question does not exist
    async fn create(&self, choice: &Choice) -> Result<ChoiceId, RepositoryError>;

    /// Fetches a choice by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no choice has this id
    async fn find_by_id(&self, id: ChoiceId) -> Result<Choice, RepositoryError>;

    /// Lists the choices of a question, ascending by order position.
    async fn by_question(&self, question_id: QuestionId) -> Result<Vec<Choice>, RepositoryError>;

    /// Updates text and order of an existing choice.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the choice no longer exists
    /// - `ConstraintViolation` if the new order position is taken
    async fn update(&self, choice: &Choice) -> Result<(), RepositoryError>;

    /// Deletes a choice.
    async fn delete(&self, id: ChoiceId) -> Result<(), RepositoryError>;
}
