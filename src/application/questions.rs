//! QuestionService - orchestrates question and choice operations.
//!
//! The one cross-aggregate rule in the system lives here: a question may
//! only be created under a session that exists. The service asks the
//! [`SessionChecker`] port and never touches the session aggregate itself.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{
    ChoiceId, QuestionId, RepositoryError, SessionId, ValidationError,
};
use crate::domain::question::{Choice, Question};
use crate::ports::{ChoiceRepository, QuestionRepository, SessionChecker};

/// Application service for questions and their choices.
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    choices: Arc<dyn ChoiceRepository>,
    sessions: Arc<dyn SessionChecker>,
}

impl QuestionService {
    /// Creates the service from its three collaborators.
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        choices: Arc<dyn ChoiceRepository>,
        sessions: Arc<dyn SessionChecker>,
    ) -> Self {
        Self {
            questions,
            choices,
            sessions,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Questions
    // ─────────────────────────────────────────────────────────────────────

    /// Creates a question under an existing session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `Validation` if the question fields are rejected
    /// - `ConstraintViolation` if the order position is already taken
    pub async fn create_question(
        &self,
        session_id: SessionId,
        text: impl Into<String>,
        order_num: u32,
        max_choices: u32,
        allow_multiple: bool,
    ) -> Result<QuestionId, RepositoryError> {
        if !self.sessions.exists(&session_id).await? {
            return Err(RepositoryError::not_found("session", session_id));
        }

        let question = Question::new(session_id, text, order_num, max_choices, allow_multiple)?;

        let id = self.questions.create(&question).await?;
        debug!(id = %id, session = %session_id, "question created");
        Ok(id)
    }

    /// Fetches a question by id.
    pub async fn question(&self, id: QuestionId) -> Result<Question, RepositoryError> {
        self.questions.find_by_id(id).await
    }

    /// Lists the questions of a session, ascending by order position.
    pub async fn questions_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Question>, RepositoryError> {
        self.questions.by_session(session_id).await
    }

    /// Applies a full update to an existing question.
    ///
    /// Read-modify-write: the stored question is fetched, each mutator
    /// re-validates, and the result is persisted.
    pub async fn update_question(
        &self,
        id: QuestionId,
        text: impl Into<String>,
        order_num: u32,
        max_choices: u32,
        allow_multiple: bool,
    ) -> Result<(), RepositoryError> {
        let mut question = self.questions.find_by_id(id).await?;

        question.update_text(text)?;
        question.change_order_num(order_num)?;
        question.change_max_choices(max_choices)?;
        if question.allow_multiple() != allow_multiple {
            question.toggle_allow_multiple();
        }

        self.questions.update(&question).await
    }

    /// Deletes a question; its choices cascade at the store.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), RepositoryError> {
        self.questions.delete(id).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Choices
    // ─────────────────────────────────────────────────────────────────────

    /// Creates a choice under a question.
    ///
    /// # Errors
    ///
    /// - `Validation` if the choice fields are rejected
    /// - `ConstraintViolation` if the order position is already taken or
    ///   the question does not exist
    pub async fn create_choice(
        &self,
        question_id: QuestionId,
        order_num: u32,
        text: impl Into<String>,
    ) -> Result<ChoiceId, RepositoryError> {
        if question_id.as_i64() < 1 {
            return Err(
                ValidationError::out_of_range("question_id", 1, question_id.as_i64()).into(),
            );
        }

        let choice = Choice::new(question_id, order_num, text)?;

        self.choices.create(&choice).await
    }

    /// Fetches a choice by id.
    pub async fn choice(&self, id: ChoiceId) -> Result<Choice, RepositoryError> {
        self.choices.find_by_id(id).await
    }

    /// Lists the choices of a question, ascending by order position.
    pub async fn choices_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<Choice>, RepositoryError> {
        self.choices.by_question(question_id).await
    }

    /// Applies a full update to an existing choice.
    pub async fn update_choice(
        &self,
        id: ChoiceId,
        text: impl Into<String>,
        order_num: u32,
    ) -> Result<(), RepositoryError> {
        let mut choice = self.choices.find_by_id(id).await?;

        choice.update_text(text)?;
        choice.change_order_num(order_num)?;

        self.choices.update(&choice).await
    }

    /// Deletes a choice.
    pub async fn delete_choice(&self, id: ChoiceId) -> Result<(), RepositoryError> {
        self.choices.delete(id).await
    }
}
