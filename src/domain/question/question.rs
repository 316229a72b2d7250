//! Question aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, SessionId, Timestamp, ValidationError};

/// Question posed in a vote session.
///
/// The surrogate key and the creation timestamp are assigned by the store:
/// both are absent until the question has been persisted. Order uniqueness
/// per session is a store constraint, not an in-memory one.
///
/// # Invariants
///
/// - `text` is non-empty
/// - `order_num >= 1`
/// - `max_choices >= 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: Option<QuestionId>,
    session_id: SessionId,
    text: String,
    order_num: u32,
    allow_multiple: bool,
    max_choices: u32,
    created_at: Option<Timestamp>,
}

impl Question {
    /// Creates a question not yet persisted.
    ///
    /// Whether the parent session exists is the application service's
    /// concern, not this constructor's.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the text is empty
    /// - `OutOfRange` if `order_num` or `max_choices` is below 1
    pub fn new(
        session_id: SessionId,
        text: impl Into<String>,
        order_num: u32,
        max_choices: u32,
        allow_multiple: bool,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        Self::validate_text(&text)?;
        Self::validate_order_num(order_num)?;
        Self::validate_max_choices(max_choices)?;

        Ok(Self {
            id: None,
            session_id,
            text,
            order_num,
            allow_multiple,
            max_choices,
            created_at: None,
        })
    }

    /// Rebuilds a question from stored values.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the stored id is not positive
    /// - `EmptyField` if the text is empty
    pub fn rehydrate(
        id: QuestionId,
        session_id: SessionId,
        text: impl Into<String>,
        order_num: u32,
        allow_multiple: bool,
        max_choices: u32,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if id.as_i64() < 1 {
            return Err(ValidationError::out_of_range("id", 1, id.as_i64()));
        }

        let text = text.into();
        Self::validate_text(&text)?;

        Ok(Self {
            id: Some(id),
            session_id,
            text,
            order_num,
            allow_multiple,
            max_choices,
            created_at: Some(created_at),
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the store-assigned id, absent before persistence.
    pub fn id(&self) -> Option<QuestionId> {
        self.id
    }

    /// Returns the parent session id.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Returns the question text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the position of the question within its session.
    pub fn order_num(&self) -> u32 {
        self.order_num
    }

    /// Returns true when voters may select more than one choice.
    pub fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    /// Returns the maximum number of selectable choices.
    pub fn max_choices(&self) -> u32 {
        self.max_choices
    }

    /// Returns the store-assigned creation timestamp, absent before
    /// persistence.
    pub fn created_at(&self) -> Option<&Timestamp> {
        self.created_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Replaces the text.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the new text is empty
    pub fn update_text(&mut self, new_text: impl Into<String>) -> Result<(), ValidationError> {
        let new_text = new_text.into();
        Self::validate_text(&new_text)?;
        self.text = new_text;
        Ok(())
    }

    /// Moves the question to another position.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the new position is below 1
    pub fn change_order_num(&mut self, new_order_num: u32) -> Result<(), ValidationError> {
        Self::validate_order_num(new_order_num)?;
        self.order_num = new_order_num;
        Ok(())
    }

    /// Flips the multiple-selection flag.
    pub fn toggle_allow_multiple(&mut self) {
        self.allow_multiple = !self.allow_multiple;
    }

    /// Changes the selectable-choice ceiling.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the new ceiling is below 1
    pub fn change_max_choices(&mut self, new_max_choices: u32) -> Result<(), ValidationError> {
        Self::validate_max_choices(new_max_choices)?;
        self.max_choices = new_max_choices;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────

    fn validate_text(text: &str) -> Result<(), ValidationError> {
        if text.is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        Ok(())
    }

    fn validate_order_num(order_num: u32) -> Result<(), ValidationError> {
        if order_num < 1 {
            return Err(ValidationError::out_of_range("order_num", 1, order_num as i64));
        }
        Ok(())
    }

    fn validate_max_choices(max_choices: u32) -> Result<(), ValidationError> {
        if max_choices < 1 {
            return Err(ValidationError::out_of_range(
                "max_choices",
                1,
                max_choices as i64,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(SessionId::new(), "Budget?", 1, 1, false).unwrap()
    }

    #[test]
    fn new_question_has_no_identity_yet() {
        let q = question();
        assert!(q.id().is_none());
        assert!(q.created_at().is_none());
    }

    #[test]
    fn new_question_rejects_empty_text() {
        assert!(Question::new(SessionId::new(), "", 1, 1, false).is_err());
    }

    #[test]
    fn new_question_rejects_zero_order_num() {
        assert!(Question::new(SessionId::new(), "Budget?", 0, 1, false).is_err());
    }

    #[test]
    fn new_question_rejects_zero_max_choices() {
        assert!(Question::new(SessionId::new(), "Budget?", 1, 0, true).is_err());
    }

    #[test]
    fn rehydrate_roundtrips_fields() {
        let session_id = SessionId::new();
        let created = Timestamp::now();
        let q = Question::rehydrate(
            QuestionId::from_i64(3),
            session_id,
            "Budget?",
            2,
            true,
            4,
            created,
        )
        .unwrap();

        assert_eq!(q.id(), Some(QuestionId::from_i64(3)));
        assert_eq!(q.session_id(), &session_id);
        assert_eq!(q.text(), "Budget?");
        assert_eq!(q.order_num(), 2);
        assert!(q.allow_multiple());
        assert_eq!(q.max_choices(), 4);
        assert_eq!(q.created_at(), Some(&created));
    }

    #[test]
    fn rehydrate_rejects_non_positive_id() {
        let result = Question::rehydrate(
            QuestionId::from_i64(0),
            SessionId::new(),
            "Budget?",
            1,
            false,
            1,
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn rehydrate_rejects_empty_text() {
        let result = Question::rehydrate(
            QuestionId::from_i64(1),
            SessionId::new(),
            "",
            1,
            false,
            1,
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn update_text_revalidates() {
        let mut q = question();
        assert!(q.update_text("").is_err());
        assert_eq!(q.text(), "Budget?");

        q.update_text("Venue?").unwrap();
        assert_eq!(q.text(), "Venue?");
    }

    #[test]
    fn change_order_num_revalidates() {
        let mut q = question();
        assert!(q.change_order_num(0).is_err());
        assert_eq!(q.order_num(), 1);

        q.change_order_num(5).unwrap();
        assert_eq!(q.order_num(), 5);
    }

    #[test]
    fn toggle_allow_multiple_flips_flag() {
        let mut q = question();
        assert!(!q.allow_multiple());
        q.toggle_allow_multiple();
        assert!(q.allow_multiple());
        q.toggle_allow_multiple();
        assert!(!q.allow_multiple());
    }

    #[test]
    fn change_max_choices_revalidates() {
        let mut q = question();
        assert!(q.change_max_choices(0).is_err());
        q.change_max_choices(3).unwrap();
        assert_eq!(q.max_choices(), 3);
    }
}
