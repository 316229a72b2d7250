//! Choice aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChoiceId, QuestionId, Timestamp, ValidationError};

/// One selectable answer of a question.
///
/// Owned by its question and cascade-deleted with it. Surrogate key and
/// creation timestamp are store-assigned, absent before persistence.
///
/// # Invariants
///
/// - `text` is non-empty
/// - `order_num >= 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    id: Option<ChoiceId>,
    question_id: QuestionId,
    text: String,
    order_num: u32,
    created_at: Option<Timestamp>,
}

impl Choice {
    /// Creates a choice not yet persisted.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the text is empty
    /// - `OutOfRange` if `order_num` is below 1
    pub fn new(
        question_id: QuestionId,
        order_num: u32,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        Self::validate_text(&text)?;
        Self::validate_order_num(order_num)?;

        Ok(Self {
            id: None,
            question_id,
            text,
            order_num,
            created_at: None,
        })
    }

    /// Rebuilds a choice from stored values.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the stored id is not positive
    /// - `EmptyField` if the text is empty
    pub fn rehydrate(
        id: ChoiceId,
        question_id: QuestionId,
        text: impl Into<String>,
        order_num: u32,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if id.as_i64() < 1 {
            return Err(ValidationError::out_of_range("id", 1, id.as_i64()));
        }

        let text = text.into();
        Self::validate_text(&text)?;

        Ok(Self {
            id: Some(id),
            question_id,
            text,
            order_num,
            created_at: Some(created_at),
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the store-assigned id, absent before persistence.
    pub fn id(&self) -> Option<ChoiceId> {
        self.id
    }

    /// Returns the parent question id.
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    /// Returns the choice text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the position of the choice within its question.
    pub fn order_num(&self) -> u32 {
        self.order_num
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

    /// Moves the choice to another position.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the new position is below 1
    pub fn change_order_num(&mut self, new_order_num: u32) -> Result<(), ValidationError> {
        Self::validate_order_num(new_order_num)?;
        self.order_num = new_order_num;
        Ok(())
    }

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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_choice_has_no_identity_yet() {
        let c = Choice::new(QuestionId::from_i64(1), 1, "Yes").unwrap();
        assert!(c.id().is_none());
        assert!(c.created_at().is_none());
        assert_eq!(c.question_id(), QuestionId::from_i64(1));
    }

    #[test]
    fn new_choice_rejects_empty_text() {
        assert!(Choice::new(QuestionId::from_i64(1), 1, "").is_err());
    }

    #[test]
    fn new_choice_rejects_zero_order_num() {
        assert!(Choice::new(QuestionId::from_i64(1), 0, "Yes").is_err());
    }

    #[test]
    fn rehydrate_roundtrips_fields() {
        let created = Timestamp::now();
        let c = Choice::rehydrate(ChoiceId::from_i64(9), QuestionId::from_i64(2), "No", 2, created)
            .unwrap();

        assert_eq!(c.id(), Some(ChoiceId::from_i64(9)));
        assert_eq!(c.question_id(), QuestionId::from_i64(2));
        assert_eq!(c.text(), "No");
        assert_eq!(c.order_num(), 2);
        assert_eq!(c.created_at(), Some(&created));
    }

    #[test]
    fn rehydrate_rejects_non_positive_id() {
        let result = Choice::rehydrate(
            ChoiceId::from_i64(0),
            QuestionId::from_i64(2),
            "No",
            2,
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn rehydrate_rejects_empty_text() {
        let result = Choice::rehydrate(
            ChoiceId::from_i64(1),
            QuestionId::from_i64(2),
            "",
            2,
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn mutators_revalidate() {
        let mut c = Choice::new(QuestionId::from_i64(1), 1, "Yes").unwrap();
        assert!(c.update_text("").is_err());
        assert!(c.change_order_num(0).is_err());

        c.update_text("Maybe").unwrap();
        c.change_order_num(3).unwrap();
        assert_eq!(c.text(), "Maybe");
        assert_eq!(c.order_num(), 3);
    }
}
