//! Vote session aggregate entity.
//!
//! A session owns its questions (cascade-deleted with it) and is joined to
//! users through the participant association. Neither side owns the other.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp, ValidationError};

/// Vote session aggregate.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `created_at` is set at construction and immutable
/// - when `ends_at` is present it never precedes `created_at`; absence
///   means the session has no defined end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    title: String,
    description: String,
    created_at: Timestamp,
    ends_at: Option<Timestamp>,
}

impl Session {
    /// Creates an open-ended session.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is empty
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        Self::validate_title(&title)?;

        Ok(Self {
            id: SessionId::new(),
            title,
            description: description.into(),
            created_at: Timestamp::now(),
            ends_at: None,
        })
    }

    /// Creates a session with a defined end.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is empty
    /// - `InvalidFormat` if the end precedes the creation instant
    pub fn with_end(
        title: impl Into<String>,
        description: impl Into<String>,
        ends_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        Self::validate_title(&title)?;

        let created_at = Timestamp::now();
        Self::validate_end(&created_at, &ends_at)?;

        Ok(Self {
            id: SessionId::new(),
            title,
            description: description.into(),
            created_at,
            ends_at: Some(ends_at),
        })
    }

    /// Rebuilds a session from stored values.
    ///
    /// An empty stored description falls back to the title.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the id is the nil UUID
    /// - `EmptyField` if the title is empty
    /// - `InvalidFormat` if the end precedes the creation timestamp
    pub fn rehydrate(
        id: SessionId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: Timestamp,
        ends_at: Option<Timestamp>,
    ) -> Result<Self, ValidationError> {
        if id.is_nil() {
            return Err(ValidationError::invalid_format("id", "nil uuid"));
        }

        let title = title.into();
        Self::validate_title(&title)?;

        if let Some(end) = &ends_at {
            Self::validate_end(&created_at, end)?;
        }

        let mut description = description.into();
        if description.is_empty() {
            description = title.clone();
        }

        Ok(Self {
            id,
            title,
            description,
            created_at,
            ends_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the session title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the session description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the end timestamp, if one is defined.
    pub fn ends_at(&self) -> Option<&Timestamp> {
        self.ends_at.as_ref()
    }

    /// Returns true when the session has a defined end.
    pub fn has_end(&self) -> bool {
        self.ends_at.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the new title is empty
    pub fn update_title(&mut self, new_title: impl Into<String>) -> Result<(), ValidationError> {
        let new_title = new_title.into();
        Self::validate_title(&new_title)?;
        self.title = new_title;
        Ok(())
    }

    /// Replaces the description. Any value is accepted.
    pub fn update_description(&mut self, new_description: impl Into<String>) {
        self.description = new_description.into();
    }

    /// Defines or moves the end of the session.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the end precedes the creation timestamp
    pub fn set_end_date(&mut self, ends_at: Timestamp) -> Result<(), ValidationError> {
        Self::validate_end(&self.created_at, &ends_at)?;
        self.ends_at = Some(ends_at);
        Ok(())
    }

    /// Removes the end; the session becomes open-ended again.
    pub fn remove_end_date(&mut self) {
        self.ends_at = None;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────

    fn validate_title(title: &str) -> Result<(), ValidationError> {
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(())
    }

    fn validate_end(created_at: &Timestamp, ends_at: &Timestamp) -> Result<(), ValidationError> {
        if ends_at.is_before(created_at) {
            return Err(ValidationError::invalid_format(
                "ends_at",
                "precedes created_at",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_datetime(Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[test]
    fn new_session_has_no_end() {
        let session = Session::new("AG 2025", "annual meeting").unwrap();
        assert!(!session.has_end());
        assert!(session.ends_at().is_none());
    }

    #[test]
    fn new_session_rejects_empty_title() {
        assert!(Session::new("", "whatever").is_err());
    }

    #[test]
    fn with_end_accepts_future_end() {
        let end = Timestamp::from_datetime(Utc::now() + Duration::hours(2));
        let session = Session::with_end("AG 2025", "annual meeting", end).unwrap();
        assert_eq!(session.ends_at(), Some(&end));
    }

    #[test]
    fn with_end_rejects_end_before_creation() {
        let past = Timestamp::from_datetime(Utc::now() - Duration::hours(2));
        let result = Session::with_end("AG 2025", "annual meeting", past);
        assert!(result.is_err());
    }

    #[test]
    fn rehydrate_rejects_nil_id() {
        let result = Session::rehydrate(
            SessionId::from_uuid(Uuid::nil()),
            "AG 2025",
            "annual meeting",
            ts(1_000),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rehydrate_rejects_end_before_creation() {
        let result = Session::rehydrate(
            SessionId::new(),
            "AG 2025",
            "annual meeting",
            ts(1_000),
            Some(ts(999)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn rehydrate_accepts_end_equal_to_creation() {
        let session = Session::rehydrate(
            SessionId::new(),
            "AG 2025",
            "annual meeting",
            ts(1_000),
            Some(ts(1_000)),
        )
        .unwrap();
        assert!(session.has_end());
    }

    #[test]
    fn rehydrate_defaults_empty_description_to_title() {
        let session =
            Session::rehydrate(SessionId::new(), "AG 2025", "", ts(1_000), None).unwrap();
        assert_eq!(session.description(), "AG 2025");
    }

    #[test]
    fn update_title_revalidates() {
        let mut session = Session::new("AG 2025", "annual meeting").unwrap();
        assert!(session.update_title("").is_err());
        assert_eq!(session.title(), "AG 2025");

        session.update_title("AG 2026").unwrap();
        assert_eq!(session.title(), "AG 2026");
    }

    #[test]
    fn set_end_date_rejects_end_before_creation() {
        let mut session = Session::new("AG 2025", "annual meeting").unwrap();
        let before = Timestamp::from_datetime(*session.created_at().as_datetime() - Duration::seconds(1));
        assert!(session.set_end_date(before).is_err());
        assert!(!session.has_end());
    }

    #[test]
    fn remove_end_date_makes_session_open_ended() {
        let end = Timestamp::from_datetime(Utc::now() + Duration::hours(1));
        let mut session = Session::with_end("AG 2025", "annual meeting", end).unwrap();
        session.remove_end_date();
        assert!(!session.has_end());
    }

    proptest! {
        #[test]
        fn rehydrate_roundtrips_all_valid_field_combinations(
            title in "[a-zA-Z0-9 ]{1,40}",
            description in "[a-zA-Z0-9 ]{1,60}",
            created_secs in 0i64..4_000_000_000,
            end_offset in proptest::option::of(0i64..100_000_000),
        ) {
            let id = SessionId::new();
            let created = ts(created_secs);
            let ends = end_offset.map(|off| ts(created_secs + off));

            let session = Session::rehydrate(
                id,
                title.clone(),
                description.clone(),
                created,
                ends,
            ).unwrap();

            prop_assert_eq!(session.id(), &id);
            prop_assert_eq!(session.title(), title.as_str());
            prop_assert_eq!(session.description(), description.as_str());
            prop_assert_eq!(session.created_at(), &created);
            prop_assert_eq!(session.ends_at(), ends.as_ref());
        }

        #[test]
        fn rehydrate_rejects_every_end_before_creation(
            created_secs in 1i64..4_000_000_000,
            end_gap in 1i64..1_000_000,
        ) {
            let result = Session::rehydrate(
                SessionId::new(),
                "AG 2025",
                "annual meeting",
                ts(created_secs),
                Some(ts(created_secs - end_gap)),
            );
            prop_assert!(result.is_err());
        }
    }
}
