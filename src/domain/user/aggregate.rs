//! User aggregate entity.
//!
//! A user can participate in any number of vote sessions. The password
//! hash is a separate persisted aggregate keyed by user id and never
//! appears here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// User aggregate.
///
/// # Invariants
///
/// - `id` is assigned at construction and immutable
/// - `name` is non-empty
/// - `email` matches the `local@domain.tld` pattern
/// - `created_at` is set once and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    created_at: Timestamp,
}

impl User {
    /// Creates a new user with a fresh identity.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is empty
    /// - `InvalidFormat` if the email does not match the pattern
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let email = email.into();

        Self::validate_name(&name)?;
        Self::validate_email(&email)?;

        Ok(Self {
            id: UserId::new(),
            name,
            email,
            created_at: Timestamp::now(),
        })
    }

    /// Rebuilds a user from stored values.
    ///
    /// The email format is trusted as-is: the store only ever received it
    /// through a validated write. Identity and name are still re-checked.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the id is the nil UUID
    /// - `EmptyField` if the name is empty
    pub fn rehydrate(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if id.is_nil() {
            return Err(ValidationError::invalid_format("id", "nil uuid"));
        }

        let name = name.into();
        Self::validate_name(&name)?;

        Ok(Self {
            id,
            name,
            email: email.into(),
            created_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the user id.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the user name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns when the user was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Replaces the name.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the new name is empty
    pub fn update_name(&mut self, new_name: impl Into<String>) -> Result<(), ValidationError> {
        let new_name = new_name.into();
        Self::validate_name(&new_name)?;
        self.name = new_name;
        Ok(())
    }

    /// Replaces the email address.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the new email does not match the pattern
    pub fn update_email(&mut self, new_email: impl Into<String>) -> Result<(), ValidationError> {
        let new_email = new_email.into();
        Self::validate_email(&new_email)?;
        self.email = new_email;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────

    fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(())
    }

    fn validate_email(email: &str) -> Result<(), ValidationError> {
        if !EMAIL_PATTERN.is_match(email) {
            return Err(ValidationError::invalid_format("email", email));
        }
        Ok(())
    }
}
