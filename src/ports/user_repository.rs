//! User repository port.
//!
//! Defines the contract for persisting and retrieving User aggregates.
//! The password hash lives behind its own sub-contract because it is a
//! separate persisted aggregate, only lifecycle-bound to the user.

use async_trait::async_trait;

use crate::domain::foundation::{RepositoryError, UserId};
use crate::domain::user::User;

/// Repository port for User aggregate persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user.
    ///
    /// # Errors
    ///
    /// - `ConstraintViolation` if the email is already taken
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this id
    async fn find_by_id(&self, id: &UserId) -> Result<User, RepositoryError>;

    /// Fetches a user by email address.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this email
    async fn find_by_email(&self, email: &str) -> Result<User, RepositoryError>;

    /// Updates name and email of an existing user.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user no longer exists
    /// - `ConstraintViolation` if the new email is already taken
    async fn update(&self, user: &User) -> Result<(), RepositoryError>;

    /// Deletes a user. The stored password hash goes with it.
    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;

    /// Lists users ordered by creation time descending.
    ///
    /// Returns an empty vector when the page is past the end.
    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<User>, RepositoryError>;
}

/// Sub-contract for password hash storage, keyed by user id.
#[async_trait]
pub trait PasswordRepository: Send + Sync {
    /// Stores or replaces the hash for a user.
    async fn set_password(&self, user_id: &UserId, password_hash: &str)
        -> Result<(), RepositoryError>;

    /// Fetches the stored hash.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no hash is stored for this user
    async fn password_hash(&self, user_id: &UserId) -> Result<String, RepositoryError>;

    /// Removes the stored hash.
    async fn delete_password(&self, user_id: &UserId) -> Result<(), RepositoryError>;
}
