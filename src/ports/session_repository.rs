//! Vote session repository port.
//!
//! Covers the session lifecycle plus the participant association. Deleting
//! a session cascades to its questions, choices and participant rows at the
//! store; none of that is orchestrated here.

use async_trait::async_trait;

use crate::domain::foundation::{RepositoryError, SessionId, UserId};
use crate::domain::session::Session;
use crate::domain::user::User;

/// Repository port for vote session persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists a new session.
    async fn create(&self, session: &Session) -> Result<(), RepositoryError>;

    /// Fetches a session by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this id
    async fn find_by_id(&self, id: &SessionId) -> Result<Session, RepositoryError>;

    /// Lists the sessions a user participates in, most recent first.
    async fn sessions_for_user(&self, user_id: &UserId) -> Result<Vec<Session>, RepositoryError>;

    /// Updates title, description and end of an existing session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session no longer exists
    async fn update(&self, session: &Session) -> Result<(), RepositoryError>;

    /// Deletes a session; questions, choices and participant rows cascade.
    async fn delete(&self, id: &SessionId) -> Result<(), RepositoryError>;

    /// Sets the end timestamp to the current instant.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session no longer exists
    async fn close(&self, id: &SessionId) -> Result<(), RepositoryError>;

    /// Lists sessions ordered by creation time descending.
    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Session>, RepositoryError>;

    /// Adds a user to the session's participants.
    ///
    /// # Errors
    ///
    /// - `ConstraintViolation` if the pair already exists or either side
    ///   is missing
    async fn add_participant(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<(), RepositoryError>;

    /// Removes a user from the session's participants.
    async fn remove_participant(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<(), RepositoryError>;

    /// Lists the participating users, earliest invited first.
    async fn participants(&self, session_id: &SessionId) -> Result<Vec<User>, RepositoryError>;

    /// Checks whether a user participates in a session.
    async fn is_participant(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError>;
}
