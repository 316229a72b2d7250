//! In-process session existence checker.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{RepositoryError, SessionId};
use crate::ports::{SessionChecker, SessionRepository};

/// Satisfies [`SessionChecker`] by asking the session repository directly.
///
/// A deployment that splits aggregates across services would swap this for
/// a remote implementation; consumers depend only on the port.
#[derive(Clone)]
pub struct InProcessSessionChecker {
    sessions: Arc<dyn SessionRepository>,
}

impl InProcessSessionChecker {
    /// Creates a checker backed by the given repository.
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl SessionChecker for InProcessSessionChecker {
    async fn exists(&self, session_id: &SessionId) -> Result<bool, RepositoryError> {
        match self.sessions.find_by_id(session_id).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::session::Session;
    use crate::domain::user::User;

    struct SingleSessionRepo {
        known: SessionId,
    }

    #[async_trait]
    impl SessionRepository for SingleSessionRepo {
        async fn create(&self, _session: &Session) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn find_by_id(&self, id: &SessionId) -> Result<Session, RepositoryError> {
            if id == &self.known {
                Ok(Session::new("AG 2025", "annual meeting").unwrap())
            } else {
                Err(RepositoryError::not_found("session", id))
            }
        }

        async fn sessions_for_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<Session>, RepositoryError> {
            unimplemented!()
        }

        async fn update(&self, _session: &Session) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn delete(&self, _id: &SessionId) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn close(&self, _id: &SessionId) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn list(&self, _limit: u32, _offset: u32) -> Result<Vec<Session>, RepositoryError> {
            unimplemented!()
        }

        async fn add_participant(
            &self,
            _session_id: &SessionId,
            _user_id: &UserId,
        ) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn remove_participant(
            &self,
            _session_id: &SessionId,
            _user_id: &UserId,
        ) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn participants(
            &self,
            _session_id: &SessionId,
        ) -> Result<Vec<User>, RepositoryError> {
            unimplemented!()
        }

        async fn is_participant(
            &self,
            _session_id: &SessionId,
            _user_id: &UserId,
        ) -> Result<bool, RepositoryError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn known_session_exists() {
        let known = SessionId::new();
        let checker = InProcessSessionChecker::new(Arc::new(SingleSessionRepo { known }));
        assert!(checker.exists(&known).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_session_maps_not_found_to_false() {
        let checker = InProcessSessionChecker::new(Arc::new(SingleSessionRepo {
            known: SessionId::new(),
        }));
        assert!(!checker.exists(&SessionId::new()).await.unwrap());
    }
}
