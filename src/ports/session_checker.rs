//! Session existence checker port.
//!
//! The only cross-aggregate coupling in the system: the question service
//! asks whether a session exists before creating a question under it. The
//! capability can be satisfied in-process or remotely; callers never know
//! which.

use async_trait::async_trait;

use crate::domain::foundation::{RepositoryError, SessionId};

/// Capability to check whether a vote session exists.
#[async_trait]
pub trait SessionChecker: Send + Sync {
    /// Returns true when a session with this id is persisted.
    async fn exists(&self, session_id: &SessionId) -> Result<bool, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_checker_is_object_safe() {
        fn _accepts_dyn(_checker: &dyn SessionChecker) {}
    }
}
