//! Bearer-token session shared by every request.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Holds the login token, if any.
///
/// Cloning shares the same slot, so a 401 seen by one client clears the token
/// for all of them.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::default();
        session.set_token(token);
        session
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.write() = None;
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read().clone()
    }

    // The slot is a single `Option`, always whole; a poisoned lock is logged
    // and used as is.
    fn read(&self) -> RwLockReadGuard<'_, Option<String>> {
        self.token.read().unwrap_or_else(|poisoned| {
            tracing::error!("session lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<String>> {
        self.token.write().unwrap_or_else(|poisoned| {
            tracing::error!("session lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_token_slot() {
        let session = Session::with_token("abc");
        let other = session.clone();
        other.clear();
        assert!(session.token().is_none());
        session.set_token("def");
        assert_eq!(other.token().as_deref(), Some("def"));
    }

    #[test]
    fn poisoned_session_still_clears_token() {
        let session = Session::with_token("abc");
        let slot = Arc::clone(&session.token);
        let poisoner = std::thread::spawn(move || {
            let _guard = slot.write().unwrap();
            panic!("poison the session");
        });
        assert!(poisoner.join().is_err());
        assert!(session.token.is_poisoned());

        assert_eq!(session.token().as_deref(), Some("abc"));
        session.clear();
        assert!(session.token().is_none());
        session.set_token("def");
        assert_eq!(session.token().as_deref(), Some("def"));
    }
}
