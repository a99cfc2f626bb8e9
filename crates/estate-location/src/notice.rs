//! Transient user-visible notifications.
//!
//! Components never propagate provider failures to their host; they push a
//! [`Notice`] here and carry on in a degraded state.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

/// Notices kept before the oldest are dropped, for hosts that never drain.
pub const MAX_PENDING_NOTICES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// Shared notification queue. Clones push into the same queue.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    inner: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(notice = %message);
        self.push(NoticeLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(notice = %message);
        self.push(NoticeLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(notice = %message);
        self.push(NoticeLevel::Error, message);
    }

    /// Everything pending, oldest first, without consuming it.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notice> {
        self.queue().iter().cloned().collect()
    }

    /// Removes and returns everything pending, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        self.queue().drain(..).collect()
    }

    #[must_use]
    pub fn count(&self, level: NoticeLevel) -> usize {
        self.queue().iter().filter(|n| n.level == level).count()
    }

    fn push(&self, level: NoticeLevel, message: String) {
        let mut queue = self.queue();
        if queue.len() == MAX_PENDING_NOTICES {
            if let Some(dropped) = queue.pop_front() {
                tracing::debug!(message = %dropped.message, "notice queue full; dropping oldest");
            }
        }
        queue.push_back(Notice {
            level,
            message,
            raised_at: Utc::now(),
        });
    }

    /// A panic while holding the lock cannot leave a half-written notice
    /// behind, so a poisoned queue is logged and used as is.
    fn queue(&self) -> MutexGuard<'_, VecDeque<Notice>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::error!("notice queue lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_queue() {
        let notices = Notices::new();
        let handle = notices.clone();
        handle.warning("fallback");
        notices.error("boom");

        assert_eq!(notices.count(NoticeLevel::Warning), 1);
        assert_eq!(handle.count(NoticeLevel::Error), 1);

        let drained = notices.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "fallback");
        assert!(handle.snapshot().is_empty());
    }

    #[test]
    fn oldest_notices_are_dropped_past_the_cap() {
        let notices = Notices::new();
        for i in 0..=MAX_PENDING_NOTICES {
            notices.info(format!("n{i}"));
        }

        let pending = notices.snapshot();
        assert_eq!(pending.len(), MAX_PENDING_NOTICES);
        assert_eq!(pending[0].message, "n1");
        assert_eq!(
            pending[MAX_PENDING_NOTICES - 1].message,
            format!("n{MAX_PENDING_NOTICES}")
        );
    }

    #[test]
    fn poisoned_queue_still_accepts_notices() {
        let notices = Notices::new();
        notices.warning("before");

        let inner = Arc::clone(&notices.inner);
        let poisoner = std::thread::spawn(move || {
            let _guard = inner.lock().unwrap();
            panic!("poison the queue");
        });
        assert!(poisoner.join().is_err());
        assert!(notices.inner.is_poisoned());

        notices.error("after");

        let drained = notices.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].message, "after");
        assert_eq!(drained[1].level, NoticeLevel::Error);
    }
}
