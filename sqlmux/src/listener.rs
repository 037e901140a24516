// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Session lifecycle event listeners
//!
//! Listeners let external monitoring track active sessions. They are a
//! best-effort hook: the session manager logs and swallows listener errors,
//! so a broken monitoring pipeline can never abort a session open or close.
//! An implementation must not block; it is called synchronously on the
//! open/close path.

use crate::error::{Result, SessionError};
use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

/// Notified on session creation and closure
///
/// Injected into the session manager at construction so tests and embedders
/// can substitute their own implementation.
pub trait SessionEventListener: Send + Sync {
    fn on_session_created(
        &self,
        client_address: &str,
        session_id: &str,
        username: &str,
    ) -> Result<()>;

    fn on_session_closed(&self, session_id: &str) -> Result<()>;
}

/// Listener that records lifecycle events to the log
pub struct LoggingListener;

impl SessionEventListener for LoggingListener {
    fn on_session_created(
        &self,
        client_address: &str,
        session_id: &str,
        username: &str,
    ) -> Result<()> {
        info!(
            "session created: id={} user={} address={}",
            session_id, username, client_address
        );
        Ok(())
    }

    fn on_session_closed(&self, session_id: &str) -> Result<()> {
        info!("session closed: id={}", session_id);
        Ok(())
    }
}

/// Listener keeping created/closed counters for monitoring
///
/// `on_session_closed` counts once per close invocation, including
/// idempotent re-closes of an already-released handle.
pub struct CountingListener {
    created: AtomicU64,
    closed: AtomicU64,
}

impl CountingListener {
    pub fn new() -> Self {
        CountingListener {
            created: AtomicU64::new(0),
            closed: AtomicU64::new(0),
        }
    }

    pub fn created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    pub fn closed(&self) -> u64 {
        self.closed.load(Ordering::Relaxed)
    }

    /// Sessions currently believed live by this listener
    pub fn active(&self) -> i64 {
        self.created() as i64 - self.closed() as i64
    }
}

impl Default for CountingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEventListener for CountingListener {
    fn on_session_created(&self, _: &str, session_id: &str, _: &str) -> Result<()> {
        if session_id.is_empty() {
            return Err(SessionError::Listener("empty session id".to_string()));
        }
        self.created.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn on_session_closed(&self, session_id: &str) -> Result<()> {
        if session_id.is_empty() {
            return Err(SessionError::Listener("empty session id".to_string()));
        }
        self.closed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_listener_tracks_lifecycle() {
        let listener = CountingListener::new();
        listener
            .on_session_created("127.0.0.1:9", "s1", "alice")
            .unwrap();
        listener
            .on_session_created("127.0.0.1:9", "s2", "bob")
            .unwrap();
        listener.on_session_closed("s1").unwrap();

        assert_eq!(listener.created(), 2);
        assert_eq!(listener.closed(), 1);
        assert_eq!(listener.active(), 1);
    }

    #[test]
    fn test_counting_listener_rejects_empty_id() {
        let listener = CountingListener::new();
        assert!(listener.on_session_created("addr", "", "user").is_err());
        assert!(listener.on_session_closed("").is_err());
        assert_eq!(listener.created(), 0);
    }
}
