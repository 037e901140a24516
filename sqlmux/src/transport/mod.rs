// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Transport-session collaborator seam
//!
//! The network front-end (wire protocol, framing, credential verification)
//! lives outside this crate. The session manager talks to it exclusively
//! through the [`SessionTransport`] trait: wrapping instead of extending, so
//! the core carries no dependency on any concrete server stack.
//!
//! [`InProcessTransport`] is a complete in-memory implementation for
//! embedders and tests.

use crate::error::{Result, SessionError};
use crate::session::models::{OpenSessionRequest, SessionHandle, TransportSession};
use dashmap::DashMap;
use std::collections::HashMap;
use uuid::Uuid;

/// Minimal session lifecycle capability the transport layer must expose
pub trait SessionTransport: Send + Sync {
    /// Authenticate the caller and allocate a session handle
    fn open(&self, request: &OpenSessionRequest) -> Result<SessionHandle>;

    /// Transport-layer session state for a handle
    fn get_session(&self, handle: &SessionHandle) -> Result<TransportSession>;

    /// Release the transport resources behind a handle
    ///
    /// Must fail with `SessionError::UnknownHandle` for handles it has no
    /// session for (including handles it already released).
    fn close(&self, handle: &SessionHandle) -> Result<()>;
}

/// Session-config prefix marking an overridden configuration entry
pub const CONF_PREFIX: &str = "set:conf:";
/// Session-config prefix marking a session variable entry
pub const VAR_PREFIX: &str = "set:var:";

/// In-memory transport for embedding the session layer without a network
///
/// Issues uuid-v4 handles and derives the two login overlays from the
/// caller-supplied session config: keys prefixed `set:conf:` become
/// overridden configurations, keys prefixed `set:var:` become session
/// variables (prefixes stripped). Everything else, such as `use:database`,
/// is left to the session manager.
pub struct InProcessTransport {
    sessions: DashMap<SessionHandle, TransportSession>,
    credentials: Option<HashMap<String, String>>,
}

impl InProcessTransport {
    /// Transport that accepts any credentials
    pub fn open_access() -> Self {
        InProcessTransport {
            sessions: DashMap::new(),
            credentials: None,
        }
    }

    /// Transport validating against a username -> password table
    pub fn with_credentials(credentials: HashMap<String, String>) -> Self {
        InProcessTransport {
            sessions: DashMap::new(),
            credentials: Some(credentials),
        }
    }

    /// Number of transport sessions currently allocated
    pub fn live_sessions(&self) -> usize {
        self.sessions.len()
    }

    fn split_overlays(
        session_config: &HashMap<String, String>,
    ) -> (HashMap<String, String>, HashMap<String, String>) {
        let mut overridden = HashMap::new();
        let mut variables = HashMap::new();
        for (key, value) in session_config {
            if let Some(stripped) = key.strip_prefix(CONF_PREFIX) {
                overridden.insert(stripped.to_string(), value.clone());
            } else if let Some(stripped) = key.strip_prefix(VAR_PREFIX) {
                variables.insert(stripped.to_string(), value.clone());
            }
        }
        (overridden, variables)
    }
}

impl SessionTransport for InProcessTransport {
    fn open(&self, request: &OpenSessionRequest) -> Result<SessionHandle> {
        if let Some(credentials) = &self.credentials {
            match credentials.get(&request.username) {
                Some(password) if *password == request.password => {}
                _ => {
                    return Err(SessionError::AuthenticationFailed(format!(
                        "invalid credentials for user '{}'",
                        request.username
                    )))
                }
            }
        }

        let handle = SessionHandle::new(Uuid::new_v4().to_string());
        let (overridden_configurations, session_variables) =
            Self::split_overlays(&request.session_config);

        self.sessions.insert(
            handle.clone(),
            TransportSession {
                client_address: request.client_address.clone(),
                username: request.username.clone(),
                overridden_configurations,
                session_variables,
            },
        );
        Ok(handle)
    }

    fn get_session(&self, handle: &SessionHandle) -> Result<TransportSession> {
        self.sessions
            .get(handle)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SessionError::UnknownHandle(handle.to_string()))
    }

    fn close(&self, handle: &SessionHandle) -> Result<()> {
        self.sessions
            .remove(handle)
            .map(|_| ())
            .ok_or_else(|| SessionError::UnknownHandle(handle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_get_session() {
        let transport = InProcessTransport::open_access();
        let request = OpenSessionRequest::new("alice", "", "10.0.0.7:51234")
            .with_config("set:conf:a", "1")
            .with_config("set:var:b", "2")
            .with_config("use:database", "sales");

        let handle = transport.open(&request).unwrap();
        let session = transport.get_session(&handle).unwrap();

        assert_eq!(session.username, "alice");
        assert_eq!(session.client_address, "10.0.0.7:51234");
        assert_eq!(
            session.overridden_configurations.get("a"),
            Some(&"1".to_string())
        );
        assert_eq!(session.session_variables.get("b"), Some(&"2".to_string()));
        // unprefixed directives are not part of the login overlays
        assert!(!session.overridden_configurations.contains_key("use:database"));
    }

    #[test]
    fn test_credential_check() {
        let mut credentials = HashMap::new();
        credentials.insert("alice".to_string(), "secret".to_string());
        let transport = InProcessTransport::with_credentials(credentials);

        let ok = transport.open(&OpenSessionRequest::new("alice", "secret", "addr"));
        assert!(ok.is_ok());

        let bad = transport.open(&OpenSessionRequest::new("alice", "nope", "addr"));
        assert!(matches!(bad, Err(SessionError::AuthenticationFailed(_))));

        let unknown = transport.open(&OpenSessionRequest::new("mallory", "x", "addr"));
        assert!(matches!(unknown, Err(SessionError::AuthenticationFailed(_))));
    }

    #[test]
    fn test_close_unknown_handle_fails() {
        let transport = InProcessTransport::open_access();
        let handle = transport
            .open(&OpenSessionRequest::new("alice", "", "addr"))
            .unwrap();

        transport.close(&handle).unwrap();
        assert_eq!(transport.live_sessions(), 0);

        let again = transport.close(&handle);
        assert!(matches!(again, Err(SessionError::UnknownHandle(_))));
        let gone = transport.get_session(&handle);
        assert!(matches!(gone, Err(SessionError::UnknownHandle(_))));
    }

    #[test]
    fn test_handles_are_unique() {
        let transport = InProcessTransport::open_access();
        let request = OpenSessionRequest::new("alice", "", "addr");
        let first = transport.open(&request).unwrap();
        let second = transport.open(&request).unwrap();
        assert_ne!(first, second);
        assert_eq!(transport.live_sessions(), 2);
    }
}
