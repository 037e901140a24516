// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Session data model: handles, metadata, transport snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque identifier for one client connection's logical session
///
/// Issued by the transport layer; immutable once issued, unique for the
/// lifetime of the server process (or until reuse after close, per the
/// transport layer's contract). Used as the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle(String);

impl SessionHandle {
    pub fn new(id: impl Into<String>) -> Self {
        SessionHandle(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named scheduling/admission pool a session's queries are assigned to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePoolId(String);

impl ResourcePoolId {
    pub fn new(name: impl Into<String>) -> Self {
        ResourcePoolId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Write-once session metadata recorded at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub client_address: String,
    pub username: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

impl SessionMetadata {
    pub fn new(client_address: &str, username: &str, session_id: &str) -> Self {
        SessionMetadata {
            client_address: client_address.to_string(),
            username: username.to_string(),
            session_id: session_id.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Snapshot of the transport layer's session state for a handle
///
/// The transport layer establishes the two configuration maps during
/// authentication/login; the session manager applies them onto the execution
/// context in fixed order (overridden configurations first, then session
/// variables).
#[derive(Debug, Clone, Default)]
pub struct TransportSession {
    pub client_address: String,
    pub username: String,
    pub overridden_configurations: HashMap<String, String>,
    pub session_variables: HashMap<String, String>,
}

/// Caller-supplied parameters for opening a session
#[derive(Debug, Clone)]
pub struct OpenSessionRequest {
    pub protocol_version: u32,
    pub username: String,
    pub password: String,
    pub client_address: String,
    pub session_config: HashMap<String, String>,
    pub allow_impersonation: bool,
    pub delegation_token: Option<String>,
}

impl OpenSessionRequest {
    pub fn new(username: &str, password: &str, client_address: &str) -> Self {
        OpenSessionRequest {
            protocol_version: 1,
            username: username.to_string(),
            password: password.to_string(),
            client_address: client_address.to_string(),
            session_config: HashMap::new(),
            allow_impersonation: false,
            delegation_token: None,
        }
    }

    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.session_config.insert(key.to_string(), value.to_string());
        self
    }
}
