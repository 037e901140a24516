// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Session management for multiplexed SQL-over-network connections
//!
//! This module provides session management functionality for:
//! - Mapping each client-visible connection to an isolated execution context
//! - Propagating per-session configuration overlays into that context
//! - Per-session resource-pool assignment for query admission
//! - Tearing session and context down together
//!
//! Features supported:
//! - Session open and close orchestration against a transport layer
//! - Concurrent per-key-safe session registry
//! - Single-session mode (one shared execution context for all sessions)
//! - Event listener notification on session creation and closure

pub mod models;
pub mod registry;
pub mod manager;

pub use models::{
    OpenSessionRequest, ResourcePoolId, SessionHandle, SessionMetadata, TransportSession,
};
pub use registry::{SessionEntry, SessionRegistry};
pub use manager::{SessionManager, USE_DATABASE_KEY};
