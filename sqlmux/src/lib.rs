// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! SqlMux - session multiplexing for SQL-over-network servers
//!
//! SqlMux maps each client-visible connection ("session") to an isolated
//! query-execution context, propagates per-session configuration into that
//! context, and tears both down together. It owns session identity, the
//! execution-context binding, the per-session configuration overlay, and the
//! per-session resource-pool assignment - nothing else. Authentication, wire
//! protocol framing and SQL execution stay with the enclosing server and are
//! reached through collaborator traits.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use sqlmux::{
//!     InProcessTransport, LoggingListener, OpenSessionRequest, SessionManager,
//!     SessionServerConfig, StaticEngine, USE_DATABASE_KEY,
//! };
//!
//! # fn main() -> sqlmux::Result<()> {
//! let manager = SessionManager::new(
//!     Arc::new(InProcessTransport::open_access()),
//!     Arc::new(StaticEngine::new(&["default", "sales"])),
//!     Arc::new(LoggingListener),
//!     SessionServerConfig::default(),
//! );
//!
//! let handle = manager.open_session(
//!     &OpenSessionRequest::new("alice", "secret", "10.0.0.7:51234")
//!         .with_config(USE_DATABASE_KEY, "sales"),
//! )?;
//!
//! let context = manager.context(&handle).expect("session is live");
//! assert_eq!(context.current_database(), "sales");
//!
//! manager.close_session(&handle)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`session`] - session manager, registry and data model
//! - [`engine`] - query engine seam and execution contexts
//! - [`transport`] - transport-session collaborator seam
//! - [`listener`] - lifecycle event hooks for external monitoring
//! - [`config`] - server-level configuration
//! - [`error`] - error types and handling

pub mod config;
pub mod engine;
pub mod error;
pub mod listener;
pub mod session;
pub mod transport;

// Re-export main types for convenience
pub use config::SessionServerConfig;
pub use engine::{
    ContextFactory, EngineBackend, ExecutionContext, QueryOutcome, StaticEngine,
    COMPAT_VERSION_KEY,
};
pub use error::{Result, SessionError};
pub use listener::{CountingListener, LoggingListener, SessionEventListener};
pub use session::{
    OpenSessionRequest, ResourcePoolId, SessionHandle, SessionManager, SessionMetadata,
    SessionRegistry, TransportSession, USE_DATABASE_KEY,
};
pub use transport::{InProcessTransport, SessionTransport, CONF_PREFIX, VAR_PREFIX};
