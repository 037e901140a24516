// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Query engine seam and per-session execution contexts
//!
//! This module provides:
//! - The `EngineBackend` trait the enclosing server implements to plug its
//!   query engine into the session layer
//! - `ExecutionContext`, the isolated per-session state (configuration
//!   overlay, current database) queries run against
//! - `ContextFactory`, which produces isolated contexts or hands out the
//!   shared singleton in single-session mode

pub mod context;
pub mod factory;
pub mod static_engine;

// Re-export the main types for convenience
pub use context::ExecutionContext;
pub use factory::ContextFactory;
pub use static_engine::StaticEngine;

use crate::error::Result;

/// Reserved configuration key recording the engine's reported compatibility
/// version. Stamped onto every execution context before per-session overlays
/// are applied, so a session overlay may deliberately override it.
pub const COMPAT_VERSION_KEY: &str = "sqlmux.engine.compat.version";

/// Outcome of a statement executed against the engine backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    /// Rows touched by the statement, zero for directives like USE
    pub rows_affected: u64,
}

impl QueryOutcome {
    pub fn none() -> Self {
        QueryOutcome { rows_affected: 0 }
    }
}

/// Query engine collaborator
///
/// The session layer never parses or plans SQL itself; everything it issues
/// (including the `USE <database>` directive during session open) goes
/// through this trait.
pub trait EngineBackend: Send + Sync {
    /// Compatibility version the engine reports, recorded on every new
    /// execution context under [`COMPAT_VERSION_KEY`]
    fn compat_version(&self) -> String;

    /// Execute one statement
    ///
    /// A `USE <database>` directive must fail with
    /// `SessionError::DatabaseNotFound` when the database does not exist.
    fn execute(&self, sql: &str) -> Result<QueryOutcome>;
}
