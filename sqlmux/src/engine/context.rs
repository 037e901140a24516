// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Per-session execution context

use super::{EngineBackend, QueryOutcome};
use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Database a context starts in before any USE directive
pub const DEFAULT_DATABASE: &str = "default";

/// Isolated state a session's queries run against
///
/// Owns a mutable, string-keyed configuration overlay and the current
/// database, plus a shared reference to the engine backend. Contexts handed
/// out by [`super::ContextFactory::new_context`] share no mutable state with
/// each other; the shared singleton used in single-session mode is the one
/// deliberate exception.
pub struct ExecutionContext {
    base: Arc<dyn EngineBackend>,
    overlay: RwLock<HashMap<String, String>>,
    current_database: RwLock<String>,
}

impl ExecutionContext {
    pub(crate) fn new(base: Arc<dyn EngineBackend>, seed: HashMap<String, String>) -> Self {
        ExecutionContext {
            base,
            overlay: RwLock::new(seed),
            current_database: RwLock::new(DEFAULT_DATABASE.to_string()),
        }
    }

    /// Set a single configuration key
    pub fn set_config(&self, key: &str, value: &str) {
        self.overlay.write().insert(key.to_string(), value.to_string());
    }

    /// Read a configuration key
    pub fn config(&self, key: &str) -> Option<String> {
        self.overlay.read().get(key).cloned()
    }

    /// Merge a string-keyed map into the overlay
    ///
    /// Keys already present are overwritten; callers that apply several maps
    /// get deterministic last-applied-wins semantics by fixing the call order.
    pub fn apply_overlay(&self, entries: &HashMap<String, String>) {
        let mut overlay = self.overlay.write();
        for (key, value) in entries {
            overlay.insert(key.clone(), value.clone());
        }
    }

    /// Snapshot of the full overlay, for inspection and monitoring
    pub fn config_snapshot(&self) -> HashMap<String, String> {
        self.overlay.read().clone()
    }

    /// Database the session is currently scoped to
    pub fn current_database(&self) -> String {
        self.current_database.read().clone()
    }

    /// Issue a synchronous `USE <database>` directive against the engine
    ///
    /// The current database only changes after the engine accepted the
    /// directive; on failure the context keeps its previous database.
    pub fn use_database(&self, database: &str) -> Result<()> {
        self.base.execute(&format!("USE {}", database))?;
        *self.current_database.write() = database.to_string();
        Ok(())
    }

    /// Execute a statement through the engine backend
    pub fn execute(&self, sql: &str) -> Result<QueryOutcome> {
        self.base.execute(sql)
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("overlay_entries", &self.overlay.read().len())
            .field("current_database", &*self.current_database.read())
            .finish()
    }
}
