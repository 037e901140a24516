// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Fixed-catalog engine backend for embedding and tests

use super::{EngineBackend, QueryOutcome};
use crate::error::{Result, SessionError};
use parking_lot::RwLock;

/// Engine backend with a fixed set of database names
///
/// Accepts any statement, records everything it executed, and rejects
/// `USE <database>` directives naming a database outside its catalog. Useful
/// for embedders wiring up the session layer before a real engine exists,
/// and for tests.
pub struct StaticEngine {
    databases: Vec<String>,
    executed: RwLock<Vec<String>>,
    compat_version: String,
}

impl StaticEngine {
    pub fn new(databases: &[&str]) -> Self {
        StaticEngine {
            databases: databases.iter().map(|db| db.to_string()).collect(),
            executed: RwLock::new(Vec::new()),
            compat_version: "1.0".to_string(),
        }
    }

    pub fn with_compat_version(mut self, version: &str) -> Self {
        self.compat_version = version.to_string();
        self
    }

    /// Statements executed so far, in order
    pub fn executed_statements(&self) -> Vec<String> {
        self.executed.read().clone()
    }
}

impl EngineBackend for StaticEngine {
    fn compat_version(&self) -> String {
        self.compat_version.clone()
    }

    fn execute(&self, sql: &str) -> Result<QueryOutcome> {
        let trimmed = sql.trim();
        if let Some(database) = trimmed
            .strip_prefix("USE ")
            .or_else(|| trimmed.strip_prefix("use "))
        {
            let database = database.trim().trim_end_matches(';');
            if !self.databases.iter().any(|db| db == database) {
                return Err(SessionError::DatabaseNotFound(database.to_string()));
            }
        }
        self.executed.write().push(trimmed.to_string());
        Ok(QueryOutcome::none())
    }
}
