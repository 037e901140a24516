// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Server-level configuration for the session layer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration controlling how execution contexts are handed out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionServerConfig {
    /// When enabled, every session shares one process-wide execution context
    /// instead of receiving an isolated one. Configuration overlays from all
    /// sessions then land on the same context with last-writer-wins
    /// semantics on overlapping keys. This is a documented non-isolation
    /// mode, not a defect.
    pub single_session: bool,

    /// Configuration defaults seeded into every new execution context
    /// before any per-session overlay is applied.
    pub default_overlay: HashMap<String, String>,
}

impl Default for SessionServerConfig {
    fn default() -> Self {
        SessionServerConfig {
            single_session: false,
            default_overlay: HashMap::new(),
        }
    }
}
