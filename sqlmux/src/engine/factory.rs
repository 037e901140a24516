// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Execution context factory

use super::{EngineBackend, ExecutionContext};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

/// Produces execution contexts for new sessions
///
/// `new_context` returns a context whose overlay shares no mutable state
/// with any other context; `shared_context` lazily creates the process-wide
/// singleton used when the server runs in single-session mode.
pub struct ContextFactory {
    engine: Arc<dyn EngineBackend>,
    defaults: HashMap<String, String>,
    shared: OnceCell<Arc<ExecutionContext>>,
}

impl ContextFactory {
    pub fn new(engine: Arc<dyn EngineBackend>, defaults: HashMap<String, String>) -> Self {
        ContextFactory {
            engine,
            defaults,
            shared: OnceCell::new(),
        }
    }

    /// Engine backend this factory builds contexts on
    pub fn engine(&self) -> &Arc<dyn EngineBackend> {
        &self.engine
    }

    /// Create an isolated context seeded with the server-default overlay
    pub fn new_context(&self) -> Arc<ExecutionContext> {
        Arc::new(ExecutionContext::new(
            Arc::clone(&self.engine),
            self.defaults.clone(),
        ))
    }

    /// Shared singleton context for single-session mode
    ///
    /// Created on first use and never destroyed for the life of the factory;
    /// closing a session does not tear it down.
    pub fn shared_context(&self) -> Arc<ExecutionContext> {
        Arc::clone(self.shared.get_or_init(|| self.new_context()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StaticEngine;

    fn factory_with_defaults() -> ContextFactory {
        let mut defaults = HashMap::new();
        defaults.insert("server.mode".to_string(), "test".to_string());
        ContextFactory::new(Arc::new(StaticEngine::new(&["default"])), defaults)
    }

    #[test]
    fn test_new_contexts_are_isolated() {
        let factory = factory_with_defaults();
        let a = factory.new_context();
        let b = factory.new_context();

        a.set_config("only.a", "1");
        assert_eq!(a.config("only.a"), Some("1".to_string()));
        assert_eq!(b.config("only.a"), None);

        // both start from the server defaults
        assert_eq!(b.config("server.mode"), Some("test".to_string()));
    }

    #[test]
    fn test_shared_context_is_singleton() {
        let factory = factory_with_defaults();
        let first = factory.shared_context();
        let second = factory.shared_context();
        assert!(Arc::ptr_eq(&first, &second));

        first.set_config("seen.by.all", "yes");
        assert_eq!(second.config("seen.by.all"), Some("yes".to_string()));
    }
}
