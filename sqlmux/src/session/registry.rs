// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Concurrent session registry

use super::models::{ResourcePoolId, SessionHandle, SessionMetadata};
use crate::engine::ExecutionContext;
use dashmap::DashMap;
use std::sync::Arc;

/// Everything the registry holds for one live session
#[derive(Clone)]
pub struct SessionEntry {
    pub context: Arc<ExecutionContext>,
    pub metadata: SessionMetadata,
}

/// Thread-safe associative store keyed by session handle
///
/// Backed by sharded maps so one session's open/close never serializes
/// another's; every put/remove is atomic per key and a remove of an absent
/// key is a silent no-op.
pub struct SessionRegistry {
    sessions: DashMap<SessionHandle, SessionEntry>,
    pools: DashMap<SessionHandle, ResourcePoolId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        SessionRegistry {
            sessions: DashMap::new(),
            pools: DashMap::new(),
        }
    }

    /// Register the execution context and metadata for a handle
    ///
    /// At most one context is registered per live handle; putting again for
    /// the same handle replaces the previous entry atomically.
    pub fn put(
        &self,
        handle: SessionHandle,
        context: Arc<ExecutionContext>,
        metadata: SessionMetadata,
    ) {
        self.sessions.insert(handle, SessionEntry { context, metadata });
    }

    /// Execution context for a handle, if the session is live
    pub fn get(&self, handle: &SessionHandle) -> Option<Arc<ExecutionContext>> {
        self.sessions
            .get(handle)
            .map(|entry| Arc::clone(&entry.context))
    }

    /// Metadata recorded when the session was created
    pub fn metadata(&self, handle: &SessionHandle) -> Option<SessionMetadata> {
        self.sessions.get(handle).map(|entry| entry.metadata.clone())
    }

    /// Remove the context entry for a handle; absent keys are a no-op
    pub fn remove_context(&self, handle: &SessionHandle) -> Option<SessionEntry> {
        self.sessions.remove(handle).map(|(_, entry)| entry)
    }

    /// Assign (or switch) the resource pool for a handle
    pub fn assign_pool(&self, handle: SessionHandle, pool: ResourcePoolId) {
        self.pools.insert(handle, pool);
    }

    /// Current pool assignment for a handle
    pub fn pool(&self, handle: &SessionHandle) -> Option<ResourcePoolId> {
        self.pools.get(handle).map(|entry| entry.value().clone())
    }

    /// Remove the pool assignment for a handle; absent keys are a no-op
    pub fn remove_pool(&self, handle: &SessionHandle) -> Option<ResourcePoolId> {
        self.pools.remove(handle).map(|(_, pool)| pool)
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ContextFactory, StaticEngine};
    use std::collections::HashMap;
    use std::thread;

    fn test_factory() -> ContextFactory {
        ContextFactory::new(Arc::new(StaticEngine::new(&["default"])), HashMap::new())
    }

    fn test_metadata(id: &str) -> SessionMetadata {
        SessionMetadata::new("127.0.0.1:4000", "tester", id)
    }

    #[test]
    fn test_put_and_get() {
        let registry = SessionRegistry::new();
        let factory = test_factory();
        let handle = SessionHandle::new("s1");

        registry.put(handle.clone(), factory.new_context(), test_metadata("s1"));

        let ctx = registry.get(&handle).expect("session should be registered");
        ctx.set_config("k", "v");
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.metadata(&handle).expect("metadata present").username,
            "tester"
        );
    }

    #[test]
    fn test_remove_context_is_idempotent() {
        let registry = SessionRegistry::new();
        let factory = test_factory();
        let handle = SessionHandle::new("s1");

        registry.put(handle.clone(), factory.new_context(), test_metadata("s1"));

        assert!(registry.remove_context(&handle).is_some());
        // second removal of the same handle is a silent no-op
        assert!(registry.remove_context(&handle).is_none());
        assert!(registry.get(&handle).is_none());
    }

    #[test]
    fn test_pool_assignment_lifecycle() {
        let registry = SessionRegistry::new();
        let handle = SessionHandle::new("s1");

        assert!(registry.pool(&handle).is_none());

        registry.assign_pool(handle.clone(), ResourcePoolId::new("etl"));
        assert_eq!(registry.pool(&handle), Some(ResourcePoolId::new("etl")));

        // a session may switch pools during its life
        registry.assign_pool(handle.clone(), ResourcePoolId::new("adhoc"));
        assert_eq!(registry.pool(&handle), Some(ResourcePoolId::new("adhoc")));

        assert!(registry.remove_pool(&handle).is_some());
        assert!(registry.remove_pool(&handle).is_none());
    }

    #[test]
    fn test_concurrent_open_close() {
        let registry = Arc::new(SessionRegistry::new());
        let factory = Arc::new(test_factory());

        let mut handles = vec![];
        for thread_id in 0..8 {
            let registry = Arc::clone(&registry);
            let factory = Arc::clone(&factory);

            let handle = thread::spawn(move || {
                for op in 0..200 {
                    let session = SessionHandle::new(format!("s-{}-{}", thread_id, op));
                    registry.put(
                        session.clone(),
                        factory.new_context(),
                        test_metadata(session.as_str()),
                    );
                    registry.assign_pool(session.clone(), ResourcePoolId::new("default"));
                    assert!(registry.get(&session).is_some());
                    registry.remove_pool(&session);
                    registry.remove_context(&session);
                    assert!(registry.get(&session).is_none());
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        assert!(registry.is_empty());
    }
}
