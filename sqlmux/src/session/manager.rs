// Copyright (c) 2025 SqlMux Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Session open/close orchestration

use super::models::{OpenSessionRequest, ResourcePoolId, SessionHandle, SessionMetadata};
use super::registry::SessionRegistry;
use crate::config::SessionServerConfig;
use crate::engine::{ContextFactory, EngineBackend, ExecutionContext, COMPAT_VERSION_KEY};
use crate::error::Result;
use crate::listener::SessionEventListener;
use crate::transport::SessionTransport;
use log::{debug, warn};
use std::sync::Arc;

/// Session-config key carrying the default database to switch to during open
pub const USE_DATABASE_KEY: &str = "use:database";

/// Orchestrates session lifecycle against the transport layer
///
/// Owns the session registry and the context factory outright; the transport
/// layer, engine backend and event listener are injected collaborators. On
/// open it allocates a handle through the transport, builds (or selects) an
/// execution context, applies the per-session configuration overlays and
/// registers the pair; on close it unregisters and releases, symmetrically.
pub struct SessionManager {
    transport: Arc<dyn SessionTransport>,
    engine: Arc<dyn EngineBackend>,
    factory: ContextFactory,
    registry: SessionRegistry,
    listener: Arc<dyn SessionEventListener>,
    single_session: bool,
}

impl SessionManager {
    pub fn new(
        transport: Arc<dyn SessionTransport>,
        engine: Arc<dyn EngineBackend>,
        listener: Arc<dyn SessionEventListener>,
        config: SessionServerConfig,
    ) -> Self {
        let factory = ContextFactory::new(Arc::clone(&engine), config.default_overlay.clone());
        SessionManager {
            transport,
            engine,
            factory,
            registry: SessionRegistry::new(),
            listener,
            single_session: config.single_session,
        }
    }

    /// Open a session and return its handle
    ///
    /// Transport failures (`AuthenticationFailed`, `Transport`) and engine
    /// failures from the `use:database` directive (`DatabaseNotFound`,
    /// `Query`) abort the open and propagate unchanged. The registry write
    /// is the last step, so a failed open never leaves a registry entry
    /// behind. Listener failures are logged and swallowed.
    pub fn open_session(&self, request: &OpenSessionRequest) -> Result<SessionHandle> {
        let handle = self.transport.open(request)?;
        let transport_session = self.transport.get_session(&handle)?;

        if let Err(err) = self.listener.on_session_created(
            &transport_session.client_address,
            handle.as_str(),
            &transport_session.username,
        ) {
            warn!("session listener failed on create for {}: {}", handle, err);
        }

        let context = if self.single_session {
            self.factory.shared_context()
        } else {
            self.factory.new_context()
        };

        context.set_config(COMPAT_VERSION_KEY, &self.engine.compat_version());

        // fixed overlay order: overridden configurations, then session
        // variables, giving deterministic last-applied-wins on collisions
        context.apply_overlay(&transport_session.overridden_configurations);
        context.apply_overlay(&transport_session.session_variables);

        if let Some(database) = request.session_config.get(USE_DATABASE_KEY) {
            if let Err(err) = context.use_database(database) {
                // release the already-allocated transport handle so a failed
                // open does not leak it; the original error still propagates
                if let Err(close_err) = self.transport.close(&handle) {
                    warn!(
                        "failed to release transport session {} after aborted open: {}",
                        handle, close_err
                    );
                }
                return Err(err);
            }
        }

        let metadata = SessionMetadata::new(
            &transport_session.client_address,
            &transport_session.username,
            handle.as_str(),
        );
        self.registry.put(handle.clone(), context, metadata);

        debug!(
            "opened session {} for user {} from {}",
            handle, transport_session.username, transport_session.client_address
        );
        Ok(handle)
    }

    /// Close a session
    ///
    /// The listener is notified before teardown (ordering matters only to
    /// observers). Transport close failures propagate and leave the registry
    /// entry in place; registry and pool removal themselves are idempotent.
    /// In single-session mode the shared context survives every close.
    pub fn close_session(&self, handle: &SessionHandle) -> Result<()> {
        if let Err(err) = self.listener.on_session_closed(handle.as_str()) {
            warn!("session listener failed on close for {}: {}", handle, err);
        }

        self.transport.close(handle)?;

        self.registry.remove_pool(handle);
        self.registry.remove_context(handle);

        debug!("closed session {}", handle);
        Ok(())
    }

    /// Execution context for a live session
    pub fn context(&self, handle: &SessionHandle) -> Option<Arc<ExecutionContext>> {
        self.registry.get(handle)
    }

    /// Metadata recorded when the session was opened
    pub fn metadata(&self, handle: &SessionHandle) -> Option<SessionMetadata> {
        self.registry.metadata(handle)
    }

    /// Assign (or switch) the resource pool for a session
    pub fn set_resource_pool(&self, handle: &SessionHandle, pool: ResourcePoolId) {
        self.registry.assign_pool(handle.clone(), pool);
    }

    /// Current resource-pool assignment for a session
    pub fn resource_pool(&self, handle: &SessionHandle) -> Option<ResourcePoolId> {
        self.registry.pool(handle)
    }

    /// Number of live sessions
    pub fn active_sessions(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
