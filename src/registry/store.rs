//! Handler registry implementation
//!
//! One registry per application: maps protocol type tags to handler
//! references and resolves URI schemes to handlers through the scheme
//! table. Not thread-safe; all mutation happens on the thread that owns
//! the application.

use std::collections::HashMap;
use std::sync::Arc;

use crate::protocol::{ProtocolType, SchemeTable};

use super::error::RegistryError;
use super::handler::{HandlerBindings, HandlerId, ProtocolHandler};

/// Per-application registry of protocol handlers
pub struct HandlerRegistry {
    /// Id of the owning application, recorded in the bindings relation
    app_id: u64,

    /// Map of protocol type to handler reference
    handlers: HashMap<ProtocolType, Arc<dyn ProtocolHandler>>,

    /// Scheme dispatch rules for this application
    schemes: SchemeTable,
}

impl HandlerRegistry {
    /// Create an empty registry for the given application
    pub fn new(app_id: u64, schemes: SchemeTable) -> Self {
        Self {
            app_id,
            handlers: HashMap::new(),
            schemes,
        }
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Register a handler for a protocol type
    ///
    /// At most one handler per type: a duplicate registration is a
    /// topology defect and fails without touching the existing mapping.
    /// On success the bindings relation records this application as the
    /// handler's owner.
    pub fn register_handler(
        &mut self,
        ty: ProtocolType,
        handler: Arc<dyn ProtocolHandler>,
        bindings: &mut HandlerBindings,
    ) -> Result<(), RegistryError> {
        if self.handlers.contains_key(&ty) {
            return Err(RegistryError::HandlerAlreadyRegistered(ty));
        }

        bindings.bind(HandlerId::of(&handler), self.app_id)?;
        self.handlers.insert(ty, handler);

        tracing::debug!(app_id = self.app_id, protocol = %ty, "Handler registered");
        Ok(())
    }

    /// Unregister the handler for a protocol type
    ///
    /// No-op when the type has no handler; callers may unregister
    /// defensively.
    pub fn unregister_handler(&mut self, ty: ProtocolType, bindings: &mut HandlerBindings) {
        if let Some(handler) = self.handlers.remove(&ty) {
            bindings.release(HandlerId::of(&handler));
            tracing::debug!(app_id = self.app_id, protocol = %ty, "Handler unregistered");
        }
    }

    /// Non-failing lookup by protocol type
    pub fn lookup(&self, ty: ProtocolType) -> Option<&Arc<dyn ProtocolHandler>> {
        self.handlers.get(&ty)
    }

    /// Strict lookup by protocol type
    ///
    /// Only called where the caller guarantees activation already
    /// happened, so a miss is a deployment defect and surfaces as an
    /// error.
    pub fn get_handler(
        &self,
        ty: ProtocolType,
    ) -> Result<&Arc<dyn ProtocolHandler>, RegistryError> {
        match self.handlers.get(&ty) {
            Some(handler) => Ok(handler),
            None => {
                for registered in self.handlers.keys() {
                    tracing::debug!(app_id = self.app_id, protocol = %registered, "Registered handler");
                }
                Err(RegistryError::HandlerNotFound(ty))
            }
        }
    }

    /// Best-effort resolution by URI scheme, never fatal
    ///
    /// Consults the scheme table for candidate types in priority order
    /// and returns the first candidate with a registered handler. An
    /// unrecognized scheme logs a warning and returns `None`.
    pub fn get_handler_by_scheme(&self, scheme: &str) -> Option<&Arc<dyn ProtocolHandler>> {
        let candidates = self.schemes.candidates(scheme);
        if candidates.is_empty() {
            tracing::warn!(app_id = self.app_id, scheme = scheme, "Scheme not recognized");
            return None;
        }

        candidates.iter().find_map(|ty| self.handlers.get(ty))
    }
}
