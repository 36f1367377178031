//! Protocol handler interface and ownership bindings
//!
//! Handlers are external components shared by reference; their memory
//! is owned outside this crate. Which application currently owns a
//! handler is tracked as an explicit relation ([`HandlerBindings`])
//! rather than a back-pointer inside the handler, so reassigning a
//! handler between applications carries no lifetime ambiguity.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::protocol::{ProtocolInstance, ProtocolType};
use crate::uri::StreamUri;

use super::error::RegistryError;

/// Capability interface of one protocol family's handler
///
/// Implementations live in protocol-specific bootstrap code. Whether
/// `pull_external_stream` blocks for the full connection setup or only
/// acknowledges an asynchronous attempt is the handler's contract; this
/// crate treats the returned flag as the same-call result.
pub trait ProtocolHandler {
    /// Tag of the protocol family/direction this handler serves
    fn protocol_type(&self) -> ProtocolType;

    /// A live protocol instance of this handler's type appeared
    fn register_protocol(&self, instance: &dyn ProtocolInstance);

    /// A live protocol instance of this handler's type is going away
    fn unregister_protocol(&self, instance: &dyn ProtocolInstance);

    /// Attempt to pull one external stream
    ///
    /// `definition` is the stream's configuration fragment with its
    /// `uri` field already rewritten to the structured form.
    fn pull_external_stream(&self, uri: &StreamUri, definition: Value) -> bool;
}

/// Identity of a registered handler
///
/// Derived from the `Arc` allocation the handler is shared through, so
/// two clones of the same `Arc` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

impl HandlerId {
    /// Identity of the handler behind an `Arc`
    pub fn of(handler: &Arc<dyn ProtocolHandler>) -> Self {
        Self(Arc::as_ptr(handler) as *const () as usize)
    }
}

/// Relation: handler identity to owning application id
///
/// Owned by whatever composes applications and passed into handler
/// registration calls. A handler may serve at most one application at
/// a time; binding it into a second application is an invariant
/// violation surfaced as a typed error.
#[derive(Debug, Default)]
pub struct HandlerBindings {
    owners: HashMap<HandlerId, u64>,
}

impl HandlerBindings {
    /// Create an empty relation
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to an application
    ///
    /// Rebinding to the same application is a no-op; binding to a
    /// different one fails and leaves the relation unchanged.
    pub fn bind(&mut self, handler: HandlerId, app_id: u64) -> Result<(), RegistryError> {
        match self.owners.get(&handler) {
            Some(owner) if *owner != app_id => {
                Err(RegistryError::HandlerBoundElsewhere { owner: *owner })
            }
            _ => {
                self.owners.insert(handler, app_id);
                Ok(())
            }
        }
    }

    /// Release a handler's binding, if any
    pub fn release(&mut self, handler: HandlerId) {
        self.owners.remove(&handler);
    }

    /// Application currently owning the handler, if any
    pub fn owner_of(&self, handler: HandlerId) -> Option<u64> {
        self.owners.get(&handler).copied()
    }
}
