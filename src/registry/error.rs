//! Registry error types
//!
//! Errors for handler registry operations. All of these signal a
//! deployment or topology defect, not a runtime condition: the caller
//! (normally the composition root) decides whether to abort startup.

use crate::protocol::ProtocolType;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A handler is already registered for this protocol type
    HandlerAlreadyRegistered(ProtocolType),
    /// The handler is already bound to a different application
    HandlerBoundElsewhere {
        /// Id of the application that currently owns the handler
        owner: u64,
    },
    /// No handler registered for a type that must already be active
    HandlerNotFound(ProtocolType),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::HandlerAlreadyRegistered(ty) => {
                write!(f, "handler already registered for protocol type {}", ty)
            }
            RegistryError::HandlerBoundElsewhere { owner } => {
                write!(f, "handler already bound to application {}", owner)
            }
            RegistryError::HandlerNotFound(ty) => {
                write!(f, "no handler registered for protocol type {}", ty)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
