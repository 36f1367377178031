//! Handler registry and protocol dispatch
//!
//! Each application owns one [`HandlerRegistry`] mapping protocol type
//! tags to handler references. Registration enforces one handler per
//! type; scheme resolution walks the application's [capability
//! table](crate::protocol::SchemeTable) and is best-effort.
//!
//! Handler ownership across applications is an explicit relation
//! ([`HandlerBindings`]) held by the composition root, so a handler can
//! serve one application at a time and be reassigned without dangling
//! references.

pub mod error;
pub mod handler;
pub mod store;

pub use error::RegistryError;
pub use handler::{HandlerBindings, HandlerId, ProtocolHandler};
pub use store::HandlerRegistry;
