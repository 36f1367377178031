//! Application registry and protocol dispatch layer
//!
//! The glue between configured applications and the protocol machinery
//! of a streaming server: binds protocol-specific handlers to an
//! application, routes protocol-instance lifecycle events to the owning
//! handler, couples instance teardown to stream cleanup and pulls
//! externally configured streams by resolving each URI scheme to a
//! handler.
//!
//! # Architecture
//!
//! ```text
//!                      Application (id, name, aliases)
//!                ┌──────────────┼──────────────────┐
//!                ▼              ▼                  ▼
//!        HandlerRegistry   StreamManager    pull_external_streams()
//!        type ──► handler  (owned 1:1)      config ─► URI ─► scheme
//!        scheme dispatch                    ─► handler.pull(...)
//! ```
//!
//! Protocol handlers, protocol instances, the stream manager and the
//! configuration loader all live outside this crate and are consumed
//! through the narrow traits in [`registry`], [`protocol`] and
//! [`application::streams`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use stream_app_core::application::{AppIdSequence, Application};
//! use stream_app_core::protocol::{types, SchemeTable};
//! use stream_app_core::registry::HandlerBindings;
//! # use stream_app_core::application::StreamManager;
//! # struct MyStreams;
//! # impl StreamManager for MyStreams { fn release_streams_of(&mut self, _: u32) {} }
//! # fn bootstrap_handler() -> Arc<dyn stream_app_core::registry::ProtocolHandler> { unimplemented!() }
//!
//! let ids = AppIdSequence::new();
//! let mut bindings = HandlerBindings::new();
//!
//! let schemes = SchemeTable::new()
//!     .with_rtmp(types::INBOUND_RTMP, types::OUTBOUND_RTMP)
//!     .with_rtsp(types::RTSP);
//!
//! let mut app = Application::new(
//!     &ids,
//!     json!({ "applicationName": "live" }),
//!     schemes,
//!     Box::new(MyStreams),
//! )?;
//!
//! app.register_handler(types::INBOUND_RTMP, bootstrap_handler(), &mut bindings)?;
//! app.pull_external_streams()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod application;
pub mod protocol;
pub mod registry;
pub mod uri;

pub use application::{AppIdSequence, Application, ConfigError, PullError};
pub use protocol::{ProtocolInstance, ProtocolType, SchemeTable};
pub use registry::{HandlerBindings, HandlerRegistry, ProtocolHandler, RegistryError};
pub use uri::{StreamUri, UriError};
