//! Stream lifecycle bridge
//!
//! Couples protocol-instance teardown to stream cleanup and exposes the
//! notification points the stream manager fires when a stream enters or
//! leaves its registry.

/// Descriptor of a stream, passed to notification hooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    /// Unique id of the stream
    pub id: u32,
    /// Stream kind (e.g. "inbound network", "file")
    pub kind: String,
    /// Stream name
    pub name: String,
}

impl StreamInfo {
    /// Create a descriptor
    pub fn new(id: u32, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// Owner of the application's active streams
///
/// Implemented outside this crate. The one operation this layer depends
/// on is bulk release keyed by owning protocol instance; it must be
/// idempotent — releasing for an id with no streams is a no-op.
pub trait StreamManager {
    /// Drop every stream owned by the given protocol instance
    fn release_streams_of(&mut self, protocol_id: u32);
}

/// Notification points fired around stream registration
///
/// The default methods emit structured log entries; composers install a
/// custom implementation on the application to observe stream traffic.
pub trait StreamObserver {
    /// A stream entered the application's stream registry
    fn on_stream_registered(&self, app_name: &str, stream: &StreamInfo) {
        tracing::info!(
            stream_id = stream.id,
            kind = %stream.kind,
            name = %stream.name,
            app = app_name,
            "Stream registered"
        );
    }

    /// A stream left the application's stream registry
    fn on_stream_unregistered(&self, app_name: &str, stream: &StreamInfo) {
        tracing::info!(
            stream_id = stream.id,
            kind = %stream.kind,
            name = %stream.name,
            app = app_name,
            "Stream unregistered"
        );
    }
}

/// Default observer: log entries only
#[derive(Debug, Default)]
pub struct LogObserver;

impl StreamObserver for LogObserver {}
