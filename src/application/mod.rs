//! Application identity and handler surface
//!
//! An application binds protocol handlers to one configured identity,
//! owns the stream manager for its streams, and routes protocol
//! instance lifecycle events to the right handler.
//!
//! Single-owner-thread model: nothing in here locks. All mutation goes
//! through `&mut Application` on the thread that owns the instance;
//! callers serialize access externally if they share one application.

pub mod config;
pub mod pull;
pub mod streams;

pub use config::{ConfigError, Identity};
pub use pull::PullError;
pub use streams::{LogObserver, StreamInfo, StreamManager, StreamObserver};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::protocol::{ProtocolInstance, ProtocolType, SchemeTable};
use crate::registry::{HandlerBindings, HandlerRegistry, ProtocolHandler, RegistryError};

/// Issuer of application ids
///
/// Owned by the composition root and passed to every construction.
/// Ids are strictly increasing and never reused for the lifetime of
/// the sequence; the atomic makes concurrent construction safe.
#[derive(Debug)]
pub struct AppIdSequence {
    next: AtomicU64,
}

impl AppIdSequence {
    /// Create a sequence starting at 1
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Issue the next id
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for AppIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// One configured application
///
/// Construction reads the identity fields out of the configuration
/// tree and retains the tree for the application's lifetime. Handlers
/// are registered afterwards by protocol-specific bootstrap code.
pub struct Application {
    id: u64,
    identity: Identity,
    configuration: Value,
    registry: HandlerRegistry,
    streams: Box<dyn StreamManager>,
    observer: Box<dyn StreamObserver>,
}

impl Application {
    /// Create an application from its configuration tree
    ///
    /// `schemes` is the capability table deciding which URI schemes
    /// this application can dispatch; `streams` is the stream manager
    /// the application will own one-to-one.
    pub fn new(
        ids: &AppIdSequence,
        configuration: Value,
        schemes: SchemeTable,
        streams: Box<dyn StreamManager>,
    ) -> Result<Self, ConfigError> {
        let identity = Identity::from_config(&configuration)?;
        let id = ids.next_id();

        tracing::info!(
            app_id = id,
            app = %identity.name,
            aliases = identity.aliases.len(),
            is_default = identity.is_default,
            "Application created"
        );

        Ok(Self {
            id,
            registry: HandlerRegistry::new(id, schemes),
            identity,
            configuration,
            streams,
            observer: Box::new(LogObserver),
        })
    }

    /// Process-unique id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Primary name
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Configured aliases, in order
    pub fn aliases(&self) -> &[String] {
        &self.identity.aliases
    }

    /// Whether this is the default application
    pub fn is_default(&self) -> bool {
        self.identity.is_default
    }

    /// The retained configuration tree
    pub fn configuration(&self) -> &Value {
        &self.configuration
    }

    /// The stream manager owned by this application
    pub fn stream_manager(&self) -> &dyn StreamManager {
        self.streams.as_ref()
    }

    /// Mutable access to the owned stream manager
    pub fn stream_manager_mut(&mut self) -> &mut dyn StreamManager {
        self.streams.as_mut()
    }

    /// Replace the stream notification observer
    pub fn set_stream_observer(&mut self, observer: Box<dyn StreamObserver>) {
        self.observer = observer;
    }

    /// Register a handler for a protocol type
    pub fn register_handler(
        &mut self,
        ty: ProtocolType,
        handler: Arc<dyn ProtocolHandler>,
        bindings: &mut HandlerBindings,
    ) -> Result<(), RegistryError> {
        self.registry.register_handler(ty, handler, bindings)
    }

    /// Unregister the handler for a protocol type (no-op when absent)
    pub fn unregister_handler(&mut self, ty: ProtocolType, bindings: &mut HandlerBindings) {
        self.registry.unregister_handler(ty, bindings)
    }

    /// Strict handler lookup by protocol type
    pub fn get_handler(
        &self,
        ty: ProtocolType,
    ) -> Result<&Arc<dyn ProtocolHandler>, RegistryError> {
        self.registry.get_handler(ty)
    }

    /// Handler owning a live protocol instance
    pub fn handler_for(
        &self,
        instance: &dyn ProtocolInstance,
    ) -> Result<&Arc<dyn ProtocolHandler>, RegistryError> {
        self.registry.get_handler(instance.protocol_type())
    }

    /// Best-effort handler resolution by URI scheme
    pub fn get_handler_by_scheme(&self, scheme: &str) -> Option<&Arc<dyn ProtocolHandler>> {
        self.registry.get_handler_by_scheme(scheme)
    }

    /// Route a new live protocol instance to its handler
    ///
    /// The handler for the instance's type must already be registered;
    /// a miss is a deployment defect.
    pub fn register_protocol(
        &self,
        instance: &dyn ProtocolInstance,
    ) -> Result<(), RegistryError> {
        let handler = self.registry.get_handler(instance.protocol_type())?;
        handler.register_protocol(instance);
        Ok(())
    }

    /// Route a departing protocol instance to its handler
    ///
    /// Streams owned by the instance are released first, then the
    /// handler is told to forget the instance. The ordering is a
    /// contract: stream teardown must observe a still-valid handler
    /// and application context.
    pub fn unregister_protocol(
        &mut self,
        instance: &dyn ProtocolInstance,
    ) -> Result<(), RegistryError> {
        let handler = Arc::clone(self.registry.get_handler(instance.protocol_type())?);

        self.streams.release_streams_of(instance.id());
        handler.unregister_protocol(instance);

        tracing::debug!(
            protocol = %instance.describe(),
            app = %self.identity.name,
            "Protocol unregistered from application"
        );
        Ok(())
    }

    /// Drop every stream owned by the given protocol instance
    pub fn release_streams_of(&mut self, protocol_id: u32) {
        self.streams.release_streams_of(protocol_id);
    }

    /// Notification point: a stream entered the stream registry
    pub fn signal_stream_registered(&self, stream: &StreamInfo) {
        self.observer.on_stream_registered(&self.identity.name, stream);
    }

    /// Notification point: a stream left the stream registry
    pub fn signal_stream_unregistered(&self, stream: &StreamInfo) {
        self.observer
            .on_stream_unregistered(&self.identity.name, stream);
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::*;
    use super::*;
    use crate::protocol::types;

    fn live_app(ids: &AppIdSequence, log: &EventLog) -> Application {
        Application::new(
            ids,
            json!({ "applicationName": "live" }),
            SchemeTable::new()
                .with_rtmp(types::INBOUND_RTMP, types::OUTBOUND_RTMP)
                .with_rtsp(types::RTSP),
            RecordingStreams::boxed(log),
        )
        .unwrap()
    }

    #[test]
    fn test_ids_strictly_increase() {
        let ids = AppIdSequence::new();
        let log = event_log();

        let issued: Vec<u64> = (0..4).map(|_| live_app(&ids, &log).id()).collect();

        for pair in issued.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_identity_from_configuration() {
        let ids = AppIdSequence::new();
        let app = Application::new(
            &ids,
            json!({
                "applicationName": "live",
                "applicationAliases": ["tv"],
                "applicationDefault": true,
                "extra": { "untouched": 1 },
            }),
            SchemeTable::new(),
            RecordingStreams::boxed(&event_log()),
        )
        .unwrap();

        assert_eq!(app.name(), "live");
        assert_eq!(app.aliases(), ["tv"]);
        assert!(app.is_default());
        assert_eq!(app.configuration()["extra"]["untouched"], 1);
    }

    #[test]
    fn test_construction_rejects_bad_identity() {
        let ids = AppIdSequence::new();
        let result = Application::new(
            &ids,
            json!({}),
            SchemeTable::new(),
            RecordingStreams::boxed(&event_log()),
        );

        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_register_protocol_delegates() {
        let ids = AppIdSequence::new();
        let log = event_log();
        let mut app = live_app(&ids, &log);
        let mut bindings = HandlerBindings::new();

        app.register_handler(
            types::INBOUND_RTMP,
            RecordingHandler::shared(types::INBOUND_RTMP, &log),
            &mut bindings,
        )
        .unwrap();

        let instance = FakeInstance {
            id: 9,
            ty: types::INBOUND_RTMP,
        };
        app.register_protocol(&instance).unwrap();

        assert_eq!(events(&log), vec!["register_protocol 9"]);
    }

    #[test]
    fn test_register_protocol_without_handler_is_fatal() {
        let ids = AppIdSequence::new();
        let log = event_log();
        let app = live_app(&ids, &log);

        let instance = FakeInstance {
            id: 9,
            ty: types::RTSP,
        };
        assert_eq!(
            app.register_protocol(&instance).unwrap_err(),
            RegistryError::HandlerNotFound(types::RTSP)
        );
    }

    #[test]
    fn test_unregister_releases_streams_before_handler() {
        let ids = AppIdSequence::new();
        let log = event_log();
        let mut app = live_app(&ids, &log);
        let mut bindings = HandlerBindings::new();

        app.register_handler(
            types::INBOUND_RTMP,
            RecordingHandler::shared(types::INBOUND_RTMP, &log),
            &mut bindings,
        )
        .unwrap();

        let instance = FakeInstance {
            id: 12,
            ty: types::INBOUND_RTMP,
        };
        app.unregister_protocol(&instance).unwrap();

        assert_eq!(
            events(&log),
            vec!["release_streams 12", "unregister_protocol 12"]
        );
    }

    #[test]
    fn test_unregister_without_handler_touches_nothing() {
        let ids = AppIdSequence::new();
        let log = event_log();
        let mut app = live_app(&ids, &log);

        let instance = FakeInstance {
            id: 12,
            ty: types::RTSP,
        };
        assert!(app.unregister_protocol(&instance).is_err());

        // Lookup failed before any stream teardown.
        assert!(events(&log).is_empty());
    }

    #[test]
    fn test_handler_for_instance() {
        let ids = AppIdSequence::new();
        let log = event_log();
        let mut app = live_app(&ids, &log);
        let mut bindings = HandlerBindings::new();

        app.register_handler(
            types::RTSP,
            RecordingHandler::shared(types::RTSP, &log),
            &mut bindings,
        )
        .unwrap();

        let instance = FakeInstance {
            id: 1,
            ty: types::RTSP,
        };
        let handler = app.handler_for(&instance).unwrap();
        assert_eq!(handler.protocol_type(), types::RTSP);
    }
}
