//! External stream orchestration
//!
//! Walks the `externalStreams` section of the configuration, validates
//! each named definition, resolves the owning handler by URI scheme and
//! delegates the actual pull. Section-level validation is strict; a
//! single bad definition only skips that entry.

use serde_json::Value;

use super::config::EXTERNAL_STREAMS;
use super::Application;
use crate::uri::{StreamUri, UriError};

/// Error type for external stream pulling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullError {
    /// The `externalStreams` section exists but is not a map
    MalformedSection,
    /// A definition has no string `uri` field
    MissingUri,
    /// A definition's `uri` field does not parse
    InvalidUri(UriError),
    /// No registered handler accepts the URI scheme
    NoHandler(String),
    /// The resolved handler reported pull failure
    Delegate,
}

impl std::fmt::Display for PullError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PullError::MalformedSection => {
                write!(f, "`{}` section is not a map", EXTERNAL_STREAMS)
            }
            PullError::MissingUri => write!(f, "stream definition has no string `uri` field"),
            PullError::InvalidUri(e) => write!(f, "invalid stream URI: {}", e),
            PullError::NoHandler(scheme) => {
                write!(f, "no handler for scheme `{}`", scheme)
            }
            PullError::Delegate => write!(f, "handler failed to pull the stream"),
        }
    }
}

impl std::error::Error for PullError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PullError::InvalidUri(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UriError> for PullError {
    fn from(e: UriError) -> Self {
        PullError::InvalidUri(e)
    }
}

impl Application {
    /// Pull every configured external stream
    ///
    /// Succeeds trivially when the configuration has no
    /// `externalStreams` section. Fails only when the section itself is
    /// malformed; individual definitions are attempted independently
    /// and a failed entry never aborts the rest.
    pub fn pull_external_streams(&self) -> Result<(), PullError> {
        let section = match self.configuration().get(EXTERNAL_STREAMS) {
            None | Some(Value::Null) => return Ok(()),
            Some(section) => section,
        };

        let entries = match section.as_object() {
            Some(entries) => entries,
            None => {
                tracing::error!(app = %self.name(), "`externalStreams` is not a map");
                return Err(PullError::MalformedSection);
            }
        };

        for (name, definition) in entries {
            if !definition.is_object() {
                tracing::warn!(
                    app = %self.name(),
                    stream = %name,
                    "External stream definition is not a map, skipping"
                );
                continue;
            }

            if let Err(e) = self.pull_external_stream(name, definition.clone()) {
                tracing::warn!(
                    app = %self.name(),
                    stream = %name,
                    error = %e,
                    "External stream pull failed"
                );
            }
        }

        Ok(())
    }

    /// Pull one external stream from its definition
    ///
    /// The definition's `uri` field is rewritten to the structured form
    /// before the resolved handler receives it; the rest of the
    /// definition passes through untouched.
    pub fn pull_external_stream(&self, name: &str, mut definition: Value) -> Result<(), PullError> {
        let raw_uri = match definition.get("uri").and_then(Value::as_str) {
            Some(raw) => raw.to_string(),
            None => {
                tracing::error!(app = %self.name(), stream = %name, "Missing or non-string `uri`");
                return Err(PullError::MissingUri);
            }
        };

        let uri = match StreamUri::parse(&raw_uri) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::error!(
                    app = %self.name(),
                    stream = %name,
                    uri = %raw_uri,
                    error = %e,
                    "Invalid stream URI"
                );
                return Err(e.into());
            }
        };

        // Downstream handlers expect the structured form.
        definition["uri"] = uri.to_value();

        let handler = match self.get_handler_by_scheme(uri.scheme()) {
            Some(handler) => handler,
            None => {
                tracing::warn!(
                    app = %self.name(),
                    scheme = %uri.scheme(),
                    "No handler for scheme in application"
                );
                return Err(PullError::NoHandler(uri.scheme().to_string()));
            }
        };

        if handler.pull_external_stream(&uri, definition) {
            Ok(())
        } else {
            Err(PullError::Delegate)
        }
    }
}
