//! Application identity extraction
//!
//! The configuration tree is opaque to this crate except for a handful
//! of well-known fields read once at construction.

use serde_json::Value;

/// Configuration key for the application name
pub const APPLICATION_NAME: &str = "applicationName";

/// Configuration key for the alias list
pub const APPLICATION_ALIASES: &str = "applicationAliases";

/// Configuration key for the default-application flag
pub const APPLICATION_DEFAULT: &str = "applicationDefault";

/// Configuration key for the external-streams section
pub const EXTERNAL_STREAMS: &str = "externalStreams";

/// Error type for identity extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is absent
    MissingField(&'static str),
    /// A field is present but has the wrong type
    WrongType {
        /// Name of the offending field
        field: &'static str,
        /// Expected JSON type
        expected: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField(field) => {
                write!(f, "missing configuration field `{}`", field)
            }
            ConfigError::WrongType { field, expected } => {
                write!(
                    f,
                    "configuration field `{}` must be a {}",
                    field, expected
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Immutable identity fields of an application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Primary name, required
    pub name: String,
    /// Ordered aliases, empty if not configured
    pub aliases: Vec<String>,
    /// Whether this is the default application
    pub is_default: bool,
}

impl Identity {
    /// Read the identity fields out of a configuration tree
    pub fn from_config(config: &Value) -> Result<Self, ConfigError> {
        let name = match config.get(APPLICATION_NAME) {
            None | Some(Value::Null) => return Err(ConfigError::MissingField(APPLICATION_NAME)),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(ConfigError::WrongType {
                    field: APPLICATION_NAME,
                    expected: "string",
                })
            }
        };

        let aliases = match config.get(APPLICATION_ALIASES) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut aliases = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(s) => aliases.push(s.to_string()),
                        None => {
                            return Err(ConfigError::WrongType {
                                field: APPLICATION_ALIASES,
                                expected: "list of strings",
                            })
                        }
                    }
                }
                aliases
            }
            Some(_) => {
                return Err(ConfigError::WrongType {
                    field: APPLICATION_ALIASES,
                    expected: "list of strings",
                })
            }
        };

        let is_default = match config.get(APPLICATION_DEFAULT) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(ConfigError::WrongType {
                    field: APPLICATION_DEFAULT,
                    expected: "bool",
                })
            }
        };

        Ok(Self {
            name,
            aliases,
            is_default,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_identity() {
        let config = json!({
            "applicationName": "live",
            "applicationAliases": ["tv", "broadcast"],
            "applicationDefault": true,
        });

        let identity = Identity::from_config(&config).unwrap();
        assert_eq!(identity.name, "live");
        assert_eq!(identity.aliases, vec!["tv", "broadcast"]);
        assert!(identity.is_default);
    }

    #[test]
    fn test_defaults_applied() {
        let config = json!({ "applicationName": "vod" });

        let identity = Identity::from_config(&config).unwrap();
        assert_eq!(identity.name, "vod");
        assert!(identity.aliases.is_empty());
        assert!(!identity.is_default);
    }

    #[test]
    fn test_missing_name_fails() {
        assert_eq!(
            Identity::from_config(&json!({})),
            Err(ConfigError::MissingField(APPLICATION_NAME))
        );
    }

    #[test]
    fn test_wrong_typed_aliases_fail() {
        let config = json!({
            "applicationName": "live",
            "applicationAliases": ["ok", 5],
        });

        assert_eq!(
            Identity::from_config(&config),
            Err(ConfigError::WrongType {
                field: APPLICATION_ALIASES,
                expected: "list of strings",
            })
        );
    }

    #[test]
    fn test_wrong_typed_default_fails() {
        let config = json!({
            "applicationName": "live",
            "applicationDefault": "yes",
        });

        assert!(matches!(
            Identity::from_config(&config),
            Err(ConfigError::WrongType { field, .. }) if field == APPLICATION_DEFAULT
        ));
    }
}
