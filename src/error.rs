//! `CompareError` - error type shared by the comparison engine and script writers
//!
//! The comparison itself never fails on its own. Every error surfaced here comes
//! from a [`ScriptWriter`](crate::script::ScriptWriter) that could not render a
//! fragment, or from loading configuration.

use std::fmt;

/// Errors produced while comparing schemas or rendering scripts
#[derive(Debug)]
pub enum CompareError {
    /// The target dialect cannot express the requested object shape
    Unsupported {
        /// Dialect the writer was rendering for
        dialect: String,
        /// Object the fragment was requested for (e.g. `index IX_Orders on Orders`)
        object: String,
        /// What the dialect is missing
        reason: String,
    },
    /// A script writer failed for a reason other than dialect support
    Script(String),
    /// Comparison configuration could not be loaded
    Config(config::ConfigError),
}

impl CompareError {
    /// Build an [`CompareError::Unsupported`] from displayable parts
    pub fn unsupported(
        dialect: impl fmt::Display,
        object: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        CompareError::Unsupported {
            dialect: dialect.to_string(),
            object: object.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::Unsupported {
                dialect,
                object,
                reason,
            } => {
                write!(f, "{dialect} cannot render {object}: {reason}")
            }
            CompareError::Script(msg) => {
                write!(f, "Script error: {msg}")
            }
            CompareError::Config(e) => {
                write!(f, "Configuration error: {e}")
            }
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for CompareError {
    fn from(error: config::ConfigError) -> Self {
        CompareError::Config(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display_names_dialect_and_object() {
        let err = CompareError::unsupported("SQLite", "primary key PK_Orders on Orders", "constraints cannot be altered");
        assert_eq!(
            err.to_string(),
            "SQLite cannot render primary key PK_Orders on Orders: constraints cannot be altered"
        );
    }

    #[test]
    fn test_config_error_has_source() {
        let err = CompareError::from(config::ConfigError::Message("missing".to_string()));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
