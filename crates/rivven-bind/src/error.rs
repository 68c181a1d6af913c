//! Error types for rivven-bind
//!
//! Two families of failures are distinguished:
//! - Configuration errors, raised while a statement template is resolved into
//!   parameters (unknown item/type, bad config, unknown custom extractor)
//! - Binding errors, raised per event while a parameter writes into a statement
//!   (malformed field value, statement rejected the value)

use std::fmt;
use thiserror::Error;

/// Result type for rivven-bind operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Raised before any event is processed
    Configuration,
    /// Raised while binding one event
    Binding,
    /// Raised by the prepared statement while executing
    Execution,
}

fn or_none(config: &Option<String>) -> &str {
    config.as_deref().unwrap_or("<none>")
}

/// Main error type for rivven-bind
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    /// No built-in or custom parameter matches the item/type pair
    #[error(
        "invalid SQL parameter item: {item} and type: {type_name} with config: {}",
        or_none(.config)
    )]
    UnknownParameter {
        item: String,
        type_name: String,
        config: Option<String>,
    },

    /// The parameter was matched but rejected its config string
    #[error(
        "invalid config for SQL parameter item: {item} and type: {type_name} with config: {}: {message}",
        or_none(.config)
    )]
    ParameterConfig {
        item: String,
        type_name: String,
        config: Option<String>,
        message: String,
    },

    /// A custom extractor could not be resolved or constructed
    #[error(
        "could not initialize custom parameter type: {type_name} with config: {}: {message}",
        or_none(.config)
    )]
    CustomParameter {
        type_name: String,
        config: Option<String>,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Template or sink configuration is invalid
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// An event field could not be converted to the parameter's value kind
    #[error("type conversion error at parameter {position}: {message}")]
    TypeConversion { position: usize, message: String },

    /// The statement refused the bound value
    #[error("bind error at parameter {position}: {message}")]
    Bind {
        position: usize,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Executing the bound statement failed
    #[error("execution error: {message}")]
    Execution {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownParameter { .. }
            | Self::ParameterConfig { .. }
            | Self::CustomParameter { .. }
            | Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::TypeConversion { .. } | Self::Bind { .. } => ErrorCategory::Binding,
            Self::Execution { .. } => ErrorCategory::Execution,
        }
    }

    /// Whether this error was raised while resolving configuration
    #[inline]
    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    /// Whether this error was raised while binding an event
    #[inline]
    pub fn is_binding(&self) -> bool {
        self.category() == ErrorCategory::Binding
    }

    /// Parameter position for binding errors
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::TypeConversion { position, .. } | Self::Bind { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Create an unknown parameter error
    pub fn unknown_parameter(item: &str, type_name: &str, config: Option<&str>) -> Self {
        Self::UnknownParameter {
            item: item.to_string(),
            type_name: type_name.to_string(),
            config: config.map(str::to_string),
        }
    }

    /// Create a parameter config error
    pub fn parameter_config(
        item: &str,
        type_name: &str,
        config: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::ParameterConfig {
            item: item.to_string(),
            type_name: type_name.to_string(),
            config: config.map(str::to_string),
            message: message.into(),
        }
    }

    /// Create a custom parameter error
    pub fn custom_parameter(
        type_name: &str,
        config: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::CustomParameter {
            type_name: type_name.to_string(),
            config: config.map(str::to_string),
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a type conversion error
    pub fn type_conversion(position: usize, message: impl Into<String>) -> Self {
        Self::TypeConversion {
            position,
            message: message.into(),
        }
    }

    /// Create a bind error
    pub fn bind(position: usize, message: impl Into<String>) -> Self {
        Self::Bind {
            position,
            message: message.into(),
            source: None,
        }
    }

    /// Create a bind error with source
    pub fn bind_with_source(
        position: usize,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Bind {
            position,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
            source: None,
        }
    }

    /// Create an execution error with source
    pub fn execution_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Execution {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Binding => write!(f, "binding"),
            Self::Execution => write!(f, "execution"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        assert_eq!(
            Error::unknown_parameter("body", "long", None).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            Error::type_conversion(1, "bad").category(),
            ErrorCategory::Binding
        );
        assert_eq!(Error::bind(2, "rejected").category(), ErrorCategory::Binding);
        assert_eq!(
            Error::execution("failed").category(),
            ErrorCategory::Execution
        );
    }

    #[test]
    fn test_unknown_parameter_display() {
        let err = Error::unknown_parameter("header.ts", "uuid", Some("x"));
        let msg = err.to_string();
        assert!(msg.contains("header.ts"));
        assert!(msg.contains("uuid"));
        assert!(msg.contains("with config: x"));

        let err = Error::unknown_parameter("body", "long", None);
        assert!(err.to_string().contains("<none>"));
    }

    #[test]
    fn test_position() {
        assert_eq!(Error::type_conversion(3, "bad").position(), Some(3));
        assert_eq!(Error::config("bad").position(), None);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
        assert_eq!(ErrorCategory::Binding.to_string(), "binding");
    }
}
