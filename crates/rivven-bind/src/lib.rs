//! # rivven-bind
//!
//! Event-to-SQL parameter binding for Rivven sinks.
//!
//! A sink configures one SQL template whose `${...}` tokens name event fields.
//! Each token is resolved once into a typed [`Parameter`](parameter::Parameter)
//! bound to one statement position; every event is then bound by running the
//! parameters in position order against the statement.
//!
//! ## Features
//!
//! - **Body parameters**: `body` as `string` (UTF-8) or `bytearray` (raw)
//! - **Header parameters**: `header.<name>` as `string`, `long`, `int`, `date`,
//!   `double` or `float`
//! - **Custom parameters**: `custom` extractors resolved from a registry
//! - **Dialects**: `$n`, `?`, `?n` and `@pn` placeholders
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rivven_bind::prelude::*;
//!
//! let template = BindingConfig::new(
//!     "INSERT INTO logs (host, level, msg) VALUES (${header.host:string}, ${header.level:int}, ${body:string})",
//! )
//! .with_dialect("postgres")
//! .build(&ExtractorRegistry::new())?;
//!
//! let event = Event::new("disk full")
//!     .with_header("host", "web-1")
//!     .with_header("level", "3");
//!
//! let stmt = conn.prepare(template.sql()).await?;
//! template.execute(stmt.as_ref(), &event).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod convert;
pub mod dialect;
pub mod error;
pub mod event;
pub mod parameter;
pub mod registry;
pub mod statement;
pub mod template;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    // Error types
    pub use crate::error::{Error, ErrorCategory, Result};

    // Value and type system
    pub use crate::types::{SourceKind, Value, ValueKind};

    // Events and statements
    pub use crate::event::Event;
    pub use crate::statement::{ParameterBuffer, PreparedStatement, StatementBinder};

    // Parameters
    pub use crate::parameter::{new_parameter, Parameter};
    pub use crate::registry::{CustomExtractor, ExtractorFactory, ExtractorRegistry};

    // Templates
    pub use crate::config::BindingConfig;
    pub use crate::dialect::{dialect_for, SqlDialect};
    pub use crate::template::StatementTemplate;
}

// Re-export commonly used items at crate root
pub use error::{Error, Result};
pub use parameter::Parameter;
pub use types::Value;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let _value = Value::Int32(42);
        let _event = Event::new("body");
        let _buffer = ParameterBuffer::new();
        let _registry = ExtractorRegistry::new();
        let _config = BindingConfig::new("SELECT 1");
    }

    #[test]
    fn test_end_to_end_bind() {
        let template = BindingConfig::new(
            "INSERT INTO logs (host, level, msg) VALUES (${header.host:string}, ${header.level:int}, ${body:string})",
        )
        .build(&ExtractorRegistry::new())
        .unwrap();

        assert_eq!(
            template.sql(),
            "INSERT INTO logs (host, level, msg) VALUES ($1, $2, $3)"
        );

        let event = Event::new("disk full")
            .with_header("host", "web-1")
            .with_header("level", "3");
        let values = template.values(&event).unwrap().into_values();

        assert_eq!(
            values,
            vec![
                Value::String("web-1".into()),
                Value::Int32(3),
                Value::String("disk full".into()),
            ]
        );
    }
}
