//! Binding configuration
//!
//! The sink-facing configuration for one parameterized statement:
//!
//! ```yaml
//! sql: "INSERT INTO events (id, payload) VALUES (${header.id:long}, ${body:bytearray})"
//! dialect: postgres
//! ```

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::dialect::try_dialect_for;
use crate::error::{Error, Result};
use crate::registry::ExtractorRegistry;
use crate::template::StatementTemplate;

/// Configuration of one bound statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BindingConfig {
    /// SQL template with `${item:type[:config]}` tokens
    #[validate(length(min = 1))]
    pub sql: String,

    /// Placeholder dialect (default: postgres)
    #[serde(default = "default_dialect")]
    #[validate(custom(function = "validate_dialect"))]
    pub dialect: String,
}

fn default_dialect() -> String {
    "postgres".to_string()
}

fn validate_dialect(dialect: &str) -> std::result::Result<(), ValidationError> {
    if try_dialect_for(dialect).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_dialect").with_message(
            "dialect must be postgres, mysql, mariadb, sqlite, or sqlserver".into(),
        ))
    }
}

impl BindingConfig {
    /// Create configuration for a SQL template
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            dialect: default_dialect(),
        }
    }

    /// Set the dialect
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = dialect.into();
        self
    }

    /// Validate and parse the template into a bound statement
    pub fn build(&self, registry: &ExtractorRegistry) -> Result<StatementTemplate> {
        self.validate().map_err(|e| Error::config(e.to_string()))?;
        let dialect = try_dialect_for(&self.dialect)
            .ok_or_else(|| Error::config(format!("unknown dialect '{}'", self.dialect)))?;
        StatementTemplate::parse(&self.sql, dialect.as_ref(), registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect() {
        let config: BindingConfig =
            serde_json::from_str(r#"{"sql": "INSERT INTO t VALUES (${body:string})"}"#).unwrap();
        assert_eq!(config.dialect, "postgres");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(BindingConfig::new("").validate().is_err());
        assert!(BindingConfig::new("SELECT 1")
            .with_dialect("oracle")
            .validate()
            .is_err());
        assert!(BindingConfig::new("SELECT 1")
            .with_dialect("sqlserver")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_build() {
        let template = BindingConfig::new("INSERT INTO t VALUES (${body:string}, ${header.n:int})")
            .with_dialect("sqlserver")
            .build(&ExtractorRegistry::new())
            .unwrap();
        assert_eq!(template.sql(), "INSERT INTO t VALUES (@p1, @p2)");
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let err = BindingConfig::new("")
            .build(&ExtractorRegistry::new())
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
