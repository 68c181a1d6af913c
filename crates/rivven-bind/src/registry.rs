//! Custom extractor registry
//!
//! Parameters with item `custom` name their extractor through the `type`
//! descriptor. The name is resolved against an [`ExtractorRegistry`] that the
//! caller fills before templates are parsed, so the set of available custom
//! extractors is known up front.
//!
//! # Example
//!
//! ```rust,ignore
//! use rivven_bind::prelude::*;
//!
//! #[derive(Debug)]
//! struct BodyLength { position: usize }
//!
//! impl CustomExtractor for BodyLength {
//!     fn bind(&self, statement: &mut dyn StatementBinder, event: &Event) -> Result<()> {
//!         let len = event.body().map_or(0, <[u8]>::len) as i64;
//!         statement.bind_i64(self.position, len)
//!     }
//! }
//!
//! let mut registry = ExtractorRegistry::new();
//! registry.register("body_length", |position| {
//!     Ok(Box::new(BodyLength { position }) as Box<dyn CustomExtractor>)
//! });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::event::Event;
use crate::statement::StatementBinder;
use crate::types::ValueKind;

/// A caller-supplied extractor for values the built-in set does not cover
///
/// Instances are built once per placeholder by their registered factory,
/// which receives the 1-based parameter position. `configure` runs exactly
/// once, before the first `bind`.
pub trait CustomExtractor: Send + Sync + fmt::Debug {
    /// Apply the placeholder's config string. The default accepts anything.
    fn configure(&mut self, _config: Option<&str>) -> Result<()> {
        Ok(())
    }

    /// Read from `event` and bind into `statement` at this extractor's position
    fn bind(&self, statement: &mut dyn StatementBinder, event: &Event) -> Result<()>;

    /// Kind of value this extractor binds
    fn value_kind(&self) -> ValueKind {
        ValueKind::Other
    }
}

/// Builds a custom extractor for a parameter position
pub trait ExtractorFactory: Send + Sync {
    /// Create an unconfigured extractor bound to `position`
    fn create(&self, position: usize) -> Result<Box<dyn CustomExtractor>>;
}

impl<F> ExtractorFactory for F
where
    F: Fn(usize) -> Result<Box<dyn CustomExtractor>> + Send + Sync,
{
    fn create(&self, position: usize) -> Result<Box<dyn CustomExtractor>> {
        self(position)
    }
}

/// Registry of named custom extractor factories
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    factories: HashMap<String, Arc<dyn ExtractorFactory>>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any previous entry
    pub fn register(&mut self, name: impl Into<String>, factory: impl ExtractorFactory + 'static) {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Register a factory (builder-style)
    pub fn with(mut self, name: impl Into<String>, factory: impl ExtractorFactory + 'static) -> Self {
        self.register(name, factory);
        self
    }

    /// Remove a factory, returning whether it was registered
    pub fn unregister(&mut self, name: &str) -> bool {
        self.factories.remove(name).is_some()
    }

    /// Get a factory by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ExtractorFactory>> {
        self.factories.get(name)
    }

    /// Check if a factory is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered factories
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("names", &self.names())
            .finish()
    }
}
