//! SQL parameters
//!
//! A parameter is the resolved form of one `${...}` token of a statement
//! template. It knows how to read one field of an event, convert it to its
//! configured value kind, and bind the result at a fixed statement position.
//!
//! Parameters are built by [`Parameter::new`] from a textual
//! `(item, type, config)` triple:
//!
//! | item            | types                                              |
//! |-----------------|----------------------------------------------------|
//! | `body`          | `string`, `bytearray`                              |
//! | `header.<name>` | `string`, `long`, `int`, `date`, `double`, `float` |
//! | `custom`        | any name registered in an [`ExtractorRegistry`]    |
//!
//! A header that is missing from an event binds SQL NULL for every header
//! type, as does an event without a body.

use std::fmt;

use tracing::{debug, trace};

use crate::convert::{self, DateFormat, TextDecoding};
use crate::error::{Error, Result};
use crate::event::Event;
use crate::registry::{CustomExtractor, ExtractorRegistry};
use crate::statement::StatementBinder;
use crate::types::{SourceKind, Value, ValueKind};

/// Item naming the event body
pub const BODY_ITEM: &str = "body";
/// Prefix of items naming an event header
pub const HEADER_ITEM_PREFIX: &str = "header.";
/// Item naming a registered custom extractor
pub const CUSTOM_ITEM: &str = "custom";

/// Conversion applied to a header value
#[derive(Debug, Clone, PartialEq)]
enum HeaderConversion {
    String,
    Long,
    Int,
    Date(DateFormat),
    Double,
    Float,
}

impl HeaderConversion {
    fn value_kind(&self) -> ValueKind {
        match self {
            Self::String => ValueKind::String,
            Self::Long => ValueKind::Long,
            Self::Int => ValueKind::Int,
            Self::Date(_) => ValueKind::Date,
            Self::Double => ValueKind::Double,
            Self::Float => ValueKind::Float,
        }
    }

    fn convert(&self, raw: &str) -> std::result::Result<Value, String> {
        match self {
            Self::String => Ok(Value::String(raw.to_string())),
            Self::Long => convert::parse_long(raw),
            Self::Int => convert::parse_int(raw),
            Self::Date(format) => format.parse(raw),
            Self::Double => convert::parse_double(raw),
            Self::Float => convert::parse_float(raw),
        }
    }
}

enum Extractor {
    BodyString(TextDecoding),
    BodyBytes,
    Header {
        name: String,
        conversion: HeaderConversion,
    },
    Custom {
        type_name: String,
        extractor: Box<dyn CustomExtractor>,
    },
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BodyString(decoding) => f.debug_tuple("BodyString").field(decoding).finish(),
            Self::BodyBytes => f.write_str("BodyBytes"),
            Self::Header { name, conversion } => f
                .debug_struct("Header")
                .field("name", name)
                .field("conversion", conversion)
                .finish(),
            Self::Custom {
                type_name,
                extractor,
            } => f
                .debug_struct("Custom")
                .field("type_name", type_name)
                .field("extractor", extractor)
                .finish(),
        }
    }
}

/// A configured extractor bound to one statement position
#[derive(Debug)]
pub struct Parameter {
    position: usize,
    config: Option<String>,
    extractor: Extractor,
}

impl Parameter {
    /// Build and configure a parameter.
    ///
    /// `position` is the 1-based placeholder index. `item` and `type_name`
    /// select the extractor; `config` is handed to its configuration step.
    /// `registry` resolves `custom` items.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownParameter`] if the pair is not a valid combination
    ///   or `position` is 0
    /// - [`Error::CustomParameter`] if a custom type is not registered, its
    ///   factory fails, or it rejects `config`
    /// - [`Error::ParameterConfig`] if a built-in extractor rejects `config`
    pub fn new(
        position: usize,
        item: &str,
        type_name: &str,
        config: Option<&str>,
        registry: &ExtractorRegistry,
    ) -> Result<Self> {
        if position == 0 {
            return Err(Error::unknown_parameter(item, type_name, config));
        }

        let extractor = if item == BODY_ITEM {
            match ValueKind::from_type_name(type_name) {
                Some(ValueKind::String) => Some(Extractor::BodyString(
                    TextDecoding::from_config(config)
                        .map_err(|msg| Error::parameter_config(item, type_name, config, msg))?,
                )),
                Some(ValueKind::ByteArray) => Some(Extractor::BodyBytes),
                _ => None,
            }
        } else if let Some(header) = item.strip_prefix(HEADER_ITEM_PREFIX) {
            let conversion = match ValueKind::from_type_name(type_name) {
                Some(ValueKind::String) => Some(HeaderConversion::String),
                Some(ValueKind::Long) => Some(HeaderConversion::Long),
                Some(ValueKind::Int) => Some(HeaderConversion::Int),
                Some(ValueKind::Date) => Some(HeaderConversion::Date(
                    DateFormat::from_config(config)
                        .map_err(|msg| Error::parameter_config(item, type_name, config, msg))?,
                )),
                Some(ValueKind::Double) => Some(HeaderConversion::Double),
                Some(ValueKind::Float) => Some(HeaderConversion::Float),
                _ => None,
            };
            conversion.map(|conversion| Extractor::Header {
                name: header.to_string(),
                conversion,
            })
        } else if item == CUSTOM_ITEM {
            Some(Self::custom(position, type_name, config, registry)?)
        } else {
            None
        };

        let extractor =
            extractor.ok_or_else(|| Error::unknown_parameter(item, type_name, config))?;

        let parameter = Self {
            position,
            config: config.map(str::to_string),
            extractor,
        };
        debug!(
            position,
            item,
            type_name,
            source = %parameter.source_kind(),
            value_kind = %parameter.value_kind(),
            "Resolved SQL parameter"
        );
        Ok(parameter)
    }

    fn custom(
        position: usize,
        type_name: &str,
        config: Option<&str>,
        registry: &ExtractorRegistry,
    ) -> Result<Extractor> {
        let factory = registry.get(type_name).ok_or_else(|| {
            Error::custom_parameter(type_name, config, "no extractor registered under this name")
        })?;

        let mut extractor = factory.create(position).map_err(|e| Error::CustomParameter {
            type_name: type_name.to_string(),
            config: config.map(str::to_string),
            message: "extractor factory failed".to_string(),
            source: Some(Box::new(e)),
        })?;

        extractor
            .configure(config)
            .map_err(|e| Error::CustomParameter {
                type_name: type_name.to_string(),
                config: config.map(str::to_string),
                message: "extractor rejected its config".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Extractor::Custom {
            type_name: type_name.to_string(),
            extractor,
        })
    }

    /// 1-based statement position
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Where in the event this parameter reads from
    pub fn source_kind(&self) -> SourceKind {
        match self.extractor {
            Extractor::BodyString(_) | Extractor::BodyBytes => SourceKind::Body,
            Extractor::Header { .. } => SourceKind::Header,
            Extractor::Custom { .. } => SourceKind::Custom,
        }
    }

    /// Kind of value this parameter binds
    pub fn value_kind(&self) -> ValueKind {
        match &self.extractor {
            Extractor::BodyString(_) => ValueKind::String,
            Extractor::BodyBytes => ValueKind::ByteArray,
            Extractor::Header { conversion, .. } => conversion.value_kind(),
            Extractor::Custom { extractor, .. } => extractor.value_kind(),
        }
    }

    /// Header key, for header parameters
    pub fn header_name(&self) -> Option<&str> {
        match &self.extractor {
            Extractor::Header { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Registered name, for custom parameters
    pub fn custom_type(&self) -> Option<&str> {
        match &self.extractor {
            Extractor::Custom { type_name, .. } => Some(type_name),
            _ => None,
        }
    }

    /// Config string the parameter was built with
    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Read this parameter's field from `event` and bind it into `statement`.
    ///
    /// # Errors
    ///
    /// [`Error::TypeConversion`] if the field cannot be converted, or
    /// whatever the statement returns when it rejects the value.
    pub fn bind(&self, statement: &mut dyn StatementBinder, event: &Event) -> Result<()> {
        let value = match &self.extractor {
            Extractor::BodyString(decoding) => match event.body() {
                Some(body) => decoding
                    .decode(body)
                    .map_err(|msg| Error::type_conversion(self.position, msg))?,
                None => Value::Null,
            },
            Extractor::BodyBytes => event
                .body()
                .map_or(Value::Null, |body| Value::Bytes(body.to_vec())),
            Extractor::Header { name, conversion } => match event.header(name) {
                Some(raw) => conversion.convert(raw).map_err(|msg| {
                    Error::type_conversion(self.position, format!("header '{}': {}", name, msg))
                })?,
                None => Value::Null,
            },
            Extractor::Custom { extractor, .. } => {
                trace!(position = self.position, "Binding custom parameter");
                return extractor.bind(statement, event);
            }
        };

        trace!(position = self.position, sql_type = value.sql_type(), "Binding parameter");
        statement.bind_value(self.position, value)
    }
}

/// Build and configure a parameter. See [`Parameter::new`].
pub fn new_parameter(
    position: usize,
    item: &str,
    type_name: &str,
    config: Option<&str>,
    registry: &ExtractorRegistry,
) -> Result<Parameter> {
    Parameter::new(position, item, type_name, config, registry)
}
