//! Property descriptors and typed values for configurable extensions.
//!
//! # Responsibility
//! - Describe the named, typed properties an extension allows the host to set.
//! - Carry converted values from conversion callbacks to extension setters.
//!
//! # Invariants
//! - Property names are matched against configuration keys case-insensitively.
//! - A `PropertyValue` always reports the `PropertyKind` it was built for.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Semantic type of one bindable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyKind {
    Text,
    Bool,
    Integer,
    Unsigned,
    Float,
    Duration,
}

impl PropertyKind {
    /// Stable string id used in diagnostics and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Unsigned => "unsigned",
            Self::Float => "float",
            Self::Duration => "duration",
        }
    }
}

impl Display for PropertyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor for one extension property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: String,
    kind: PropertyKind,
    settable: bool,
}

impl PropertyDescriptor {
    /// Creates a publicly settable property descriptor.
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            settable: true,
        }
    }

    /// Creates a descriptor that is visible but must not be bound.
    pub fn read_only(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            settable: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_settable(&self) -> bool {
        self.settable
    }

    /// Returns whether `key` names this property, ignoring case.
    ///
    /// Compares per character with simple uppercase mapping, so `ς`, `σ` and
    /// `Σ` are equal, `ß` never equals `SS` and the Kelvin sign never equals `k`.
    pub fn matches_key(&self, key: &str) -> bool {
        self.name.eq_ignore_ascii_case(key)
            || self
                .name
                .chars()
                .map(simple_uppercase)
                .eq(key.chars().map(simple_uppercase))
    }
}

// Multi-char expansions (e.g. `ß` -> `SS`) keep the original char.
fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(mapped), None) => mapped,
        _ => c,
    }
}

/// Converted value ready to be assigned to a property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Duration(Duration),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Text(_) => PropertyKind::Text,
            Self::Bool(_) => PropertyKind::Bool,
            Self::Integer(_) => PropertyKind::Integer,
            Self::Unsigned(_) => PropertyKind::Unsigned,
            Self::Float(_) => PropertyKind::Float,
            Self::Duration(_) => PropertyKind::Duration,
        }
    }

    pub fn into_text(self, property: &PropertyDescriptor) -> Result<String, PropertyError> {
        match self {
            Self::Text(value) => Ok(value),
            other => Err(PropertyError::mismatch(property, PropertyKind::Text, &other)),
        }
    }

    pub fn into_bool(self, property: &PropertyDescriptor) -> Result<bool, PropertyError> {
        match self {
            Self::Bool(value) => Ok(value),
            other => Err(PropertyError::mismatch(property, PropertyKind::Bool, &other)),
        }
    }

    pub fn into_integer(self, property: &PropertyDescriptor) -> Result<i64, PropertyError> {
        match self {
            Self::Integer(value) => Ok(value),
            other => Err(PropertyError::mismatch(
                property,
                PropertyKind::Integer,
                &other,
            )),
        }
    }

    pub fn into_unsigned(self, property: &PropertyDescriptor) -> Result<u64, PropertyError> {
        match self {
            Self::Unsigned(value) => Ok(value),
            other => Err(PropertyError::mismatch(
                property,
                PropertyKind::Unsigned,
                &other,
            )),
        }
    }

    pub fn into_float(self, property: &PropertyDescriptor) -> Result<f64, PropertyError> {
        match self {
            Self::Float(value) => Ok(value),
            other => Err(PropertyError::mismatch(property, PropertyKind::Float, &other)),
        }
    }

    pub fn into_duration(self, property: &PropertyDescriptor) -> Result<Duration, PropertyError> {
        match self {
            Self::Duration(value) => Ok(value),
            other => Err(PropertyError::mismatch(
                property,
                PropertyKind::Duration,
                &other,
            )),
        }
    }
}

/// Errors raised by extension property setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    UnknownProperty(String),
    KindMismatch {
        property: String,
        expected: PropertyKind,
        actual: PropertyKind,
    },
}

impl PropertyError {
    fn mismatch(
        property: &PropertyDescriptor,
        expected: PropertyKind,
        actual: &PropertyValue,
    ) -> Self {
        Self::KindMismatch {
            property: property.name().to_string(),
            expected,
            actual: actual.kind(),
        }
    }
}

impl Display for PropertyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownProperty(name) => write!(f, "extension has no settable property: {name}"),
            Self::KindMismatch {
                property,
                expected,
                actual,
            } => write!(
                f,
                "property {property} expects a {expected} value, got {actual}"
            ),
        }
    }
}

impl Error for PropertyError {}
