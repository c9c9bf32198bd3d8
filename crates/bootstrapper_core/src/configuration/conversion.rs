//! Conversion callbacks from raw configuration strings to typed values.
//!
//! # Responsibility
//! - Define the callback shape shared by hosts and extensions.
//! - Provide the kind-driven default converter.
//!
//! # Invariants
//! - Callbacks are pure; they never touch the extension instance.
//! - Non-text kinds ignore surrounding whitespace; text is taken verbatim.

use crate::extension::property::{PropertyDescriptor, PropertyKind, PropertyValue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*(ms|s|m|h)?$").expect("valid duration regex"));

/// Converts one raw value for the target property.
pub type ConversionCallback =
    Arc<dyn Fn(&str, &PropertyDescriptor) -> Result<PropertyValue, ConversionError> + Send + Sync>;

/// Conversion callbacks keyed by configuration key (not property name).
pub type ConversionCallbacks = BTreeMap<String, ConversionCallback>;

/// Raised when a raw configuration value cannot be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    pub property: String,
    pub value: String,
    pub reason: String,
}

impl ConversionError {
    pub fn new(
        property: &PropertyDescriptor,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            property: property.name().to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cannot convert `{}` for property {}: {}",
            self.value, self.property, self.reason
        )
    }
}

impl Error for ConversionError {}

/// Wraps a closure as a shareable callback.
pub fn conversion_callback<F>(callback: F) -> ConversionCallback
where
    F: Fn(&str, &PropertyDescriptor) -> Result<PropertyValue, ConversionError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(callback)
}

/// Returns the kind-driven default callback.
pub fn default_conversion_callback() -> ConversionCallback {
    conversion_callback(convert_by_kind)
}

/// Parses `raw` according to the kind declared by `property`.
pub fn convert_by_kind(
    raw: &str,
    property: &PropertyDescriptor,
) -> Result<PropertyValue, ConversionError> {
    let trimmed = raw.trim();
    match property.kind() {
        PropertyKind::Text => Ok(PropertyValue::Text(raw.to_string())),
        PropertyKind::Bool => parse_bool(trimmed)
            .map(PropertyValue::Bool)
            .ok_or_else(|| ConversionError::new(property, raw, "expected true or false")),
        PropertyKind::Integer => trimmed
            .parse::<i64>()
            .map(PropertyValue::Integer)
            .map_err(|err| ConversionError::new(property, raw, err.to_string())),
        PropertyKind::Unsigned => trimmed
            .parse::<u64>()
            .map(PropertyValue::Unsigned)
            .map_err(|err| ConversionError::new(property, raw, err.to_string())),
        PropertyKind::Float => trimmed
            .parse::<f64>()
            .map(PropertyValue::Float)
            .map_err(|err| ConversionError::new(property, raw, err.to_string())),
        PropertyKind::Duration => parse_duration(trimmed)
            .map(PropertyValue::Duration)
            .map_err(|reason| ConversionError::new(property, raw, reason)),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// Bare digits are seconds.
fn parse_duration(value: &str) -> Result<Duration, String> {
    let Some(captures) = DURATION_RE.captures(value) else {
        return Err("expected <digits>[ms|s|m|h]".to_string());
    };
    let amount = captures[1]
        .parse::<u64>()
        .map_err(|err| format!("invalid duration amount: {err}"))?;
    let unit = captures.get(2).map_or("s", |unit| unit.as_str());

    let overflow = || "duration is out of range".to_string();
    match unit {
        "ms" => Ok(Duration::from_millis(amount)),
        "s" => Ok(Duration::from_secs(amount)),
        "m" => amount
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(overflow),
        "h" => amount
            .checked_mul(60 * 60)
            .map(Duration::from_secs)
            .ok_or_else(overflow),
        other => Err(format!("unsupported duration unit: {other}")),
    }
}
