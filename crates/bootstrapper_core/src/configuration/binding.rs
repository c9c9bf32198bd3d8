//! Configuration binding behavior.
//!
//! # Responsibility
//! - Load one configuration section per extension and flatten it into the
//!   extension's configuration map.
//! - Assign every entry whose key names a bindable property, converting the
//!   raw value through the per-key or default callback.
//!
//! # Invariants
//! - Extensions are processed strictly in the order supplied.
//! - Each collaborator is queried exactly once per extension.
//! - A key matching more than one property case-insensitively is an error.
//! - Missing sections and unmatched keys are tolerated.
//! - The first failure aborts the pass; earlier extensions stay bound.
//! - Logs carry keys and counts only, never configuration values.

use crate::behavior::{Behavior, BehaviorError};
use crate::configuration::conversion::ConversionError;
use crate::configuration::section::{ConfigurationMap, ConfigurationSection};
use crate::configuration::strategy::{
    ConfigurationConsumer, ConversionCallbackProvider, ExtensionConfigurationConsumer,
    ExtensionConversionCallbacks, ExtensionSectionNameResolver, PropertyReflector,
    PublicPropertyReflector, SectionLoader, SectionNameResolver,
};
use crate::extension::contract::Extension;
use crate::extension::property::{PropertyDescriptor, PropertyError};
use log::{debug, error, info, trace};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BEHAVIOR_NAME: &str = "configuration_binding";

/// Errors raised while binding configuration onto extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// More than one property matches `key` ignoring case.
    AmbiguousPropertyMatch {
        extension: String,
        key: String,
        candidates: Vec<String>,
    },
    /// A conversion callback rejected the raw value.
    Conversion(ConversionError),
    /// The extension setter rejected the converted value.
    Property(PropertyError),
}

impl Display for BindingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AmbiguousPropertyMatch {
                extension,
                key,
                candidates,
            } => write!(
                f,
                "configuration key `{key}` matches more than one property of extension {extension}: {}",
                candidates.join(", ")
            ),
            Self::Conversion(err) => write!(f, "{err}"),
            Self::Property(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BindingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AmbiguousPropertyMatch { .. } => None,
            Self::Conversion(err) => Some(err),
            Self::Property(err) => Some(err),
        }
    }
}

impl From<ConversionError> for BindingError {
    fn from(value: ConversionError) -> Self {
        Self::Conversion(value)
    }
}

impl From<PropertyError> for BindingError {
    fn from(value: PropertyError) -> Self {
        Self::Property(value)
    }
}

/// Behavior that loads extension configuration sections and binds them onto
/// extension properties.
pub struct ConfigurationBindingBehavior {
    section_names: Box<dyn SectionNameResolver>,
    sections: Box<dyn SectionLoader>,
    consumer: Box<dyn ConfigurationConsumer>,
    conversions: Box<dyn ConversionCallbackProvider>,
    reflector: Box<dyn PropertyReflector>,
}

impl ConfigurationBindingBehavior {
    /// Creates the behavior with default strategies around `sections`.
    ///
    /// Defaults: section name from the extension, extension-owned map,
    /// extension-declared callbacks with kind-driven fallback, and every
    /// publicly settable property as a candidate.
    pub fn new(sections: impl SectionLoader + 'static) -> Self {
        Self {
            section_names: Box::new(ExtensionSectionNameResolver),
            sections: Box::new(sections),
            consumer: Box::new(ExtensionConfigurationConsumer),
            conversions: Box::new(ExtensionConversionCallbacks),
            reflector: Box::new(PublicPropertyReflector),
        }
    }

    pub fn with_section_name_resolver(
        mut self,
        resolver: impl SectionNameResolver + 'static,
    ) -> Self {
        self.section_names = Box::new(resolver);
        self
    }

    pub fn with_configuration_consumer(
        mut self,
        consumer: impl ConfigurationConsumer + 'static,
    ) -> Self {
        self.consumer = Box::new(consumer);
        self
    }

    pub fn with_conversion_callbacks(
        mut self,
        provider: impl ConversionCallbackProvider + 'static,
    ) -> Self {
        self.conversions = Box::new(provider);
        self
    }

    pub fn with_property_reflector(mut self, reflector: impl PropertyReflector + 'static) -> Self {
        self.reflector = Box::new(reflector);
        self
    }

    /// Binds configuration onto every extension, in order.
    ///
    /// An empty slice is a no-op.
    ///
    /// # Errors
    /// - `AmbiguousPropertyMatch` when one key matches several properties.
    /// - `Conversion` when a callback fails; the callback error is kept as is.
    /// - `Property` when the extension setter rejects the converted value.
    pub fn bind_all(&self, extensions: &mut [Box<dyn Extension>]) -> Result<(), BindingError> {
        for extension in extensions.iter_mut() {
            self.bind(&mut **extension)?;
        }
        Ok(())
    }

    /// Binds one extension and returns how many properties were assigned.
    pub fn bind(&self, extension: &mut dyn Extension) -> Result<usize, BindingError> {
        let section_name = self.section_names.section_name(extension);
        let section = self.sections.get_section(&section_name).unwrap_or_else(|| {
            debug!(
                "event=config_section module=configuration status=missing extension={} section={}",
                extension.name(),
                section_name
            );
            ConfigurationSection::empty()
        });

        let entries = fill_consumer_configuration(self.consumer.as_ref(), extension, &section);

        match self.assign_entries(extension, &entries) {
            Ok(bound) => {
                info!(
                    "event=config_bind module=configuration status=ok extension={} section={} entries={} bound={}",
                    extension.name(),
                    section_name,
                    entries.len(),
                    bound
                );
                Ok(bound)
            }
            Err(err) => {
                error!(
                    "event=config_bind module=configuration status=error extension={} section={} error_kind={}",
                    extension.name(),
                    section_name,
                    error_kind(&err)
                );
                Err(err)
            }
        }
    }

    fn assign_entries(
        &self,
        extension: &mut dyn Extension,
        entries: &[(String, String)],
    ) -> Result<usize, BindingError> {
        let properties = self.reflector.reflect(extension);
        let callbacks = self.conversions.conversion_callbacks(extension);
        let default_callback = self.conversions.default_conversion_callback(extension);

        let mut bound = 0;
        for (key, value) in entries {
            let Some(property) = match_property(extension.name(), &properties, key)? else {
                trace!(
                    "event=config_key module=configuration status=skipped extension={} key={}",
                    extension.name(),
                    key
                );
                continue;
            };

            let callback = callbacks.get(key.as_str()).unwrap_or(&default_callback);
            let converted = callback(value.as_str(), property)?;
            extension.set_property(property, converted)?;
            bound += 1;
        }
        Ok(bound)
    }
}

impl Behavior for ConfigurationBindingBehavior {
    fn name(&self) -> &str {
        BEHAVIOR_NAME
    }

    fn behave(&self, extensions: &mut [Box<dyn Extension>]) -> Result<(), BehaviorError> {
        self.bind_all(extensions).map_err(BehaviorError::from)
    }
}

// Appends onto whatever the consumer already holds, then snapshots the map so
// the extension can be mutated while iterating.
fn fill_consumer_configuration(
    consumer: &dyn ConfigurationConsumer,
    extension: &mut dyn Extension,
    section: &ConfigurationSection,
) -> Vec<(String, String)> {
    let mut scratch = ConfigurationMap::new();
    let configuration = match consumer.configuration(extension) {
        Some(map) => map,
        None => &mut scratch,
    };
    configuration.extend_from_section(section);
    configuration
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn match_property<'p>(
    extension: &str,
    properties: &'p [PropertyDescriptor],
    key: &str,
) -> Result<Option<&'p PropertyDescriptor>, BindingError> {
    let mut matches = properties.iter().filter(|property| property.matches_key(key));
    let Some(first) = matches.next() else {
        return Ok(None);
    };
    let rest: Vec<&PropertyDescriptor> = matches.collect();
    if rest.is_empty() {
        return Ok(Some(first));
    }

    Err(BindingError::AmbiguousPropertyMatch {
        extension: extension.to_string(),
        key: key.to_string(),
        candidates: std::iter::once(first)
            .chain(rest)
            .map(|property| property.name().to_string())
            .collect(),
    })
}

fn error_kind(err: &BindingError) -> &'static str {
    match err {
        BindingError::AmbiguousPropertyMatch { .. } => "ambiguous_property",
        BindingError::Conversion(_) => "conversion",
        BindingError::Property(_) => "property",
    }
}
