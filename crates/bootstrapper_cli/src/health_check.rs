//! Demo extension bound by the smoke CLI.

use bootstrapper_core::{
    conversion_callback, ConfigurationMap, ConversionCallbacks, ConversionError, Extension,
    PropertyDescriptor, PropertyError, PropertyKind, PropertyValue,
};
use std::time::Duration;

/// HTTP health check settings, configured from the `HealthCheck` section.
#[derive(Debug)]
pub struct HealthCheck {
    endpoint: String,
    retries: u64,
    timeout: Duration,
    verbose: bool,
    configuration: ConfigurationMap,
}

impl Default for HealthCheck {
    fn default() -> Self {
        let mut configuration = ConfigurationMap::new();
        configuration.insert("Endpoint", "http://127.0.0.1/health");
        Self {
            endpoint: "http://127.0.0.1/health".to_string(),
            retries: 1,
            timeout: Duration::from_secs(5),
            verbose: false,
            configuration,
        }
    }
}

impl HealthCheck {
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("endpoint={}", self.endpoint),
            format!("retries={}", self.retries),
            format!("timeout_ms={}", self.timeout.as_millis()),
            format!("verbose={}", self.verbose),
            format!("configuration_keys={}", self.configuration.len()),
        ]
    }
}

impl Extension for HealthCheck {
    fn name(&self) -> &str {
        "HealthCheck"
    }

    fn properties(&self) -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::new("Endpoint", PropertyKind::Text),
            PropertyDescriptor::new("Retries", PropertyKind::Unsigned),
            PropertyDescriptor::new("Timeout", PropertyKind::Duration),
            PropertyDescriptor::new("Verbose", PropertyKind::Bool),
        ]
    }

    fn set_property(
        &mut self,
        property: &PropertyDescriptor,
        value: PropertyValue,
    ) -> Result<(), PropertyError> {
        match property.name() {
            "Endpoint" => self.endpoint = value.into_text(property)?,
            "Retries" => self.retries = value.into_unsigned(property)?,
            "Timeout" => self.timeout = value.into_duration(property)?,
            "Verbose" => self.verbose = value.into_bool(property)?,
            other => return Err(PropertyError::UnknownProperty(other.to_string())),
        }
        Ok(())
    }

    fn configuration_mut(&mut self) -> Option<&mut ConfigurationMap> {
        Some(&mut self.configuration)
    }

    fn conversion_callbacks(&self) -> ConversionCallbacks {
        let mut callbacks = ConversionCallbacks::new();
        callbacks.insert(
            "Endpoint".to_string(),
            conversion_callback(|raw, property| {
                let trimmed = raw.trim();
                if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                    Ok(PropertyValue::Text(trimmed.to_string()))
                } else {
                    Err(ConversionError::new(
                        property,
                        raw,
                        "expected an http:// or https:// url",
                    ))
                }
            }),
        );
        callbacks
    }
}
