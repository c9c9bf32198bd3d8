//! Collaborator strategies queried once per extension by the binding behavior.
//!
//! Every strategy receives the extension it is asked about, so one injected
//! instance can serve every extension in the pass.

use crate::configuration::conversion::{
    default_conversion_callback, ConversionCallback, ConversionCallbacks,
};
use crate::configuration::section::{ConfigurationMap, ConfigurationSection};
use crate::extension::contract::Extension;
use crate::extension::property::PropertyDescriptor;

/// Supplies the section name to load for one extension.
pub trait SectionNameResolver {
    fn section_name(&self, extension: &dyn Extension) -> String;
}

/// Loads one named section. `None` is a normal outcome.
pub trait SectionLoader {
    fn get_section(&self, name: &str) -> Option<ConfigurationSection>;
}

/// Gives access to the map that accumulates one extension's configuration.
pub trait ConfigurationConsumer {
    /// Returns the extension-backed map, or `None` to use a fresh map that is
    /// discarded once binding completes.
    fn configuration<'e>(
        &self,
        extension: &'e mut dyn Extension,
    ) -> Option<&'e mut ConfigurationMap>;
}

/// Supplies per-key conversion callbacks and the fallback callback.
pub trait ConversionCallbackProvider {
    fn conversion_callbacks(&self, extension: &dyn Extension) -> ConversionCallbacks;

    fn default_conversion_callback(&self, extension: &dyn Extension) -> ConversionCallback;
}

/// Returns the candidate bindable properties of one extension.
pub trait PropertyReflector {
    fn reflect(&self, extension: &dyn Extension) -> Vec<PropertyDescriptor>;
}

/// Uses the extension's section override, else its declared name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionSectionNameResolver;

impl SectionNameResolver for ExtensionSectionNameResolver {
    fn section_name(&self, extension: &dyn Extension) -> String {
        extension
            .section_name()
            .unwrap_or_else(|| extension.name())
            .to_string()
    }
}

/// Uses the map the extension exposes, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionConfigurationConsumer;

impl ConfigurationConsumer for ExtensionConfigurationConsumer {
    fn configuration<'e>(
        &self,
        extension: &'e mut dyn Extension,
    ) -> Option<&'e mut ConfigurationMap> {
        extension.configuration_mut()
    }
}

/// Extension-declared callbacks plus the kind-driven default converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionConversionCallbacks;

impl ConversionCallbackProvider for ExtensionConversionCallbacks {
    fn conversion_callbacks(&self, extension: &dyn Extension) -> ConversionCallbacks {
        extension.conversion_callbacks()
    }

    fn default_conversion_callback(&self, _extension: &dyn Extension) -> ConversionCallback {
        default_conversion_callback()
    }
}

/// Every publicly settable property.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicPropertyReflector;

impl PropertyReflector for PublicPropertyReflector {
    fn reflect(&self, extension: &dyn Extension) -> Vec<PropertyDescriptor> {
        extension
            .properties()
            .into_iter()
            .filter(PropertyDescriptor::is_settable)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigurationConsumer, ConversionCallbackProvider, ExtensionConfigurationConsumer,
        ExtensionConversionCallbacks, ExtensionSectionNameResolver, PropertyReflector,
        PublicPropertyReflector, SectionNameResolver,
    };
    use crate::configuration::conversion::{conversion_callback, ConversionCallbacks};
    use crate::configuration::section::ConfigurationMap;
    use crate::extension::contract::Extension;
    use crate::extension::property::{
        PropertyDescriptor, PropertyError, PropertyKind, PropertyValue,
    };

    #[derive(Default)]
    struct Widget {
        section: Option<String>,
        configuration: Option<ConfigurationMap>,
    }

    impl Extension for Widget {
        fn name(&self) -> &str {
            "Widget"
        }

        fn properties(&self) -> Vec<PropertyDescriptor> {
            vec![
                PropertyDescriptor::new("Endpoint", PropertyKind::Text),
                PropertyDescriptor::read_only("Version", PropertyKind::Text),
                PropertyDescriptor::new("Retries", PropertyKind::Unsigned),
            ]
        }

        fn set_property(
            &mut self,
            property: &PropertyDescriptor,
            _value: PropertyValue,
        ) -> Result<(), PropertyError> {
            Err(PropertyError::UnknownProperty(property.name().to_string()))
        }

        fn section_name(&self) -> Option<&str> {
            self.section.as_deref()
        }

        fn configuration_mut(&mut self) -> Option<&mut ConfigurationMap> {
            self.configuration.as_mut()
        }

        fn conversion_callbacks(&self) -> ConversionCallbacks {
            let mut callbacks = ConversionCallbacks::new();
            callbacks.insert(
                "Endpoint".to_string(),
                conversion_callback(|raw, _| Ok(PropertyValue::Text(raw.to_uppercase()))),
            );
            callbacks
        }
    }

    #[test]
    fn section_name_defaults_to_extension_name() {
        let widget = Widget::default();
        assert_eq!(ExtensionSectionNameResolver.section_name(&widget), "Widget");
    }

    #[test]
    fn section_name_prefers_override() {
        let widget = Widget {
            section: Some("widget.settings".to_string()),
            ..Widget::default()
        };
        assert_eq!(
            ExtensionSectionNameResolver.section_name(&widget),
            "widget.settings"
        );
    }

    #[test]
    fn consumer_exposes_extension_map_when_present() {
        let mut without = Widget::default();
        assert!(ExtensionConfigurationConsumer
            .configuration(&mut without)
            .is_none());

        let mut with = Widget {
            configuration: Some(ConfigurationMap::new()),
            ..Widget::default()
        };
        ExtensionConfigurationConsumer
            .configuration(&mut with)
            .expect("extension map")
            .insert("k", "v");
        assert_eq!(
            with.configuration.as_ref().and_then(|map| map.get("k")),
            Some("v")
        );
    }

    #[test]
    fn public_reflector_skips_read_only_properties() {
        let names: Vec<String> = PublicPropertyReflector
            .reflect(&Widget::default())
            .iter()
            .map(|property| property.name().to_string())
            .collect();
        assert_eq!(names, vec!["Endpoint", "Retries"]);
    }

    #[test]
    fn conversion_provider_uses_extension_callbacks() {
        let widget = Widget::default();
        let callbacks = ExtensionConversionCallbacks.conversion_callbacks(&widget);
        let endpoint = PropertyDescriptor::new("Endpoint", PropertyKind::Text);
        let callback = callbacks.get("Endpoint").expect("declared callback");
        assert_eq!(
            callback("abc", &endpoint).expect("converted"),
            PropertyValue::Text("ABC".to_string())
        );

        let fallback = ExtensionConversionCallbacks.default_conversion_callback(&widget);
        let retries = PropertyDescriptor::new("Retries", PropertyKind::Unsigned);
        assert_eq!(
            fallback("2", &retries).expect("converted"),
            PropertyValue::Unsigned(2)
        );
    }
}
