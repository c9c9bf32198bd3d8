//! Extension contract consumed by bootstrapper behaviors.

use crate::configuration::conversion::ConversionCallbacks;
use crate::configuration::section::ConfigurationMap;
use crate::extension::property::{PropertyDescriptor, PropertyError, PropertyValue};

/// Host-composed unit of application behavior.
///
/// Properties are exposed through an explicit descriptor table plus a setter,
/// so behaviors can bind configuration without runtime introspection.
pub trait Extension {
    /// Declared identity, e.g. `HealthCheck`.
    fn name(&self) -> &str;

    /// Every property this extension declares, settable or not.
    fn properties(&self) -> Vec<PropertyDescriptor>;

    /// Assigns one converted value.
    ///
    /// # Errors
    /// - `UnknownProperty` when `property` is not part of this extension.
    /// - `KindMismatch` when `value` has a different kind than the property.
    fn set_property(
        &mut self,
        property: &PropertyDescriptor,
        value: PropertyValue,
    ) -> Result<(), PropertyError>;

    /// Section name override. `None` falls back to [`Extension::name`].
    fn section_name(&self) -> Option<&str> {
        None
    }

    /// Map the extension keeps its raw configuration in, if it wants one.
    ///
    /// May already hold defaults before binding starts.
    fn configuration_mut(&mut self) -> Option<&mut ConfigurationMap> {
        None
    }

    /// Per-key conversion callbacks declared by the extension.
    fn conversion_callbacks(&self) -> ConversionCallbacks {
        ConversionCallbacks::new()
    }
}
