//! Bootstrapper core for host-composed extensions.
//! This crate binds per-extension configuration sections onto extension
//! properties as one step of application startup.

pub mod behavior;
pub mod configuration;
pub mod extension;
pub mod logging;

pub use behavior::{apply_behaviors, Behavior, BehaviorError};
pub use configuration::binding::{BindingError, ConfigurationBindingBehavior};
pub use configuration::conversion::{
    conversion_callback, convert_by_kind, default_conversion_callback, ConversionCallback,
    ConversionCallbacks, ConversionError,
};
pub use configuration::section::{ConfigurationMap, ConfigurationSection, SettingEntry};
pub use configuration::store::{SectionStore, SectionStoreError};
pub use configuration::strategy::{
    ConfigurationConsumer, ConversionCallbackProvider, ExtensionConfigurationConsumer,
    ExtensionConversionCallbacks, ExtensionSectionNameResolver, PropertyReflector,
    PublicPropertyReflector, SectionLoader, SectionNameResolver,
};
pub use extension::contract::Extension;
pub use extension::property::{PropertyDescriptor, PropertyError, PropertyKind, PropertyValue};
pub use logging::{default_log_level, init_logging, logging_status};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
