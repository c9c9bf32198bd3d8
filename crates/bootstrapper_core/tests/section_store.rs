use bootstrapper_core::{
    ConfigurationBindingBehavior, ConfigurationMap, Extension, PropertyDescriptor, PropertyError,
    PropertyKind, PropertyValue, SectionLoader, SectionStore, SectionStoreError,
};
use std::io::Write;

const HOST_CONFIG: &str = r#"{
    "logging": { "level": "info", "log_dir": "/tmp/ignored" },
    "sections": {
        "Mailer": [
            { "key": "Host", "value": "smtp.example.com" },
            { "key": "Port", "value": "25" },
            { "key": "Port", "value": "587" }
        ],
        "Empty": []
    }
}"#;

#[derive(Default)]
struct Mailer {
    host: String,
    port: u64,
    configuration: ConfigurationMap,
}

impl Extension for Mailer {
    fn name(&self) -> &str {
        "Mailer"
    }

    fn properties(&self) -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::new("Host", PropertyKind::Text),
            PropertyDescriptor::new("Port", PropertyKind::Unsigned),
        ]
    }

    fn set_property(
        &mut self,
        property: &PropertyDescriptor,
        value: PropertyValue,
    ) -> Result<(), PropertyError> {
        match property.name() {
            "Host" => self.host = value.into_text(property)?,
            "Port" => self.port = value.into_unsigned(property)?,
            other => return Err(PropertyError::UnknownProperty(other.to_string())),
        }
        Ok(())
    }

    fn configuration_mut(&mut self) -> Option<&mut ConfigurationMap> {
        Some(&mut self.configuration)
    }
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn loads_sections_from_json_file_and_ignores_other_fields() {
    let file = write_config(HOST_CONFIG);

    let store = SectionStore::from_json_file(file.path()).expect("valid config file");

    assert_eq!(store.section_names(), vec!["Empty", "Mailer"]);
    assert_eq!(store.get_section("Mailer").expect("mailer").len(), 3);
    assert!(store.get_section("Empty").expect("empty").is_empty());
}

#[test]
fn duplicate_keys_in_file_resolve_last_write_wins() {
    let file = write_config(HOST_CONFIG);
    let store = SectionStore::from_json_file(file.path()).expect("valid config file");
    let behavior = ConfigurationBindingBehavior::new(store);
    let mut mailer = Mailer::default();

    behavior.bind(&mut mailer).expect("bind succeeds");

    assert_eq!(mailer.host, "smtp.example.com");
    assert_eq!(mailer.port, 587);
    assert_eq!(mailer.configuration.len(), 2);
    assert_eq!(mailer.configuration.get("Port"), Some("587"));
}

#[test]
fn invalid_json_file_fails_at_load_time() {
    let file = write_config("{ not json");

    let err = SectionStore::from_json_file(file.path()).expect_err("invalid json");

    assert!(matches!(err, SectionStoreError::Parse(_)));
}
