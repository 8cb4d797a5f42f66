use std::cmp::Ordering;
use std::io::Write;
use std::sync::Arc;

use serde_json::json;
use tempfile::NamedTempFile;
use version_schemes::component::{ComponentType, ComponentValue, OrderKey};
use version_schemes::{
    ComponentDefinition, ComponentTypeRegistry, SchemeLoader, SchemeRegistry, VersionError,
    VersionRange,
};

/// Release channel spelled as a Greek letter count
#[derive(Debug)]
struct GreekType;

impl ComponentType for GreekType {
    fn name(&self) -> &'static str {
        "greek"
    }

    fn parse(
        &self,
        raw: &str,
        definition: &ComponentDefinition,
    ) -> Result<ComponentValue, VersionError> {
        match raw {
            "alpha" | "beta" | "gamma" => Ok(ComponentValue::Symbol(raw.to_string())),
            other => Err(VersionError::Parse(format!(
                "'{other}' is not a greek letter for {}",
                definition.name
            ))),
        }
    }

    fn to_comparable(&self, value: &ComponentValue, _definition: &ComponentDefinition) -> OrderKey {
        match value.as_str() {
            Some("alpha") => OrderKey::Int(1),
            Some("beta") => OrderKey::Int(2),
            Some("gamma") => OrderKey::Int(3),
            _ => OrderKey::Int(0),
        }
    }
}

fn write_json(value: serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{value}").unwrap();
    file
}

#[test]
fn loaded_schemes_register_and_detect() {
    let file = write_json(json!([
        {
            "type": "pattern",
            "name": "android",
            "pattern": r"(\d+)\.(\d+) \((\d+)\)",
            "formatTemplate": "{major}.{minor} ({code})",
            "components": [
                { "name": "major", "type": "integer" },
                { "name": "minor", "type": "integer" },
                { "name": "code", "type": "integer" }
            ]
        },
        { "type": "calver", "name": "monthly", "format": "YYYY.0M" }
    ]));

    let registry = SchemeRegistry::with_builtins().unwrap();
    for scheme in SchemeLoader::default()
        .schemes_from_json_file(file.path())
        .unwrap()
    {
        registry.register(scheme.name().to_string(), scheme);
    }

    assert_eq!(
        registry.registered(),
        vec!["semantic", "calver", "solover", "wendtver", "android", "monthly"]
    );
    let android = registry.detect_from("4.1 (16)").unwrap();
    assert_eq!(android.name(), "android");
    assert_eq!(android.compare("4.1 (16)", "4.1 (9)"), Ok(Ordering::Greater));

    let monthly = registry.detect_with_priority("2024.05", &["monthly"]).unwrap();
    assert_eq!(monthly.name(), "monthly");
}

#[test]
fn custom_component_type_is_usable_from_configuration() {
    let types = Arc::new(ComponentTypeRegistry::with_builtins());
    types.register(Arc::new(GreekType));
    let loader = SchemeLoader::new(Arc::clone(&types));

    let scheme = loader
        .from_json_str(
            &json!({
                "type": "declarative",
                "name": "greek_release",
                "components": [
                    { "name": "major", "type": "integer", "separator": "-" },
                    { "name": "letter", "type": "greek" }
                ]
            })
            .to_string(),
        )
        .unwrap();

    assert_eq!(scheme.compare("3-beta", "3-gamma"), Ok(Ordering::Less));
    assert!(!scheme.is_valid("3-delta"));
    assert_eq!(
        scheme.matches_range("3-beta", &VersionRange::between("3-alpha", "3-gamma")),
        Ok(true)
    );
}

#[test]
fn enum_stage_scheme_orders_by_declared_order() {
    let scheme = SchemeLoader::default()
        .from_json_str(
            &json!({
                "type": "declarative",
                "name": "staged",
                "components": [
                    { "name": "major", "type": "integer", "separator": "." },
                    { "name": "minor", "type": "integer" },
                    {
                        "name": "stage", "type": "enum", "prefix": "-", "optional": true,
                        "values": ["alpha", "beta", "rc"],
                        "order": ["alpha", "beta", "rc"]
                    }
                ]
            })
            .to_string(),
        )
        .unwrap();

    assert_eq!(scheme.compare("1.0-alpha", "1.0-rc"), Ok(Ordering::Less));
    assert_eq!(scheme.compare("1.0-rc", "1.0"), Ok(Ordering::Less));
    assert!(matches!(scheme.parse("1.0-gamma"), Err(VersionError::Parse(_))));
}

#[test]
fn supports_propagates_broken_definitions_only() {
    let loader = SchemeLoader::default();
    let broken = loader.from_json_str(
        &json!({
            "type": "pattern",
            "name": "greedy",
            "pattern": r"((a*)*b*)*",
            "components": [{ "name": "n", "type": "integer" }]
        })
        .to_string(),
    );
    assert!(matches!(broken, Err(VersionError::InvalidScheme(_))));

    let semantic = SchemeRegistry::with_builtins().unwrap().get("semantic").unwrap();
    assert_eq!(semantic.supports("not-a-version"), Ok(false));
    assert_eq!(semantic.supports("1.2.3"), Ok(true));
}
