use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::component::{ComponentDefinition, ComponentTypeRegistry};
use crate::version::error::VersionError;
use crate::version::scheme::Scheme;
use crate::version::schemes::{
    CalVerScheme, CompositeScheme, DEFAULT_CALVER_FORMAT, DeclarativeScheme, PatternScheme,
    SemanticScheme, SoloVerScheme, WendtVerScheme,
};

/// Scheme configuration record
///
/// `type` selects the scheme variant: `declarative`, `pattern`, `calver`,
/// `composite`, or one of the built-in `semantic`, `solover`, `wendtver`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SchemeConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub pattern: Option<String>,
    #[serde(alias = "formatTemplate")]
    pub format_template: Option<String>,
    pub components: Vec<ComponentDefinition>,
    pub format: Option<String>,
    pub schemes: Vec<SchemeConfig>,
    #[serde(alias = "fallbackScheme")]
    pub fallback_scheme: Option<Box<SchemeConfig>>,
}

/// Either a single scheme record or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemeDocument {
    Many(Vec<SchemeConfig>),
    One(Box<SchemeConfig>),
}

/// Turns configuration records into schemes
///
/// Component type names in the records resolve against `types`, so custom
/// types registered there are usable from configuration.
#[derive(Debug, Clone)]
pub struct SchemeLoader {
    types: Arc<ComponentTypeRegistry>,
}

impl Default for SchemeLoader {
    fn default() -> Self {
        Self::new(Arc::new(ComponentTypeRegistry::with_builtins()))
    }
}

impl SchemeLoader {
    pub fn new(types: Arc<ComponentTypeRegistry>) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &ComponentTypeRegistry {
        &self.types
    }

    pub fn from_config(&self, config: &SchemeConfig) -> Result<Scheme, VersionError> {
        debug!("Loading scheme of type '{}'", config.kind);
        let description = config.description.as_deref();

        let scheme = match config.kind.as_str() {
            "declarative" => {
                let mut scheme = DeclarativeScheme::new(
                    required_name(config)?,
                    config.components.clone(),
                    &self.types,
                )?;
                if let Some(description) = description {
                    scheme = scheme.with_description(description);
                }
                Scheme::new(scheme)
            }
            "pattern" => {
                let pattern = config.pattern.as_deref().ok_or_else(|| {
                    VersionError::InvalidScheme(format!(
                        "Pattern scheme '{}' has no pattern",
                        config.name.as_deref().unwrap_or_default()
                    ))
                })?;
                let mut scheme = PatternScheme::new(
                    required_name(config)?,
                    pattern,
                    config.components.clone(),
                    &self.types,
                )?;
                if let Some(template) = config.format_template.as_deref() {
                    scheme = scheme.with_format_template(template);
                }
                if let Some(description) = description {
                    scheme = scheme.with_description(description);
                }
                Scheme::new(scheme)
            }
            "calver" => {
                let format = config.format.as_deref().unwrap_or(DEFAULT_CALVER_FORMAT);
                let mut scheme = CalVerScheme::new(format)?
                    .with_name(config.name.as_deref().unwrap_or("calver"));
                if let Some(description) = description {
                    scheme = scheme.with_description(description);
                }
                Scheme::new(scheme)
            }
            "composite" => {
                let schemes = config
                    .schemes
                    .iter()
                    .map(|sub| self.from_config(sub))
                    .collect::<Result<Vec<_>, _>>()?;
                let fallback = config
                    .fallback_scheme
                    .as_deref()
                    .map(|sub| self.from_config(sub))
                    .transpose()?;
                let mut scheme = CompositeScheme::new(required_name(config)?, schemes, fallback);
                if let Some(description) = description {
                    scheme = scheme.with_description(description);
                }
                Scheme::new(scheme)
            }
            "semantic" => Scheme::new(SemanticScheme::new()),
            "solover" => Scheme::new(SoloVerScheme::new()),
            "wendtver" => Scheme::new(WendtVerScheme::new()),
            other => {
                return Err(VersionError::InvalidScheme(format!(
                    "Unknown scheme type: {other}"
                )));
            }
        };

        Ok(scheme)
    }

    pub fn from_json_str(&self, json: &str) -> Result<Scheme, VersionError> {
        let config: SchemeConfig = serde_json::from_str(json)
            .map_err(|e| VersionError::InvalidScheme(format!("Invalid JSON: {e}")))?;
        self.from_config(&config)
    }

    pub fn from_json_file(&self, path: impl AsRef<Path>) -> Result<Scheme, VersionError> {
        self.from_json_str(&read(path.as_ref())?)
    }

    /// Load a document holding one record or an array of records
    pub fn schemes_from_json_str(&self, json: &str) -> Result<Vec<Scheme>, VersionError> {
        let document: SchemeDocument = serde_json::from_str(json)
            .map_err(|e| VersionError::InvalidScheme(format!("Invalid JSON: {e}")))?;
        match document {
            SchemeDocument::Many(configs) => configs.iter().map(|c| self.from_config(c)).collect(),
            SchemeDocument::One(config) => Ok(vec![self.from_config(&config)?]),
        }
    }

    pub fn schemes_from_json_file(&self, path: impl AsRef<Path>) -> Result<Vec<Scheme>, VersionError> {
        self.schemes_from_json_str(&read(path.as_ref())?)
    }
}

fn read(path: &Path) -> Result<String, VersionError> {
    std::fs::read_to_string(path).map_err(|e| {
        VersionError::InvalidScheme(format!("Cannot read {}: {}", path.display(), e))
    })
}

fn required_name(config: &SchemeConfig) -> Result<&str, VersionError> {
    config
        .name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| {
            VersionError::InvalidScheme(format!("{} scheme name required", config.kind))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::cmp::Ordering;
    use std::io::Write;

    fn loader() -> SchemeLoader {
        SchemeLoader::default()
    }

    fn load(value: serde_json::Value) -> Result<Scheme, VersionError> {
        let config = serde_json::from_value::<SchemeConfig>(value).unwrap();
        loader().from_config(&config)
    }

    #[test]
    fn scheme_config_accepts_camel_case_aliases() {
        let config = serde_json::from_value::<SchemeConfig>(json!({
            "type": "composite",
            "name": "mixed",
            "formatTemplate": "{major}",
            "fallbackScheme": { "type": "solover" }
        }))
        .unwrap();

        assert_eq!(config.format_template.as_deref(), Some("{major}"));
        assert_eq!(
            config.fallback_scheme.map(|f| f.kind),
            Some("solover".to_string())
        );
    }

    #[test]
    fn component_records_accept_numeric_default_and_aliases() {
        let config = serde_json::from_value::<SchemeConfig>(json!({
            "type": "declarative",
            "name": "dotted",
            "components": [
                { "name": "major", "type": "integer" },
                { "name": "minor", "type": "integer", "separator": ".", "default": 0 },
                { "name": "tag", "type": "hash", "prefix": "-", "optional": true,
                  "compareAs": "lowest", "ignoreInComparison": true }
            ]
        }))
        .unwrap();

        let minor = &config.components[1];
        assert_eq!(minor.default_token(), Some("0"));
        let tag = &config.components[2];
        assert_eq!(tag.compare_as, Some(crate::component::CompareAs::Lowest));
        assert!(tag.ignore_in_comparison);
    }

    #[test]
    fn from_config_builds_declarative_scheme() {
        let scheme = load(json!({
            "type": "declarative",
            "name": "dotted",
            "description": "Two numbers",
            "components": [
                { "name": "major", "type": "integer", "separator": "." },
                { "name": "minor", "type": "integer" }
            ]
        }))
        .unwrap();

        assert_eq!(scheme.name(), "dotted");
        assert_eq!(scheme.description(), Some("Two numbers"));
        assert_eq!(scheme.compare("1.10", "1.9"), Ok(Ordering::Greater));
    }

    #[test]
    fn from_config_builds_pattern_scheme_with_template() {
        let scheme = load(json!({
            "type": "pattern",
            "name": "build",
            "pattern": r"(\d+)\.(\d+)-b(\d+)",
            "format_template": "{major}.{minor}-b{build}",
            "components": [
                { "name": "major", "type": "integer" },
                { "name": "minor", "type": "integer" },
                { "name": "build", "type": "integer" }
            ]
        }))
        .unwrap();

        let version = scheme.parse("2.1-b7").unwrap();
        assert_eq!(version.to_string(), "2.1-b7");
        assert_eq!(scheme.format_template(), Some("{major}.{minor}-b{build}"));
    }

    #[test]
    fn from_config_calver_defaults_name_and_format() {
        let scheme = load(json!({ "type": "calver" })).unwrap();
        assert_eq!(scheme.name(), "calver");
        assert!(scheme.is_valid("2024.01.15"));
    }

    #[test]
    fn from_config_builds_nested_composite() {
        let scheme = load(json!({
            "type": "composite",
            "name": "mixed",
            "schemes": [
                { "type": "calver", "format": "YYYY.MM" },
                { "type": "semantic" }
            ],
            "fallback_scheme": { "type": "solover" }
        }))
        .unwrap();

        assert!(scheme.is_valid("2024.05"));
        assert!(scheme.is_valid("1.2.3"));
        assert!(scheme.is_valid("7+hotfix"));
    }

    #[rstest]
    #[case(json!({ "type": "mystery", "name": "x" }), "Unknown scheme type: mystery")]
    #[case(json!({ "type": "declarative", "components": [{ "name": "n", "type": "integer" }] }), "declarative scheme name required")]
    #[case(json!({ "type": "pattern", "name": "p", "components": [{ "name": "n", "type": "integer" }] }), "Pattern scheme 'p' has no pattern")]
    fn from_config_rejects_invalid_records(
        #[case] value: serde_json::Value,
        #[case] message: &str,
    ) {
        assert_eq!(
            load(value).unwrap_err(),
            VersionError::InvalidScheme(message.to_string())
        );
    }

    #[test]
    fn from_config_rejects_unknown_component_type() {
        let result = load(json!({
            "type": "declarative",
            "name": "bad",
            "components": [{ "name": "n", "type": "roman" }]
        }));
        assert_eq!(
            result.unwrap_err(),
            VersionError::InvalidScheme("Unknown component type: roman".into())
        );
    }

    #[test]
    fn from_json_str_maps_syntax_errors() {
        let result = loader().from_json_str("{ not json");
        assert!(matches!(result, Err(VersionError::InvalidScheme(m)) if m.starts_with("Invalid JSON")));
    }

    #[test]
    fn schemes_from_json_file_reads_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!([
                { "type": "calver", "name": "monthly", "format": "YYYY.MM" },
                { "type": "wendtver" }
            ])
        )
        .unwrap();

        let schemes = loader().schemes_from_json_file(file.path()).unwrap();
        let names: Vec<_> = schemes.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["monthly", "wendtver"]);
    }

    #[test]
    fn from_json_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = loader().from_json_file(dir.path().join("absent.json"));
        assert!(matches!(result, Err(VersionError::InvalidScheme(m)) if m.starts_with("Cannot read")));
    }
}
