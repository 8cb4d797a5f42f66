//! Name to scheme directory with auto-detection

use std::sync::{PoisonError, RwLock};

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::version::error::VersionError;
use crate::version::scheme::Scheme;
use crate::version::schemes::{CalVerScheme, SemanticScheme, SoloVerScheme, WendtVerScheme};

/// Registry of schemes in registration order
///
/// Detection walks the schemes in that order and returns the first whose
/// grammar accepts the input.
#[derive(Debug, Default)]
pub struct SchemeRegistry {
    schemes: RwLock<IndexMap<String, Scheme>>,
}

impl SchemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding semantic, calver, solover and wendtver, in that order
    pub fn with_builtins() -> Result<Self, VersionError> {
        let registry = Self::new();
        registry.register("semantic", Scheme::new(SemanticScheme::new()));
        registry.register("calver", Scheme::new(CalVerScheme::new("YYYY.MM.DD")?));
        registry.register("solover", Scheme::new(SoloVerScheme::new()));
        registry.register("wendtver", Scheme::new(WendtVerScheme::new()));
        info!("Registered {} built-in schemes", registry.len());
        Ok(registry)
    }

    /// Add a scheme under `name`, replacing any scheme already registered there
    pub fn register(&self, name: impl Into<String>, scheme: Scheme) {
        let name = name.into();
        let mut schemes = self.schemes.write().unwrap_or_else(PoisonError::into_inner);
        if schemes.contains_key(&name) {
            warn!("Replacing registered scheme '{}'", name);
        } else {
            debug!("Registering scheme '{}'", name);
        }
        schemes.insert(name, scheme);
    }

    pub fn get(&self, name: &str) -> Result<Scheme, VersionError> {
        self.schemes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| VersionError::InvalidScheme(format!("Unknown scheme: {name}")))
    }

    /// Registered names in registration order
    pub fn registered(&self) -> Vec<String> {
        self.schemes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.schemes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First registered scheme that accepts `text`
    pub fn detect_from(&self, text: &str) -> Option<Scheme> {
        self.detect_with_priority(text, &[])
    }

    /// Like [`SchemeRegistry::detect_from`], but tries `priority` names first
    ///
    /// Unknown names in `priority` are skipped.
    pub fn detect_with_priority(&self, text: &str, priority: &[&str]) -> Option<Scheme> {
        let candidates: Vec<Scheme> = {
            let schemes = self.schemes.read().unwrap_or_else(PoisonError::into_inner);
            priority
                .iter()
                .filter_map(|name| schemes.get(*name))
                .chain(
                    schemes
                        .iter()
                        .filter(|(name, _)| !priority.contains(&name.as_str()))
                        .map(|(_, scheme)| scheme),
                )
                .cloned()
                .collect()
        };

        let detected = candidates.into_iter().find(|scheme| scheme.is_valid(text));
        match &detected {
            Some(scheme) => debug!("Detected scheme '{}' for '{}'", scheme.name(), text),
            None => debug!("No registered scheme accepts '{}'", text),
        }
        detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn builtins() -> SchemeRegistry {
        SchemeRegistry::with_builtins().unwrap()
    }

    #[test]
    fn builtins_register_in_order() {
        assert_eq!(
            builtins().registered(),
            vec!["semantic", "calver", "solover", "wendtver"]
        );
    }

    #[rstest]
    #[case("1.2.3", Some("semantic"))]
    #[case("1.2.3-rc.1+build.5", Some("semantic"))]
    #[case("2024.01.15", Some("calver"))]
    #[case("42", Some("solover"))]
    #[case("42+hotfix", Some("solover"))]
    #[case("1.2.3.4", Some("wendtver"))]
    #[case("not a version", None)]
    #[case("", None)]
    fn detect_from_returns_expected(#[case] text: &str, #[case] expected: Option<&str>) {
        let detected = builtins().detect_from(text);
        assert_eq!(detected.as_ref().map(Scheme::name), expected);
    }

    #[test]
    fn priority_overrides_registration_order() {
        let registry = builtins();
        registry.register(
            "yymm",
            Scheme::new(CalVerScheme::new("YY.MM").unwrap().with_name("yymm")),
        );

        let detected = registry.detect_from("12.10");
        assert_eq!(detected.as_ref().map(Scheme::name), Some("semantic"));

        let detected = registry.detect_with_priority("12.10", &["yymm"]);
        assert_eq!(detected.as_ref().map(Scheme::name), Some("yymm"));
    }

    #[test]
    fn priority_skips_unknown_names() {
        let detected = builtins().detect_with_priority("7", &["missing"]);
        assert_eq!(detected.as_ref().map(Scheme::name), Some("solover"));
    }

    #[test]
    fn get_unknown_scheme_fails() {
        assert_eq!(
            builtins().get("romver").unwrap_err(),
            VersionError::InvalidScheme("Unknown scheme: romver".into())
        );
    }

    #[test]
    fn register_replaces_existing_entry() {
        let registry = SchemeRegistry::new();
        assert!(registry.is_empty());

        registry.register("numbers", Scheme::new(SoloVerScheme::new()));
        registry.register("numbers", Scheme::new(WendtVerScheme::new()));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("numbers").unwrap().name(), "wendtver");
    }
}
