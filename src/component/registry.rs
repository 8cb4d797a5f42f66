//! Name to component type lookup

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::component::component_type::ComponentType;
use crate::component::component_types::{
    DatePartType, EnumType, FloatType, HashType, IntegerType, PostfixType, PrereleaseType,
    StringType,
};
use crate::version::error::VersionError;

/// Registry of component types, keyed by the name definitions refer to
///
/// Shared between schemes behind an `Arc`; registration after construction
/// is allowed and visible to schemes built afterwards.
#[derive(Debug)]
pub struct ComponentTypeRegistry {
    types: RwLock<HashMap<String, Arc<dyn ComponentType>>>,
}

impl ComponentTypeRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// A registry holding every built-in type
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        let builtins: [Arc<dyn ComponentType>; 8] = [
            Arc::new(IntegerType),
            Arc::new(FloatType),
            Arc::new(StringType),
            Arc::new(EnumType),
            Arc::new(DatePartType),
            Arc::new(PrereleaseType),
            Arc::new(PostfixType),
            Arc::new(HashType),
        ];
        for component_type in builtins {
            registry.register(component_type);
        }
        registry
    }

    /// Add a type under its own name, replacing any previous one
    pub fn register(&self, component_type: Arc<dyn ComponentType>) {
        let name = component_type.name().to_string();
        debug!("Registering component type '{}'", name);
        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, component_type);
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ComponentType>, VersionError> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| VersionError::InvalidScheme(format!("Unknown component type: {name}")))
    }

    /// Registered type names, sorted
    pub fn registered(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for ComponentTypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::definition::ComponentDefinition;
    use crate::component::value::{ComponentValue, OrderKey};

    #[derive(Debug)]
    struct RomanType;

    impl ComponentType for RomanType {
        fn name(&self) -> &'static str {
            "roman"
        }

        fn parse(
            &self,
            raw: &str,
            _definition: &ComponentDefinition,
        ) -> Result<ComponentValue, VersionError> {
            match raw {
                "I" => Ok(ComponentValue::Integer(1)),
                "II" => Ok(ComponentValue::Integer(2)),
                "III" => Ok(ComponentValue::Integer(3)),
                other => Err(VersionError::Parse(format!("not a numeral: {other}"))),
            }
        }

        fn to_comparable(
            &self,
            value: &ComponentValue,
            _definition: &ComponentDefinition,
        ) -> OrderKey {
            OrderKey::from(value)
        }
    }

    #[test]
    fn builtins_are_registered() {
        let registry = ComponentTypeRegistry::with_builtins();
        assert_eq!(
            registry.registered(),
            vec![
                "date_part",
                "enum",
                "float",
                "hash",
                "integer",
                "postfix",
                "prerelease",
                "string"
            ]
        );
    }

    #[test]
    fn resolve_unknown_type_fails() {
        let registry = ComponentTypeRegistry::new();
        assert_eq!(
            registry.resolve("integer").unwrap_err(),
            VersionError::InvalidScheme("Unknown component type: integer".into())
        );
    }

    #[test]
    fn custom_type_can_be_registered() {
        let registry = ComponentTypeRegistry::with_builtins();
        registry.register(Arc::new(RomanType));

        let roman = registry.resolve("roman").unwrap();
        let definition = ComponentDefinition::new("release", "roman");
        assert_eq!(
            roman.parse("II", &definition),
            Ok(ComponentValue::Integer(2))
        );
    }
}
