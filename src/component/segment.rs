//! A definition bound to its resolved component type

use std::sync::Arc;

use crate::component::component_type::ComponentType;
use crate::component::definition::ComponentDefinition;
use crate::component::registry::ComponentTypeRegistry;
use crate::component::value::{ComponentValue, OrderKey};
use crate::version::error::VersionError;
use crate::version::identifier::VersionComponent;

#[derive(Debug, Clone)]
pub struct Segment {
    definition: Arc<ComponentDefinition>,
    component_type: Arc<dyn ComponentType>,
}

impl Segment {
    pub fn new(definition: ComponentDefinition, component_type: Arc<dyn ComponentType>) -> Self {
        Self {
            definition: Arc::new(definition),
            component_type,
        }
    }

    /// Validate a definition and look up its type
    pub fn resolve(
        definition: ComponentDefinition,
        types: &ComponentTypeRegistry,
    ) -> Result<Self, VersionError> {
        definition.validate()?;
        let component_type = types.resolve(&definition.kind)?;
        Ok(Self::new(definition, component_type))
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &ComponentDefinition {
        &self.definition
    }

    pub fn component_type(&self) -> &Arc<dyn ComponentType> {
        &self.component_type
    }

    pub fn parse(&self, raw: &str) -> Result<ComponentValue, VersionError> {
        self.component_type.parse(raw, &self.definition)
    }

    pub fn to_comparable(&self, value: &ComponentValue) -> OrderKey {
        self.component_type.to_comparable(value, &self.definition)
    }

    pub fn format(&self, value: &ComponentValue) -> String {
        self.component_type.format(value)
    }

    /// Wrap a parsed value as a component of a version
    pub fn component(&self, value: ComponentValue) -> VersionComponent {
        VersionComponent::new(
            value,
            Arc::clone(&self.definition),
            Arc::clone(&self.component_type),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_binds_registered_type() {
        let types = ComponentTypeRegistry::with_builtins();
        let segment =
            Segment::resolve(ComponentDefinition::new("month", "date_part").with_subtype("month"), &types)
                .unwrap();

        assert_eq!(segment.name(), "month");
        assert_eq!(segment.component_type().name(), "date_part");
        let value = segment.parse("3").unwrap();
        assert_eq!(segment.format(&value), "03");
    }

    #[test]
    fn resolve_rejects_unknown_type() {
        let types = ComponentTypeRegistry::with_builtins();
        let result = Segment::resolve(ComponentDefinition::new("x", "roman"), &types);
        assert_eq!(
            result.unwrap_err(),
            VersionError::InvalidScheme("Unknown component type: roman".into())
        );
    }

    #[test]
    fn resolve_rejects_invalid_definition() {
        let types = ComponentTypeRegistry::with_builtins();
        let result = Segment::resolve(ComponentDefinition::new("", "integer"), &types);
        assert!(matches!(result, Err(VersionError::InvalidScheme(_))));
    }
}
