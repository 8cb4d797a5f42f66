use crate::component::component_type::{ComponentType, token_or_default};
use crate::component::definition::ComponentDefinition;
use crate::component::value::{ComponentValue, OrderKey};
use crate::version::error::VersionError;

#[derive(Debug, Clone, Copy, Default)]
pub struct StringType;

impl ComponentType for StringType {
    fn name(&self) -> &'static str {
        "string"
    }

    fn parse(
        &self,
        raw: &str,
        definition: &ComponentDefinition,
    ) -> Result<ComponentValue, VersionError> {
        Ok(ComponentValue::String(
            token_or_default(raw, definition).unwrap_or_default().to_string(),
        ))
    }

    fn to_comparable(&self, value: &ComponentValue, _definition: &ComponentDefinition) -> OrderKey {
        match value {
            ComponentValue::Nil => OrderKey::Text(String::new()),
            other => OrderKey::from(other),
        }
    }
}
