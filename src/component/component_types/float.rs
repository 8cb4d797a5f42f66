use crate::component::component_type::{ComponentType, token_or_default};
use crate::component::definition::ComponentDefinition;
use crate::component::value::{ComponentValue, OrderKey};
use crate::version::error::VersionError;

#[derive(Debug, Clone, Copy, Default)]
pub struct FloatType;

impl ComponentType for FloatType {
    fn name(&self) -> &'static str {
        "float"
    }

    fn parse(
        &self,
        raw: &str,
        definition: &ComponentDefinition,
    ) -> Result<ComponentValue, VersionError> {
        let Some(token) = token_or_default(raw, definition) else {
            return Ok(ComponentValue::Float(0.0));
        };
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(ComponentValue::Float(value)),
            _ => Err(VersionError::Parse(format!(
                "Invalid float '{}' for {}",
                token, definition.name
            ))),
        }
    }

    fn to_comparable(&self, value: &ComponentValue, _definition: &ComponentDefinition) -> OrderKey {
        match value {
            ComponentValue::Nil => OrderKey::Float(0.0),
            other => OrderKey::from(other),
        }
    }
}
