use crate::component::component_type::{ComponentType, token_or_default};
use crate::component::definition::ComponentDefinition;
use crate::component::value::{ComponentValue, OrderKey};
use crate::version::error::VersionError;

#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerType;

impl ComponentType for IntegerType {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn parse(
        &self,
        raw: &str,
        definition: &ComponentDefinition,
    ) -> Result<ComponentValue, VersionError> {
        let Some(token) = token_or_default(raw, definition) else {
            return Ok(ComponentValue::Integer(0));
        };
        parse_integer(token, definition).map(ComponentValue::Integer)
    }

    fn to_comparable(&self, value: &ComponentValue, _definition: &ComponentDefinition) -> OrderKey {
        OrderKey::from(value)
    }
}

/// Signed decimal integer; anything else is a parse error
fn parse_integer(token: &str, definition: &ComponentDefinition) -> Result<i64, VersionError> {
    token.parse::<i64>().map_err(|e| {
        VersionError::Parse(format!(
            "Invalid integer '{}' for {}: {}",
            token, definition.name, e
        ))
    })
}
