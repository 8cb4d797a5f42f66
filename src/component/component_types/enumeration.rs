use crate::component::component_type::{ComponentType, token_or_default};
use crate::component::definition::ComponentDefinition;
use crate::component::value::{ComponentValue, OrderKey};
use crate::version::error::VersionError;

/// Closed set of symbols ordered by the definition's `order`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumType;

impl ComponentType for EnumType {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn parse(
        &self,
        raw: &str,
        definition: &ComponentDefinition,
    ) -> Result<ComponentValue, VersionError> {
        let Some(token) = token_or_default(raw, definition) else {
            return Ok(ComponentValue::Nil);
        };

        if !definition.values.is_empty() && !definition.values.iter().any(|v| v == token) {
            return Err(VersionError::Parse(format!(
                "Invalid enum value '{}' for {}. Allowed: {}",
                token,
                definition.name,
                definition.values.join(", ")
            )));
        }

        Ok(ComponentValue::Symbol(token.to_string()))
    }

    fn to_comparable(&self, value: &ComponentValue, definition: &ComponentDefinition) -> OrderKey {
        let order = definition.member_order();
        match value {
            ComponentValue::Nil => OrderKey::Top,
            ComponentValue::Symbol(symbol) | ComponentValue::String(symbol) => {
                // Members missing from the order sort after every ordered member
                let rank = order
                    .iter()
                    .position(|member| member == symbol)
                    .unwrap_or(order.len() + 1);
                OrderKey::Int(rank as i64)
            }
            other => OrderKey::from(other),
        }
    }
}
