use crate::component::component_type::{ComponentType, token_or_default};
use crate::component::definition::ComponentDefinition;
use crate::component::value::{ComponentValue, OrderKey};
use crate::version::error::VersionError;

/// Inclusive bounds per date subtype
const RANGES: &[(&str, i64, i64)] = &[
    ("year", 1, 9999),
    ("month", 1, 12),
    ("day", 1, 31),
    ("week", 1, 53),
    ("hour", 0, 23),
    ("minute", 0, 59),
    ("second", 0, 59),
];

/// Calendar field, range-checked by the definition's subtype
#[derive(Debug, Clone, Copy, Default)]
pub struct DatePartType;

impl ComponentType for DatePartType {
    fn name(&self) -> &'static str {
        "date_part"
    }

    fn parse(
        &self,
        raw: &str,
        definition: &ComponentDefinition,
    ) -> Result<ComponentValue, VersionError> {
        let Some(token) = token_or_default(raw, definition) else {
            return Ok(ComponentValue::Integer(0));
        };

        let value = token.parse::<i64>().map_err(|_| {
            VersionError::Parse(format!(
                "Invalid date part '{}' for {}",
                token, definition.name
            ))
        })?;

        let subtype = definition.subtype.as_deref().unwrap_or_default();
        let bounds = RANGES.iter().find(|(name, _, _)| *name == subtype);
        match bounds {
            Some((_, min, max)) if !(*min..=*max).contains(&value) => {
                return Err(VersionError::Parse(format!(
                    "Invalid {} '{}'. Must be between {} and {}",
                    subtype, value, min, max
                )));
            }
            _ => {}
        }

        Ok(ComponentValue::Integer(value))
    }

    fn to_comparable(&self, value: &ComponentValue, _definition: &ComponentDefinition) -> OrderKey {
        OrderKey::from(value)
    }

    fn format(&self, value: &ComponentValue) -> String {
        match value {
            ComponentValue::Integer(n) => format!("{n:02}"),
            other => other.to_string(),
        }
    }
}
