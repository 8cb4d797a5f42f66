use crate::component::component_type::{ComponentType, token_or_default};
use crate::component::definition::ComponentDefinition;
use crate::component::value::{ComponentValue, OrderKey, postfix_ordinal};
use crate::version::error::VersionError;

/// `+identifier` or `-identifier` tail of a SoloVer-style version
///
/// Versions order as: no postfix, then `+` postfixes, then `-` postfixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostfixType;

impl ComponentType for PostfixType {
    fn name(&self) -> &'static str {
        "postfix"
    }

    fn parse(
        &self,
        raw: &str,
        definition: &ComponentDefinition,
    ) -> Result<ComponentValue, VersionError> {
        let Some(token) = token_or_default(raw, definition) else {
            return Ok(ComponentValue::Nil);
        };

        let mut chars = token.chars();
        let prefix = match chars.next() {
            Some(c @ ('+' | '-')) => c,
            _ => {
                return Err(VersionError::Parse(format!(
                    "Invalid postfix '{}' for {}: must start with '+' or '-'",
                    token, definition.name
                )));
            }
        };
        let identifier = chars.as_str();
        if identifier.is_empty() {
            return Err(VersionError::Parse(format!(
                "Invalid postfix '{}' for {}: identifier required",
                token, definition.name
            )));
        }

        Ok(ComponentValue::Postfix {
            prefix,
            identifier: identifier.to_string(),
        })
    }

    fn to_comparable(&self, value: &ComponentValue, _definition: &ComponentDefinition) -> OrderKey {
        match value {
            ComponentValue::Nil => OrderKey::Tuple(vec![
                OrderKey::Int(postfix_ordinal(None)),
                OrderKey::Text(String::new()),
            ]),
            other => OrderKey::from(other),
        }
    }
}
