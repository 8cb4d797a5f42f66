use crate::component::component_type::{ComponentType, token_or_default};
use crate::component::definition::ComponentDefinition;
use crate::component::value::{ComponentValue, OrderKey, PrereleaseIdentifier};
use crate::version::error::VersionError;

/// Dot-separated prerelease tag with SemVer precedence
///
/// A version without a prerelease outranks every version with one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrereleaseType;

impl ComponentType for PrereleaseType {
    fn name(&self) -> &'static str {
        "prerelease"
    }

    fn parse(
        &self,
        raw: &str,
        definition: &ComponentDefinition,
    ) -> Result<ComponentValue, VersionError> {
        let Some(token) = token_or_default(raw, definition) else {
            return Ok(ComponentValue::Nil);
        };

        let parts = token
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    Err(VersionError::Parse(format!(
                        "Empty prerelease identifier in '{}'",
                        token
                    )))
                } else {
                    Ok(PrereleaseIdentifier::parse(part))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComponentValue::Prerelease(parts))
    }

    fn to_comparable(&self, value: &ComponentValue, _definition: &ComponentDefinition) -> OrderKey {
        match value {
            ComponentValue::Prerelease(parts) => OrderKey::Prerelease(Some(parts.clone())),
            ComponentValue::Nil => OrderKey::Prerelease(None),
            other => OrderKey::Prerelease(Some(vec![PrereleaseIdentifier::parse(
                &other.to_string(),
            )])),
        }
    }
}
