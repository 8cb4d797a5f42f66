use crate::component::component_type::{ComponentType, token_or_default};
use crate::component::definition::ComponentDefinition;
use crate::component::value::{ComponentValue, OrderKey};
use crate::version::error::VersionError;

/// Commit hash or similar opaque identifier
///
/// Stored lowercase. Shorter hashes sort first, then lexicographically.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashType;

impl ComponentType for HashType {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn parse(
        &self,
        raw: &str,
        definition: &ComponentDefinition,
    ) -> Result<ComponentValue, VersionError> {
        Ok(token_or_default(raw, definition)
            .map(|token| ComponentValue::String(token.to_lowercase()))
            .unwrap_or(ComponentValue::Nil))
    }

    fn to_comparable(&self, value: &ComponentValue, _definition: &ComponentDefinition) -> OrderKey {
        let text = value.to_string();
        OrderKey::Tuple(vec![
            OrderKey::Int(text.len() as i64),
            OrderKey::Text(text),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> ComponentDefinition {
        ComponentDefinition::new("commit", "hash")
    }

    #[test]
    fn parse_lowercases() {
        assert_eq!(
            HashType.parse("A1B2C3", &definition()),
            Ok(ComponentValue::String("a1b2c3".into()))
        );
    }

    #[test]
    fn parse_empty_token_is_nil() {
        assert_eq!(HashType.parse("", &definition()), Ok(ComponentValue::Nil));
    }

    #[test]
    fn shorter_hash_sorts_first() {
        let short = HashType.to_comparable(&ComponentValue::String("fff".into()), &definition());
        let long = HashType.to_comparable(&ComponentValue::String("aaaa".into()), &definition());
        assert!(short < long);
    }

    #[test]
    fn equal_length_hashes_sort_lexicographically() {
        let a = HashType.to_comparable(&ComponentValue::String("abc1".into()), &definition());
        let b = HashType.to_comparable(&ComponentValue::String("abd0".into()), &definition());
        assert!(a < b);
    }
}
