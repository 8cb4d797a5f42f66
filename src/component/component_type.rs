//! Component type abstraction

use std::fmt;

use crate::component::definition::ComponentDefinition;
use crate::component::value::{ComponentValue, OrderKey};
use crate::version::error::VersionError;

/// Trait for the pluggable types that turn raw tokens into typed values
///
/// Each type has different rules:
/// - integer: signed decimal, compared numerically
/// - enum: closed set of symbols, compared by declared order
/// - prerelease: dot-separated identifiers, compared by SemVer precedence
pub trait ComponentType: fmt::Debug + Send + Sync {
    /// Name the type is registered under
    fn name(&self) -> &'static str;

    /// Parse a raw token
    ///
    /// An empty token yields the definition's default, or the type's zero
    /// value when no default is declared.
    fn parse(
        &self,
        raw: &str,
        definition: &ComponentDefinition,
    ) -> Result<ComponentValue, VersionError>;

    /// Map a value (or `Nil` for an absent segment) to its order key
    fn to_comparable(&self, value: &ComponentValue, definition: &ComponentDefinition) -> OrderKey;

    /// Inverse of `parse` for well-formed values
    fn format(&self, value: &ComponentValue) -> String {
        value.to_string()
    }
}

/// The token to parse: the raw text, or the declared default when it is empty
pub(crate) fn token_or_default<'a>(
    raw: &'a str,
    definition: &'a ComponentDefinition,
) -> Option<&'a str> {
    if raw.is_empty() {
        definition.default_token()
    } else {
        Some(raw)
    }
}
