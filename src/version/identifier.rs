//! Parsed versions and their components

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::component::{ComponentDefinition, ComponentType, ComponentValue, OrderKey};
use crate::version::error::VersionError;
use crate::version::range::VersionRange;
use crate::version::scheme::Scheme;

/// One resolved segment of a parsed version
#[derive(Debug, Clone)]
pub struct VersionComponent {
    value: ComponentValue,
    definition: Arc<ComponentDefinition>,
    component_type: Arc<dyn ComponentType>,
}

impl VersionComponent {
    pub fn new(
        value: ComponentValue,
        definition: Arc<ComponentDefinition>,
        component_type: Arc<dyn ComponentType>,
    ) -> Self {
        Self {
            value,
            definition,
            component_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Name of the component type that produced the value
    pub fn kind(&self) -> &'static str {
        self.component_type.name()
    }

    pub fn value(&self) -> &ComponentValue {
        &self.value
    }

    pub fn weight(&self) -> u32 {
        self.definition.weight
    }

    pub fn definition(&self) -> &ComponentDefinition {
        &self.definition
    }

    pub fn to_comparable(&self) -> OrderKey {
        self.component_type
            .to_comparable(&self.value, &self.definition)
    }
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.component_type.format(&self.value))
    }
}

/// Immutable result of a successful parse or build
#[derive(Clone)]
pub struct VersionIdentifier {
    raw: String,
    scheme: Scheme,
    components: Vec<VersionComponent>,
    key: Vec<OrderKey>,
}

impl VersionIdentifier {
    pub(crate) fn new(
        raw: String,
        scheme: Scheme,
        components: Vec<VersionComponent>,
        key: Vec<OrderKey>,
    ) -> Self {
        Self {
            raw,
            scheme,
            components,
            key,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn components(&self) -> &[VersionComponent] {
        &self.components
    }

    /// Comparable key in the scheme's own ordering space
    pub fn key(&self) -> &[OrderKey] {
        &self.key
    }

    pub fn component(&self, name: &str) -> Option<&VersionComponent> {
        self.components.iter().find(|c| c.name() == name)
    }

    /// Order two versions of the same scheme
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, VersionError> {
        if self.scheme.name() != other.scheme.name() {
            return Err(VersionError::SchemeMismatch {
                left: self.scheme.name().to_string(),
                right: other.scheme.name().to_string(),
            });
        }
        Ok(self.scheme.inner().compare_keys(&self.key, &other.key))
    }

    pub fn matches_range(&self, range: &VersionRange) -> Result<bool, VersionError> {
        self.scheme.matches_range(&self.raw, range)
    }
}

impl PartialEq for VersionIdentifier {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.try_cmp(other), Ok(Ordering::Equal))
    }
}

impl PartialOrd for VersionIdentifier {
    /// `None` when the versions belong to different schemes
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scheme.render(self))
    }
}

impl fmt::Debug for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionIdentifier")
            .field("raw", &self.raw)
            .field("scheme", &self.scheme.name())
            .field("key", &self.key)
            .finish()
    }
}
