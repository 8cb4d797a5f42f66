//! SoloVer: a single number with an optional `+`/`-` postfix

use std::sync::Arc;

use crate::component::component_types::{IntegerType, PostfixType};
use crate::component::{ComponentDefinition, Segment};
use crate::version::error::VersionError;
use crate::version::scheme::{ParsedVersion, VersionScheme};
use crate::version::schemes::pattern::PatternScheme;

const PATTERN: &str = r"^(\d+)([+-][A-Za-z0-9]+)?$";

/// `N`, `N+hotfix` or `N-beta`
///
/// Orders by number, then postfix: none < `+` < `-`, then identifier.
#[derive(Debug, Clone)]
pub struct SoloVerScheme {
    inner: PatternScheme,
}

impl SoloVerScheme {
    pub fn new() -> Self {
        let segments = vec![
            Segment::new(
                ComponentDefinition::new("number", "integer"),
                Arc::new(IntegerType),
            ),
            Segment::new(
                ComponentDefinition::new("postfix", "postfix")
                    .optional()
                    .with_prefix("+")
                    .including_prefix_in_value(),
                Arc::new(PostfixType),
            ),
        ];
        let inner = PatternScheme::from_segments("solover", PATTERN, segments)
            .expect("built-in SoloVer pattern is valid")
            .with_format_template("{number}[{postfix}]")
            .with_description("SoloVer single number with optional postfix");
        Self { inner }
    }
}

impl Default for SoloVerScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionScheme for SoloVerScheme {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> Option<&str> {
        self.inner.description()
    }

    fn format_template(&self) -> Option<&str> {
        self.inner.format_template()
    }

    fn segments(&self) -> &[Segment] {
        self.inner.segments()
    }

    fn parse(&self, text: &str) -> Result<ParsedVersion, VersionError> {
        self.inner.parse(text).map_err(|e| match e {
            VersionError::Parse(_) => {
                VersionError::Parse(format!("Invalid SoloVer format '{text}'"))
            }
            other => other,
        })
    }
}
