//! Scheme that delegates to the first sub-scheme accepting the input

use indexmap::IndexMap;
use tracing::debug;

use crate::component::{ComponentValue, OrderKey, Segment};
use crate::version::error::VersionError;
use crate::version::identifier::VersionIdentifier;
use crate::version::scheme::{ParsedVersion, Scheme, VersionScheme};

/// Key positions kept from a sub-scheme after the rank
const NORMALIZED_WIDTH: usize = 5;

/// Ordered candidates plus an optional fallback
///
/// Sub-scheme keys are normalized to `[rank, k1..k5]`: the rank is -1 for a
/// version carrying a `compare_as = lowest` component, +1 for `highest` and
/// 0 otherwise. Sub-keys are flattened (a SemVer key becomes its numeric
/// fields and prerelease), then zero-filled or truncated to five positions.
#[derive(Debug, Clone)]
pub struct CompositeScheme {
    name: String,
    description: Option<String>,
    schemes: Vec<Scheme>,
    fallback: Option<Scheme>,
}

impl CompositeScheme {
    pub fn new(name: impl Into<String>, schemes: Vec<Scheme>, fallback: Option<Scheme>) -> Self {
        Self {
            name: name.into(),
            description: None,
            schemes,
            fallback,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn fallback(&self) -> Option<&Scheme> {
        self.fallback.as_ref()
    }

    fn normalize(parsed: ParsedVersion) -> ParsedVersion {
        let rank = parsed
            .components
            .iter()
            .find_map(|c| c.definition().compare_as)
            .map_or(0, |compare_as| compare_as.rank());

        let mut key = Vec::with_capacity(NORMALIZED_WIDTH + 1);
        key.push(OrderKey::Int(rank));
        key.extend(
            parsed
                .key
                .iter()
                .flat_map(OrderKey::flatten)
                .chain(std::iter::repeat(OrderKey::Int(0)))
                .take(NORMALIZED_WIDTH),
        );

        ParsedVersion { key, ..parsed }
    }
}

impl VersionScheme for CompositeScheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Composite versions carry the segments of whichever sub-scheme parsed them
    fn segments(&self) -> &[Segment] {
        &[]
    }

    fn parse(&self, text: &str) -> Result<ParsedVersion, VersionError> {
        let mut chosen = None;
        for scheme in &self.schemes {
            // Definition errors propagate; only rejections move on
            if scheme.supports(text)? {
                chosen = Some(scheme);
                break;
            }
        }

        let parsed = match (chosen, &self.fallback) {
            (Some(scheme), _) => {
                debug!("'{}' parsed by '{}' in '{}'", text, scheme.name(), self.name);
                scheme.inner().parse(text)?
            }
            (None, Some(fallback)) => {
                debug!("'{}' falls back to '{}' in '{}'", text, fallback.name(), self.name);
                fallback.inner().parse(text)?
            }
            (None, None) => {
                return Err(VersionError::Parse(format!(
                    "No scheme in '{}' accepts '{}'",
                    self.name, text
                )));
            }
        };

        Ok(Self::normalize(parsed))
    }

    fn render(&self, version: &VersionIdentifier) -> String {
        version.raw().to_string()
    }

    /// First sub-scheme (fallback last) that can build from `values`
    fn build(
        &self,
        values: &IndexMap<String, ComponentValue>,
    ) -> Result<ParsedVersion, VersionError> {
        let mut last_error = None;
        for scheme in self.schemes.iter().chain(self.fallback.as_ref()) {
            match scheme.inner().build(values) {
                Ok(parsed) => return Ok(Self::normalize(parsed)),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| {
            VersionError::InvalidScheme(format!("Composite '{}' has no schemes", self.name))
        }))
    }
}
