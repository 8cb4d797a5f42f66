//! Regex-backed scheme

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::component::{ComponentDefinition, ComponentTypeRegistry, OrderKey, Segment};
use crate::version::error::VersionError;
use crate::version::scheme::{ParsedVersion, VersionScheme, assemble, compare_zero_padded};

/// Compiled program size cap for user patterns
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Repetition markers (`{`) allowed in one pattern
const MAX_REPETITIONS: usize = 5;

static NESTED_STAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\([^(]*\*\)[^)]*\*\)").expect("valid nested star screen")
});

static NESTED_PLUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\([^(]*\+\)[^)]*\+\)").expect("valid nested plus screen")
});

/// Scheme defined by one regex whose capture groups line up with its segments
///
/// Patterns are screened for nested unbounded quantifiers before compiling.
/// The screen is a heuristic; the automaton-based regex engine and the
/// compiled size limit are what bound matching cost.
#[derive(Debug, Clone)]
pub struct PatternScheme {
    name: String,
    description: Option<String>,
    pattern: String,
    regex: Regex,
    segments: Vec<Segment>,
    format_template: Option<String>,
}

impl PatternScheme {
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        definitions: Vec<ComponentDefinition>,
        types: &ComponentTypeRegistry,
    ) -> Result<Self, VersionError> {
        if definitions.is_empty() {
            return Err(VersionError::InvalidScheme(
                "No component definitions provided".into(),
            ));
        }
        let segments = definitions
            .into_iter()
            .map(|definition| Segment::resolve(definition, types))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_segments(name, pattern, segments)
    }

    /// Build from already-resolved segments
    pub fn from_segments(
        name: impl Into<String>,
        pattern: &str,
        segments: Vec<Segment>,
    ) -> Result<Self, VersionError> {
        if segments.is_empty() {
            return Err(VersionError::InvalidScheme(
                "No component definitions provided".into(),
            ));
        }

        let regex = compile(pattern)?;
        let groups = regex.captures_len() - 1;
        if groups < segments.len() {
            return Err(VersionError::InvalidScheme(format!(
                "Pattern {} has {} capture groups for {} components",
                pattern,
                groups,
                segments.len()
            )));
        }

        Ok(Self {
            name: name.into(),
            description: None,
            pattern: pattern.to_string(),
            regex,
            segments,
            format_template: None,
        })
    }

    pub fn with_format_template(mut self, template: impl Into<String>) -> Self {
        self.format_template = Some(template.into()).filter(|t: &String| !t.is_empty());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn compile(pattern: &str) -> Result<Regex, VersionError> {
    if pattern.contains(r"\d+*") || NESTED_STAR.is_match(pattern) || NESTED_PLUS.is_match(pattern)
    {
        return Err(VersionError::InvalidScheme(format!(
            "Pattern {pattern} may cause catastrophic backtracking"
        )));
    }
    if pattern.matches('{').count() > MAX_REPETITIONS {
        return Err(VersionError::InvalidScheme(format!(
            "Pattern {pattern} has too many nested quantifiers"
        )));
    }

    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| VersionError::InvalidScheme(format!("Invalid pattern {pattern}: {e}")))
}

impl VersionScheme for PatternScheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn format_template(&self) -> Option<&str> {
        self.format_template.as_deref()
    }

    fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn parse(&self, text: &str) -> Result<ParsedVersion, VersionError> {
        if text.trim().is_empty() {
            return Err(VersionError::InvalidVersion(
                "Version string cannot be empty".into(),
            ));
        }

        let captures = self.regex.captures(text).ok_or_else(|| {
            VersionError::Parse(format!(
                "Version '{}' does not match pattern {}",
                text, self.pattern
            ))
        })?;

        let values = self
            .segments
            .iter()
            .enumerate()
            .map(|(index, segment)| match captures.get(index + 1) {
                Some(raw) => segment.parse(raw.as_str()).map(Some),
                None if segment.definition().optional => Ok(None),
                None => Err(VersionError::Parse(format!(
                    "Required component '{}' is missing",
                    segment.name()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Parsed '{}' with pattern scheme '{}'", text, self.name);
        Ok(assemble(text, &self.segments, values))
    }

    fn compare_keys(&self, a: &[OrderKey], b: &[OrderKey]) -> Ordering {
        compare_zero_padded(a, b)
    }
}
