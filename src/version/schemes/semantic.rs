//! Semantic versioning through the `semver` crate

use std::sync::{Arc, LazyLock};

use regex::Regex;
use semver::Version;
use tracing::debug;

use crate::component::component_types::{IntegerType, PrereleaseType, StringType};
use crate::component::{ComponentDefinition, ComponentValue, OrderKey, Segment};
use crate::version::error::VersionError;
use crate::version::scheme::{ParsedVersion, VersionScheme};

static SEMVER_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,5}\.\d{1,5}(?:\.\d{1,5})?(?:-[\w.]+)?(?:\+[\w.]+)?$")
        .expect("valid semver shape regex")
});

static FIELD_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-.+]").expect("valid field delimiter regex"));

/// Years that make a leading four-digit field read as calendar versioning
const CALENDAR_YEARS: std::ops::RangeInclusive<u32> = 1900..=2100;

/// `MAJOR.MINOR[.PATCH][-PRERELEASE][+BUILD]`
///
/// A two-field core reads as `MAJOR.MINOR.0`. Build metadata is kept as a
/// component but takes no part in ordering.
#[derive(Debug, Clone)]
pub struct SemanticScheme {
    segments: Vec<Segment>,
}

impl SemanticScheme {
    pub fn new() -> Self {
        let integer = |name: &str| {
            Segment::new(ComponentDefinition::new(name, "integer"), Arc::new(IntegerType))
        };
        let segments = vec![
            integer("major"),
            integer("minor"),
            Segment::new(
                ComponentDefinition::new("patch", "integer").optional(),
                Arc::new(IntegerType),
            ),
            Segment::new(
                ComponentDefinition::new("prerelease", "prerelease")
                    .optional()
                    .with_prefix("-"),
                Arc::new(PrereleaseType),
            ),
            Segment::new(
                ComponentDefinition::new("build", "string")
                    .optional()
                    .with_prefix("+")
                    .ignored_in_comparison(),
                Arc::new(StringType),
            ),
        ];
        Self { segments }
    }

    fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.name() == name)
    }
}

impl Default for SemanticScheme {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the leading field looks like a calendar year
fn leads_with_year(text: &str) -> bool {
    let first = FIELD_DELIMITER.split(text).next().unwrap_or_default();
    first.len() == 4
        && first
            .parse::<u32>()
            .is_ok_and(|year| CALENDAR_YEARS.contains(&year))
}

impl VersionScheme for SemanticScheme {
    fn name(&self) -> &str {
        "semantic"
    }

    fn description(&self) -> Option<&str> {
        Some("Semantic versioning (semver.org)")
    }

    fn format_template(&self) -> Option<&str> {
        Some("{major}.{minor}[.{patch}][-{prerelease}][+{build}]")
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
        if !SEMVER_SHAPE.is_match(text) {
            return Err(VersionError::Parse(format!(
                "Invalid semantic version '{text}'"
            )));
        }
        if leads_with_year(text) {
            return Err(VersionError::Parse(format!(
                "'{text}' starts with a calendar year"
            )));
        }

        let (without_build, build) = match text.split_once('+') {
            Some((version, build)) => (version, Some(build)),
            None => (text, None),
        };
        let (core, prerelease) = match without_build.split_once('-') {
            Some((core, prerelease)) => (core, Some(prerelease)),
            None => (without_build, None),
        };
        let has_patch = core.matches('.').count() == 2;

        let padded = match (has_patch, prerelease) {
            (true, _) => without_build.to_string(),
            (false, Some(prerelease)) => format!("{core}.0-{prerelease}"),
            (false, None) => format!("{core}.0"),
        };
        let version = Version::parse(&padded).map_err(|e| {
            VersionError::Parse(format!("Invalid semantic version '{text}': {e}"))
        })?;

        let mut components = Vec::with_capacity(self.segments.len());
        let mut push = |name: &str, value: ComponentValue| {
            if let Some(segment) = self.segment(name) {
                components.push(segment.component(value));
            }
        };
        push("major", ComponentValue::Integer(saturating(version.major)));
        push("minor", ComponentValue::Integer(saturating(version.minor)));
        if has_patch {
            push("patch", ComponentValue::Integer(saturating(version.patch)));
        }
        if let Some(prerelease) = prerelease {
            if let Some(segment) = self.segment("prerelease") {
                push("prerelease", segment.parse(prerelease)?);
            }
        }
        if let Some(build) = build {
            push("build", ComponentValue::String(build.to_string()));
        }

        debug!("Parsed semantic version '{}' as {}", text, version);
        Ok(ParsedVersion {
            raw: text.to_string(),
            components,
            key: vec![OrderKey::Semver(version)],
        })
    }
}

fn saturating(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
