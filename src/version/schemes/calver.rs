//! Calendar versioning over date parts

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::warn;

use crate::component::component_types::DatePartType;
use crate::component::{ComponentDefinition, OrderKey, Segment};
use crate::version::error::VersionError;
use crate::version::scheme::{ParsedVersion, VersionScheme};
use crate::version::schemes::pattern::PatternScheme;

pub const DEFAULT_FORMAT: &str = "YYYY.MM.DD";

/// Supported format → (pattern, template)
const FORMATS: &[(&str, &str, &str)] = &[
    ("YYYY.MM.DD", r"^(\d{4})\.(\d{2})\.(\d{2})$", "{year}.{month}.{day}"),
    ("YYYY.MM", r"^(\d{4})\.(\d{2})$", "{year}.{month}"),
    ("YYYY.WW", r"^(\d{4})\.(\d{2})$", "{year}.{week}"),
    ("YY.MM.DD", r"^(\d{2})\.(\d{2})\.(\d{2})$", "{year}.{month}.{day}"),
    ("YY.MM", r"^(\d{2})\.(\d{2})$", "{year}.{month}"),
    ("YY.WW", r"^(\d{2})\.(\d{2})$", "{year}.{week}"),
];

/// Date-based scheme such as `2024.01.15` (`YYYY.MM.DD`)
///
/// `0M` and `0W` in a format are read as `MM` and `WW`. Unknown formats fall
/// back to `YYYY.MM.DD`.
#[derive(Debug, Clone)]
pub struct CalVerScheme {
    format: String,
    inner: PatternScheme,
}

impl CalVerScheme {
    pub fn new(requested: &str) -> Result<Self, VersionError> {
        let normalized = requested.replace("0M", "MM").replace("0W", "WW");
        let (format, pattern, template) = match FORMATS.iter().find(|(f, _, _)| *f == normalized) {
            Some(entry) => *entry,
            None => {
                warn!(
                    "Unknown CalVer format '{}', falling back to {}",
                    requested, DEFAULT_FORMAT
                );
                FORMATS[0]
            }
        };

        let inner = PatternScheme::from_segments("calver", pattern, date_segments(format))?
            .with_format_template(template)
            .with_description(format!("Calendar versioning ({format})"));

        Ok(Self {
            format: format.to_string(),
            inner,
        })
    }

    /// Rename the scheme, e.g. when several formats are registered side by side
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.with_name(name);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.inner = self.inner.with_description(description);
        self
    }

    pub fn format(&self) -> &str {
        &self.format
    }
}

fn date_segments(format: &str) -> Vec<Segment> {
    let part = |name: &str| {
        Segment::new(
            ComponentDefinition::new(name, "date_part").with_subtype(name),
            Arc::new(DatePartType),
        )
    };

    let mut segments = vec![part("year")];
    if format.contains("MM") {
        segments.push(part("month"));
    }
    if format.contains("DD") {
        segments.push(part("day"));
    }
    if format.contains("WW") {
        segments.push(part("week"));
    }
    segments
}

impl VersionScheme for CalVerScheme {
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
        self.inner.parse(text)
    }

    fn compare_keys(&self, a: &[OrderKey], b: &[OrderKey]) -> Ordering {
        self.inner.compare_keys(a, b)
    }
}
