//! WendtVer: four fields with ripple carry

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::component::component_types::IntegerType;
use crate::component::{ComponentDefinition, ComponentValue, Segment};
use crate::version::error::VersionError;
use crate::version::scheme::{ParsedVersion, VersionScheme};
use crate::version::schemes::pattern::PatternScheme;

const PATTERN: &str = r"^(\d+)\.(\d+)\.(\d+)\.(\d+)$";

const MAX_MINOR: i64 = 99;
const MAX_PATCH: i64 = 99;
const MAX_BUILD: i64 = 999;

/// Field to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WendtField {
    Major,
    Minor,
    Patch,
    Build,
}

impl FromStr for WendtField {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(WendtField::Major),
            "minor" => Ok(WendtField::Minor),
            "patch" => Ok(WendtField::Patch),
            "build" => Ok(WendtField::Build),
            other => Err(VersionError::InvalidVersion(format!(
                "Unknown WendtVer field: {other}"
            ))),
        }
    }
}

impl fmt::Display for WendtField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WendtField::Major => "major",
            WendtField::Minor => "minor",
            WendtField::Patch => "patch",
            WendtField::Build => "build",
        })
    }
}

/// `major.minor.patch.build` with minor/patch capped at 99 and build at 999
#[derive(Debug, Clone)]
pub struct WendtVerScheme {
    inner: PatternScheme,
}

impl WendtVerScheme {
    pub fn new() -> Self {
        let segments = ["major", "minor", "patch", "build"]
            .into_iter()
            .map(|name| {
                Segment::new(
                    ComponentDefinition::new(name, "integer"),
                    Arc::new(IntegerType),
                )
            })
            .collect();
        let inner = PatternScheme::from_segments("wendtver", PATTERN, segments)
            .expect("built-in WendtVer pattern is valid")
            .with_format_template("{major}.{minor}.{patch}.{build}")
            .with_description("WendtVer auto-incrementing with carryover");
        Self { inner }
    }

    /// Bump `field` by one, carrying overflow into the more significant fields
    ///
    /// Less significant fields are left as they are.
    pub fn increment(&self, text: &str, field: WendtField) -> Result<String, VersionError> {
        let [mut major, mut minor, mut patch, mut build] = self.fields(text)?;

        let bump_major = match field {
            WendtField::Major => true,
            WendtField::Minor => carry(&mut minor, MAX_MINOR),
            WendtField::Patch => carry(&mut patch, MAX_PATCH) && carry(&mut minor, MAX_MINOR),
            WendtField::Build => {
                carry(&mut build, MAX_BUILD)
                    && carry(&mut patch, MAX_PATCH)
                    && carry(&mut minor, MAX_MINOR)
            }
        };

        if bump_major {
            major = major.checked_add(1).ok_or_else(|| {
                VersionError::InvalidVersion(format!("Major field of '{text}' cannot grow"))
            })?;
        }

        Ok(format!("{major}.{minor}.{patch}.{build}"))
    }

    fn fields(&self, text: &str) -> Result<[i64; 4], VersionError> {
        let parsed = self.parse(text)?;
        let mut fields = [0; 4];
        for (slot, component) in fields.iter_mut().zip(&parsed.components) {
            *slot = component.value().as_integer().unwrap_or_default();
        }
        Ok(fields)
    }
}

impl Default for WendtVerScheme {
    fn default() -> Self {
        Self::new()
    }
}

/// Add one; past `max` the field wraps to zero and reports a carry
fn carry(value: &mut i64, max: i64) -> bool {
    *value += 1;
    if *value > max {
        *value = 0;
        true
    } else {
        false
    }
}

fn check_range(value: &ComponentValue, max: i64, message: &str) -> Result<(), VersionError> {
    match value.as_integer() {
        Some(n) if (0..=max).contains(&n) => Ok(()),
        _ => Err(VersionError::Parse(message.to_string())),
    }
}

impl VersionScheme for WendtVerScheme {
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
        let parsed = self.inner.parse(text).map_err(|e| match e {
            VersionError::Parse(_) => {
                VersionError::Parse(format!("Invalid WendtVer format '{text}'"))
            }
            other => other,
        })?;

        for component in &parsed.components {
            match component.name() {
                "minor" => check_range(component.value(), MAX_MINOR, "Minor must be 0-99")?,
                "patch" => check_range(component.value(), MAX_PATCH, "Patch must be 0-99")?,
                "build" => check_range(component.value(), MAX_BUILD, "Build must be 0-999")?,
                _ => {}
            }
        }

        Ok(parsed)
    }
}
