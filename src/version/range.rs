//! Boundary predicates over versions of one scheme

use std::fmt;
use std::str::FromStr;

use crate::version::error::VersionError;
use crate::version::scheme::Scheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Equals,
    Before,
    After,
    Between,
}

impl FromStr for RangeKind {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(RangeKind::Equals),
            "before" => Ok(RangeKind::Before),
            "after" => Ok(RangeKind::After),
            "between" => Ok(RangeKind::Between),
            other => Err(VersionError::InvalidRange(format!(
                "Unknown range type: {other}"
            ))),
        }
    }
}

/// A range over raw version strings
///
/// Boundaries are parsed by the scheme the range is evaluated against.
/// `After` includes its boundary; `Between` includes both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    Equals(String),
    Before(String),
    After(String),
    Between { from: String, to: String },
}

impl VersionRange {
    /// Build a range from loose parts, checking each kind gets exactly its boundaries
    pub fn new(
        kind: RangeKind,
        version: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self, VersionError> {
        fn present(boundary: Option<&str>) -> Option<&str> {
            boundary.filter(|b| !b.trim().is_empty())
        }

        match kind {
            RangeKind::Equals | RangeKind::Before | RangeKind::After => {
                if from.is_some() || to.is_some() {
                    return Err(VersionError::InvalidRange(format!(
                        "{kind:?} range takes a single version, not from/to"
                    )));
                }
                let version = present(version)
                    .ok_or_else(|| {
                        VersionError::InvalidRange(format!("{kind:?} range requires a version"))
                    })?
                    .to_string();
                Ok(match kind {
                    RangeKind::Equals => VersionRange::Equals(version),
                    RangeKind::Before => VersionRange::Before(version),
                    _ => VersionRange::After(version),
                })
            }
            RangeKind::Between => {
                if version.is_some() {
                    return Err(VersionError::InvalidRange(
                        "Between range takes from/to, not a single version".into(),
                    ));
                }
                match (present(from), present(to)) {
                    (Some(from), Some(to)) => Ok(VersionRange::between(from, to)),
                    _ => Err(VersionError::InvalidRange(
                        "Between range requires from and to".into(),
                    )),
                }
            }
        }
    }

    pub fn equals(version: impl Into<String>) -> Self {
        VersionRange::Equals(version.into())
    }

    pub fn before(version: impl Into<String>) -> Self {
        VersionRange::Before(version.into())
    }

    pub fn after(version: impl Into<String>) -> Self {
        VersionRange::After(version.into())
    }

    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        VersionRange::Between {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn kind(&self) -> RangeKind {
        match self {
            VersionRange::Equals(_) => RangeKind::Equals,
            VersionRange::Before(_) => RangeKind::Before,
            VersionRange::After(_) => RangeKind::After,
            VersionRange::Between { .. } => RangeKind::Between,
        }
    }

    /// The single boundary of an equals/before/after range
    pub fn boundary(&self) -> Option<&str> {
        match self {
            VersionRange::Equals(v) | VersionRange::Before(v) | VersionRange::After(v) => Some(v),
            VersionRange::Between { .. } => None,
        }
    }

    pub fn from(&self) -> Option<&str> {
        match self {
            VersionRange::Between { from, .. } => Some(from),
            _ => None,
        }
    }

    pub fn to(&self) -> Option<&str> {
        match self {
            VersionRange::Between { to, .. } => Some(to),
            _ => None,
        }
    }

    pub fn matches(&self, scheme: &Scheme, text: &str) -> Result<bool, VersionError> {
        scheme.matches_range(text, self)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::Equals(v) => write!(f, "== {v}"),
            VersionRange::Before(v) => write!(f, "< {v}"),
            VersionRange::After(v) => write!(f, ">= {v}"),
            VersionRange::Between { from, to } => write!(f, "{from} - {to}"),
        }
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    /// Parse the `Display` forms: `== v`, `< v`, `>= v`, `a - b`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let single = |rest: &str, kind: RangeKind| VersionRange::new(kind, Some(rest.trim()), None, None);

        if let Some(rest) = s.strip_prefix(">=") {
            single(rest, RangeKind::After)
        } else if let Some(rest) = s.strip_prefix("==") {
            single(rest, RangeKind::Equals)
        } else if let Some(rest) = s.strip_prefix('<') {
            single(rest, RangeKind::Before)
        } else if let Some((from, to)) = s.split_once(" - ") {
            VersionRange::new(RangeKind::Between, None, Some(from.trim()), Some(to.trim()))
        } else {
            Err(VersionError::InvalidRange(format!(
                "Cannot parse range '{s}'"
            )))
        }
    }
}
