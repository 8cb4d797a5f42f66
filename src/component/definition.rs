//! Segment definitions

use serde::{Deserialize, Deserializer};

use crate::version::error::VersionError;

/// Comparison override carried by a segment
///
/// Composite schemes rank any version carrying `Lowest` below every standard
/// version, and `Highest` above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareAs {
    Lowest,
    Highest,
}

impl CompareAs {
    pub fn rank(self) -> i64 {
        match self {
            CompareAs::Lowest => -1,
            CompareAs::Highest => 1,
        }
    }
}

/// Descriptor of one named segment of a scheme
///
/// `kind` names a registered component type. Empty markers are the same as
/// absent ones; use the accessor methods rather than the raw fields when
/// reading markers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComponentDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: Option<String>,
    pub optional: bool,
    #[serde(deserialize_with = "scalar_as_string")]
    pub default: Option<String>,
    pub separator: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub values: Vec<String>,
    pub order: Vec<String>,
    pub weight: u32,
    #[serde(alias = "compareAs")]
    pub compare_as: Option<CompareAs>,
    #[serde(alias = "ignoreInComparison")]
    pub ignore_in_comparison: bool,
    #[serde(alias = "includePrefixInValue")]
    pub include_prefix_in_value: bool,
}

impl Default for ComponentDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: String::new(),
            subtype: None,
            optional: false,
            default: None,
            separator: None,
            prefix: None,
            suffix: None,
            values: Vec::new(),
            order: Vec::new(),
            weight: 1,
            compare_as: None,
            ignore_in_comparison: false,
            include_prefix_in_value: false,
        }
    }
}

impl ComponentDefinition {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_compare_as(mut self, compare_as: CompareAs) -> Self {
        self.compare_as = Some(compare_as);
        self
    }

    pub fn ignored_in_comparison(mut self) -> Self {
        self.ignore_in_comparison = true;
        self
    }

    pub fn including_prefix_in_value(mut self) -> Self {
        self.include_prefix_in_value = true;
        self
    }

    pub fn separator(&self) -> Option<&str> {
        non_empty(&self.separator)
    }

    pub fn prefix(&self) -> Option<&str> {
        non_empty(&self.prefix)
    }

    pub fn suffix(&self) -> Option<&str> {
        non_empty(&self.suffix)
    }

    pub fn default_token(&self) -> Option<&str> {
        non_empty(&self.default)
    }

    /// Total order of enumeration members; falls back to declaration order
    pub fn member_order(&self) -> &[String] {
        if self.order.is_empty() {
            &self.values
        } else {
            &self.order
        }
    }

    pub fn validate(&self) -> Result<(), VersionError> {
        if self.name.trim().is_empty() {
            return Err(VersionError::InvalidScheme("segment name required".into()));
        }
        if self.kind.trim().is_empty() {
            return Err(VersionError::InvalidScheme("segment type required".into()));
        }
        Ok(())
    }
}

fn non_empty(marker: &Option<String>) -> Option<&str> {
    marker.as_deref().filter(|m| !m.is_empty())
}

/// Accepts `"1"`, `1` or `true` for fields stored as raw tokens
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar default, found {other}"
        ))),
    }
}
