//! Version scheme abstraction

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::component::{ComponentValue, OrderKey, Segment};
use crate::version::error::VersionError;
use crate::version::identifier::{VersionComponent, VersionIdentifier};
use crate::version::range::VersionRange;
use crate::version::template;

/// Output of a scheme's parser, before it is bound to a [`Scheme`] handle
#[derive(Debug, Clone)]
pub struct ParsedVersion {
    pub raw: String,
    pub components: Vec<VersionComponent>,
    pub key: Vec<OrderKey>,
}

/// Trait implemented by every version grammar
///
/// Each scheme has different rules:
/// - semantic: SemVer 2.0 precedence through the `semver` crate
/// - pattern: one regex, keys compared with zero padding
/// - composite: several sub-schemes normalized into one key space
pub trait VersionScheme: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Rendering template with `{name}` placeholders and `[...]` optional spans
    fn format_template(&self) -> Option<&str> {
        None
    }

    /// Segments in declaration order
    fn segments(&self) -> &[Segment];

    fn parse(&self, text: &str) -> Result<ParsedVersion, VersionError>;

    /// Order two keys produced by this scheme's `parse`
    fn compare_keys(&self, a: &[OrderKey], b: &[OrderKey]) -> Ordering {
        a.cmp(b)
    }

    /// Whether the template's literal text is kept as is when rendering
    ///
    /// When false, dot runs are collapsed and stray `.`/`-` trimmed.
    fn renders_verbatim(&self) -> bool {
        false
    }

    /// Text form of a version; the raw string when there is no template
    fn render(&self, version: &VersionIdentifier) -> String {
        match self.format_template() {
            Some(template) => template::render_components(
                template,
                self.renders_verbatim(),
                version.components(),
            ),
            None => version.raw().to_string(),
        }
    }

    /// Construct a version from component values without parsing user text
    fn build(
        &self,
        values: &IndexMap<String, ComponentValue>,
    ) -> Result<ParsedVersion, VersionError> {
        build_from_values(self, values)
    }
}

/// Check `values` against the segments, then render and reparse through the
/// template, or assemble directly when there is none
pub(crate) fn build_from_values<S>(
    scheme: &S,
    values: &IndexMap<String, ComponentValue>,
) -> Result<ParsedVersion, VersionError>
where
    S: VersionScheme + ?Sized,
{
    let segments = scheme.segments();

    if let Some(unknown) = values
        .keys()
        .find(|name| !segments.iter().any(|s| s.name() == name.as_str()))
    {
        return Err(VersionError::InvalidVersion(format!(
            "Unknown component '{}' for scheme '{}'",
            unknown,
            scheme.name()
        )));
    }

    if let Some(missing) = segments.iter().find(|s| {
        let definition = s.definition();
        !definition.optional
            && definition.default_token().is_none()
            && values.get(s.name()).is_none_or(ComponentValue::is_nil)
    }) {
        return Err(VersionError::InvalidVersion(format!(
            "Missing required component '{}' for scheme '{}'",
            missing.name(),
            scheme.name()
        )));
    }

    match scheme.format_template() {
        Some(template) => {
            let text =
                template::render_values(template, scheme.renders_verbatim(), segments, values);
            debug!("Built '{}' for scheme '{}'", text, scheme.name());
            scheme.parse(&text)
        }
        None => {
            let raw = values
                .values()
                .filter(|v| !v.is_nil())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(".");
            let aligned = segments
                .iter()
                .map(|s| values.get(s.name()).cloned())
                .collect();
            Ok(assemble(raw, segments, aligned))
        }
    }
}

/// Bind values (aligned with `segments`) into components and a positional key
///
/// Every segment that takes part in comparison contributes one key position;
/// an absent value is keyed as `Nil` so positions stay aligned.
pub(crate) fn assemble(
    raw: impl Into<String>,
    segments: &[Segment],
    values: Vec<Option<ComponentValue>>,
) -> ParsedVersion {
    let mut components = Vec::with_capacity(segments.len());
    let mut key = Vec::with_capacity(segments.len());

    for (segment, value) in segments.iter().zip(values) {
        let value = value.filter(|v| !v.is_nil());

        if !segment.definition().ignore_in_comparison {
            key.push(segment.to_comparable(value.as_ref().unwrap_or(&ComponentValue::Nil)));
        }
        if let Some(value) = value {
            components.push(segment.component(value));
        }
    }

    ParsedVersion {
        raw: raw.into(),
        components,
        key,
    }
}

/// Lexicographic order with missing trailing positions read as `0`, then by length
pub(crate) fn compare_zero_padded(a: &[OrderKey], b: &[OrderKey]) -> Ordering {
    let zero = OrderKey::Int(0);
    (0..a.len().max(b.len()))
        .map(|i| {
            a.get(i)
                .unwrap_or(&zero)
                .cmp(b.get(i).unwrap_or(&zero))
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Shared handle to a scheme
///
/// Parsing through the handle produces [`VersionIdentifier`]s that remember
/// which scheme they belong to. Handles compare equal by scheme name.
#[derive(Clone)]
pub struct Scheme(Arc<dyn VersionScheme>);

impl Scheme {
    pub fn new<S>(scheme: S) -> Self
    where
        S: VersionScheme + 'static,
    {
        Self(Arc::new(scheme))
    }

    pub fn from_arc(scheme: Arc<dyn VersionScheme>) -> Self {
        Self(scheme)
    }

    pub fn inner(&self) -> &dyn VersionScheme {
        self.0.as_ref()
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn description(&self) -> Option<&str> {
        self.0.description()
    }

    pub fn format_template(&self) -> Option<&str> {
        self.0.format_template()
    }

    pub fn segments(&self) -> &[Segment] {
        self.0.segments()
    }

    pub fn parse(&self, text: &str) -> Result<VersionIdentifier, VersionError> {
        let parsed = self.0.parse(text)?;
        Ok(self.identify(parsed))
    }

    /// Whether this scheme's grammar accepts `text`
    ///
    /// Rejections are `Ok(false)`; a broken scheme definition is an error.
    pub fn supports(&self, text: &str) -> Result<bool, VersionError> {
        match self.0.parse(text) {
            Ok(_) => Ok(true),
            Err(e) if e.is_rejection() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Like [`Scheme::supports`], but never fails
    pub fn is_valid(&self, text: &str) -> bool {
        self.supports(text).unwrap_or_else(|e| {
            warn!("Scheme '{}' failed while checking '{}': {}", self.name(), text, e);
            false
        })
    }

    pub fn compare(&self, a: &str, b: &str) -> Result<Ordering, VersionError> {
        let a = self.0.parse(a)?;
        let b = self.0.parse(b)?;
        Ok(self.0.compare_keys(&a.key, &b.key))
    }

    /// Evaluate `range` against `text`; `between` is inclusive on both ends
    pub fn matches_range(&self, text: &str, range: &VersionRange) -> Result<bool, VersionError> {
        let version = self.0.parse(text)?;
        let against = |boundary: &str| -> Result<Ordering, VersionError> {
            let boundary = self.0.parse(boundary)?;
            Ok(self.0.compare_keys(&version.key, &boundary.key))
        };

        Ok(match range {
            VersionRange::Equals(boundary) => against(boundary)?.is_eq(),
            VersionRange::Before(boundary) => against(boundary)?.is_lt(),
            VersionRange::After(boundary) => against(boundary)?.is_ge(),
            VersionRange::Between { from, to } => against(from)?.is_ge() && against(to)?.is_le(),
        })
    }

    pub fn render(&self, version: &VersionIdentifier) -> String {
        self.0.render(version)
    }

    /// Construct a version from `(component name, value)` pairs
    pub fn build<I, K>(&self, values: I) -> Result<VersionIdentifier, VersionError>
    where
        I: IntoIterator<Item = (K, ComponentValue)>,
        K: Into<String>,
    {
        let values: IndexMap<String, ComponentValue> = values
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        let parsed = self.0.build(&values)?;
        Ok(self.identify(parsed))
    }

    fn identify(&self, parsed: ParsedVersion) -> VersionIdentifier {
        VersionIdentifier::new(parsed.raw, self.clone(), parsed.components, parsed.key)
    }
}

impl PartialEq for Scheme {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Scheme {}

impl fmt::Debug for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Scheme").field(&self.name()).finish()
    }
}
