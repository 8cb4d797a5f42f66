//! Scheme built on the segment boundary parser

use tracing::debug;

use crate::component::{ComponentDefinition, ComponentTypeRegistry, Segment};
use crate::parser::SegmentParser;
use crate::version::error::VersionError;
use crate::version::scheme::{ParsedVersion, VersionScheme, assemble};

/// Scheme described only by its segment markers
///
/// The rendering template is derived from the markers, so parsed and built
/// versions render back in the declared layout.
#[derive(Debug, Clone)]
pub struct DeclarativeScheme {
    name: String,
    description: Option<String>,
    format_template: String,
    parser: SegmentParser,
}

impl DeclarativeScheme {
    pub fn new(
        name: impl Into<String>,
        definitions: Vec<ComponentDefinition>,
        types: &ComponentTypeRegistry,
    ) -> Result<Self, VersionError> {
        if definitions.is_empty() {
            return Err(VersionError::InvalidScheme(
                "No component definitions provided".into(),
            ));
        }
        let parser = SegmentParser::new(definitions, types)?;
        let format_template = derive_template(parser.segments());

        Ok(Self {
            name: name.into(),
            description: None,
            format_template,
            parser,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// `[prefix]{name}[suffix][separator]` per segment, optional ones bracketed
///
/// A separator is left out when the next segment is optional and opens with
/// the same marker, since that segment's span carries it.
fn derive_template(segments: &[Segment]) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let definition = segment.definition();
            let mut piece = String::new();
            if !definition.include_prefix_in_value {
                piece.push_str(definition.prefix().unwrap_or_default());
            }
            piece.push('{');
            piece.push_str(segment.name());
            piece.push('}');
            piece.push_str(definition.suffix().unwrap_or_default());
            let separator = definition.separator().unwrap_or_default();
            let carried_by_next = segments.get(index + 1).is_some_and(|next| {
                let next = next.definition();
                next.optional && !next.include_prefix_in_value && next.prefix() == Some(separator)
            });
            if !carried_by_next {
                piece.push_str(separator);
            }

            if definition.optional {
                format!("[{piece}]")
            } else {
                piece
            }
        })
        .collect()
}

impl VersionScheme for DeclarativeScheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn format_template(&self) -> Option<&str> {
        Some(&self.format_template)
    }

    /// The derived template brackets optional segments with their own markers
    fn renders_verbatim(&self) -> bool {
        true
    }

    fn segments(&self) -> &[Segment] {
        self.parser.segments()
    }

    fn parse(&self, text: &str) -> Result<ParsedVersion, VersionError> {
        if text.trim().is_empty() {
            return Err(VersionError::InvalidVersion(
                "Version string cannot be empty".into(),
            ));
        }

        let mut parsed = self.parser.parse(text)?;
        let values = self
            .segments()
            .iter()
            .map(|segment| parsed.swap_remove(segment.name()).flatten())
            .collect();

        debug!("Parsed '{}' with declarative scheme '{}'", text, self.name);
        Ok(assemble(text, self.segments(), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentValue, OrderKey};
    use crate::version::scheme::Scheme;
    use rstest::rstest;
    use std::cmp::Ordering;

    fn semver_like() -> Scheme {
        let types = ComponentTypeRegistry::with_builtins();
        Scheme::new(
            DeclarativeScheme::new(
                "semver_like",
                vec![
                    ComponentDefinition::new("major", "integer").with_separator("."),
                    ComponentDefinition::new("minor", "integer").with_separator("."),
                    ComponentDefinition::new("patch", "integer"),
                    ComponentDefinition::new("prerelease", "prerelease")
                        .optional()
                        .with_prefix("-"),
                    ComponentDefinition::new("build", "string")
                        .optional()
                        .with_prefix("+")
                        .ignored_in_comparison(),
                ],
                &types,
            )
            .unwrap()
            .with_description("SemVer through segment markers"),
        )
    }

    #[test]
    fn template_is_derived_from_markers() {
        assert_eq!(
            semver_like().format_template(),
            Some("{major}.{minor}.{patch}[-{prerelease}][+{build}]")
        );
        assert_eq!(
            semver_like().description(),
            Some("SemVer through segment markers")
        );
    }

    #[test]
    fn parse_keys_every_compared_segment() {
        let version = semver_like().parse("1.2.3").unwrap();
        assert_eq!(
            version.key(),
            [
                OrderKey::Int(1),
                OrderKey::Int(2),
                OrderKey::Int(3),
                OrderKey::Prerelease(None),
            ]
        );
        assert_eq!(version.components().len(), 3);
    }

    #[rstest]
    #[case("1.0.0-alpha", "1.0.0-beta", Ordering::Less)]
    #[case("1.0.0-rc.1", "1.0.0", Ordering::Less)]
    #[case("1.0.0+build.1", "1.0.0+build.2", Ordering::Equal)]
    #[case("2.0.0", "1.99.99", Ordering::Greater)]
    fn compare_returns_expected(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(semver_like().compare(a, b), Ok(expected));
    }

    #[rstest]
    #[case("1.2.3")]
    #[case("1.2.3-alpha.1")]
    #[case("1.2.3-alpha.1+build.7")]
    fn render_round_trips(#[case] text: &str) {
        assert_eq!(semver_like().parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn build_goes_through_template() {
        let version = semver_like()
            .build([
                ("major", ComponentValue::Integer(1)),
                ("minor", ComponentValue::Integer(4)),
                ("patch", ComponentValue::Integer(0)),
                ("build", ComponentValue::from("nightly")),
            ])
            .unwrap();
        assert_eq!(version.raw(), "1.4.0+nightly");
    }

    fn dotted_with_optional_minor() -> Scheme {
        let types = ComponentTypeRegistry::with_builtins();
        Scheme::new(
            DeclarativeScheme::new(
                "short",
                vec![
                    ComponentDefinition::new("major", "integer").with_separator("."),
                    ComponentDefinition::new("minor", "integer")
                        .optional()
                        .with_prefix("."),
                ],
                &types,
            )
            .unwrap(),
        )
    }

    #[rstest]
    #[case("1.2")]
    #[case("1")]
    fn separator_shared_with_optional_prefix_renders_once(#[case] text: &str) {
        let scheme = dotted_with_optional_minor();
        assert_eq!(scheme.format_template(), Some("{major}[.{minor}]"));
        assert_eq!(scheme.parse(text).unwrap().to_string(), text);
    }

    fn tagged() -> Scheme {
        let types = ComponentTypeRegistry::with_builtins();
        Scheme::new(
            DeclarativeScheme::new(
                "tagged",
                vec![
                    ComponentDefinition::new("major", "integer").with_separator("."),
                    ComponentDefinition::new("tag", "string"),
                ],
                &types,
            )
            .unwrap(),
        )
    }

    #[rstest]
    #[case("1.rc-")]
    #[case("1.a..b")]
    #[case("-1.x")]
    fn render_keeps_markers_inside_values(#[case] text: &str) {
        let version = tagged().parse(text).unwrap();
        assert_eq!(version.to_string(), text);
    }

    #[test]
    fn blank_input_is_invalid_version() {
        assert!(matches!(
            semver_like().parse("  "),
            Err(VersionError::InvalidVersion(_))
        ));
    }

    #[test]
    fn construction_requires_definitions() {
        let types = ComponentTypeRegistry::with_builtins();
        assert_eq!(
            DeclarativeScheme::new("empty", vec![], &types).unwrap_err(),
            VersionError::InvalidScheme("No component definitions provided".into())
        );
    }
}
