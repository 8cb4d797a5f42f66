//! Declarative segment boundary parser
//!
//! Splits a version string into named raw tokens using only the separators,
//! prefixes and suffixes declared on each segment. No grammar is compiled:
//! a segment ends at the earliest marker that belongs to it or to a segment
//! after it.

use indexmap::IndexMap;
use tracing::debug;

use crate::component::registry::ComponentTypeRegistry;
use crate::component::segment::Segment;
use crate::component::{ComponentDefinition, ComponentValue};
use crate::version::error::VersionError;

/// Prefix characters an `include_prefix_in_value` segment may start with
const ALTERNATE_PREFIXES: [&str; 2] = ["+", "-"];

/// Segment name to parsed value, `None` for an absent optional segment
pub type ParsedSegments = IndexMap<String, Option<ComponentValue>>;

#[derive(Debug, Clone)]
pub struct SegmentParser {
    segments: Vec<Segment>,
}

impl SegmentParser {
    /// Validate the definitions and resolve their types
    pub fn new(
        definitions: Vec<ComponentDefinition>,
        types: &ComponentTypeRegistry,
    ) -> Result<Self, VersionError> {
        for definition in &definitions {
            definition.validate()?;
        }

        // A separator alone cannot tell a missing optional segment from an empty one
        if let Some(definition) = definitions
            .iter()
            .skip(1)
            .find(|d| d.optional && d.prefix().is_none())
        {
            return Err(VersionError::InvalidScheme(format!(
                "Optional segment '{}' must have prefix or separator",
                definition.name
            )));
        }

        let segments = definitions
            .into_iter()
            .map(|definition| Segment::resolve(definition, types))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn parse(&self, text: &str) -> Result<ParsedSegments, VersionError> {
        if text.is_empty() {
            return Err(VersionError::Parse("Version string cannot be empty".into()));
        }

        let mut position = 0;
        let mut results = ParsedSegments::with_capacity(self.segments.len());

        for (index, segment) in self.segments.iter().enumerate() {
            let definition = segment.definition();

            match (definition.optional, definition.prefix()) {
                (true, Some(prefix)) => {
                    if position >= text.len() {
                        results.insert(segment.name().to_string(), None);
                        continue;
                    }

                    let at_position = starts_with_at(text, position, prefix);
                    let before_position = position >= prefix.len()
                        && starts_with_at(text, position - prefix.len(), prefix);
                    let alternate = definition.include_prefix_in_value
                        && ALTERNATE_PREFIXES
                            .iter()
                            .any(|alt| starts_with_at(text, position, alt));

                    if !(at_position || before_position || alternate) {
                        debug!("Optional segment '{}' absent at {}", segment.name(), position);
                        results.insert(segment.name().to_string(), None);
                        continue;
                    }

                    if at_position && !definition.include_prefix_in_value {
                        position += prefix.len();
                    }
                }
                (false, Some(prefix)) => {
                    if !definition.include_prefix_in_value && starts_with_at(text, position, prefix)
                    {
                        position += prefix.len();
                    }
                }
                _ => {}
            }

            let end = self.segment_end(text, position, index);
            let raw = text.get(position..end).unwrap_or_default();

            if raw.is_empty() {
                if definition.optional {
                    results.insert(segment.name().to_string(), None);
                    continue;
                }
                return Err(VersionError::Parse(format!(
                    "Required segment '{}' is missing or empty",
                    segment.name()
                )));
            }

            let value = segment.parse(raw)?;
            results.insert(segment.name().to_string(), Some(value));
            position = end;

            if let Some(suffix) = definition.suffix() {
                if starts_with_at(text, position, suffix) {
                    position += suffix.len();
                }
            }

            // Separators are declared on the segment that precedes them
            if let Some(separator) = definition.separator() {
                if starts_with_at(text, position, separator) {
                    position += separator.len();
                }
            }
        }

        if position < text.len() {
            let remaining = text.get(position..).unwrap_or_default();
            return Err(VersionError::Parse(format!(
                "Unexpected trailing content after parsing: '{}'",
                remaining
            )));
        }

        Ok(results)
    }

    /// Whether `text` parses cleanly
    pub fn matches(&self, text: &str) -> bool {
        self.parse(text).is_ok()
    }

    /// Earliest boundary for the segment at `index` starting from `position`
    fn segment_end(&self, text: &str, position: usize, index: usize) -> usize {
        let mut end = text.len();
        let mut consider = |marker: &str| {
            if let Some(found) = find_from(text, position, marker) {
                end = end.min(found);
                true
            } else {
                false
            }
        };

        let current = self.segments[index].definition();
        if let Some(separator) = current.separator() {
            consider(separator);
        }
        if let Some(suffix) = current.suffix() {
            consider(suffix);
        }

        for next in self.segments.iter().skip(index + 1) {
            let next = next.definition();

            if let Some(separator) = next.separator() {
                consider(separator);
            }

            if let Some(prefix) = next.prefix() {
                let mut found_prefix = consider(prefix);
                if next.include_prefix_in_value {
                    for alternate in ALTERNATE_PREFIXES.iter().filter(|alt| **alt != prefix) {
                        found_prefix |= consider(*alternate);
                    }
                }
                // Only the nearest later segment whose prefix occurs bounds this one
                if found_prefix {
                    break;
                }
            }
        }

        end
    }
}

fn starts_with_at(text: &str, position: usize, marker: &str) -> bool {
    text.as_bytes()
        .get(position..)
        .is_some_and(|rest| rest.starts_with(marker.as_bytes()))
}

fn find_from(text: &str, position: usize, marker: &str) -> Option<usize> {
    text.get(position..)
        .and_then(|rest| rest.find(marker))
        .map(|offset| position + offset)
}
