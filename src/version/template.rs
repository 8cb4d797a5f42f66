//! Format template rendering
//!
//! Templates use `{name}` placeholders and `[...]` for spans that are
//! dropped when none of their placeholders has a value:
//!
//! ```text
//! {major}.{minor}[.{patch}][-{prerelease}]
//! ```

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::component::{ComponentValue, Segment};
use crate::version::identifier::VersionComponent;

static OPTIONAL_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").expect("valid optional span regex"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid placeholder regex"));

static REPEATED_DOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("valid dot run regex"));

/// Render `template`, asking `lookup` for each placeholder's text
///
/// Runs of dots are collapsed and leading or trailing `.`/`-` trimmed, for
/// hand-written templates whose literals sit outside optional spans.
pub fn render<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    tidy(&render_verbatim(template, lookup))
}

/// Render `template` without touching the literal text around values
///
/// For templates that bracket every optional segment with its own markers.
pub fn render_verbatim<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = template.to_string();

    // Innermost spans first, so nested optionals resolve outward
    loop {
        let resolved = OPTIONAL_SPAN.captures(&result).and_then(|span| {
            let whole = span.get(0)?;
            let content = span.get(1)?.as_str();
            let has_value = PLACEHOLDER
                .captures_iter(content)
                .any(|placeholder| lookup(&placeholder[1]).is_some());
            let replacement = if has_value { content } else { "" };
            Some((whole.range(), replacement.to_string()))
        });
        let Some((range, replacement)) = resolved else {
            break;
        };
        result.replace_range(range, &replacement);
    }

    PLACEHOLDER
        .replace_all(&result, |caps: &Captures<'_>| lookup(&caps[1]).unwrap_or_default())
        .into_owned()
}

fn tidy(rendered: &str) -> String {
    REPEATED_DOTS
        .replace_all(rendered, ".")
        .trim_matches(|c: char| c == '.' || c == '-')
        .to_string()
}

fn render_with<F>(template: &str, verbatim: bool, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if verbatim {
        render_verbatim(template, lookup)
    } else {
        render(template, lookup)
    }
}

/// Render from the components of a parsed version
pub fn render_components(
    template: &str,
    verbatim: bool,
    components: &[VersionComponent],
) -> String {
    render_with(template, verbatim, |name| {
        components
            .iter()
            .find(|c| c.name() == name)
            .filter(|c| !c.value().is_nil())
            .map(ToString::to_string)
    })
}

/// Render from loose values, formatting each through its segment's type
pub fn render_values(
    template: &str,
    verbatim: bool,
    segments: &[Segment],
    values: &IndexMap<String, ComponentValue>,
) -> String {
    render_with(template, verbatim, |name| {
        let value = values.get(name).filter(|v| !v.is_nil())?;
        Some(
            segments
                .iter()
                .find(|s| s.name() == name)
                .map(|s| s.format(value))
                .unwrap_or_else(|| value.to_string()),
        )
    })
}
