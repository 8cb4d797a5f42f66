//! Typed component values and the order keys derived from them

use std::cmp::Ordering;
use std::fmt;

/// One dot-separated identifier of a prerelease tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrereleaseIdentifier {
    Numeric(u64),
    Alpha(String),
}

impl PrereleaseIdentifier {
    /// All-digit parts become numeric, everything else stays alphanumeric
    pub fn parse(part: &str) -> Self {
        let numeric = !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        match part.parse() {
            Ok(number) if numeric => PrereleaseIdentifier::Numeric(number),
            _ => PrereleaseIdentifier::Alpha(part.to_string()),
        }
    }
}

impl Ord for PrereleaseIdentifier {
    // SemVer: numeric identifiers have lower precedence than alphanumeric ones
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.cmp(b),
            (Self::Numeric(_), Self::Alpha(_)) => Ordering::Less,
            (Self::Alpha(_), Self::Numeric(_)) => Ordering::Greater,
            (Self::Alpha(a), Self::Alpha(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for PrereleaseIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PrereleaseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Alpha(s) => f.write_str(s),
        }
    }
}

/// A parsed segment value
///
/// Each variant is produced and consumed by its matching component type.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    Integer(i64),
    Float(f64),
    String(String),
    /// Member of a closed enumeration
    Symbol(String),
    /// `+identifier` (after) or `-identifier` (before)
    Postfix { prefix: char, identifier: String },
    Prerelease(Vec<PrereleaseIdentifier>),
    Nil,
}

impl ComponentValue {
    pub fn is_nil(&self) -> bool {
        matches!(self, ComponentValue::Nil)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ComponentValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ComponentValue::String(s) | ComponentValue::Symbol(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentValue::Integer(n) => write!(f, "{n}"),
            ComponentValue::Float(n) => write!(f, "{n:?}"),
            ComponentValue::String(s) | ComponentValue::Symbol(s) => f.write_str(s),
            ComponentValue::Postfix { prefix, identifier } => write!(f, "{prefix}{identifier}"),
            ComponentValue::Prerelease(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            ComponentValue::Nil => Ok(()),
        }
    }
}

impl From<i64> for ComponentValue {
    fn from(value: i64) -> Self {
        ComponentValue::Integer(value)
    }
}

impl From<f64> for ComponentValue {
    fn from(value: f64) -> Self {
        ComponentValue::Float(value)
    }
}

impl From<&str> for ComponentValue {
    fn from(value: &str) -> Self {
        ComponentValue::String(value.to_string())
    }
}

impl From<String> for ComponentValue {
    fn from(value: String) -> Self {
        ComponentValue::String(value)
    }
}

/// One position of a comparable key
///
/// Integers and floats compare numerically with each other. Values of
/// different kinds order by a fixed kind rank so that every key is
/// comparable with every other; `Top` sorts above everything.
#[derive(Debug, Clone)]
pub enum OrderKey {
    Int(i64),
    Float(f64),
    Text(String),
    Tuple(Vec<OrderKey>),
    /// `None` is "no prerelease", which outranks any present prerelease
    Prerelease(Option<Vec<PrereleaseIdentifier>>),
    Semver(semver::Version),
    Top,
}

impl OrderKey {
    fn kind_rank(&self) -> u8 {
        match self {
            OrderKey::Int(_) | OrderKey::Float(_) => 0,
            OrderKey::Text(_) => 1,
            OrderKey::Tuple(_) => 2,
            OrderKey::Prerelease(_) => 3,
            OrderKey::Semver(_) => 4,
            OrderKey::Top => 5,
        }
    }

    /// Expand keys that pack several positions into one
    ///
    /// A SemVer key becomes `major, minor, patch, prerelease` so it can be
    /// laid side by side with keys from purely numeric grammars.
    pub fn flatten(&self) -> Vec<OrderKey> {
        match self {
            OrderKey::Semver(version) => {
                let prerelease = if version.pre.is_empty() {
                    None
                } else {
                    Some(
                        version
                            .pre
                            .as_str()
                            .split('.')
                            .map(PrereleaseIdentifier::parse)
                            .collect(),
                    )
                };
                vec![
                    OrderKey::Int(saturating_i64(version.major)),
                    OrderKey::Int(saturating_i64(version.minor)),
                    OrderKey::Int(saturating_i64(version.patch)),
                    OrderKey::Prerelease(prerelease),
                ]
            }
            other => vec![other.clone()],
        }
    }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// 2^63, the first float above every `i64`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Exact mixed comparison; casting the integer would round above 2^53
fn compare_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() {
        return compare_floats(int as f64, float);
    }
    if float >= I64_BOUND {
        return Ordering::Less;
    }
    if float < -I64_BOUND {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    // In range, so the cast is exact
    int.cmp(&(whole as i64)).then_with(|| compare_floats(whole, float))
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (OrderKey::Int(a), OrderKey::Int(b)) => a.cmp(b),
            (OrderKey::Float(a), OrderKey::Float(b)) => compare_floats(*a, *b),
            (OrderKey::Int(a), OrderKey::Float(b)) => compare_int_float(*a, *b),
            (OrderKey::Float(a), OrderKey::Int(b)) => compare_int_float(*b, *a).reverse(),
            (OrderKey::Text(a), OrderKey::Text(b)) => a.cmp(b),
            (OrderKey::Tuple(a), OrderKey::Tuple(b)) => a.cmp(b),
            (OrderKey::Prerelease(a), OrderKey::Prerelease(b)) => match (a, b) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            },
            (OrderKey::Semver(a), OrderKey::Semver(b)) => a.cmp(b),
            (OrderKey::Top, OrderKey::Top) => Ordering::Equal,
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OrderKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderKey {}

impl From<&ComponentValue> for OrderKey {
    /// The natural key of a value, used where a type defines no special order
    fn from(value: &ComponentValue) -> Self {
        match value {
            ComponentValue::Integer(n) => OrderKey::Int(*n),
            ComponentValue::Float(n) => OrderKey::Float(*n),
            ComponentValue::String(s) | ComponentValue::Symbol(s) => OrderKey::Text(s.clone()),
            ComponentValue::Postfix { prefix, identifier } => OrderKey::Tuple(vec![
                OrderKey::Int(postfix_ordinal(Some(*prefix))),
                OrderKey::Text(identifier.clone()),
            ]),
            ComponentValue::Prerelease(parts) => OrderKey::Prerelease(Some(parts.clone())),
            ComponentValue::Nil => OrderKey::Int(0),
        }
    }
}

/// none (0) < `+` after (1) < `-` before (2)
pub(crate) fn postfix_ordinal(prefix: Option<char>) -> i64 {
    match prefix {
        Some('+') => 1,
        Some('-') => 2,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pre(text: &str) -> OrderKey {
        OrderKey::Prerelease(Some(text.split('.').map(PrereleaseIdentifier::parse).collect()))
    }

    #[rstest]
    #[case("1", PrereleaseIdentifier::Numeric(1))]
    #[case("007", PrereleaseIdentifier::Numeric(7))]
    #[case("alpha", PrereleaseIdentifier::Alpha("alpha".into()))]
    #[case("rc1", PrereleaseIdentifier::Alpha("rc1".into()))]
    #[case("", PrereleaseIdentifier::Alpha("".into()))]
    fn prerelease_identifier_parse_returns_expected(
        #[case] part: &str,
        #[case] expected: PrereleaseIdentifier,
    ) {
        assert_eq!(PrereleaseIdentifier::parse(part), expected);
    }

    #[rstest]
    #[case(pre("alpha"), pre("beta"), Ordering::Less)]
    #[case(pre("alpha.1"), pre("alpha"), Ordering::Greater)]
    #[case(pre("alpha.1"), pre("alpha.beta"), Ordering::Less)]
    #[case(pre("1"), pre("alpha"), Ordering::Less)]
    #[case(pre("2"), pre("10"), Ordering::Less)]
    #[case(OrderKey::Prerelease(None), pre("rc.1"), Ordering::Greater)]
    #[case(OrderKey::Prerelease(None), OrderKey::Prerelease(None), Ordering::Equal)]
    fn prerelease_keys_follow_semver_precedence(
        #[case] a: OrderKey,
        #[case] b: OrderKey,
        #[case] expected: Ordering,
    ) {
        assert_eq!(a.cmp(&b), expected);
        assert_eq!(b.cmp(&a), expected.reverse());
    }

    const TWO_POW_53: i64 = 1 << 53;

    #[rstest]
    #[case(TWO_POW_53 + 1, 9_007_199_254_740_992.0, Ordering::Greater)]
    #[case(TWO_POW_53, 9_007_199_254_740_992.0, Ordering::Equal)]
    #[case(TWO_POW_53 - 1, 9_007_199_254_740_992.0, Ordering::Less)]
    #[case(i64::MAX, 1e19, Ordering::Less)]
    #[case(i64::MIN, -1e19, Ordering::Greater)]
    #[case(i64::MIN, -9_223_372_036_854_775_808.0, Ordering::Equal)]
    #[case(0, -0.5, Ordering::Greater)]
    #[case(-1, -0.5, Ordering::Less)]
    fn int_float_comparison_is_exact(
        #[case] int: i64,
        #[case] float: f64,
        #[case] expected: Ordering,
    ) {
        assert_eq!(OrderKey::Int(int).cmp(&OrderKey::Float(float)), expected);
        assert_eq!(OrderKey::Float(float).cmp(&OrderKey::Int(int)), expected.reverse());
    }

    #[test]
    fn mixed_numeric_equality_is_transitive() {
        let above = OrderKey::Int(TWO_POW_53 + 1);
        let float = OrderKey::Float(9_007_199_254_740_992.0);
        let exact = OrderKey::Int(TWO_POW_53);

        assert_eq!(float, exact);
        assert_ne!(above, float);
        assert_ne!(above, exact);
    }

    #[rstest]
    #[case(OrderKey::Int(2), OrderKey::Float(1.5), Ordering::Greater)]
    #[case(OrderKey::Int(1), OrderKey::Float(1.0), Ordering::Equal)]
    #[case(OrderKey::Int(100), OrderKey::Text("1".into()), Ordering::Less)]
    #[case(OrderKey::Text("zzz".into()), OrderKey::Top, Ordering::Less)]
    #[case(OrderKey::Top, OrderKey::Top, Ordering::Equal)]
    #[case(
        OrderKey::Tuple(vec![OrderKey::Int(3), OrderKey::Text("abc".into())]),
        OrderKey::Tuple(vec![OrderKey::Int(4), OrderKey::Text("aaaa".into())]),
        Ordering::Less
    )]
    fn order_keys_compare_across_kinds(
        #[case] a: OrderKey,
        #[case] b: OrderKey,
        #[case] expected: Ordering,
    ) {
        assert_eq!(a.cmp(&b), expected);
    }

    #[test]
    fn flatten_expands_semver_key() {
        let version = semver::Version::parse("1.2.3-rc.1").unwrap();
        assert_eq!(
            OrderKey::Semver(version).flatten(),
            vec![OrderKey::Int(1), OrderKey::Int(2), OrderKey::Int(3), pre("rc.1")]
        );
    }

    #[test]
    fn flatten_of_release_semver_has_absent_prerelease() {
        let version = semver::Version::parse("4.0.0").unwrap();
        assert_eq!(
            OrderKey::Semver(version).flatten()[3],
            OrderKey::Prerelease(None)
        );
    }

    #[rstest]
    #[case(ComponentValue::Integer(42), "42")]
    #[case(ComponentValue::Float(1.0), "1.0")]
    #[case(ComponentValue::Symbol("beta".into()), "beta")]
    #[case(ComponentValue::Postfix { prefix: '+', identifier: "hotfix".into() }, "+hotfix")]
    #[case(
        ComponentValue::Prerelease(vec![
            PrereleaseIdentifier::Alpha("alpha".into()),
            PrereleaseIdentifier::Numeric(1),
        ]),
        "alpha.1"
    )]
    #[case(ComponentValue::Nil, "")]
    fn component_value_display_returns_expected(
        #[case] value: ComponentValue,
        #[case] expected: &str,
    ) {
        assert_eq!(value.to_string(), expected);
    }
}
