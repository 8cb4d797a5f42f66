use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The input is unusable before any grammar is applied (e.g. empty)
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// The input does not satisfy the scheme's grammar or a segment's constraints
    #[error("Parse error: {0}")]
    Parse(String),

    /// The scheme or component definition itself is malformed
    #[error("Invalid scheme: {0}")]
    InvalidScheme(String),

    #[error("Cannot compare versions from different schemes: '{left}' and '{right}'")]
    SchemeMismatch { left: String, right: String },

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

impl VersionError {
    /// Whether the error only says "this text is not a version of this scheme"
    ///
    /// Used by validity checks, which swallow these two kinds but let
    /// definition errors propagate.
    pub fn is_rejection(&self) -> bool {
        matches!(self, VersionError::InvalidVersion(_) | VersionError::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(VersionError::InvalidVersion("empty".into()), true)]
    #[case(VersionError::Parse("bad".into()), true)]
    #[case(VersionError::InvalidScheme("no name".into()), false)]
    #[case(VersionError::InvalidRange("missing to".into()), false)]
    #[case(
        VersionError::SchemeMismatch { left: "semantic".into(), right: "calver".into() },
        false
    )]
    fn is_rejection_returns_expected(#[case] error: VersionError, #[case] expected: bool) {
        assert_eq!(error.is_rejection(), expected);
    }

    #[test]
    fn scheme_mismatch_message_names_both_schemes() {
        let error = VersionError::SchemeMismatch {
            left: "semantic".into(),
            right: "calver".into(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot compare versions from different schemes: 'semantic' and 'calver'"
        );
    }
}
