//! Built-in scheme variants
//!
//! - `declarative`: segment markers only, parsed by [`crate::parser::SegmentParser`]
//! - `pattern`: one regex plus an optional template
//! - `calver`: date parts over a fixed set of formats
//! - `semantic`: SemVer 2.0
//! - `solover`: number with postfix
//! - `wendtver`: four fields with carryover
//! - `composite`: several schemes in one ordering space

mod calver;
mod composite;
mod declarative;
mod pattern;
mod semantic;
mod solover;
mod wendtver;

pub use calver::{CalVerScheme, DEFAULT_FORMAT as DEFAULT_CALVER_FORMAT};
pub use composite::CompositeScheme;
pub use declarative::DeclarativeScheme;
pub use pattern::PatternScheme;
pub use semantic::SemanticScheme;
pub use solover::SoloVerScheme;
pub use wendtver::{WendtField, WendtVerScheme};
