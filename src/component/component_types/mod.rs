//! Built-in component types

mod date_part;
mod enumeration;
mod float;
mod hash;
mod integer;
mod postfix;
mod prerelease;
mod string;

pub use date_part::DatePartType;
pub use enumeration::EnumType;
pub use float::FloatType;
pub use hash::HashType;
pub use integer::IntegerType;
pub use postfix::PostfixType;
pub use prerelease::PrereleaseType;
pub use string::StringType;
