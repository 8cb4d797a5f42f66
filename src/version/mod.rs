//! Version schemes, parsed identifiers and ranges
//!
//! A scheme turns version text into a [`VersionIdentifier`] whose order key
//! decides comparison. Schemes are shared through the [`Scheme`] handle and
//! looked up by name in a [`SchemeRegistry`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Scheme    │────▶│ Identifier  │
//! │ (by name)   │     │  (parse)    │     │ (key, cmp)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Segments   │     │    Range    │
//!                     │(comp. types)│     │  (matches)  │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`scheme`]: `VersionScheme` trait and the `Scheme` handle
//! - [`schemes`]: Declarative, pattern, CalVer, SemVer, SoloVer, WendtVer and composite schemes
//! - [`identifier`]: Parsed versions and their components
//! - [`range`]: Equals / before / after / between ranges
//! - [`registry`]: Name to scheme directory with auto-detection
//! - [`template`]: `{name}` / `[...]` format templates
//! - [`error`]: Error type shared by the whole crate

pub mod error;
pub mod identifier;
pub mod range;
pub mod registry;
pub mod scheme;
pub mod schemes;
pub mod template;

pub use error::VersionError;
pub use identifier::{VersionComponent, VersionIdentifier};
pub use range::{RangeKind, VersionRange};
pub use registry::SchemeRegistry;
pub use scheme::{ParsedVersion, Scheme, VersionScheme};
