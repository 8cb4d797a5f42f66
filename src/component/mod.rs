//! Segment descriptors and the pluggable types that parse and order them
//!
//! # Modules
//!
//! - [`definition`]: `ComponentDefinition`, the declarative description of a segment
//! - [`component_type`]: `ComponentType` trait implemented by every type plugin
//! - [`component_types`]: Built-in types (integer, enum, prerelease, etc.)
//! - [`registry`]: `ComponentTypeRegistry`, name to type lookup
//! - [`segment`]: A definition bound to its resolved type
//! - [`value`]: Parsed values and the order keys derived from them

pub mod component_type;
pub mod component_types;
pub mod definition;
pub mod registry;
pub mod segment;
pub mod value;

pub use component_type::ComponentType;
pub use definition::{CompareAs, ComponentDefinition};
pub use registry::ComponentTypeRegistry;
pub use segment::Segment;
pub use value::{ComponentValue, OrderKey, PrereleaseIdentifier};
