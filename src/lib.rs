pub mod component;
pub mod config;
pub mod parser;
pub mod version;

pub use component::{ComponentDefinition, ComponentType, ComponentTypeRegistry, ComponentValue};
pub use config::{SchemeConfig, SchemeLoader};
pub use version::{
    Scheme, SchemeRegistry, VersionError, VersionIdentifier, VersionRange, VersionScheme,
};
