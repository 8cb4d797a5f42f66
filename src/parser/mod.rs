//! Parser layer
//! - segment.rs: Declarative segment boundary parser

pub mod segment;

pub use segment::{ParsedSegments, SegmentParser};
