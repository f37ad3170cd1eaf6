//! Maven metadata access: POM parsing, parent and BOM inheritance helpers,
//! and the [`source::MetadataSource`] seam the graph builder reads through.

pub mod pom;
pub mod source;
