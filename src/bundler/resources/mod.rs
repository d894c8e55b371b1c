//! Resource handling: web-tier extraction from archives and source tree merging.

pub mod extract;
pub mod merge;

pub use extract::{ResourceInspection, WEB_SERVER_RESOURCES_MARKER, extract_if_present, inspect};
pub use merge::{merge_into, merge_source_directories};
