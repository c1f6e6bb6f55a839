#![deny(clippy::unwrap_used)]

pub mod extract;
pub mod presets;
pub mod schema;

pub use extract::{extract, extract_document, ExtractError, ExtractionResult, Record};
pub use schema::{CompiledSchema, ExtractMode, Field, Schema};
