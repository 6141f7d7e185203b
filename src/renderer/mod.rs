//! Terminal Renderer
//!
//! Line-based output: ANSI sequences accumulate in an OutputBuffer and
//! flush to stdout in a single write per frame.

pub mod ansi;
pub mod inline;
pub mod output;

// Re-exports
pub use inline::{AppendRenderer, InlineRenderer};
pub use output::OutputBuffer;
