//! Byte spans and line/column lookup for typed-vue-template.
//!
//! Every crate in the workspace addresses source text by byte offset. The
//! container parser records where blocks and attributes live, the script
//! engine splices by span, and the CLI turns offsets back into `line:col`
//! when it reports a failure.

mod line_index;
mod span;

pub use line_index::{LineCol, LineIndex};
pub use span::{ByteOffset, Span};
