//! # ALK Editor
//!
//! Applies model-suggested edits to real files without the model ever
//! seeing or emitting line numbers. The model emits a tagged line
//! stream describing, file by file, which spans are unchanged and which
//! are replacement text; this crate locates where each replacement
//! belongs in the *actual on-disk* file and splices it in, refusing to
//! guess when a location is ambiguous.
//!
//! ## Pipeline
//!
//! ```text
//! Tagged stream
//!     │
//!     ├──> Parser (line state machine)
//!     │      └─> FileEdit[] (ordered chunks per file)
//!     │
//!     ├──> Classifier (adjacency rules)
//!     │      └─> full / top / middle / bottom / unchanged + anchor pairs
//!     │
//!     ├──> Locator (growing-window unique match)
//!     │      └─> boundary line indices in the original file
//!     │
//!     └──> Applier (plan markers, then commit substitutions)
//!            └─> final file content, written once on success
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use alk_editor::EditSession;
//!
//! fn main() -> alk_editor::Result<()> {
//!     let session = EditSession::new(".");
//!     let report = session.apply_str(
//!         "@@ALK<FILE path=\"hello.txt\">\nHello, world!\n@@ALK</FILE>\n",
//!     )?;
//!     println!("edited {} files", report.edited.len());
//!     Ok(())
//! }
//! ```

mod apply;
mod classify;
mod error;
mod locate;
mod parser;
mod session;
mod types;

pub use apply::{apply_file_edit, has_markers};
pub use classify::{classify, collapse_unchanged};
pub use error::{EditError, Result};
pub use locate::{find_unique_match, Direction};
pub use parser::{parse_lines, parse_str, parse_stream, Parser};
pub use session::{EditReport, EditSession, FileFailure};
pub use types::{
    AnchorPair, BlockType, Chunk, ClassifiedChunk, ClassifiedFileEdit, FileEdit, TAG_PREFIX,
};
