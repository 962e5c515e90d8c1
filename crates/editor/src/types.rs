use serde::{Deserialize, Serialize};

/// Prefix shared by every tag in the edit stream and every transient
/// marker written into files during apply.
pub const TAG_PREFIX: &str = "@@ALK";

/// One contiguous span of a file's tagged edit description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Chunk {
    /// Declares "the following original region is untouched"; carries no
    /// text
    Unchanged {
        /// Per-file id, assigned in stream order
        id: u32,
    },

    /// Verbatim text that must appear in the final file at this position
    Replacement {
        /// Per-file id, assigned in stream order
        id: u32,
        /// Replacement text, one entry per line
        lines: Vec<String>,
    },
}

impl Chunk {
    /// Per-file chunk id
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Unchanged { id } | Self::Replacement { id, .. } => *id,
        }
    }

    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged { .. })
    }
}

/// One named target file plus its ordered chunk sequence, as parsed.
///
/// A single stream may contain several edits for the same path; each is
/// applied independently and in stream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEdit {
    /// Target path, possibly relative to the session root
    pub path: String,

    /// Ordered chunks describing the file top to bottom
    pub chunks: Vec<Chunk>,
}

/// Structural position of a chunk within its file edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Sole replacement chunk; replaces the whole file, no anchors
    Full,
    /// Replacement starting at the top of the file
    Top,
    /// Replacement bounded by unchanged regions on both sides
    Middle,
    /// Replacement ending at the bottom of the file
    Bottom,
    /// Untouched original region
    Unchanged,
}

/// Synthetic marker pair bounding one replacement span during apply.
///
/// Markers are derived from the chunk id, live on their own lines while
/// the working copy is annotated, and never appear in final output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorPair {
    pub top: String,
    pub bottom: String,
}

impl AnchorPair {
    /// Derive the deterministic marker pair for a chunk id
    #[must_use]
    pub fn for_id(id: u32) -> Self {
        Self {
            top: format!("{TAG_PREFIX}_block{id}_ANCHOR_TOP"),
            bottom: format!("{TAG_PREFIX}_block{id}_ANCHOR_BOTTOM"),
        }
    }
}

/// A chunk labelled with its structural position and, for bounded
/// replacements, the marker pair used during apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedChunk {
    /// Per-file id carried over from parsing
    pub id: u32,

    /// Structural position within the file edit
    pub block_type: BlockType,

    /// Replacement text; empty for unchanged chunks
    pub lines: Vec<String>,

    /// Marker pair for `top`/`middle`/`bottom` chunks; `full` and
    /// `unchanged` chunks carry none
    pub anchors: Option<AnchorPair>,
}

impl ClassifiedChunk {
    /// Classified form of an unchanged chunk
    #[must_use]
    pub const fn unchanged(id: u32) -> Self {
        Self {
            id,
            block_type: BlockType::Unchanged,
            lines: Vec::new(),
            anchors: None,
        }
    }
}

/// One file edit after classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedFileEdit {
    pub path: String,
    pub chunks: Vec<ClassifiedChunk>,
}
