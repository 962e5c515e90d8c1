use thiserror::Error;

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditError>;

/// Errors that can occur while parsing or applying an edit stream
#[derive(Error, Debug)]
pub enum EditError {
    /// FILE open tag without a resolvable path attribute
    #[error("FILE tag is missing its path attribute")]
    MissingPath,

    /// FILE open tag inside an already-open file section
    #[error("nested FILE sections are not supported")]
    NestedSection,

    /// FILE close tag outside any file section
    #[error("unexpected FILE end tag")]
    UnexpectedClose,

    /// Input ended while a file section was still open
    #[error("FILE section is not closed")]
    UnclosedSection,

    /// Replacement chunk at a position the adjacency rules forbid
    #[error("misplaced block in file {path} at chunk index {index}")]
    MisplacedBlock { path: String, index: usize },

    /// Target file already carries the marker syntax, so edits were
    /// probably applied once already
    #[error("file {path} already contains @@ALK markers")]
    MarkersAlreadyPresent { path: String },

    /// A boundary could not be located, or its marker vanished before
    /// substitution
    #[error("anchor \"{marker}\" not found in file {path}")]
    AnchorNotFound { path: String, marker: String },

    /// A file that does not exist yet has no original content to leave
    /// unchanged
    #[error("new file {path} declares an unchanged block")]
    NewFileHasUnchangedBlock { path: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditError {
    /// Create an anchor-not-found error
    pub fn anchor_not_found(path: impl Into<String>, marker: impl Into<String>) -> Self {
        Self::AnchorNotFound {
            path: path.into(),
            marker: marker.into(),
        }
    }
}
