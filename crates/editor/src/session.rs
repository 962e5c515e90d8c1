use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::io::AsyncBufRead;

use crate::apply::apply_file_edit;
use crate::classify::classify;
use crate::error::{EditError, Result};
use crate::parser;
use crate::types::{BlockType, ClassifiedFileEdit, FileEdit};

/// Applies parsed edit streams to files under a root directory.
///
/// Parse and classification errors abort the whole batch before any file
/// is touched; partial interpretation of a malformed stream is unsafe.
/// Anchor and precondition failures abandon only the file they occurred
/// in (the file keeps its pre-edit state, since everything is computed
/// against an in-memory copy); the session continues with the remaining
/// files and reports the failures.
#[derive(Debug, Clone)]
pub struct EditSession {
    root: PathBuf,
}

/// Outcome of one session run
#[derive(Debug, Default, Serialize)]
pub struct EditReport {
    /// Files written successfully, in stream order
    pub edited: Vec<PathBuf>,
    /// Files abandoned with the error that stopped them
    pub failures: Vec<FileFailure>,
}

/// One abandoned file edit
#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub path: String,
    pub error: String,
}

impl EditReport {
    /// True when every file edit was applied
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl EditSession {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Parse a complete in-memory stream and apply every edit it describes
    pub fn apply_str(&self, input: &str) -> Result<EditReport> {
        self.apply_edits(parser::parse_str(input)?)
    }

    /// Parse a live byte stream and apply every edit it describes
    pub async fn apply_stream<R>(&self, reader: R) -> Result<EditReport>
    where
        R: AsyncBufRead + Unpin,
    {
        self.apply_edits(parser::parse_stream(reader).await?)
    }

    /// Apply already-parsed edits, in stream order.
    ///
    /// Several edits naming the same path are applied independently, each
    /// seeing the content the previous one produced.
    pub fn apply_edits(&self, edits: Vec<FileEdit>) -> Result<EditReport> {
        let classified = edits
            .into_iter()
            .map(classify)
            .collect::<Result<Vec<_>>>()?;

        let mut report = EditReport::default();
        for edit in &classified {
            let target = self.resolve(&edit.path);
            match self.apply_one(&target, edit) {
                Ok(()) => {
                    log::info!("edited {}", target.display());
                    report.edited.push(target);
                }
                Err(err) => {
                    log::warn!("abandoning {}: {err}", edit.path);
                    report.failures.push(FileFailure {
                        path: edit.path.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Read-modify-write one file as a unit
    fn apply_one(&self, target: &Path, edit: &ClassifiedFileEdit) -> Result<()> {
        if !target.exists() {
            if edit
                .chunks
                .iter()
                .any(|chunk| chunk.block_type == BlockType::Unchanged)
            {
                return Err(EditError::NewFileHasUnchangedBlock {
                    path: edit.path.clone(),
                });
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, "")?;
        }

        let original = fs::read_to_string(target)?;
        let updated = apply_file_edit(&original, edit)?;
        fs::write(target, updated)?;
        Ok(())
    }
}
