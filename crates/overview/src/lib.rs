//! # ALK Overview
//!
//! Serializes a project's text files into a single document to paste
//! into a model prompt. The walk honors `.gitignore`, and lock files,
//! binaries, and previously generated overviews are left out so the
//! prompt stays useful.

mod render;
mod scanner;

pub use render::{OverviewFile, OverviewFormat, ProjectOverview};
pub use scanner::{OverviewScanner, ScanOutcome, SkipReason, SkippedFile};

use std::fs;
use std::path::Path;

use anyhow::Context;

/// An overview plus everything the scan left out
#[derive(Debug)]
pub struct OverviewReport {
    pub overview: ProjectOverview,
    pub skipped: Vec<SkippedFile>,
}

/// Scan `root` and collect every included file's content
pub fn generate_overview(root: impl AsRef<Path>) -> anyhow::Result<OverviewReport> {
    let root = root.as_ref();
    let ScanOutcome {
        included,
        mut skipped,
    } = OverviewScanner::new(root).scan();

    let mut files = Vec::with_capacity(included.len());
    for path in included {
        let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        match fs::read_to_string(&path) {
            Ok(content) => files.push(OverviewFile {
                path: rel.to_string_lossy().replace('\\', "/"),
                content,
            }),
            Err(e) => {
                log::warn!("cannot read {}: {e}", path.display());
                skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::Unreadable,
                });
            }
        }
    }

    let root = root
        .canonicalize()
        .with_context(|| format!("invalid project root {}", root.display()))?;
    Ok(OverviewReport {
        overview: ProjectOverview {
            root: root.to_string_lossy().into_owned(),
            files,
        },
        skipped,
    })
}
