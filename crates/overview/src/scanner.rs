use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Why a file was left out of the overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Matched `.gitignore` or was hidden
    Ignored,
    /// Dependency lock file
    LockFile,
    /// Output of a previous overview run
    Generated,
    /// NUL bytes or a known binary signature in the head of the file
    Binary,
    /// Could not be read as UTF-8 text
    Unreadable,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::LockFile => "lock file",
            Self::Generated => "generated overview",
            Self::Binary => "binary",
            Self::Unreadable => "unreadable",
        }
    }
}

/// One file left out of the overview, with the reason
#[derive(Debug, Clone, serde::Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of one scan: files to include and files left out
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub included: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

const LOCK_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "bun.lockb",
    "pnpm-lock.yaml",
    "Pipfile.lock",
    "poetry.lock",
    "Gemfile.lock",
    "Cargo.lock",
];

/// Extensions of files this tool itself generates; re-reading them into a
/// prompt only confuses the model.
const GENERATED_EXTENSIONS: &[&str] = &[".alk.yaml", ".alk.yml", ".alk.xml"];

const MAX_SNIFF_BYTES: usize = 4096;

/// Magic numbers of common binary formats (JPEG, PNG, GIF, PDF, ZIP,
/// RAR, GZIP)
const BINARY_SIGNATURES: &[&[u8]] = &[
    &[0xFF, 0xD8, 0xFF],
    &[0x89, 0x50, 0x4E, 0x47],
    &[0x47, 0x49, 0x46, 0x38],
    &[0x25, 0x50, 0x44, 0x46],
    &[0x50, 0x4B, 0x03, 0x04],
    &[0x52, 0x61, 0x72, 0x21],
    &[0x1F, 0x8B, 0x08],
];

/// Scanner for collecting overview-worthy files under a project root
pub struct OverviewScanner {
    root: PathBuf,
}

impl OverviewScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Walk the root (`.gitignore` aware) and split files into included
    /// and skipped
    pub fn scan(&self) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            // Honor .gitignore files even when the root is not a git
            // checkout.
            .require_git(false);

        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("failed to read entry: {e}");
                    continue;
                }
            };
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            if let Some(reason) = skip_reason(path) {
                log::debug!("skipping {} ({})", path.display(), reason.as_str());
                outcome.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason,
                });
                continue;
            }

            outcome.included.push(path.to_path_buf());
        }

        outcome.included.sort();
        log::info!("overview will include {} files", outcome.included.len());
        outcome
    }
}

fn skip_reason(path: &Path) -> Option<SkipReason> {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if LOCK_FILES.iter().any(|lock| name == *lock) {
            return Some(SkipReason::LockFile);
        }
        if GENERATED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            return Some(SkipReason::Generated);
        }
    }
    match looks_binary(path) {
        Ok(true) => Some(SkipReason::Binary),
        Ok(false) => None,
        Err(e) => {
            log::warn!("cannot sniff {}: {e}", path.display());
            Some(SkipReason::Unreadable)
        }
    }
}

/// Sniff the head of the file: NUL bytes or a known signature mean binary
fn looks_binary(path: &Path) -> std::io::Result<bool> {
    let mut head = [0u8; MAX_SNIFF_BYTES];
    let mut file = File::open(path)?;
    let mut read = 0;
    while read < head.len() {
        let n = file.read(&mut head[read..])?;
        if n == 0 {
            break;
        }
        read += n;
    }
    let head = &head[..read];

    if head.contains(&0) {
        return Ok(true);
    }
    Ok(BINARY_SIGNATURES.iter().any(|sig| head.starts_with(sig)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn skips_lock_files_and_binaries() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("main.rs"), "fn main() {}\n").unwrap();
        fs::write(temp.path().join("Cargo.lock"), "[[package]]\n").unwrap();
        fs::write(temp.path().join("logo.png"), [0x89, 0x50, 0x4E, 0x47, 0x0D]).unwrap();

        let outcome = OverviewScanner::new(temp.path()).scan();

        assert_eq!(outcome.included.len(), 1);
        assert!(outcome.included[0].ends_with("main.rs"));
        let reasons: Vec<SkipReason> = outcome.skipped.iter().map(|s| s.reason).collect();
        assert!(reasons.contains(&SkipReason::LockFile));
        assert!(reasons.contains(&SkipReason::Binary));
    }

    #[test]
    fn honors_gitignore() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".gitignore"), "secret.txt\n").unwrap();
        fs::write(temp.path().join("secret.txt"), "hidden\n").unwrap();
        fs::write(temp.path().join("visible.txt"), "shown\n").unwrap();

        let outcome = OverviewScanner::new(temp.path()).scan();

        assert!(outcome
            .included
            .iter()
            .all(|p| !p.ends_with("secret.txt")));
        assert!(outcome.included.iter().any(|p| p.ends_with("visible.txt")));
    }

    #[test]
    fn skips_previously_generated_overviews() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("overview.alk.yaml"), "files: []\n").unwrap();
        fs::write(temp.path().join("kept.txt"), "x\n").unwrap();

        let outcome = OverviewScanner::new(temp.path()).scan();

        assert_eq!(outcome.included.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].reason, SkipReason::Generated);
    }

    #[test]
    fn nul_byte_marks_a_file_binary() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("blob.dat");
        fs::write(&path, [b'a', 0, b'b']).unwrap();
        assert!(looks_binary(&path).unwrap());
    }
}
