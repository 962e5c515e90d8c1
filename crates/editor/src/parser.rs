use regex::Regex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::{EditError, Result};
use crate::types::{Chunk, FileEdit};

const OPEN_TAG: &str = "@@ALK<FILE";
const CLOSE_TAG: &str = "@@ALK</FILE>";
const NO_CHANGE_TAG: &str = "@@ALK<NO-CHANGE />";

/// Streaming parser for the tagged edit syntax.
///
/// Push lines as they become available and call [`Parser::finish`] once
/// the stream ends. The transport may fragment the underlying bytes
/// arbitrarily; only line boundaries matter here, and the caller resolves
/// those (see [`parse_stream`] for the async byte-stream entry point).
///
/// Lines outside any file section are ignored. Whitespace around tags is
/// trimmed before matching; content lines are kept verbatim.
#[derive(Debug)]
pub struct Parser {
    files: Vec<FileEdit>,
    current: Option<PendingFile>,
    path_re: Regex,
}

#[derive(Debug)]
struct PendingFile {
    path: String,
    chunks: Vec<Chunk>,
    /// Replacement chunk being accumulated, created lazily on the first
    /// content line after an unchanged marker or file start
    pending: Option<(u32, Vec<String>)>,
    counter: u32,
}

impl PendingFile {
    fn next_id(&mut self) -> u32 {
        self.counter += 1;
        self.counter
    }

    fn flush_pending(&mut self) {
        if let Some((id, lines)) = self.pending.take() {
            self.chunks.push(Chunk::Replacement { id, lines });
        }
    }

    fn into_file_edit(mut self) -> FileEdit {
        self.flush_pending();
        FileEdit {
            path: self.path,
            chunks: self.chunks,
        }
    }
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            current: None,
            path_re: Regex::new(r#"path="([^"]+)""#).expect("static pattern"),
        }
    }

    /// Consume one line of the stream
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        let trimmed = line.trim();

        if trimmed.starts_with(OPEN_TAG) {
            if self.current.is_some() {
                return Err(EditError::NestedSection);
            }
            let path = self
                .path_re
                .captures(trimmed)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .ok_or(EditError::MissingPath)?;
            self.current = Some(PendingFile {
                path,
                chunks: Vec::new(),
                pending: None,
                counter: 0,
            });
            return Ok(());
        }

        if trimmed == CLOSE_TAG {
            let file = self.current.take().ok_or(EditError::UnexpectedClose)?;
            self.files.push(file.into_file_edit());
            return Ok(());
        }

        let Some(file) = self.current.as_mut() else {
            // Prose before the first open tag or between sections.
            return Ok(());
        };

        if trimmed == NO_CHANGE_TAG {
            file.flush_pending();
            let id = file.next_id();
            file.chunks.push(Chunk::Unchanged { id });
        } else {
            if file.pending.is_none() {
                let id = file.next_id();
                file.pending = Some((id, Vec::new()));
            }
            if let Some((_, lines)) = file.pending.as_mut() {
                lines.push(line.to_string());
            }
        }
        Ok(())
    }

    /// Finalize the stream and hand back the parsed file edits
    pub fn finish(self) -> Result<Vec<FileEdit>> {
        if self.current.is_some() {
            return Err(EditError::UnclosedSection);
        }
        Ok(self.files)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a complete in-memory stream
pub fn parse_str(input: &str) -> Result<Vec<FileEdit>> {
    let mut parser = Parser::new();
    for line in input.lines() {
        parser.push_line(line)?;
    }
    parser.finish()
}

/// Parse lines pulled from a fallible source such as
/// [`std::io::BufRead::lines`]
pub fn parse_lines<I>(lines: I) -> Result<Vec<FileEdit>>
where
    I: IntoIterator<Item = std::io::Result<String>>,
{
    let mut parser = Parser::new();
    for line in lines {
        parser.push_line(&line?)?;
    }
    parser.finish()
}

/// Parse a live byte stream, resolving line boundaries as data arrives.
///
/// Suitable for network-streamed LLM responses: a tag or content line may
/// reach the reader split across any number of transport units.
pub async fn parse_stream<R>(reader: R) -> Result<Vec<FileEdit>>
where
    R: AsyncBufRead + Unpin,
{
    let mut parser = Parser::new();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        parser.push_line(&line)?;
    }
    parser.finish()
}
