use crate::error::{EditError, Result};
use crate::locate::{find_unique_match, Direction};
use crate::types::{BlockType, ClassifiedFileEdit, TAG_PREFIX};

/// True if any line of `content` carries the tag/marker syntax
#[must_use]
pub fn has_markers(content: &str) -> bool {
    content
        .lines()
        .any(|line| line.trim_start().starts_with(TAG_PREFIX))
}

/// Produce the final content for one classified file edit.
///
/// Runs entirely against in-memory copies in two phases: *plan* locates
/// each bounded chunk's boundaries in the original lines and inserts its
/// marker pair into a working copy, *commit* substitutes every marked
/// span (markers inclusive) with the chunk's own text. Nothing is
/// written to disk here; a failure leaves the caller's content untouched.
pub fn apply_file_edit(original: &str, edit: &ClassifiedFileEdit) -> Result<String> {
    if has_markers(original) {
        return Err(EditError::MarkersAlreadyPresent {
            path: edit.path.clone(),
        });
    }

    // Whole-file replacement: no anchors, no search, original unread.
    if let [chunk] = edit.chunks.as_slice() {
        if chunk.block_type == BlockType::Full {
            return Ok(chunk.lines.join("\n"));
        }
    }

    let annotated = plan_markers(original, edit)?;
    commit(annotated, edit)
}

/// Insert every chunk's marker pair into a working copy of the original
/// lines. Earlier insertions shift later positions; boundaries are
/// located against the pristine original, so the accumulated offset
/// keeps marker positions consistent in increasing source order.
fn plan_markers(original: &str, edit: &ClassifiedFileEdit) -> Result<Vec<String>> {
    let original_lines: Vec<String> = original.split('\n').map(str::to_string).collect();
    let mut annotated = original_lines.clone();
    let mut offset = 0;

    for chunk in &edit.chunks {
        let Some(anchors) = &chunk.anchors else {
            continue;
        };

        // The bottom boundary is searched across the whole file; the top
        // boundary only strictly before it. A `bottom` chunk's end is the
        // file's own end and a `top` chunk's start is the file's own
        // start, so those two need no search to resolve.
        let trailing = find_unique_match(&original_lines, &chunk.lines, Direction::Trailing);
        let bottom = match (trailing, chunk.block_type) {
            (Some(found), _) => found,
            (None, BlockType::Bottom) => original_lines.len() - 1,
            (None, _) => {
                return Err(EditError::anchor_not_found(&edit.path, &anchors.bottom));
            }
        };
        let leading = find_unique_match(&original_lines[..bottom], &chunk.lines, Direction::Leading);
        let top = match (leading, chunk.block_type) {
            (Some(found), _) => found,
            (None, BlockType::Top) => 0,
            (None, _) => {
                return Err(EditError::anchor_not_found(&edit.path, &anchors.top));
            }
        };

        log::debug!(
            "{}: chunk {} anchored at lines {top}..={bottom}",
            edit.path,
            chunk.id
        );
        annotated.insert(top + offset, anchors.top.clone());
        offset += 1;
        annotated.insert(bottom + offset + 1, anchors.bottom.clone());
        offset += 1;
    }

    Ok(annotated)
}

/// Replace each marked span with its chunk text and strip the markers
fn commit(annotated: Vec<String>, edit: &ClassifiedFileEdit) -> Result<String> {
    let mut content = annotated.join("\n");

    for chunk in &edit.chunks {
        let Some(anchors) = &chunk.anchors else {
            continue;
        };
        let start = content
            .find(&anchors.top)
            .ok_or_else(|| EditError::anchor_not_found(&edit.path, &anchors.top))?;
        let end = content
            .find(&anchors.bottom)
            .ok_or_else(|| EditError::anchor_not_found(&edit.path, &anchors.bottom))?;
        content.replace_range(start..end + anchors.bottom.len(), &chunk.lines.join("\n"));
    }

    Ok(content)
}
