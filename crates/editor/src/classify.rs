use crate::error::{EditError, Result};
use crate::types::{AnchorPair, BlockType, Chunk, ClassifiedChunk, ClassifiedFileEdit, FileEdit};

/// Collapse runs of consecutive unchanged chunks into their first marker.
///
/// A no-op span is a no-op span regardless of how many markers described
/// it. Idempotent.
#[must_use]
pub fn collapse_unchanged(chunks: Vec<Chunk>) -> Vec<Chunk> {
    let mut out: Vec<Chunk> = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        if chunk.is_unchanged() && out.last().is_some_and(Chunk::is_unchanged) {
            continue;
        }
        out.push(chunk);
    }
    out
}

/// Label every chunk of one file edit with its structural position and
/// assign marker pairs to bounded replacements.
///
/// A sole replacement chunk replaces the whole file and needs no anchors.
/// Otherwise the first chunk may start at the top, the last may end at
/// the bottom, and an interior replacement is only valid between two
/// unchanged regions.
pub fn classify(edit: FileEdit) -> Result<ClassifiedFileEdit> {
    let FileEdit { path, chunks } = edit;
    let chunks = collapse_unchanged(chunks);

    if chunks.len() == 1 {
        if let Chunk::Replacement { id, lines } = &chunks[0] {
            return Ok(ClassifiedFileEdit {
                path,
                chunks: vec![ClassifiedChunk {
                    id: *id,
                    block_type: BlockType::Full,
                    lines: lines.clone(),
                    anchors: None,
                }],
            });
        }
    }

    let last = chunks.len().saturating_sub(1);
    let mut out = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        match chunk {
            Chunk::Unchanged { id } => out.push(ClassifiedChunk::unchanged(*id)),
            Chunk::Replacement { id, lines } => {
                let block_type = if index == 0 {
                    BlockType::Top
                } else if index == last {
                    BlockType::Bottom
                } else if chunks[index - 1].is_unchanged() && chunks[index + 1].is_unchanged() {
                    BlockType::Middle
                } else {
                    return Err(EditError::MisplacedBlock { path, index });
                };
                out.push(ClassifiedChunk {
                    id: *id,
                    block_type,
                    lines: lines.clone(),
                    anchors: Some(AnchorPair::for_id(*id)),
                });
            }
        }
    }

    Ok(ClassifiedFileEdit { path, chunks: out })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn replacement(id: u32, lines: &[&str]) -> Chunk {
        Chunk::Replacement {
            id,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn edit(chunks: Vec<Chunk>) -> FileEdit {
        FileEdit {
            path: "test.txt".to_string(),
            chunks,
        }
    }

    #[test]
    fn collapse_keeps_first_of_each_run() {
        let chunks = vec![
            Chunk::Unchanged { id: 1 },
            Chunk::Unchanged { id: 2 },
            replacement(3, &["line1"]),
            Chunk::Unchanged { id: 4 },
            Chunk::Unchanged { id: 5 },
            replacement(6, &["line2"]),
        ];
        let collapsed = collapse_unchanged(chunks);
        assert_eq!(
            collapsed.iter().map(Chunk::id).collect::<Vec<_>>(),
            vec![1, 3, 4, 6]
        );
    }

    #[test]
    fn collapse_is_idempotent() {
        let chunks = vec![
            replacement(1, &["a"]),
            Chunk::Unchanged { id: 2 },
            Chunk::Unchanged { id: 3 },
            replacement(4, &["b"]),
        ];
        let once = collapse_unchanged(chunks);
        let twice = collapse_unchanged(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn single_replacement_is_full_regardless_of_content() {
        let classified = classify(edit(vec![replacement(1, &["line1", "line2"])])).unwrap();
        assert_eq!(classified.chunks.len(), 1);
        assert_eq!(classified.chunks[0].block_type, BlockType::Full);
        assert_eq!(classified.chunks[0].anchors, None);
    }

    #[test]
    fn identifies_top_middle_and_bottom() {
        let classified = classify(edit(vec![
            replacement(1, &["top"]),
            Chunk::Unchanged { id: 2 },
            replacement(3, &["middle"]),
            Chunk::Unchanged { id: 4 },
            replacement(5, &["bottom"]),
        ]))
        .unwrap();
        let types: Vec<BlockType> = classified.chunks.iter().map(|c| c.block_type).collect();
        assert_eq!(
            types,
            vec![
                BlockType::Top,
                BlockType::Unchanged,
                BlockType::Middle,
                BlockType::Unchanged,
                BlockType::Bottom,
            ]
        );
    }

    #[test]
    fn top_and_bottom_both_receive_anchor_pairs() {
        let classified = classify(edit(vec![
            replacement(1, &["top"]),
            Chunk::Unchanged { id: 2 },
            replacement(3, &["bottom"]),
        ]))
        .unwrap();
        assert!(classified.chunks[0].anchors.is_some());
        assert!(classified.chunks[2].anchors.is_some());
        assert_eq!(classified.chunks[1].anchors, None);
    }

    #[test]
    fn interior_adjacent_replacements_are_misplaced() {
        let result = classify(edit(vec![
            replacement(1, &["top"]),
            replacement(2, &["invalid"]),
            Chunk::Unchanged { id: 3 },
            replacement(4, &["bottom"]),
        ]));
        assert!(matches!(
            result,
            Err(EditError::MisplacedBlock { index: 1, .. })
        ));
    }

    #[test]
    fn only_unchanged_chunks_classify_cleanly() {
        let classified = classify(edit(vec![
            Chunk::Unchanged { id: 1 },
            Chunk::Unchanged { id: 2 },
        ]))
        .unwrap();
        // Collapsed to a single unchanged chunk.
        assert_eq!(classified.chunks.len(), 1);
        assert_eq!(classified.chunks[0].block_type, BlockType::Unchanged);
    }

    #[test]
    fn empty_chunk_list_stays_empty() {
        let classified = classify(edit(Vec::new())).unwrap();
        assert!(classified.chunks.is_empty());
    }
}
