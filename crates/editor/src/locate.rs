//! Incremental-window unique-match search.
//!
//! Exact line numbers from the model are unreliable and unconstrained
//! substring search risks picking a coincidental duplicate. The search
//! below trusts a window only once it identifies a single location
//! within the searched range, never merely the first location found.

/// Which end of the replacement text supplies the match window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Grow the window from the chunk's leading lines
    Leading,
    /// Grow the window from the chunk's trailing lines
    Trailing,
}

/// Start offsets of every position where `window` matches `haystack`
/// line-for-line
fn find_all_matches(haystack: &[String], window: &[String]) -> Vec<usize> {
    if window.is_empty() || window.len() > haystack.len() {
        return Vec::new();
    }
    (0..=haystack.len() - window.len())
        .filter(|&offset| haystack[offset..offset + window.len()] == window[..])
        .collect()
}

/// Search `haystack` for the single position identified by `needle`.
///
/// Starts with a one-line window taken from the `direction` end of
/// `needle` and grows it one line at a time, up to the full needle. Each
/// window is matched across the entire haystack: exactly one match fixes
/// the position, zero matches end the search unresolved, more than one
/// grows the window.
///
/// Returns the matched start offset for [`Direction::Leading`], or the
/// offset of the window's last matched line for [`Direction::Trailing`].
#[must_use]
pub fn find_unique_match(
    haystack: &[String],
    needle: &[String],
    direction: Direction,
) -> Option<usize> {
    for window_size in 1..=needle.len() {
        let window = match direction {
            Direction::Leading => &needle[..window_size],
            Direction::Trailing => &needle[needle.len() - window_size..],
        };
        match find_all_matches(haystack, window).as_slice() {
            [] => return None,
            [offset] => {
                return Some(match direction {
                    Direction::Leading => *offset,
                    Direction::Trailing => offset + window_size - 1,
                });
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unique_single_line_is_accepted_without_growing() {
        let haystack = lines(&["a", "b", "c", "d"]);
        let needle = lines(&["x", "y", "c"]);
        assert_eq!(
            find_unique_match(&haystack, &needle, Direction::Trailing),
            Some(2)
        );
    }

    #[test]
    fn ambiguous_window_grows_until_unique() {
        // "x" appears three times; the two-line window "b x" only once.
        let haystack = lines(&["x", "a", "x", "b", "x"]);
        let needle = lines(&["new", "b", "x"]);
        assert_eq!(
            find_unique_match(&haystack, &needle, Direction::Trailing),
            Some(4)
        );
    }

    #[test]
    fn zero_matches_end_the_search_unresolved() {
        let haystack = lines(&["a", "b"]);
        let needle = lines(&["nope"]);
        assert_eq!(find_unique_match(&haystack, &needle, Direction::Trailing), None);
    }

    #[test]
    fn still_ambiguous_at_full_needle_is_unresolved() {
        let haystack = lines(&["a", "a", "a", "a"]);
        let needle = lines(&["a", "a"]);
        assert_eq!(find_unique_match(&haystack, &needle, Direction::Trailing), None);
    }

    #[test]
    fn leading_direction_returns_start_offset() {
        let haystack = lines(&["one", "two", "three"]);
        let needle = lines(&["two", "changed"]);
        assert_eq!(
            find_unique_match(&haystack, &needle, Direction::Leading),
            Some(1)
        );
    }

    #[test]
    fn restricting_the_haystack_narrows_leading_matches() {
        // "ctx" appears twice in the full file; searched only before the
        // bottom boundary (index 2), the leading window is unique.
        let haystack = lines(&["ctx", "mid", "end", "ctx", "tail"]);
        let chunk = lines(&["ctx", "replaced", "end"]);
        assert_eq!(
            find_unique_match(&haystack, &chunk, Direction::Leading),
            None
        );
        assert_eq!(
            find_unique_match(&haystack[..2], &chunk, Direction::Leading),
            Some(0)
        );
    }

    proptest! {
        #[test]
        fn proptest_trailing_match_points_at_needle_tail(
            prefix in prop::collection::vec("[a-c]{1,3}", 0..6),
            suffix in prop::collection::vec("[a-c]{1,3}", 0..6),
        ) {
            // A sentinel line that cannot collide with the a-c alphabet.
            let mut haystack: Vec<String> = prefix.clone();
            haystack.push("SENTINEL".to_string());
            haystack.extend(suffix.clone());

            let needle = vec!["SENTINEL".to_string()];
            let found = find_unique_match(&haystack, &needle, Direction::Trailing);
            prop_assert_eq!(found, Some(prefix.len()));
        }

        #[test]
        fn proptest_accepted_window_is_unique_in_haystack(
            haystack in prop::collection::vec("[a-b]", 1..8),
            needle in prop::collection::vec("[a-b]", 1..4),
        ) {
            if let Some(end) = find_unique_match(&haystack, &needle, Direction::Trailing) {
                prop_assert!(end < haystack.len());
                // Reconstruct the accepted window: the smallest trailing
                // window with exactly one match must exist.
                let unique_size = (1..=needle.len()).find(|&size| {
                    find_all_matches(&haystack, &needle[needle.len() - size..]).len() == 1
                });
                prop_assert!(unique_size.is_some());
            }
        }
    }
}
