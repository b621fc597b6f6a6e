//! Splitting of an input line into pipe-separated segments.
//!
//! `|` only separates commands here: each segment runs on its own, with its
//! own redirection, and no data flows from one segment to the next.

use crate::tokenizer::is_separator;

/// Maximum number of segments taken from one line. Anything after the last
/// kept segment is discarded without an error.
pub const MAX_SEGMENTS: usize = 10;

/// Split `line` on `|` into at most `max_segments` segments.
///
/// Leading ASCII whitespace is stripped from every segment, trailing whitespace is
/// kept. Zero-length pieces (as in `a||b`, or around a leading or trailing
/// `|`) are not segments and do not count toward the limit; a piece made
/// only of whitespace yields an empty segment.
pub fn split(line: &str, max_segments: usize) -> Vec<&str> {
    line.split('|')
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.trim_start_matches(is_separator))
        .take(max_segments)
        .collect()
}
