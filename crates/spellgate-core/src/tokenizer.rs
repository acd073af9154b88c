// Tokenizer: split text into word-like runs and single-character separators.

use crate::segment::Segment;

/// Split `input` into an ordered sequence of segments without losing any
/// character.
///
/// Every maximal run of ASCII letters becomes one word-like segment and every
/// other character becomes a separator segment of its own, so
/// `"it's!"` yields `["it", "'", "s", "!"]`. Concatenating the segment texts
/// in order reproduces `input` exactly. Empty input yields no segments.
///
/// The request boundary only lets ASCII through; non-ASCII characters are
/// still split on character boundaries so the function never panics.
pub fn tokenize(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, c) in input.char_indices() {
        if c.is_ascii_alphabetic() {
            if run_start.is_none() {
                run_start = Some(i);
            }
            continue;
        }
        if let Some(start) = run_start.take() {
            segments.push(Segment::new(&input[start..i]));
        }
        segments.push(Segment::new(&input[i..i + c.len_utf8()]));
    }

    if let Some(start) = run_start {
        segments.push(Segment::new(&input[start..]));
    }

    segments
}
