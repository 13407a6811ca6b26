//! Case-insensitive substring matching and span splitting.
//!
//! All positions are byte offsets into the original text and always fall on
//! char boundaries, so callers can slice with them directly. Matching folds
//! case per char, which means a match can be longer or shorter in bytes than
//! the term it was found with.

use std::ops::Range;

/// A contiguous piece of a line, highlighted or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub is_highlighted: bool,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Length in bytes of the match of `term` at the start of `text`, if any.
fn match_at(text: &str, term: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    for expected in term.chars() {
        let (_, actual) = text_chars.next()?;
        if actual != expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(text_chars.next().map_or(text.len(), |(idx, _)| idx))
}

/// Byte range of the first case-insensitive occurrence of `term` at or after `from`.
fn find_from(text: &str, term: &str, from: usize) -> Option<Range<usize>> {
    let tail = &text[from..];
    tail.char_indices()
        .map(|(idx, _)| idx)
        .find_map(|idx| match_at(&tail[idx..], term).map(|len| from + idx..from + idx + len))
}

/// Whether `text` contains `term`, ignoring case. An empty term matches everything.
pub fn contains_ignore_case(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    if text.is_ascii() && term.is_ascii() {
        return text
            .as_bytes()
            .windows(term.len())
            .any(|window| window.eq_ignore_ascii_case(term.as_bytes()));
    }
    find_from(text, term, 0).is_some()
}

/// All non-overlapping case-insensitive occurrences of `term`, scanning left to right.
///
/// The next search starts where the previous match ended, so `"11"` occurs once
/// in `"111"`. An empty term has no occurrences.
pub fn all_index_of(text: &str, term: &str) -> Vec<Range<usize>> {
    let mut matches = Vec::new();
    if term.is_empty() {
        return matches;
    }

    let mut from = 0;
    while from < text.len() {
        match find_from(text, term, from) {
            Some(found) => {
                // Folding can in theory produce a zero-width match; never loop on it.
                from = if found.is_empty() {
                    found.end + text[found.end..].chars().next().map_or(1, char::len_utf8)
                } else {
                    found.end
                };
                if !found.is_empty() {
                    matches.push(found);
                }
            }
            None => break,
        }
    }
    matches
}

/// Split `text` into spans covering `[0, text.len())` exactly once, marking
/// every occurrence of `term` as highlighted.
///
/// An empty term, or a term that never occurs, yields a single plain span.
pub fn cut(text: &str, term: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for found in all_index_of(text, term) {
        if found.start > cursor {
            spans.push(Span {
                start: cursor,
                end: found.start,
                is_highlighted: false,
            });
        }
        spans.push(Span {
            start: found.start,
            end: found.end,
            is_highlighted: true,
        });
        cursor = found.end;
    }

    if cursor < text.len() || spans.is_empty() {
        spans.push(Span {
            start: cursor,
            end: text.len(),
            is_highlighted: false,
        });
    }
    spans
}
