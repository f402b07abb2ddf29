//! Mapping an anchor token back to a byte offset in the original text
//!
//! Tokens that carry their source span resolve exactly. Tokens from a
//! tokenizer that rewrote the text (spacing, casing) are located by
//! re-scanning: a cursor walks the original text token by token and the
//! anchor is searched for from wherever the cursor ended up.

use std::ops::Range;

use crate::text::Token;

/// Byte offset just past the anchor word in `text`, or `None` when the
/// anchor cannot be located.
#[must_use]
pub fn anchor_end_offset(text: &str, tokens: &[Token], anchor_index: usize) -> Option<usize> {
    let anchor = tokens.get(anchor_index)?;

    if let Some(span) = &anchor.span {
        let exact = text
            .get(span.clone())
            .is_some_and(|source| eq_ignore_case(source, &anchor.value));
        if exact {
            return Some(span.end);
        }
    }

    rescan(text, tokens, anchor_index)
}

/// Approximate token boundaries: each token advances the cursor by its own
/// length, plus one when the original text has a space right after it.
fn rescan(text: &str, tokens: &[Token], anchor_index: usize) -> Option<usize> {
    let mut cursor = 0;
    for (index, token) in tokens.iter().enumerate() {
        if index == anchor_index {
            return find_ignore_case(text, &token.value, cursor).map(|m| m.end);
        }
        cursor = floor_boundary(text, cursor + token.value.len());
        if text[cursor..].starts_with(' ') {
            cursor += 1;
        }
    }
    None
}

/// Largest char boundary of `text` not after `index`
fn floor_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| chars_eq_ignore_case(x, y))
}

/// Case-insensitive search for `needle` in `haystack`, starting at byte
/// `from`. Returns the matched byte range in `haystack`.
#[must_use]
pub fn find_ignore_case(haystack: &str, needle: &str, from: usize) -> Option<Range<usize>> {
    let from = floor_boundary(haystack, from);
    if needle.is_empty() {
        return Some(from..from);
    }

    haystack[from..].char_indices().find_map(|(i, _)| {
        let start = from + i;
        let mut end = start;
        let mut rest = haystack[start..].chars();
        for expected in needle.chars() {
            let found = rest.next()?;
            if !chars_eq_ignore_case(found, expected) {
                return None;
            }
            end += found.len_utf8();
        }
        Some(start..end)
    })
}
