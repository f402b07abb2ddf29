//! Keeps insertions out of double-quoted spans

/// Whether byte `offset` of `text` sits inside a `"..."` span.
///
/// Every `"` toggles the state; there is no escaping and no nesting.
#[must_use]
pub fn inside_quotes(text: &str, offset: usize) -> bool {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'"').count() % 2 == 1
}

/// Move `offset` just past the closing quote when it falls inside a quoted
/// span. An unterminated quote leaves the offset where it was.
#[must_use]
pub fn escape_quoted_span(text: &str, offset: usize) -> usize {
    if !inside_quotes(text, offset) {
        return offset;
    }
    text.get(offset..)
        .and_then(|rest| rest.find('"'))
        .map_or(offset, |closing| offset + closing + 1)
}
