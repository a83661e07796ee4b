//! Entity escaping for markup-significant characters.

/// Replaces `&`, `<` and `>` with their entity forms.
///
/// Runs exactly once, before classification, so that token offsets are
/// computed against the escaped text and wrapper tags inserted later are
/// never re-escaped. The output of this function must not be fed back in:
/// double-escaping corrupts the content, and the pipeline guards against
/// it by having a single call site.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
