//! Markdown code-fence removal.
//!
//! Generated scripts usually arrive wrapped as
//! ```` ```python … ``` ````. Display and export both want the inner
//! text, so the fence is peeled off before anything else runs.

/// Strips one enclosing code fence, if present.
///
/// Removes a leading fence line (`` ``` `` plus an optional language tag)
/// and a trailing `` ``` `` marker, then trims surrounding blank lines.
/// Only the outermost anchors are eligible: a fence sequence somewhere
/// inside the content stays put. Text without a complete fence pair is
/// returned unchanged, which also makes the function idempotent.
pub fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return text;
    };

    // Opening line: fence marker plus optional language tag.
    let Some(newline) = rest.find('\n') else {
        // A single line of backticks has no inner content to expose.
        return text;
    };
    let tag = rest[..newline].trim();
    if tag.contains('`') {
        return text;
    }

    let body = &rest[newline + 1..];

    // The closing marker must sit on its own line at the very end.
    let Some(inner) = body.strip_suffix("```") else {
        return text;
    };
    if !inner.is_empty() && !inner.ends_with('\n') {
        return text;
    }

    trim_blank_lines(inner)
}

/// Drops fully-blank lines at both ends without touching indentation of
/// the first real line.
fn trim_blank_lines(text: &str) -> &str {
    let mut start = 0;
    let mut end = text.len();

    while let Some(newline) = text[start..end].find('\n') {
        if text[start..start + newline].trim().is_empty() {
            start += newline + 1;
        } else {
            break;
        }
    }

    while let Some(newline) = text[start..end].rfind('\n') {
        if text[start + newline + 1..end].trim().is_empty() {
            end = start + newline;
        } else {
            break;
        }
    }

    // A single blank line with no newline at all.
    if text[start..end].trim().is_empty() {
        return "";
    }

    &text[start..end]
}
