//! Lexical classification of script text.
//!
//! A single left-to-right scan partitions the input into typed spans. At
//! every position the productions are tried in a fixed priority order:
//!
//! 1. Comment: marker to end of line
//! 2. String: quote to matching unescaped quote
//! 3. Keyword: word-bounded reserved word
//! 4. Type name: word-bounded API name
//! 5. Number: word-bounded digit run, optional fraction
//! 6. Plain: everything else
//!
//! The first match wins and consumes the longest span it can, so
//! keywords, type names and numbers inside a comment or string are part
//! of that comment or string, never classified on their own. The
//! priority order is part of the contract, not an implementation detail.
//!
//! The scan is byte-based. Every delimiter the grammar knows (quotes,
//! comment markers, digits, word characters) is ASCII, so token
//! boundaries always fall on UTF-8 character boundaries; multi-byte
//! characters travel through as plain content.

use crate::token::{Token, TokenKind};
use crate::vocabulary::Vocabulary;

/// Identifier characters: a word boundary is any position adjacent to a
/// byte outside this set, or the start/end of text.
fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Partitions `source` into a contiguous token stream.
///
/// The returned tokens are strictly increasing, non-overlapping and cover
/// `0..source.len()` exactly; `Plain` fills everything the other
/// categories do not claim. The classifier never fails: unterminated
/// literals extend to the end of the text and unknown characters fall
/// through to `Plain`.
pub fn classify(source: &str, vocab: &Vocabulary) -> Vec<Token> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let marker = vocab.comment_marker.as_bytes();

    let mut tokens = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < len {
        // 1. Comment: marker to end of line, newline excluded.
        if !marker.is_empty() && bytes[i..].starts_with(marker) {
            flush_plain(&mut tokens, plain_start, i);
            let end = bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(len, |offset| i + offset);
            tokens.push(Token::new(TokenKind::Comment, i, end));
            i = end;
            plain_start = i;
            continue;
        }

        let byte = bytes[i];

        // 2. String: quote to the same unescaped quote, or end of text.
        if byte.is_ascii() && vocab.is_string_quote(byte as char) {
            flush_plain(&mut tokens, plain_start, i);
            let end = scan_string(bytes, i);
            tokens.push(Token::new(TokenKind::String, i, end));
            i = end;
            plain_start = i;
            continue;
        }

        // 3–5. Word-bounded productions. Consuming the whole identifier
        // run up front is what enforces the boundary rule: `def` inside
        // `defined` is part of a longer run and never looked up alone.
        if is_word_byte(byte) {
            let start = i;
            let mut end = i + 1;
            while end < len && is_word_byte(bytes[end]) {
                end += 1;
            }
            let word = &source[start..end];

            let kind = if vocab.is_keyword(word) {
                Some(TokenKind::Keyword)
            } else if vocab.is_type_name(word) {
                Some(TokenKind::TypeName)
            } else if word.bytes().all(|b| b.is_ascii_digit()) {
                end = scan_fraction(bytes, end);
                Some(TokenKind::Number)
            } else {
                // Unreserved identifier, including digit-bearing names
                // like `var1`: stays plain as a whole.
                None
            };

            if let Some(kind) = kind {
                flush_plain(&mut tokens, plain_start, start);
                tokens.push(Token::new(kind, start, end));
                plain_start = end;
            }
            i = end;
            continue;
        }

        // 6. Plain: accumulate until something else matches.
        i += 1;
    }

    flush_plain(&mut tokens, plain_start, len);
    tokens
}

/// Emits the pending plain run, if any.
fn flush_plain(tokens: &mut Vec<Token>, start: usize, end: usize) {
    if start < end {
        tokens.push(Token::new(TokenKind::Plain, start, end));
    }
}

/// Scans a string literal opened at `start`, returning the exclusive end.
///
/// A quote preceded by an odd number of consecutive backslashes is
/// content; skipping two bytes on every backslash gets that count right
/// without look-behind. An unterminated literal runs to the end of the
/// text.
fn scan_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let len = bytes.len();
    let mut i = start + 1;

    while i < len {
        if bytes[i] == b'\\' {
            i = (i + 2).min(len);
        } else if bytes[i] == quote {
            return i + 1;
        } else {
            i += 1;
        }
    }
    len
}

/// Extends an all-digit run past a single `.` followed by more digits.
///
/// The fractional digits must themselves end at a word boundary; `1.5x`
/// keeps only `1` as the number.
fn scan_fraction(bytes: &[u8], end: usize) -> usize {
    let len = bytes.len();
    if end >= len || bytes[end] != b'.' {
        return end;
    }

    let mut i = end + 1;
    while i < len && is_word_byte(bytes[i]) {
        i += 1;
    }
    let fraction = &bytes[end + 1..i];
    if !fraction.is_empty() && fraction.iter().all(u8::is_ascii_digit) {
        i
    } else {
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::revit_python()
    }

    fn kinds(source: &str) -> Vec<(TokenKind, &str)> {
        classify(source, &vocab())
            .into_iter()
            .map(|t| (t.kind, t.slice(source)))
            .collect()
    }

    /// Tokens must partition the input: increasing, gapless, complete.
    fn assert_partition(source: &str) {
        let tokens = classify(source, &vocab());
        let mut cursor = 0;
        for token in &tokens {
            assert_eq!(token.start, cursor, "gap or overlap in {:?}", source);
            assert!(token.start < token.end, "empty token in {:?}", source);
            cursor = token.end;
        }
        assert_eq!(cursor, source.len(), "tail not covered in {:?}", source);
    }

    #[test]
    fn test_empty_input() {
        assert!(classify("", &vocab()).is_empty());
    }

    #[test]
    fn test_keyword_at_word_boundary() {
        assert_eq!(
            kinds("def f():"),
            vec![
                (TokenKind::Keyword, "def"),
                (TokenKind::Plain, " f():"),
            ]
        );
    }

    #[test]
    fn test_keyword_not_matched_inside_identifier() {
        // `defined` contains `def` but is one unreserved identifier, and
        // adjacent plain content coalesces into a single span.
        let tokens = kinds("defined = 1");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Plain, "defined = "),
                (TokenKind::Number, "1"),
            ]
        );
    }

    #[test]
    fn test_type_name() {
        assert_eq!(
            kinds("t = Transaction(doc)"),
            vec![
                (TokenKind::Plain, "t = "),
                (TokenKind::TypeName, "Transaction"),
                (TokenKind::Plain, "("),
                (TokenKind::TypeName, "doc"),
                (TokenKind::Plain, ")"),
            ]
        );
    }

    #[test]
    fn test_comment_to_end_of_line() {
        assert_eq!(
            kinds("x = 1 # def class\ny = 2"),
            vec![
                (TokenKind::Plain, "x = "),
                (TokenKind::Number, "1"),
                (TokenKind::Plain, " "),
                (TokenKind::Comment, "# def class"),
                (TokenKind::Plain, "\ny = "),
                (TokenKind::Number, "2"),
            ]
        );
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        assert_eq!(kinds("# trailing"), vec![(TokenKind::Comment, "# trailing")]);
    }

    #[test]
    fn test_string_with_escaped_quotes() {
        // The escaped quotes are content; one literal spans the lot.
        let source = r#"print("He said \"hi\"")"#;
        assert_eq!(
            kinds(source),
            vec![
                (TokenKind::Keyword, "print"),
                (TokenKind::Plain, "("),
                (TokenKind::String, r#""He said \"hi\"""#),
                (TokenKind::Plain, ")"),
            ]
        );
    }

    #[test]
    fn test_even_backslash_count_terminates() {
        // Two backslashes escape each other, so the following quote ends
        // the literal.
        let source = r#""a\\" + x"#;
        let tokens = kinds(source);
        assert_eq!(tokens[0], (TokenKind::String, r#""a\\""#));
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        assert_eq!(
            kinds("x = \"oops"),
            vec![(TokenKind::Plain, "x = "), (TokenKind::String, "\"oops")]
        );
    }

    #[test]
    fn test_adjacent_quotes_of_different_kind() {
        // `"'"` then `'x'`: independent literals, not nested.
        let source = "\"a\"'b'";
        assert_eq!(
            kinds(source),
            vec![(TokenKind::String, "\"a\""), (TokenKind::String, "'b'")]
        );
    }

    #[test]
    fn test_comment_marker_inside_string_is_content() {
        let source = "\"see # here\" # real";
        assert_eq!(
            kinds(source),
            vec![
                (TokenKind::String, "\"see # here\""),
                (TokenKind::Plain, " "),
                (TokenKind::Comment, "# real"),
            ]
        );
    }

    #[test]
    fn test_quote_inside_comment_is_content() {
        let source = "# it's fine";
        assert_eq!(kinds(source), vec![(TokenKind::Comment, "# it's fine")]);
    }

    #[test]
    fn test_integer_and_float() {
        assert_eq!(
            kinds("a = 3 / 0.3048"),
            vec![
                (TokenKind::Plain, "a = "),
                (TokenKind::Number, "3"),
                (TokenKind::Plain, " / "),
                (TokenKind::Number, "0.3048"),
            ]
        );
    }

    #[test]
    fn test_digits_inside_identifier_stay_plain() {
        assert_eq!(
            kinds("var1 = 2"),
            vec![
                (TokenKind::Plain, "var1 = "),
                (TokenKind::Number, "2"),
            ]
        );
    }

    #[test]
    fn test_trailing_letter_invalidates_fraction() {
        assert_eq!(
            kinds("1.5x"),
            vec![
                (TokenKind::Number, "1"),
                (TokenKind::Plain, ".5x"),
            ]
        );
    }

    #[test]
    fn test_number_without_second_fraction() {
        // Only a single dot participates: `1.2.3` is number, dot, number.
        assert_eq!(
            kinds("1.2.3"),
            vec![
                (TokenKind::Number, "1.2"),
                (TokenKind::Plain, "."),
                (TokenKind::Number, "3"),
            ]
        );
    }

    #[test]
    fn test_partition_property_on_samples() {
        for source in [
            "",
            "def f():\n    return 1\n",
            "x = \"unterminated",
            "# only a comment",
            "émoji = 'ok' # naïve",
            "\\\\\\\"",
            "```python\nnot stripped here\n```",
        ] {
            assert_partition(source);
        }
    }

    #[test]
    fn test_multibyte_content_stays_plain() {
        let source = "ancho = 3.5 # metros → pies";
        assert_partition(source);
        let tokens = classify(source, &vocab());
        let comment = tokens.last().unwrap();
        assert_eq!(comment.kind, TokenKind::Comment);
        assert_eq!(comment.slice(source), "# metros → pies");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Tokens partition [0, len): no gaps, no overlaps.
            #[test]
            fn prop_tokens_partition_input(source in ".*") {
                let tokens = classify(&source, &vocab());
                let mut cursor = 0;
                for token in &tokens {
                    prop_assert_eq!(token.start, cursor);
                    prop_assert!(token.start < token.end);
                    cursor = token.end;
                }
                prop_assert_eq!(cursor, source.len());
            }

            /// Concatenating every token slice reproduces the input.
            #[test]
            fn prop_tokens_lossless(source in ".*") {
                let tokens = classify(&source, &vocab());
                let rebuilt: String =
                    tokens.iter().map(|t| t.slice(&source)).collect();
                prop_assert_eq!(rebuilt, source);
            }

            /// Comments and strings never start inside one another.
            #[test]
            fn prop_no_empty_tokens(source in ".*") {
                for token in classify(&source, &vocab()) {
                    prop_assert!(!token.is_empty());
                }
            }
        }
    }
}
