//! # Scriptforge Highlight
//!
//! Syntax coloring for generated Python scripts.
//!
//! ## Pipeline
//!
//! ```text
//! raw provider text
//!   │  strip_fence      remove the enclosing ``` markers
//!   ▼
//! script text
//!   │  escape_markup    &, <, > become entities (exactly once)
//!   ▼
//! escaped text
//!   │  classify         one left-to-right scan → typed spans
//!   ▼
//! token stream
//!   │  render           wrap non-plain spans in class-tagged <span>s
//!   ▼
//! markup
//! ```
//!
//! The whole pipeline is a pure function of the input text, the
//! [`Vocabulary`] and the [`Theme`]: no state survives a call, so it is
//! safe to invoke from any number of callers concurrently. There are no
//! error cases: malformed input degrades to deterministic output
//! (unterminated strings run to the end of the text, unknown characters
//! stay plain, a broken fence is left alone).

pub mod classifier;
pub mod escape;
pub mod fence;
pub mod render;
pub mod token;
pub mod vocabulary;

pub use classifier::classify;
pub use escape::escape_markup;
pub use fence::strip_fence;
pub use render::{Theme, render};
pub use token::{Token, TokenKind};
pub use vocabulary::Vocabulary;

/// Runs the full strip → escape → classify → render pipeline.
///
/// This is the single place the escaper is invoked: callers hand in raw
/// text (fence-wrapped or not) and receive markup in which every `<`,
/// `>` and `&` of the original is entity-encoded and each classified
/// span carries its theme class.
pub fn highlight(source: &str, vocab: &Vocabulary, theme: &Theme) -> String {
    let stripped = strip_fence(source);
    let escaped = escape_markup(stripped);
    let tokens = classify(&escaped, vocab);
    tracing::trace!(
        input_len = source.len(),
        tokens = tokens.len(),
        "classified script"
    );
    render(&escaped, &tokens, theme)
}
