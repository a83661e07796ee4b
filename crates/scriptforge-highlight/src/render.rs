//! Token stream to markup rendering.

use serde::{Deserialize, Serialize};

use crate::token::{Token, TokenKind};

/// Display classes for each non-plain token kind.
///
/// The defaults match the dark code panel the application ships with;
/// all of them can be overridden from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Class for comment spans
    pub comment: String,

    /// Class for string literal spans
    pub string: String,

    /// Class for reserved-word spans
    pub keyword: String,

    /// Class for API type-name spans
    pub type_name: String,

    /// Class for numeric literal spans
    pub number: String,
}

impl Theme {
    /// Returns the class for `kind`, or `None` for plain content.
    pub fn class(&self, kind: TokenKind) -> Option<&str> {
        match kind {
            TokenKind::Comment => Some(&self.comment),
            TokenKind::String => Some(&self.string),
            TokenKind::Keyword => Some(&self.keyword),
            TokenKind::TypeName => Some(&self.type_name),
            TokenKind::Number => Some(&self.number),
            TokenKind::Plain => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            comment: "text-slate-500 italic".to_string(),
            string: "text-green-400".to_string(),
            keyword: "text-pink-400 font-semibold".to_string(),
            type_name: "text-blue-400 font-semibold".to_string(),
            number: "text-orange-400".to_string(),
        }
    }
}

/// Renders a token stream over its (already escaped) source text.
///
/// Plain tokens are emitted verbatim; every other token is wrapped in
/// exactly one `<span class="…">…</span>` pair. Tag pairs never nest,
/// and stripping them back out reproduces the escaped input exactly.
pub fn render(source: &str, tokens: &[Token], theme: &Theme) -> String {
    // Wrapper overhead is ~30 bytes per classified token.
    let mut markup = String::with_capacity(source.len() + tokens.len() * 32);

    for token in tokens {
        let text = token.slice(source);
        match theme.class(token.kind) {
            Some(class) => {
                markup.push_str("<span class=\"");
                markup.push_str(class);
                markup.push_str("\">");
                markup.push_str(text);
                markup.push_str("</span>");
            }
            None => markup.push_str(text),
        }
    }
    markup
}
