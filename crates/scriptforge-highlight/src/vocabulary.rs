//! Grammar vocabulary the classifier is parameterized by.
//!
//! Reserved words and type names are explicit configuration rather than
//! module-level constants, so the same classifier can serve a different
//! grammar without code changes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Python-flavoured keywords understood by the default grammar.
fn python_keywords() -> &'static [&'static str] {
    &[
        "def", "class", "import", "from", "return", "if", "else", "elif",
        "try", "except", "for", "in", "while", "as", "print", "pass",
        "with", "global", "lambda",
    ]
}

/// Revit API and IronPython names highlighted as types.
fn revit_type_names() -> &'static [&'static str] {
    &[
        "Transaction", "doc", "uidoc", "TaskDialog", "Level", "Wall",
        "FilteredElementCollector", "XYZ", "Line", "Element", "Parameter",
        "BuiltInParameter", "__revit__", "List",
    ]
}

/// The configurable sets of reserved identifiers a classification run
/// uses, plus the comment and string delimiters of the grammar.
///
/// A `Vocabulary` is immutable for the duration of a classification call.
/// `keywords` and `type_names` are kept disjoint by construction of the
/// defaults; an identifier present in both sets classifies as a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Marker that starts a to-end-of-line comment
    pub comment_marker: String,

    /// Characters that open (and close) a string literal
    pub string_quotes: Vec<char>,

    /// Reserved words of the grammar
    pub keywords: HashSet<String>,

    /// Fixed API type-name vocabulary
    pub type_names: HashSet<String>,
}

impl Vocabulary {
    /// The grammar the application ships with: Python as written for the
    /// Revit API (pyRevit / Revit Python Shell).
    pub fn revit_python() -> Self {
        Self {
            comment_marker: "#".to_string(),
            string_quotes: vec!['"', '\''],
            keywords: python_keywords().iter().map(|s| s.to_string()).collect(),
            type_names: revit_type_names().iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns true if `word` is a reserved word.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Returns true if `word` is a known type name.
    pub fn is_type_name(&self, word: &str) -> bool {
        self.type_names.contains(word)
    }

    /// Returns true if `ch` opens a string literal.
    pub fn is_string_quote(&self, ch: char) -> bool {
        self.string_quotes.contains(&ch)
    }

    /// Extends the reserved-word set, e.g. from user configuration.
    pub fn extend_keywords<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(words.into_iter().map(Into::into));
    }

    /// Extends the type-name set, e.g. from user configuration.
    pub fn extend_type_names<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_names.extend(words.into_iter().map(Into::into));
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::revit_python()
    }
}
