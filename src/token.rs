//! Token and record representation.
//!
//! A [`Token`] is a word-like unit cut out of the input sentence. An
//! [`Annotation`] is what an annotation provider returns for one token, and an
//! [`AnnotationRecord`] is the final glossed result handed to the display.

use serde::{Deserialize, Serialize};

/// Placeholder used for lemma and part-of-speech when nothing is known
pub const UNKNOWN: &str = "unknown";

/// Suffix appended to a gloss that needs manual review
pub const UNGLOSSED_MARKER: &str = "[?]";

/// A single token from the input sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text as it appeared in the sentence
    pub text: String,

    /// Lemma (base form), only set by an annotation provider
    pub lemma: Option<String>,

    /// Part-of-speech tag, only set by an annotation provider
    pub pos: Option<String>,
}

impl Token {
    /// Create a token with only its surface text
    pub fn with_text(text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            ..Default::default()
        }
    }
}

impl From<Annotation> for Token {
    fn from(a: Annotation) -> Self {
        Token {
            text: a.surface,
            lemma: Some(a.lemma),
            pos: Some(a.pos),
        }
    }
}

/// One (surface, lemma, part-of-speech) triple produced by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub surface: String,
    pub lemma: String,
    pub pos: String,
}

impl Annotation {
    pub fn new(
        surface: impl Into<String>,
        lemma: impl Into<String>,
        pos: impl Into<String>,
    ) -> Self {
        Annotation {
            surface: surface.into(),
            lemma: lemma.into(),
            pos: pos.into(),
        }
    }
}

/// The glossed result for one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Surface text of the token
    pub surface: String,

    /// Lemma, or [`UNKNOWN`]
    pub lemma: String,

    /// Part-of-speech tag, or [`UNKNOWN`]
    pub pos: String,

    /// Gloss string, never empty
    pub gloss: String,
}

impl AnnotationRecord {
    /// Build a record from a token and its gloss, filling in placeholders
    pub fn from_token(token: Token, gloss: String) -> Self {
        AnnotationRecord {
            surface: token.text,
            lemma: token.lemma.unwrap_or_else(|| UNKNOWN.to_string()),
            pos: token.pos.unwrap_or_else(|| UNKNOWN.to_string()),
            gloss,
        }
    }

    /// Check if the gloss carries the review marker
    pub fn is_unglossed(&self) -> bool {
        self.gloss.ends_with(UNGLOSSED_MARKER)
    }
}

impl std::fmt::Display for AnnotationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.surface, self.gloss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::with_text("book");
        assert_eq!(token.text, "book");
        assert!(token.lemma.is_none());
        assert!(token.pos.is_none());
    }

    #[test]
    fn test_token_from_annotation() {
        let token = Token::from(Annotation::new("ran", "run", "VERB"));
        assert_eq!(token.text, "ran");
        assert_eq!(token.lemma.as_deref(), Some("run"));
        assert_eq!(token.pos.as_deref(), Some("VERB"));
    }

    #[test]
    fn test_record_placeholders() {
        let record = AnnotationRecord::from_token(Token::with_text("foo"), "foo[?]".to_string());
        assert_eq!(record.lemma, UNKNOWN);
        assert_eq!(record.pos, UNKNOWN);
        assert!(record.is_unglossed());
        assert_eq!(record.to_string(), "foo/foo[?]");
    }
}
