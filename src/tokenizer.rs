//! Sentence tokenizers.
//!
//! [`WhitespaceTokenizer`] is the fallback splitter: tokens are exactly the
//! whitespace-separated pieces of the sentence, punctuation included.
//! [`WordTokenizer`] is used by the lexicon provider and separates words from
//! punctuation marks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::token::Token;

/// A word (letters, digits, marks) with optional internal apostrophes or
/// hyphens, or a single non-space symbol
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}\p{M}]+(?:['’\-][\p{L}\p{N}\p{M}]+)*|[^\s\p{L}\p{N}\p{M}]")
        .expect("Invalid regex")
});

/// The category of a piece cut by [`WordTokenizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Word,
    Number,
    Punct,
}

impl PieceKind {
    fn of(piece: &str) -> Self {
        if piece.chars().any(char::is_numeric)
            && piece.chars().all(|c| c.is_numeric() || c == '-' || c == '\'')
        {
            PieceKind::Number
        } else if piece.chars().any(char::is_alphanumeric) {
            PieceKind::Word
        } else {
            PieceKind::Punct
        }
    }
}

/// Splits on whitespace only
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Tokenize a sentence into whitespace-separated tokens, preserving order
    pub fn tokenize(sentence: &str) -> Vec<Token> {
        sentence.split_whitespace().map(Token::with_text).collect()
    }
}

/// Splits words from punctuation
pub struct WordTokenizer;

impl WordTokenizer {
    /// Iterate over the pieces of a sentence along with their category
    pub fn pieces(sentence: &str) -> impl Iterator<Item = (&str, PieceKind)> {
        WORD_PATTERN.find_iter(sentence).map(|m| {
            let piece = m.as_str();
            (piece, PieceKind::of(piece))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_whitespace_tokenizer() {
        let tokens = WhitespaceTokenizer::tokenize("  I am\treading\na book.  ");
        assert_eq!(texts(&tokens), vec!["I", "am", "reading", "a", "book."]);
    }

    #[test]
    fn test_whitespace_tokenizer_empty() {
        assert!(WhitespaceTokenizer::tokenize("").is_empty());
        assert!(WhitespaceTokenizer::tokenize(" \t\n ").is_empty());
    }

    fn pieces(sentence: &str) -> Vec<&str> {
        WordTokenizer::pieces(sentence).map(|(piece, _)| piece).collect()
    }

    #[test]
    fn test_word_tokenizer_splits_punctuation() {
        assert_eq!(
            pieces("I'm reading a book, slowly!"),
            vec!["I'm", "reading", "a", "book", ",", "slowly", "!"]
        );
    }

    #[test]
    fn test_word_tokenizer_hyphenated() {
        assert_eq!(
            pieces("a well-known café..."),
            vec!["a", "well-known", "café", ".", ".", "."]
        );
    }

    #[test]
    fn test_piece_kinds() {
        let kinds: Vec<PieceKind> = WordTokenizer::pieces("read 42 books.")
            .map(|(_, k)| k)
            .collect();
        assert_eq!(
            kinds,
            vec![
                PieceKind::Word,
                PieceKind::Number,
                PieceKind::Word,
                PieceKind::Punct
            ]
        );
    }
}
