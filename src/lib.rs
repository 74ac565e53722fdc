//! # gloss-rs
//!
//! Word-by-word glossing of sentences.
//!
//! Every token of a sentence is looked up in a glossary of grammatical and
//! lexical glosses (`"i" -> "1SG"`, `"reading" -> "READ.PROG"`). Tokens the
//! glossary does not know are marked with a trailing `[?]` for manual review.
//! An optional annotation provider can supply tokenization, lemmas and
//! part-of-speech tags.
//!
//! ## Quick Start
//!
//! ```rust
//! let records = gloss_rs::gloss("I am reading a book", None);
//!
//! let glosses: Vec<&str> = records.iter().map(|r| r.gloss.as_str()).collect();
//! assert_eq!(glosses, ["1SG", "BE.PRES.1SG", "READ.PROG", "INDEF.ART", "BOOK.N"]);
//! ```
//!
//! ## Enriched Glossing
//!
//! The provider is chosen once at startup. When it cannot be built the
//! [`Enrichment`] is `Unavailable` and glossing quietly uses the glossary
//! alone.
//!
//! ```rust
//! use gloss_rs::{Enrichment, GlossEngine, ProviderConfig, ProviderKind};
//!
//! let enrichment = Enrichment::init(&ProviderConfig {
//!     kind: ProviderKind::Lexicon,
//!     ..Default::default()
//! });
//! if let Some(advisory) = enrichment.advisory() {
//!     eprintln!("{}", advisory);
//! }
//!
//! let engine = GlossEngine::default();
//! for record in engine.gloss("She was running", enrichment.provider()) {
//!     println!("{}\t{}\t{}\t{}", record.surface, record.lemma, record.pos, record.gloss);
//! }
//! ```
//!
//! ## Python Bindings
//!
//! This library can be compiled as a Python extension module with the
//! `python` feature.

pub mod config;
pub mod engine;
pub mod error;
pub mod glossary;
pub mod provider;
pub mod render;
pub mod token;
pub mod tokenizer;

// Python bindings (only compiled when the "python" feature is enabled)
#[cfg(feature = "python")]
pub mod python;

// Re-export main types for convenience
pub use config::{GlossConfig, GlossaryConfig, OutputConfig};
pub use engine::GlossEngine;
pub use error::{ConfigError, GlossaryError, ProviderError};
pub use glossary::{normalize_form, GlossaryBuilder, GlossaryTable};
pub use provider::{
    AnnotationProvider, Enrichment, Lexicon, LexiconAnnotator, ProviderConfig, ProviderKind,
};
#[cfg(feature = "remote")]
pub use provider::RemoteAnnotator;
pub use render::OutputFormat;
pub use token::{Annotation, AnnotationRecord, Token, UNGLOSSED_MARKER, UNKNOWN};
pub use tokenizer::{WhitespaceTokenizer, WordTokenizer};

use once_cell::sync::Lazy;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static DEFAULT_ENGINE: Lazy<GlossEngine> = Lazy::new(GlossEngine::default);

/// Gloss a sentence against the embedded glossary
pub fn gloss(sentence: &str, provider: Option<&dyn AnnotationProvider>) -> Vec<AnnotationRecord> {
    DEFAULT_ENGINE.gloss(sentence, provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let enrichment = Enrichment::init(&ProviderConfig {
            kind: ProviderKind::Lexicon,
            ..Default::default()
        });
        let records = gloss("She was running home.", enrichment.provider());

        let glosses: Vec<&str> = records.iter().map(|r| r.gloss.as_str()).collect();
        assert_eq!(glosses, vec!["3SG.F", "BE.PST.SG", "RUN.PROG", "home[?]", ".[?]"]);
        assert_eq!(records[2].lemma, "run");
        assert_eq!(records[4].pos, "PUNCT");
    }

    #[test]
    fn test_fallback_pipeline() {
        let records = gloss("She was running home.", None);
        let glosses: Vec<&str> = records.iter().map(|r| r.gloss.as_str()).collect();
        assert_eq!(glosses, vec!["3SG.F", "BE.PST.SG", "RUN.PROG", "home.[?]"]);
    }
}
