//! The glossing engine.
//!
//! Without a provider the sentence is split on whitespace and every token is
//! looked up in the glossary; unknown tokens get their surface form plus the
//! `[?]` marker. With a provider the provider's tokens are used as-is, the
//! surface form is looked up, and unknown tokens get their *lemma* plus the
//! marker.

use std::sync::Arc;

use log::{debug, warn};

use crate::glossary::GlossaryTable;
use crate::provider::AnnotationProvider;
use crate::token::{Annotation, AnnotationRecord, Token, UNGLOSSED_MARKER};
use crate::tokenizer::WhitespaceTokenizer;

/// Glosses sentences against a shared [`GlossaryTable`]
#[derive(Debug, Clone)]
pub struct GlossEngine {
    glossary: Arc<GlossaryTable>,
}

impl GlossEngine {
    /// Create an engine over the given glossary
    pub fn new(glossary: GlossaryTable) -> Self {
        GlossEngine {
            glossary: Arc::new(glossary),
        }
    }

    /// Create an engine with a shared glossary reference
    pub fn with_arc(glossary: Arc<GlossaryTable>) -> Self {
        GlossEngine { glossary }
    }

    pub fn glossary(&self) -> &GlossaryTable {
        &self.glossary
    }

    /// Gloss a sentence, using the provider when one is given.
    ///
    /// A provider failure during the call makes the whole sentence fall back
    /// to glossary-only mode.
    pub fn gloss(
        &self,
        sentence: &str,
        provider: Option<&dyn AnnotationProvider>,
    ) -> Vec<AnnotationRecord> {
        if sentence.trim().is_empty() {
            return Vec::new();
        }

        match provider {
            Some(provider) => match provider.annotate(sentence) {
                Ok(annotations) => self.gloss_annotations(annotations),
                Err(err) => {
                    warn!(
                        "provider '{}' failed ({}); glossing sentence without enrichment",
                        provider.name(),
                        err
                    );
                    self.gloss_fallback(sentence)
                }
            },
            None => self.gloss_fallback(sentence),
        }
    }

    /// Glossary-only mode: whitespace tokens, surface-based fallback gloss
    pub fn gloss_fallback(&self, sentence: &str) -> Vec<AnnotationRecord> {
        let tokens = WhitespaceTokenizer::tokenize(sentence);
        debug!("fallback glossing of {} tokens", tokens.len());

        tokens
            .into_iter()
            .map(|token| {
                let gloss = self.lookup_or_mark(&token.text, &token.text);
                AnnotationRecord::from_token(token, gloss)
            })
            .collect()
    }

    /// Enriched mode: provider tokens, lemma-based fallback gloss
    pub fn gloss_annotations(&self, annotations: Vec<Annotation>) -> Vec<AnnotationRecord> {
        debug!("enriched glossing of {} tokens", annotations.len());

        annotations
            .into_iter()
            .map(|annotation| {
                let gloss = self.lookup_or_mark(&annotation.surface, &annotation.lemma);
                AnnotationRecord::from_token(Token::from(annotation), gloss)
            })
            .collect()
    }

    /// The glossary value for `surface`, or `unglossed` with the review marker
    fn lookup_or_mark(&self, surface: &str, unglossed: &str) -> String {
        match self.glossary.get(surface) {
            Some(gloss) => gloss.to_string(),
            None => format!("{}{}", unglossed, UNGLOSSED_MARKER),
        }
    }
}

impl Default for GlossEngine {
    /// An engine over the embedded glossary
    fn default() -> Self {
        GlossEngine::with_arc(GlossaryTable::embedded())
    }
}
