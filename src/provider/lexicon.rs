//! Lexicon-driven annotation provider.
//!
//! Tokenizes with [`WordTokenizer`], then looks each word up in a lexicon of
//! `form<TAB>pos<TAB>lemma` lines. Forms missing from the lexicon are tried
//! again with common inflectional suffixes stripped.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;

use super::AnnotationProvider;
use crate::error::ProviderError;
use crate::glossary::normalize_form;
use crate::token::Annotation;
use crate::tokenizer::{PieceKind, WordTokenizer};

const EMBEDDED_LEXICON: &str = include_str!("../../data/lexicon.tsv");

static EMBEDDED: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let mut lexicon = Lexicon::new();
    lexicon.load_tsv(EMBEDDED_LEXICON);
    Arc::new(lexicon)
});

/// POS tag for words the lexicon knows nothing about
pub const UNKNOWN_POS: &str = "X";

/// Inflectional suffixes and the endings to try in their place
static SUFFIX_RULES: &[(&str, &[&str])] = &[
    ("ies", &["y"]),
    ("ing", &["", "e"]),
    ("ed", &["", "e"]),
    ("es", &[""]),
    ("s", &[""]),
];

/// Suffixes after which a doubled final consonant is undone (running -> run)
static DOUBLING_SUFFIXES: &[&str] = &["ing", "ed"];

/// Lemma and part-of-speech for one form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub pos: String,
    pub lemma: String,
}

/// A form to (lemma, POS) dictionary
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
}

impl Lexicon {
    pub fn new() -> Self {
        Lexicon::default()
    }

    /// The lexicon embedded in the crate
    pub fn embedded() -> Arc<Lexicon> {
        Arc::clone(&EMBEDDED)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a form. An empty lemma defaults to the form itself.
    pub fn add(&mut self, form: &str, pos: &str, lemma: &str) {
        let key = normalize_form(form.trim());
        if key.is_empty() {
            return;
        }
        let pos = match pos.trim() {
            "" => UNKNOWN_POS.to_string(),
            p => p.to_string(),
        };
        let lemma = match lemma.trim() {
            "" => key.clone(),
            l => l.to_string(),
        };
        self.entries.insert(key, LexiconEntry { pos, lemma });
    }

    /// Load words from a TSV string (format: form\tpos\tlemma)
    ///
    /// Lines starting with `#` are comments; missing columns are left empty.
    pub fn load_tsv(&mut self, tsv_content: &str) {
        for line in tsv_content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            let form = parts[0];
            let pos = parts.get(1).copied().unwrap_or_default();
            let lemma = parts.get(2).copied().unwrap_or_default();
            self.add(form, pos, lemma);
        }
    }

    /// Exact lookup of a form
    pub fn get(&self, form: &str) -> Option<&LexiconEntry> {
        self.entries.get(&normalize_form(form))
    }

    /// Look up a form, falling back to suffix stripping
    pub fn analyze(&self, form: &str) -> Option<&LexiconEntry> {
        let key = normalize_form(form);
        if let Some(entry) = self.entries.get(&key) {
            return Some(entry);
        }
        candidate_stems(&key)
            .iter()
            .find_map(|stem| self.entries.get(stem))
    }
}

/// Possible base forms of an inflected (already normalized) word, best first
fn candidate_stems(form: &str) -> Vec<String> {
    let mut stems = Vec::new();

    for (suffix, endings) in SUFFIX_RULES {
        let Some(stem) = form.strip_suffix(suffix) else {
            continue;
        };
        if stem.chars().count() < 2 {
            continue;
        }

        for ending in endings.iter() {
            stems.push(format!("{}{}", stem, ending));
        }

        if DOUBLING_SUFFIXES.contains(suffix) {
            let mut chars = stem.chars().rev();
            if let (Some(last), Some(prev)) = (chars.next(), chars.next()) {
                if last == prev && !"aeiou".contains(last) {
                    stems.push(stem[..stem.len() - last.len_utf8()].to_string());
                }
            }
        }
    }

    stems
}

/// An [`AnnotationProvider`] backed by a [`Lexicon`]
#[derive(Debug, Clone)]
pub struct LexiconAnnotator {
    lexicon: Arc<Lexicon>,
}

impl LexiconAnnotator {
    pub fn new(lexicon: Lexicon) -> Self {
        LexiconAnnotator {
            lexicon: Arc::new(lexicon),
        }
    }

    /// Use a shared lexicon
    pub fn with_arc(lexicon: Arc<Lexicon>) -> Self {
        LexiconAnnotator { lexicon }
    }

    /// Annotator over the embedded lexicon
    pub fn embedded() -> Self {
        LexiconAnnotator::with_arc(Lexicon::embedded())
    }

    /// Load a lexicon TSV file. An unreadable or empty file makes the
    /// provider unavailable.
    pub fn from_file(path: &Path) -> Result<Self, ProviderError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::Unavailable(format!("cannot read lexicon '{}': {}", path.display(), e))
        })?;

        let mut lexicon = Lexicon::new();
        lexicon.load_tsv(&content);
        if lexicon.is_empty() {
            return Err(ProviderError::Unavailable(format!(
                "lexicon '{}' has no entries",
                path.display()
            )));
        }

        debug!("loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(LexiconAnnotator::new(lexicon))
    }

    fn annotate_piece(&self, piece: &str, kind: PieceKind) -> Annotation {
        match kind {
            PieceKind::Punct => Annotation::new(piece, piece, "PUNCT"),
            PieceKind::Number => Annotation::new(piece, piece, "NUM"),
            PieceKind::Word => match self.lexicon.analyze(piece) {
                Some(entry) => Annotation::new(piece, entry.lemma.clone(), entry.pos.clone()),
                None => Annotation::new(piece, normalize_form(piece), UNKNOWN_POS),
            },
        }
    }
}

impl AnnotationProvider for LexiconAnnotator {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn annotate(&self, sentence: &str) -> Result<Vec<Annotation>, ProviderError> {
        Ok(WordTokenizer::pieces(sentence)
            .map(|(piece, kind)| self.annotate_piece(piece, kind))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotator() -> LexiconAnnotator {
        LexiconAnnotator::embedded()
    }

    #[test]
    fn test_load_tsv() {
        let mut lexicon = Lexicon::new();
        lexicon.load_tsv("# form\tpos\tlemma\nMice\tNOUN\tmouse\nfast\tADJ\n\n");

        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.get("mice").unwrap().lemma, "mouse");
        // Missing lemma column defaults to the form
        assert_eq!(lexicon.get("fast").unwrap().lemma, "fast");
        assert_eq!(lexicon.get("fast").unwrap().pos, "ADJ");
    }

    #[test]
    fn test_candidate_stems() {
        let stems = candidate_stems("running");
        assert!(stems.contains(&"run".to_string()));

        let stems = candidate_stems("flies");
        assert_eq!(stems[0], "fly");

        assert!(candidate_stems("is").is_empty());
    }

    #[test]
    fn test_analyze_inflected_forms() {
        let lexicon = Lexicon::embedded();
        assert_eq!(lexicon.analyze("running").unwrap().lemma, "run");
        assert_eq!(lexicon.analyze("walked").unwrap().lemma, "walk");
        assert_eq!(lexicon.analyze("Books").unwrap().pos, "NOUN");
        assert_eq!(lexicon.analyze("writes").unwrap().lemma, "write");
        assert_eq!(lexicon.analyze("goes").unwrap().lemma, "go");
        assert!(lexicon.analyze("xyzzy").is_none());
    }

    #[test]
    fn test_annotate_sentence() {
        let annotations = annotator().annotate("I am reading 2 books.").unwrap();
        let triples: Vec<(&str, &str, &str)> = annotations
            .iter()
            .map(|a| (a.surface.as_str(), a.lemma.as_str(), a.pos.as_str()))
            .collect();

        assert_eq!(
            triples,
            vec![
                ("I", "i", "PRON"),
                ("am", "be", "AUX"),
                ("reading", "read", "VERB"),
                ("2", "2", "NUM"),
                ("books", "book", "NOUN"),
                (".", ".", "PUNCT"),
            ]
        );
    }

    #[test]
    fn test_annotate_unknown_word() {
        let annotations = annotator().annotate("Xyzzy").unwrap();
        assert_eq!(annotations, vec![Annotation::new("Xyzzy", "xyzzy", "X")]);
    }

    #[test]
    fn test_from_file_missing() {
        let err = LexiconAnnotator::from_file(Path::new("/nonexistent/lexicon.tsv")).unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }

    #[test]
    fn test_from_file_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.tsv");
        std::fs::write(&path, "# nothing here\n").unwrap();

        let err = LexiconAnnotator::from_file(&path).unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(ref m) if m.contains("no entries")));
    }
}
