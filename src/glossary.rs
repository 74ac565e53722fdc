//! The glossary: a read-only map from word form to gloss.
//!
//! Keys are stored normalized (NFC, then lowercase) and lookups normalize the
//! queried token the same way, so `"Book"` and `"book"` hit the same entry.
//! Punctuation is not stripped: `"book."` is a different key.
//!
//! Glossaries are loaded from JSON objects (`{"word_form": "GLOSS"}`) or from
//! TSV files with one `form<TAB>gloss` pair per line.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use unicode_normalization::UnicodeNormalization;

use crate::error::GlossaryError;

/// The glossary shipped with the crate
const EMBEDDED_GLOSSARY: &str = include_str!("../data/glossary.json");

static EMBEDDED: Lazy<Arc<GlossaryTable>> = Lazy::new(|| {
    let mut builder = GlossaryBuilder::new();
    builder
        .load_json(EMBEDDED_GLOSSARY)
        .expect("Invalid embedded glossary");
    Arc::new(builder.build())
});

/// Normalize a word form into a glossary key
pub fn normalize_form(form: &str) -> String {
    form.nfc().collect::<String>().to_lowercase()
}

/// An immutable word-form to gloss mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryTable {
    entries: HashMap<String, String>,
}

impl GlossaryTable {
    /// The shared glossary embedded in the crate
    pub fn embedded() -> Arc<GlossaryTable> {
        Arc::clone(&EMBEDDED)
    }

    /// Look up a token, normalizing it first
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(&normalize_form(token)).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(normalized form, gloss)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Builder for loading a [`GlossaryTable`] from JSON or TSV sources
#[derive(Debug, Default)]
pub struct GlossaryBuilder {
    entries: HashMap<String, String>,
}

impl GlossaryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        GlossaryBuilder::default()
    }

    /// Start from the entries of an existing table
    pub fn from_table(table: &GlossaryTable) -> Self {
        GlossaryBuilder {
            entries: table.entries.clone(),
        }
    }

    /// Add one entry. A later entry for the same form replaces the earlier one.
    pub fn insert(&mut self, form: &str, gloss: &str) -> Result<&mut Self, GlossaryError> {
        let form = form.trim();
        let gloss = gloss.trim();
        if form.is_empty() {
            return Err(GlossaryError::EmptyForm(gloss.to_string()));
        }
        if gloss.is_empty() {
            return Err(GlossaryError::EmptyGloss(form.to_string()));
        }

        let key = normalize_form(form);
        if let Some(previous) = self.entries.insert(key, gloss.to_string()) {
            debug!("glossary entry '{}' overrides '{}' with '{}'", form, previous, gloss);
        }
        Ok(self)
    }

    /// Load entries from a JSON object `{"word_form": "GLOSS", ...}`
    pub fn load_json(&mut self, json: &str) -> Result<&mut Self, GlossaryError> {
        let map: BTreeMap<String, String> = serde_json::from_str(json)?;
        for (form, gloss) in &map {
            self.insert(form, gloss)?;
        }
        Ok(self)
    }

    /// Load entries from TSV (format: form\tgloss)
    ///
    /// Lines starting with `#` and blank lines are skipped.
    pub fn load_tsv(&mut self, tsv: &str) -> Result<&mut Self, GlossaryError> {
        for (idx, raw) in tsv.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split_once('\t') {
                Some((form, gloss)) => {
                    // Extra columns after the gloss are ignored
                    let gloss = gloss.split('\t').next().unwrap_or_default();
                    self.insert(form, gloss)?;
                }
                None => {
                    return Err(GlossaryError::MalformedLine {
                        line: idx + 1,
                        content: line.to_string(),
                    })
                }
            }
        }
        Ok(self)
    }

    /// Load a `.json` or `.tsv` glossary file
    pub fn load_file(&mut self, path: &Path) -> Result<&mut Self, GlossaryError> {
        let content = std::fs::read_to_string(path).map_err(|source| GlossaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => self.load_json(&content)?,
            Some("tsv") => self.load_tsv(&content)?,
            _ => return Err(GlossaryError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!("loaded glossary file {}", path.display());
        Ok(self)
    }

    /// Number of entries loaded so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build and return the table
    pub fn build(self) -> GlossaryTable {
        GlossaryTable {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_glossary() {
        let table = GlossaryTable::embedded();
        assert!(!table.is_empty());
        assert_eq!(table.get("book"), Some("BOOK.N"));
        assert_eq!(table.get("running"), Some("RUN.PROG"));
        assert!(table.iter().all(|(_, gloss)| !gloss.is_empty()));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = GlossaryTable::embedded();
        assert_eq!(table.get("I"), Some("1SG"));
        assert_eq!(table.get("BOOK"), Some("BOOK.N"));
    }

    #[test]
    fn test_punctuation_not_stripped() {
        let table = GlossaryTable::embedded();
        assert!(table.get("book.").is_none());
    }

    #[test]
    fn test_load_tsv() {
        let tsv = "# comment\nCasa\tHOUSE.N\n\nperro\tDOG.N\textra\n";
        let mut builder = GlossaryBuilder::new();
        builder.load_tsv(tsv).unwrap();
        let table = builder.build();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("casa"), Some("HOUSE.N"));
        assert_eq!(table.get("perro"), Some("DOG.N"));
    }

    #[test]
    fn test_malformed_tsv_line() {
        let mut builder = GlossaryBuilder::new();
        let err = builder.load_tsv("casa\tHOUSE.N\nperro").unwrap_err();
        assert!(matches!(err, GlossaryError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_empty_gloss_rejected() {
        let mut builder = GlossaryBuilder::new();
        let err = builder.load_json(r#"{"book": ""}"#).unwrap_err();
        assert!(matches!(err, GlossaryError::EmptyGloss(ref f) if f == "book"));

        let err = builder.insert("  ", "X").unwrap_err();
        assert!(matches!(err, GlossaryError::EmptyForm(_)));
    }

    #[test]
    fn test_later_entry_overrides() {
        let mut builder = GlossaryBuilder::from_table(&GlossaryTable::embedded());
        builder.insert("Book", "LIBRO").unwrap();
        let table = builder.build();
        assert_eq!(table.get("book"), Some("LIBRO"));
        assert_eq!(table.get("cat"), Some("CAT.N"));
    }

    #[test]
    fn test_nfc_normalization() {
        let mut builder = GlossaryBuilder::new();
        // Decomposed e + combining acute
        builder.insert("cafe\u{301}", "COFFEE.N").unwrap();
        let table = builder.build();
        assert_eq!(table.get("CAF\u{c9}"), Some("COFFEE.N"));
    }

    #[test]
    fn test_load_file_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glossary.csv");
        std::fs::write(&path, "book,BOOK.N").unwrap();

        let err = GlossaryBuilder::new().load_file(&path).unwrap_err();
        assert!(matches!(err, GlossaryError::UnsupportedFormat(_)));
    }
}
