//! Error types for glossary loading, annotation providers and configuration.
//!
//! Unglossed tokens and empty input are not errors: they are reported in-band
//! through the records returned by the engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`GlossaryTable`](crate::GlossaryTable)
#[derive(Debug, Error)]
pub enum GlossaryError {
    /// An entry mapped a word form to an empty gloss
    #[error("empty gloss for word form '{0}'")]
    EmptyGloss(String),

    /// An entry had an empty word form
    #[error("empty word form (gloss '{0}')")]
    EmptyForm(String),

    /// A TSV line without a gloss column
    #[error("malformed glossary line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },

    /// Invalid JSON glossary document
    #[error("invalid glossary JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither `.json` nor `.tsv`
    #[error("unsupported glossary format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The glossary file could not be read
    #[error("failed to read glossary '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by an [`AnnotationProvider`](crate::AnnotationProvider)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider could not be constructed or reached
    #[error("annotation provider unavailable: {0}")]
    Unavailable(String),

    /// A single annotation request failed
    #[error("annotation request failed: {0}")]
    Request(String),

    /// The provider answered with something we could not understand
    #[error("malformed annotation response: {0}")]
    Malformed(String),
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for our schema
    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value in the configuration is not recognised
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glossary_error_display() {
        let err = GlossaryError::EmptyGloss("book".to_string());
        assert_eq!(err.to_string(), "empty gloss for word form 'book'");

        let err = GlossaryError::MalformedLine {
            line: 3,
            content: "book".to_string(),
        };
        assert_eq!(err.to_string(), "malformed glossary line 3: 'book'");
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Unavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "annotation provider unavailable: connection refused"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "provider.kind",
            value: "spacy".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for provider.kind: 'spacy'");
    }
}
