//! Annotation providers and the one-time enrichment choice.
//!
//! An [`AnnotationProvider`] turns a sentence into (surface, lemma, POS)
//! triples. Which provider is used, if any, is decided once at startup by
//! [`Enrichment::init`]; a provider that cannot be built turns into
//! [`Enrichment::Unavailable`] and glossing proceeds in fallback mode.

pub mod lexicon;
#[cfg(feature = "remote")]
pub mod remote;

use std::path::PathBuf;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ProviderError};
use crate::token::Annotation;

pub use lexicon::{Lexicon, LexiconAnnotator, LexiconEntry};
#[cfg(feature = "remote")]
pub use remote::RemoteAnnotator;

/// Default request timeout for the remote provider
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Something that can tokenize, lemmatize and tag a sentence
pub trait AnnotationProvider: Send + Sync {
    /// Short name used in logs and advisories
    fn name(&self) -> &str;

    /// Annotate a sentence, returning its tokens in order
    fn annotate(&self, sentence: &str) -> Result<Vec<Annotation>, ProviderError>;
}

/// Which provider to construct
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// No enrichment, fallback mode only
    #[default]
    None,
    /// Local lexicon-driven analysis
    Lexicon,
    /// HTTP annotation service
    Remote,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::None => "none",
            ProviderKind::Lexicon => "lexicon",
            ProviderKind::Remote => "remote",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(ProviderKind::None),
            "lexicon" => Ok(ProviderKind::Lexicon),
            "remote" => Ok(ProviderKind::Remote),
            _ => Err(ConfigError::InvalidValue {
                key: "provider.kind",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider settings, usually read from the `[provider]` config section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,

    /// Lexicon TSV for the lexicon provider; the embedded one when unset
    pub lexicon: Option<PathBuf>,

    /// Endpoint of the remote provider
    pub url: Option<String>,

    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            kind: ProviderKind::None,
            lexicon: None,
            url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// The enrichment decision taken once at startup
pub enum Enrichment {
    /// A working provider
    Live(Box<dyn AnnotationProvider>),
    /// No provider, either by choice or because construction failed
    Unavailable {
        /// Why enrichment is off; `None` when it was never requested
        reason: Option<String>,
    },
}

impl Enrichment {
    /// Enrichment switched off on purpose
    pub fn disabled() -> Self {
        Enrichment::Unavailable { reason: None }
    }

    /// Wrap an already constructed provider
    pub fn live(provider: impl AnnotationProvider + 'static) -> Self {
        Enrichment::Live(Box::new(provider))
    }

    /// Turn the result of a fallible provider constructor into a decision
    pub fn from_result<P: AnnotationProvider + 'static>(result: Result<P, ProviderError>) -> Self {
        match result {
            Ok(provider) => {
                debug!("annotation provider '{}' ready", provider.name());
                Enrichment::live(provider)
            }
            Err(err) => {
                warn!("{}; glossing without enrichment", err);
                Enrichment::Unavailable {
                    reason: Some(err.to_string()),
                }
            }
        }
    }

    /// Construct the configured provider. Never fails: a provider that
    /// cannot be built yields [`Enrichment::Unavailable`].
    pub fn init(config: &ProviderConfig) -> Self {
        match config.kind {
            ProviderKind::None => Enrichment::disabled(),
            ProviderKind::Lexicon => {
                let result = match config.lexicon {
                    Some(ref path) => LexiconAnnotator::from_file(path),
                    None => Ok(LexiconAnnotator::embedded()),
                };
                Enrichment::from_result(result)
            }
            ProviderKind::Remote => Self::init_remote(config),
        }
    }

    #[cfg(feature = "remote")]
    fn init_remote(config: &ProviderConfig) -> Self {
        let result = match config.url {
            Some(ref url) => RemoteAnnotator::connect(
                url,
                std::time::Duration::from_secs(config.timeout_secs),
            ),
            None => Err(ProviderError::Unavailable(
                "no url configured for the remote provider".to_string(),
            )),
        };
        Enrichment::from_result(result)
    }

    #[cfg(not(feature = "remote"))]
    fn init_remote(_config: &ProviderConfig) -> Self {
        Enrichment::from_result::<LexiconAnnotator>(Err(ProviderError::Unavailable(
            "built without the 'remote' feature".to_string(),
        )))
    }

    /// The provider to pass to the engine, if any
    pub fn provider(&self) -> Option<&dyn AnnotationProvider> {
        match self {
            Enrichment::Live(provider) => Some(provider.as_ref()),
            Enrichment::Unavailable { .. } => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Enrichment::Live(_))
    }

    /// User-facing notice when enrichment was requested but is off
    pub fn advisory(&self) -> Option<String> {
        match self {
            Enrichment::Unavailable {
                reason: Some(reason),
            } => Some(format!(
                "Linguistic enrichment is unavailable ({}); showing glossary-only results.",
                reason
            )),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Enrichment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Enrichment::Live(provider) => f.debug_tuple("Live").field(&provider.name()).finish(),
            Enrichment::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}
