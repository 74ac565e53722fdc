//! Python bindings for gloss-rs using PyO3
//!
//! This module provides Python-compatible wrappers around the glossing engine.

use std::path::PathBuf;

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::GlossaryConfig;
use crate::engine::GlossEngine;
use crate::error::GlossaryError;
use crate::provider::{Enrichment, ProviderConfig, ProviderKind};
use crate::token::AnnotationRecord;

/// A Python-compatible glossed record
#[pyclass(name = "Record")]
#[derive(Clone)]
pub struct PyRecord {
    #[pyo3(get)]
    pub surface: String,
    #[pyo3(get)]
    pub lemma: String,
    #[pyo3(get)]
    pub pos: String,
    #[pyo3(get)]
    pub gloss: String,
    unglossed: bool,
}

impl From<AnnotationRecord> for PyRecord {
    fn from(r: AnnotationRecord) -> Self {
        let unglossed = r.is_unglossed();
        PyRecord {
            surface: r.surface,
            lemma: r.lemma,
            pos: r.pos,
            gloss: r.gloss,
            unglossed,
        }
    }
}

#[pymethods]
impl PyRecord {
    fn __repr__(&self) -> String {
        format!("Record('{}', gloss='{}')", self.surface, self.gloss)
    }

    fn __str__(&self) -> String {
        format!("{}/{}", self.surface, self.gloss)
    }

    /// Check if the gloss needs manual review
    fn is_unglossed(&self) -> bool {
        self.unglossed
    }

    /// Convert to dictionary
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        dict.set_item("surface", &self.surface)?;
        dict.set_item("lemma", &self.lemma)?;
        dict.set_item("pos", &self.pos)?;
        dict.set_item("gloss", &self.gloss)?;
        Ok(dict)
    }
}

/// Glosser - the main glossing class
///
/// The annotation provider is set up once, when the Glosser is created. If it
/// cannot be set up, glossing uses the glossary alone and `advisory` explains
/// why.
///
/// Example:
///     >>> from gloss_rs import Glosser
///     >>> g = Glosser(provider="lexicon")
///     >>> for r in g.gloss("I am reading a book"):
///     ...     print(r.surface, r.gloss)
#[pyclass(name = "Glosser")]
pub struct PyGlosser {
    engine: GlossEngine,
    enrichment: Enrichment,
}

#[pymethods]
impl PyGlosser {
    /// Create a new Glosser.
    ///
    /// Args:
    ///     glossary: Extra glossary file, .json or .tsv (optional)
    ///     replace_default: Drop the built-in glossary entries (default: False)
    ///     provider: "none", "lexicon" or "remote" (default: "none")
    ///     lexicon: Lexicon TSV for the lexicon provider (optional)
    ///     url: Endpoint of the remote provider (optional)
    #[new]
    #[pyo3(signature = (glossary=None, replace_default=false, provider=None, lexicon=None, url=None))]
    fn new(
        glossary: Option<&str>,
        replace_default: bool,
        provider: Option<&str>,
        lexicon: Option<&str>,
        url: Option<&str>,
    ) -> PyResult<Self> {
        let table = GlossaryConfig {
            path: glossary.map(PathBuf::from),
            replace_default,
        }
        .build()
        .map_err(glossary_error_to_py)?;

        let kind = match provider {
            Some(p) => p
                .parse::<ProviderKind>()
                .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?,
            None => ProviderKind::None,
        };
        let enrichment = Enrichment::init(&ProviderConfig {
            kind,
            lexicon: lexicon.map(PathBuf::from),
            url: url.map(String::from),
            ..Default::default()
        });

        Ok(PyGlosser {
            engine: GlossEngine::new(table),
            enrichment,
        })
    }

    /// Gloss a sentence
    ///
    /// Args:
    ///     sentence: The sentence to gloss
    ///
    /// Returns:
    ///     List of Record objects, in sentence order
    fn gloss(&self, sentence: &str) -> Vec<PyRecord> {
        self.engine
            .gloss(sentence, self.enrichment.provider())
            .into_iter()
            .map(PyRecord::from)
            .collect()
    }

    /// Whether a provider is enriching the results
    #[getter]
    fn enriched(&self) -> bool {
        self.enrichment.is_live()
    }

    /// Notice to show the user when enrichment was requested but is off
    #[getter]
    fn advisory(&self) -> Option<String> {
        self.enrichment.advisory()
    }

    fn __len__(&self) -> usize {
        self.engine.glossary().len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Glosser(entries={}, enriched={})",
            self.engine.glossary().len(),
            self.enrichment.is_live()
        )
    }
}

/// I/O failures become `IOError`, invalid glossary content `ValueError`
fn glossary_error_to_py(err: GlossaryError) -> PyErr {
    if is_io_failure(&err) {
        PyErr::new::<pyo3::exceptions::PyIOError, _>(err.to_string())
    } else {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
    }
}

fn is_io_failure(err: &GlossaryError) -> bool {
    matches!(err, GlossaryError::Io { .. })
}

/// Gloss a sentence with the built-in glossary and no provider
#[pyfunction]
fn gloss(sentence: &str) -> Vec<PyRecord> {
    crate::gloss(sentence, None)
        .into_iter()
        .map(PyRecord::from)
        .collect()
}

/// Python module definition
#[pymodule]
fn gloss_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRecord>()?;
    m.add_class::<PyGlosser>()?;
    m.add_function(wrap_pyfunction!(gloss, m)?)?;
    m.add("__version__", crate::VERSION)?;
    Ok(())
}
