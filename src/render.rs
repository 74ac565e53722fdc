//! Rendering of glossed records for display.
//!
//! All formats keep the records in the order they were produced.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::token::AnnotationRecord;

/// How records are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One row per token: surface, lemma, POS, gloss
    #[default]
    Table,
    /// Surfaces aligned over glosses
    Interlinear,
    /// `surface/gloss` pairs on a single line
    Line,
    /// Pretty-printed JSON array
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Interlinear => "interlinear",
            OutputFormat::Line => "line",
            OutputFormat::Json => "json",
        }
    }

    /// Render records in this format. Empty input renders as an empty
    /// string, or `[]` for JSON.
    pub fn render(&self, records: &[AnnotationRecord]) -> Result<String, serde_json::Error> {
        Ok(match self {
            OutputFormat::Table => render_table(records),
            OutputFormat::Interlinear => render_interlinear(records),
            OutputFormat::Line => render_line(records),
            OutputFormat::Json => serde_json::to_string_pretty(records)?,
        })
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "interlinear" => Ok(OutputFormat::Interlinear),
            "line" => Ok(OutputFormat::Line),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "output.format",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, to: usize) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat(' ').take(to.saturating_sub(width(s))));
    out
}

/// Aligned columns with a header row
pub fn render_table(records: &[AnnotationRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let header = ["SURFACE", "LEMMA", "POS", "GLOSS"];
    let rows: Vec<[&str; 4]> = records
        .iter()
        .map(|r| [r.surface.as_str(), r.lemma.as_str(), r.pos.as_str(), r.gloss.as_str()])
        .collect();

    let mut widths = header.map(width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(width(cell));
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| pad(cell, *w))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Two lines, each surface form placed above its gloss
pub fn render_interlinear(records: &[AnnotationRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut top = Vec::with_capacity(records.len());
    let mut bottom = Vec::with_capacity(records.len());
    for r in records {
        let w = width(&r.surface).max(width(&r.gloss));
        top.push(pad(&r.surface, w));
        bottom.push(pad(&r.gloss, w));
    }

    format!(
        "{}\n{}\n",
        top.join(" ").trim_end(),
        bottom.join(" ").trim_end()
    )
}

/// A single line of `surface/gloss` pairs
pub fn render_line(records: &[AnnotationRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let pairs: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    format!("{}\n", pairs.join(" "))
}
