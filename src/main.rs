//! Command-line interface for gloss-rs
//!
//! Usage:
//!   gloss [OPTIONS] [SENTENCE]...
//!   echo "I am reading a book" | gloss

use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gloss_rs::{
    AnnotationProvider, Enrichment, GlossConfig, GlossEngine, OutputFormat, ProviderKind,
};

/// Word-by-word interlinear glossing
#[derive(Debug, Parser)]
#[command(name = "gloss", version, about, after_help = EXAMPLES)]
struct Cli {
    /// Sentence to gloss; read one sentence per line from stdin when omitted
    #[arg(value_name = "SENTENCE")]
    sentence: Vec<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "GLOSS_CONFIG")]
    config: Option<PathBuf>,

    /// Extra glossary file (.json or .tsv)
    #[arg(short, long, value_name = "FILE")]
    glossary: Option<PathBuf>,

    /// Use only the --glossary file, without the built-in entries
    #[arg(long, requires = "glossary")]
    replace_glossary: bool,

    /// Annotation provider: none, lexicon or remote
    #[arg(short, long, value_name = "KIND")]
    provider: Option<ProviderKind>,

    /// Lexicon TSV for the lexicon provider
    #[arg(long, value_name = "FILE")]
    lexicon: Option<PathBuf>,

    /// Endpoint of the remote provider
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Output format: table, interlinear, line or json
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const EXAMPLES: &str = r#"EXAMPLES:
    gloss "I am reading a book"
    gloss -f interlinear -p lexicon "She was running"
    gloss -g my-glossary.tsv -f json "Perro"
    echo "I am reading a book" | gloss -f line
"#;

impl Cli {
    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }

    /// Apply command-line overrides on top of the loaded configuration
    fn merge_into(&self, config: &mut GlossConfig) {
        if let Some(ref path) = self.glossary {
            config.glossary.path = Some(path.clone());
            config.glossary.replace_default = self.replace_glossary;
        }
        if let Some(kind) = self.provider {
            config.provider.kind = kind;
        }
        if let Some(ref path) = self.lexicon {
            config.provider.lexicon = Some(path.clone());
        }
        if let Some(ref url) = self.url {
            config.provider.url = Some(url.clone());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

fn emit(
    out: &mut impl Write,
    engine: &GlossEngine,
    provider: Option<&dyn AnnotationProvider>,
    format: OutputFormat,
    sentence: &str,
) -> Result<()> {
    let records = engine.gloss(sentence, provider);
    let rendered = format
        .render(&records)
        .context("failed to serialize records")?;
    write!(out, "{}", rendered)?;
    if format == OutputFormat::Json {
        writeln!(out)?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    cli.init_logging();
    log::debug!("Arguments: {:?}", cli);

    let mut config = GlossConfig::discover(cli.config.as_deref())?;
    cli.merge_into(&mut config);

    let glossary = config.glossary.build()?;
    let engine = GlossEngine::new(glossary);

    let enrichment = Enrichment::init(&config.provider);
    if let Some(advisory) = enrichment.advisory() {
        eprintln!("Note: {}", advisory);
    }
    let provider = enrichment.provider();
    let format = config.output.format;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.sentence.is_empty() {
        let sentence = cli.sentence.join(" ");
        emit(&mut out, &engine, provider, format, &sentence)?;
    } else {
        // Split on raw bytes so one badly encoded line does not end the loop
        for line in io::stdin().lock().split(b'\n') {
            let bytes = line.context("failed to read stdin")?;
            let line = String::from_utf8_lossy(&bytes);
            if let Cow::Owned(_) = line {
                log::warn!("stdin line is not valid UTF-8; invalid bytes were replaced");
            }
            if line.trim().is_empty() {
                continue;
            }
            emit(&mut out, &engine, provider, format, &line)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
