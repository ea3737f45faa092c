// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use doc_entities::utils::logging::{format_success, format_warning};
use doc_entities::{
    Config, Document, DocumentProcessor, HealthCheck, HealthReport, HealthStatus, OcrEngine,
    OnnxNerTagger, OperationTimer, ScanProgress, Severity, Validator,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "doc_entities")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Scan PDF and image documents for person and organization names", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan one document and report detected names and companies
    Scan {
        /// Path to the PDF or image file
        file: PathBuf,

        /// Declared media type, overriding the file extension
        #[arg(long, value_name = "TYPE")]
        media_type: Option<String>,

        /// Print a preview of the extracted text after the notices
        #[arg(long, action = ArgAction::SetTrue)]
        show_text: bool,

        /// Disable the phase spinner (useful when piping output)
        #[arg(long, action = ArgAction::SetTrue)]
        no_progress: bool,
    },

    /// Probe the NER model artifacts and the OCR binary
    Check,

    /// Show the loaded model's labels and limits
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    doc_entities::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Document entity scanner");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Scan {
            file,
            media_type,
            show_text,
            no_progress,
        } => {
            cmd_scan(&config, &file, media_type.as_deref(), show_text, no_progress)?;
        }
        Commands::Check => {
            cmd_check(&config)?;
        }
        Commands::Info => {
            cmd_info(&config)?;
        }
    }

    Ok(())
}

fn cmd_scan(
    config: &Config,
    file: &PathBuf,
    media_type: Option<&str>,
    show_text: bool,
    no_progress: bool,
) -> Result<()> {
    Validator::validate_file_path(file)?;

    let document = Document::from_path(file, media_type)
        .with_context(|| format!("Cannot load document {}", file.display()))?;

    let tagger = OnnxNerTagger::load(&config.model).context("Failed to load the NER model")?;
    let mut processor = DocumentProcessor::new(config.clone(), Box::new(tagger));

    let progress = if no_progress {
        ScanProgress::disabled()
    } else {
        ScanProgress::new()
    };

    let timer = OperationTimer::new("scan");
    let outcome = processor
        .process(&document, &progress)
        .with_context(|| format!("Scan failed for {}", document.file_name))?;
    timer.finish();

    println!();
    println!("Entities found");
    for notice in &outcome.notices {
        match notice.severity {
            Severity::Warning => println!("{}", format_warning(&notice.text)),
            Severity::Success => println!("{}", format_success(&notice.text)),
        }
    }

    if show_text {
        println!();
        println!(
            "Extracted text ({} characters, {} page(s)):",
            outcome.text.char_count(),
            outcome.text.pages
        );
        println!("{}", Validator::truncate_text(&outcome.text.text, 2000));
    }

    outcome.stats.log_summary();

    Ok(())
}

fn cmd_check(config: &Config) -> Result<()> {
    info!("Probing model artifacts and OCR binary");

    let mut checks = Vec::new();

    let weights = config.model.weights_path();
    checks.push(HealthCheck::run("model-weights", || {
        if weights.is_file() {
            Ok(weights.display().to_string())
        } else {
            Err(format!("{} not found", weights.display()))
        }
    }));

    let tokenizer = config.model.tokenizer_path();
    checks.push(HealthCheck::run("tokenizer", || {
        if tokenizer.is_file() {
            Ok(tokenizer.display().to_string())
        } else {
            Err(format!("{} not found", tokenizer.display()))
        }
    }));

    let labels = config.model.labels_path();
    let start = Instant::now();
    checks.push(if labels.is_file() {
        HealthCheck::healthy("label-map", start.elapsed())
    } else {
        HealthCheck::degraded(
            "label-map",
            format!(
                "{} missing, the CoNLL-2003 label order will be used",
                labels.display()
            ),
            start.elapsed(),
        )
    });

    checks.push(HealthCheck::run("ner-session", || {
        OnnxNerTagger::load(&config.model)
            .map(|tagger| {
                format!(
                    "{} labels, max {} tokens",
                    tagger.labels().len(),
                    tagger.max_length()
                )
            })
            .map_err(|e| e.to_string())
    }));

    let engine = OcrEngine::new(&config.ocr);
    checks.push(HealthCheck::run("ocr-binary", || {
        engine.probe().map_err(|e| e.to_string())
    }));

    let report = HealthReport::new(checks, env!("CARGO_PKG_VERSION").to_string());
    println!("{}", report.format());

    if report.overall_status == HealthStatus::Unhealthy {
        anyhow::bail!("Setup is not healthy; fix the failing probes above");
    }

    Ok(())
}

fn cmd_info(config: &Config) -> Result<()> {
    let tagger = OnnxNerTagger::load(&config.model).context("Failed to load the NER model")?;

    println!("Model directory: {}", config.model.dir.display());
    println!("Max sequence length: {} tokens", tagger.max_length());
    println!("Intra-op threads: {}", config.model.intra_threads);
    println!("Labels ({}):", tagger.labels().len());
    for label in tagger.labels().labels() {
        println!("  {}", label);
    }
    println!("Kept categories: person, organization");

    Ok(())
}
