use anyhow::{Context, Result};
use bookkeep_core::PasswordList;
use bookkeep_engine::{
    scan_pdf_dir, write_unlocked, DocumentOutcome, ExtractionEngine, OutputFormat, SourceDocument,
};
use bookkeep_ingest::parse_tng_ewallet_text;
use bookkeep_pdf::DocumentUnlocker;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "bookkeep", version, about = "Unlock e-wallet statements and extract their transactions")]
struct Cli {
    /// Config file (default: ~/.bookkeep/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug, Default)]
struct PasswordArgs {
    /// Candidate password, tried before any list file (repeatable)
    #[arg(long = "password")]
    passwords: Vec<String>,

    /// Candidate list file, one password per line (overrides the config)
    #[arg(long)]
    passwords_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default config file (never overwrites)
    InitConfig,

    /// Unlock every PDF in the input dir into the unlocked dir
    Unlock {
        #[arg(long)]
        input: Option<PathBuf>,

        #[arg(long)]
        unlocked: Option<PathBuf>,

        #[command(flatten)]
        passwords: PasswordArgs,
    },

    /// Unlock, extract and write one transactions file per statement
    Extract {
        #[arg(long)]
        input: Option<PathBuf>,

        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        passwords: PasswordArgs,
    },

    /// Parse already extracted statement text and print CSV to stdout
    ParseText {
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match &cli.config {
        Some(p) => p.clone(),
        None => config::default_config_path()?,
    };

    match cli.command {
        Command::InitConfig => {
            config::init_config(cli.config.as_deref())?;
        }

        Command::Unlock {
            input,
            unlocked,
            passwords,
        } => {
            let cfg = config::load_config(&config_path)?;
            let input = input.unwrap_or_else(|| cfg.paths.input.clone());
            let unlocked = unlocked.unwrap_or_else(|| cfg.paths.unlocked.clone());
            let passwords = collect_passwords(&cfg, &passwords)?;
            unlock_dir(&input, &unlocked, &passwords)?;
        }

        Command::Extract {
            input,
            output,
            format,
            passwords,
        } => {
            let cfg = config::load_config(&config_path)?;
            let input = input.unwrap_or_else(|| cfg.paths.input.clone());
            let output = output.unwrap_or_else(|| cfg.paths.output.clone());
            let format = format.unwrap_or(cfg.output.format);
            let passwords = collect_passwords(&cfg, &passwords)?;
            extract_dir(&input, &output, format, passwords)?;
        }

        Command::ParseText { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let txns = parse_tng_ewallet_text(&text)?;
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for t in &txns {
                wtr.serialize(t)?;
            }
            wtr.flush()?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// `--password` values first, then the list file (flag, else config).
fn collect_passwords(cfg: &Config, args: &PasswordArgs) -> Result<PasswordList> {
    let explicit = PasswordList::new(args.passwords.iter().cloned());
    let file = args
        .passwords_file
        .as_ref()
        .or(cfg.passwords.file.as_ref());
    match file {
        Some(path) => Ok(explicit.chain(PasswordList::from_file(path)?)),
        None => Ok(explicit),
    }
}

fn load_documents(input: &Path) -> Result<Vec<SourceDocument>> {
    let paths = scan_pdf_dir(input)?;
    if paths.is_empty() {
        println!("No PDF files found in {}", input.display());
    }
    let mut docs = Vec::with_capacity(paths.len());
    for path in paths {
        match SourceDocument::from_path(&path) {
            Ok(doc) => docs.push(doc),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable file"),
        }
    }
    Ok(docs)
}

fn unlock_dir(input: &Path, unlocked: &Path, passwords: &PasswordList) -> Result<()> {
    let docs = load_documents(input)?;
    let ok = unlock_documents(&docs, unlocked, passwords);
    println!("\nSummary: {}/{} PDFs processed successfully", ok, docs.len());
    Ok(())
}

/// Unlocked copies of `docs` under `unlocked`; returns how many were written.
/// A document that fails at any step is reported and skipped.
fn unlock_documents(docs: &[SourceDocument], unlocked: &Path, passwords: &PasswordList) -> usize {
    let unlocker = DocumentUnlocker::lopdf();
    let mut ok = 0;

    for doc in docs {
        match unlocker.process(&doc.bytes, passwords.as_slice()) {
            Ok(Some(unlocked_doc)) => {
                let how = match unlocked_doc.matched_password {
                    Some(_) => "unlocked",
                    None => "not protected, copied",
                };
                match write_unlocked(unlocked, &doc.stem(), &unlocked_doc.bytes) {
                    Ok(path) => {
                        println!("{}: {} -> {}", doc.id, how, path.display());
                        ok += 1;
                    }
                    Err(e) => {
                        warn!(document = %doc.id, error = %e, "failed to write unlocked copy");
                        println!("{}: {} but not written ({:#})", doc.id, how, e);
                    }
                }
            }
            Ok(None) => println!("{}: no matching password in {} candidates", doc.id, passwords.len()),
            Err(e) => println!("{}: skipped ({})", doc.id, e),
        }
    }
    ok
}

fn extract_dir(input: &Path, output: &Path, format: OutputFormat, passwords: PasswordList) -> Result<()> {
    let docs = load_documents(input)?;
    let engine = ExtractionEngine::tng_ewallet(passwords)?;
    let report = engine.extract_all(&docs);

    for doc in &report.documents {
        match &doc.outcome {
            DocumentOutcome::Extracted { transactions, .. } => {
                println!("{}: {} transactions", doc.id, transactions.len())
            }
            DocumentOutcome::Empty { .. } => println!("{}: no transactions found", doc.id),
            DocumentOutcome::Locked { attempts } => {
                println!("{}: still locked after {} candidates", doc.id, attempts)
            }
            DocumentOutcome::Unreadable { reason } => println!("{}: unreadable ({})", doc.id, reason),
        }
    }

    for (id, result) in report.write_outputs(output, format) {
        match result {
            Ok(path) => println!("{} -> {}", id, path.display()),
            Err(e) => println!("{}: output not written ({:#})", id, e),
        }
    }

    println!("\n{}", report.summary());
    Ok(())
}
