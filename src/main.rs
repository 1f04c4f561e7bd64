// src/main.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};

use record_harvest::config::HarvestConfig;
use record_harvest::extractors::RecordKind;
use record_harvest::fetch;
use record_harvest::pipeline::Pipeline;
use record_harvest::storage::{load_documents, StorageManager};
use record_harvest::utils::{self, AppError};

/// Harvests quotes, trivia, author listings and fun facts from saved pages
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, clean and deduplicate records from saved documents
    Extract {
        /// Which record shape the documents hold
        #[arg(short, long, value_enum)]
        kind: RecordKind,

        /// Files or directories to read (directories are read in name order)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output directory for the JSON results
        #[arg(short, long, default_value = "./output")]
        output_dir: PathBuf,

        /// Base URL for book links on quote pages [env: HARVEST_QUOTE_SITE]
        #[arg(long)]
        quote_site: Option<String>,

        /// Base URL for author links on listing pages [env: HARVEST_AUTHOR_SITE]
        #[arg(long)]
        author_site: Option<String>,

        /// Passages must be longer than this many characters [env: HARVEST_MIN_PASSAGE_CHARS]
        #[arg(long)]
        min_passage_chars: Option<usize>,
    },

    /// Download a page repeatedly into a folder
    Fetch {
        /// Page to download
        #[arg(short, long)]
        url: String,

        /// Folder the snapshots are written to
        #[arg(short, long, default_value = "./pages")]
        output_dir: PathBuf,

        /// Number of downloads (runs until Ctrl-C when omitted)
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Seconds between downloads
        #[arg(long, default_value = "5")]
        interval_secs: u64,
    },
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// CLI flags win over environment variables, which win over defaults.
fn build_config(
    quote_site: Option<String>,
    author_site: Option<String>,
    min_passage_chars: Option<usize>,
) -> Result<HarvestConfig, AppError> {
    let min_passage_chars = match min_passage_chars {
        Some(min) => Some(min),
        None => env_override("HARVEST_MIN_PASSAGE_CHARS")
            .map(|raw| {
                raw.trim().parse::<usize>().map_err(|e| {
                    AppError::Config(format!("HARVEST_MIN_PASSAGE_CHARS='{}': {}", raw, e))
                })
            })
            .transpose()?,
    };

    let config = HarvestConfig::default()
        .with_sites(
            quote_site.or_else(|| env_override("HARVEST_QUOTE_SITE")),
            author_site.or_else(|| env_override("HARVEST_AUTHOR_SITE")),
        )
        .with_min_passage_chars(min_passage_chars);
    tracing::debug!("Using configuration: {:?}", config);
    Ok(config)
}

fn run_extract(
    kind: RecordKind,
    paths: &[PathBuf],
    output_dir: &Path,
    config: &HarvestConfig,
) -> Result<(), AppError> {
    let storage = StorageManager::new(output_dir)?;

    let (documents, read_failures) = load_documents(paths);
    tracing::info!("Loaded {} documents ({} unreadable)", documents.len(), read_failures.len());
    if documents.is_empty() {
        return Err(AppError::Processing(format!(
            "No readable documents among {} input paths",
            paths.len()
        )));
    }

    let pipeline = Pipeline::new(kind, config);
    let mut report = pipeline.run(&documents);
    // Unreadable files belong in the run metadata alongside unparsable ones
    let parse_failures = std::mem::take(&mut report.failures);
    report.failures = read_failures.into_iter().chain(parse_failures).collect();

    storage.save_records(pipeline.kind(), &report)?;
    storage.save_run_metadata(pipeline.kind(), &report)?;

    tracing::info!(
        "Processing finished. {} unique {}, {} documents skipped",
        report.records.len(),
        kind.name(),
        report.failures.len()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting with args: {:?}", args);

    match args.command {
        Command::Extract { kind, paths, output_dir, quote_site, author_site, min_passage_chars } => {
            let config = build_config(quote_site, author_site, min_passage_chars)?;
            run_extract(kind, &paths, &output_dir, &config)
        }
        Command::Fetch { url, output_dir, rounds, interval_secs } => {
            if interval_secs == 0 {
                return Err(AppError::Config("--interval-secs must be at least 1".to_string()));
            }
            let saved = fetch::client::poll_to_folder(
                &url,
                &output_dir,
                Duration::from_secs(interval_secs),
                rounds,
            )
            .await?;
            tracing::info!("Saved {} pages to {}", saved, output_dir.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_win_over_defaults() {
        let config = build_config(Some("https://a.example/".to_string()), None, Some(5)).unwrap();
        assert_eq!(config.quote_site, "https://a.example");
        assert_eq!(config.min_passage_chars, 5);
    }

    #[test]
    fn test_extract_args_parse() {
        let args = Args::try_parse_from([
            "record-harvest", "extract", "--kind", "authors", "-o", "out", "fraseslibros",
        ])
        .unwrap();
        match args.command {
            Command::Extract { kind, paths, output_dir, .. } => {
                assert_eq!(kind, RecordKind::Authors);
                assert_eq!(paths, vec![PathBuf::from("fraseslibros")]);
                assert_eq!(output_dir, PathBuf::from("out"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_extract_writes_outputs() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("trivia.txt");
        std::fs::write(&input, "{General},{What is 2+2?},{4}\n{General},{WHAT IS 2+2?},{four}\n").unwrap();
        let out = tmp.path().join("out");

        run_extract(RecordKind::Trivia, &[input], &out, &HarvestConfig::default()).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("trivia.json")).unwrap()).unwrap();
        assert_eq!(saved.as_array().unwrap().len(), 1);
        assert!(out.join("trivia_meta.json").is_file());
    }

    #[test]
    fn test_extract_without_readable_input_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.html");
        let out = tmp.path().join("out");
        let result = run_extract(RecordKind::Quotes, &[missing], &out, &HarvestConfig::default());
        assert!(matches!(result, Err(AppError::Processing(_))));
    }
}
