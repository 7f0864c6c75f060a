//! Dealscan CLI — stage documents, submit them for extraction, review, and
//! export the structured results.
//!
//! Set DEALSCAN_API_URL to point at the extraction service (defaults to
//! http://127.0.0.1:5000).

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dealscan_api_client::ApiClient;
use dealscan_cli::{init_tracing, parse_edit};
use dealscan_core::{Config, DocumentType, FileMeta, PropertyType};
use dealscan_engine::{
    export_all, export_filename, IntakeRegistry, MetadataPicker, ProgressReporter, ReviewSession,
    SubmissionOrchestrator,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "dealscan", about = "Document extraction workflow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a batch of documents for extraction and export the results
    Submit {
        /// Paths of the files to submit
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Property classification: multi-family or commercial
        #[arg(long)]
        property_type: String,
        /// Document classification: om, rent-roll, lease, or portfolio
        #[arg(long)]
        document_type: String,
        /// Directory the exported JSON files are written to
        #[arg(long, default_value = "./exports")]
        out: PathBuf,
        /// Review edit applied before export, as INDEX:key=value (repeatable)
        #[arg(long = "set")]
        edits: Vec<String>,
        /// Suppress the simulated per-file progress line
        #[arg(long)]
        quiet: bool,
    },
    /// Print the export filename for a metadata triple
    Filename {
        /// Original file name
        name: String,
        /// Property classification
        #[arg(long)]
        property_type: String,
        /// Document classification
        #[arg(long)]
        document_type: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            files,
            property_type,
            document_type,
            out,
            edits,
            quiet,
        } => {
            let config = Config::from_env();
            let property_type = PropertyType::from_str(&property_type)?;
            let document_type = DocumentType::from_str(&document_type)?;

            let mut picker = MetadataPicker::new();
            picker.set_property_type(property_type);
            picker.set_document_type(document_type);
            for path in &files {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .ok_or_else(|| anyhow::anyhow!("Invalid file path: {}", path.display()))?;
                let contents = std::fs::read(path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?;
                picker.add_file(name, contents)?;
            }

            let mut registry = IntakeRegistry::new();
            picker.commit(&mut registry)?;

            let client = ApiClient::from_config(&config)?;
            let orchestrator =
                SubmissionOrchestrator::new(Arc::new(client), config.settle_delay());

            let total = registry.len();
            let mut reporter = ProgressReporter::spawn(total, config.progress_tick());
            let submission = orchestrator.submit(registry.drain());
            tokio::pin!(submission);

            // drive the progress line and the request concurrently; the
            // reporter is torn down as soon as the request resolves
            let handoff = loop {
                tokio::select! {
                    result = &mut submission => break result?,
                    changed = reporter.changed() => match changed {
                        Some(n) => {
                            if !quiet {
                                eprintln!("Extracting files ({}/{})...", n, total);
                            }
                        }
                        // ticker saturated; only the request remains
                        None => break (&mut submission).await?,
                    },
                }
            };
            reporter.cancel();

            let mut session = ReviewSession::new(handoff);
            for spec in &edits {
                let (index, key, value) = parse_edit(spec)?;
                session.begin_edit(index)?;
                session.set_field(index, key, serde_json::Value::String(value))?;
                session.save(index)?;
            }

            let paths = export_all(&out, &session)?;
            print_json(&serde_json::json!({
                "exported": paths.len(),
                "files": paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>(),
            }))?;
        }
        Commands::Filename {
            name,
            property_type,
            document_type,
        } => {
            let meta = FileMeta {
                name,
                property_type: PropertyType::from_str(&property_type)?,
                document_type: DocumentType::from_str(&document_type)?,
            };
            println!("{}", export_filename(&meta));
        }
    }

    Ok(())
}
