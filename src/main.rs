//! condense - Command-line driver for the summarization workflow.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use condense::app::InputMethod;
use condense::config::Settings;
use condense::domain::SourceDocument;
use condense::WorkflowController;

#[derive(Parser, Debug)]
#[command(
    name = "condense",
    version,
    about = "Summarize documents with AI and share the result by email"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract, summarize, and optionally export or email a document.
    Summarize(SummarizeArgs),
}

#[derive(clap::Args, Debug)]
struct SummarizeArgs {
    /// File to summarize (PDF, DOC/DOCX, TXT, or image).
    file: Option<PathBuf>,

    /// Summarize pasted text instead of a file.
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Summarization instruction for the model.
    #[arg(long)]
    prompt: String,

    /// Directory to export the summary into as summary.txt.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Email the summary to these recipients.
    #[arg(long)]
    to: Vec<String>,

    /// Subject for the summary email.
    #[arg(long)]
    subject: Option<String>,

    /// Plain-text message preceding the summary in the email.
    #[arg(long)]
    message: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load();
    settings.validate()?;

    match cli.command {
        Commands::Summarize(args) => summarize(&settings, args).await,
    }
}

async fn summarize(settings: &Settings, args: SummarizeArgs) -> Result<()> {
    let mut controller = WorkflowController::new(settings);

    match (&args.file, &args.text) {
        (Some(path), None) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("cannot read {}", path.display()))?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("file path has no usable name")?;

            controller.set_input_method(InputMethod::File);
            controller.attach_file(SourceDocument::with_guessed_mime(file_name, bytes))?;
        }
        (None, Some(text)) => {
            controller.set_input_method(InputMethod::Text);
            controller.set_text_input(text.clone());
        }
        _ => anyhow::bail!("provide a file path or --text"),
    }

    controller.set_prompt(&args.prompt);
    let summary = controller.generate().await?.to_string();

    println!("{}", summary);

    if let Some(directory) = &args.export {
        let path = controller.export_summary(directory)?;
        eprintln!("Exported to {}", path.display());
    }

    if !args.to.is_empty() {
        let count = controller
            .send_summary(&args.to, args.subject.as_deref(), args.message.as_deref())
            .await?;
        eprintln!("Summary sent to {} recipient(s)", count);
    }

    Ok(())
}
