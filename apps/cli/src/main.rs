use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{render, RequestOutcome, ReviewClient, SelectedFile};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a code file and a standards file for review.
    Review {
        code_file: PathBuf,
        #[arg(long)]
        standards_file: PathBuf,
        /// Where the review markdown and HTML are written.
        #[arg(long, default_value = "reviews")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Review {
            code_file,
            standards_file,
            out_dir,
        } => review(&cli.server_url, &code_file, &standards_file, &out_dir).await,
    }
}

async fn review(
    server_url: &str,
    code_file: &Path,
    standards_file: &Path,
    out_dir: &Path,
) -> Result<()> {
    let code = load_file(code_file)?;
    let standards = load_file(standards_file)?;

    println!("Reviewing file: {}", code_file.display());
    let client = ReviewClient::new(server_url);
    let outcome = client.submit(&code, &standards).await;

    match &outcome {
        RequestOutcome::Success(result) => {
            if let Some(score) = result.score {
                println!("Code quality score: {score:.2} / 1.00");
            }
            println!("\n{}", result.review);

            fs::create_dir_all(out_dir)
                .with_context(|| format!("failed to create {}", out_dir.display()))?;
            let stem = code_file
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("review");
            let markdown_path = out_dir.join(format!("{stem}-review.md"));
            fs::write(&markdown_path, &result.review)
                .with_context(|| format!("failed to write {}", markdown_path.display()))?;
            let html_path = out_dir.join(format!("{stem}-review.html"));
            fs::write(&html_path, render::render(&outcome))
                .with_context(|| format!("failed to write {}", html_path.display()))?;

            println!("\nReview saved to: {}", markdown_path.display());
            Ok(())
        }
        RequestOutcome::Failure(message) => Err(anyhow!("review failed: {message}")),
    }
}

fn load_file(path: &Path) -> Result<SelectedFile> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(SelectedFile { name, bytes })
}
