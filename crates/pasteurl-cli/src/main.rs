//! pasteurl CLI: command-line client for the pasteurl image host.
//!
//! Set PASTEURL_URL to point at the server (default http://localhost:3000).

use anyhow::Context;
use clap::{Parser, Subcommand};
use pasteurl_api_client::ApiClient;
use pasteurl_cli::{format_image_table, init_tracing};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pasteurl", about = "pasteurl image host CLI")]
struct Cli {
    /// Server base URL (overrides PASTEURL_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is reachable
    Health,
    /// Check whether a local file is already stored
    Check {
        /// Path to the file to fingerprint
        file: PathBuf,
    },
    /// Share a file: upload it unless the server already has it, then print its URL
    Upload {
        /// Path to the file to upload
        file: PathBuf,
        /// Print the full JSON result instead of only the URL
        #[arg(long)]
        json: bool,
    },
    /// List stored images, newest first
    List {
        /// Print a table instead of JSON
        #[arg(long)]
        table: bool,
    },
    /// Download an image by hash
    Get {
        /// Content fingerprint
        hash: String,
        /// Output path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct ShareJson<'a> {
    hash: &'a str,
    url: &'a str,
    already_stored: bool,
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

    let client = match cli.url {
        Some(url) => ApiClient::new(url),
        None => ApiClient::from_env(),
    }
    .context("Failed to create API client. Set PASTEURL_URL or pass --url")?;

    match cli.command {
        Commands::Health => {
            let response = client.health().await?;
            print_json(&response)?;
        }
        Commands::Check { file } => {
            let data = std::fs::read(&file)
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            let hash = pasteurl_core::fingerprint(&data);
            let response = client.check(&hash).await?;
            print_json(&serde_json::json!({ "hash": hash, "result": response }))?;
        }
        Commands::Upload { file, json } => {
            let outcome = client.share_file(&file).await?;
            if json {
                print_json(&ShareJson {
                    hash: &outcome.hash,
                    url: &outcome.url,
                    already_stored: outcome.already_stored,
                })?;
            } else {
                println!("{}", outcome.url);
            }
        }
        Commands::List { table } => {
            let images = client.list().await?;
            if table {
                print!("{}", format_image_table(&images));
            } else {
                print_json(&images)?;
            }
        }
        Commands::Get { hash, output } => {
            let bytes = client.download(&hash).await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &bytes)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
                }
                None => {
                    use std::io::Write;
                    std::io::stdout()
                        .write_all(&bytes)
                        .context("Failed to write to stdout")?;
                }
            }
        }
    }

    Ok(())
}
