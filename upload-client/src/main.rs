use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use upload_client::{UploadClient, UploadFile};

#[derive(Parser)]
#[command(name = "upload-client")]
#[command(about = "Upload a file through the upload backend")]
#[command(version)]
struct Cli {
    /// Upload endpoint of the backend
    #[arg(long, env = "UPLOAD_API_URL")]
    api_url: String,

    /// Uploader email
    #[arg(long, default_value = "")]
    email: String,

    /// Content type to declare instead of the one inferred from the extension
    #[arg(long)]
    content_type: Option<String>,

    /// File to upload
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut file = UploadFile::from_path(&cli.file).await?;
    if let Some(content_type) = cli.content_type {
        file = file.with_content_type(content_type);
    }

    let client = UploadClient::new(cli.api_url);
    match client.upload(&file, &cli.email).await {
        Ok(outcome) => {
            println!("{}", outcome.message());
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Upload failed");
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
}
