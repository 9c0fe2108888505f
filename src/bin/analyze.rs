//! Sends one request to a running server and prints the raw response body.

use aeye_server::vision::DEFAULT_PROMPT;
use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "aeye-analyze")]
#[command(about = "Send a single request to the A-Eye inference server", long_about = None)]
struct Args {
    /// Server base URL
    #[arg(long, default_value = "http://localhost:8000")]
    server: String,

    /// Image path on the server's filesystem
    #[arg(short, long, default_value = "testpic.png")]
    image: String,

    /// Prompt sent with the image
    #[arg(short, long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// POST this text to /process instead of analyzing an image
    #[arg(long)]
    text: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = reqwest::Client::new();
    let base = args.server.trim_end_matches('/');

    let request = match args.text {
        Some(text) => client
            .post(format!("{}/process", base))
            .json(&json!({ "text": text })),
        None => client
            .get(format!("{}/analyze", base))
            .query(&[("image_path", &args.image), ("prompt", &args.prompt)]),
    };

    let response = request
        .send()
        .await
        .with_context(|| format!("Failed to reach server at {}", base))?;

    let body = response.text().await?;
    println!("{}", body);

    Ok(())
}
