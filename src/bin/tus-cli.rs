use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use tus_header_parser::tus::{HeaderParser, TUS_RESUMABLE};

#[derive(Parser)]
#[command(name = "tus-cli")]
#[command(about = "Decode tus protocol headers locally or against a running echo server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a single header value
    Decode {
        /// Header name, e.g. Upload-Metadata
        header: String,
        /// Raw header value
        value: String,
        /// Accepted Tus-Resumable versions (repeatable)
        #[arg(long = "supported-version", default_value = TUS_RESUMABLE)]
        supported_versions: Vec<String>,
    },
    /// Send headers to an echo server and print what it decoded
    Probe {
        #[arg(short, long, default_value = "http://localhost:1080/files")]
        url: String,
        /// Header as 'Name: value' (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            header,
            value,
            supported_versions,
        } => {
            let parser = HeaderParser::new(supported_versions);
            match parser.decode_named(&header, &value) {
                Ok(decoded) => println!("{}", serde_json::to_string_pretty(&decoded)?),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Probe { url, headers } => {
            let client = reqwest::Client::new();
            let res = client
                .post(&url)
                .headers(parse_header_args(&headers)?)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

fn parse_header_args(args: &[String]) -> Result<HeaderMap, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    for arg in args {
        let (name, value) = arg
            .split_once(':')
            .ok_or_else(|| format!("expected 'Name: value', got {:?}", arg))?;
        headers.append(
            HeaderName::from_bytes(name.trim().as_bytes())?,
            HeaderValue::from_str(value.strip_prefix(' ').unwrap_or(value))?,
        );
    }
    Ok(headers)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: echo server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
