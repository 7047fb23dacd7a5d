use clap::{Parser, Subcommand};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "hubs-cli")]
#[command(about = "Command-line client for the hubs API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:4000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the server greeting
    Greet,
    /// Print the server clock
    Now,
    /// List all hubs
    List,
    /// Show one hub
    Get { id: u64 },
    /// Create a hub from a JSON object, e.g. '{"name":"api-1"}'
    Create { fields: String },
    /// Merge JSON fields into a hub
    Update { id: u64, fields: String },
    /// Delete a hub
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Greet => print_text(client.get(format!("{base}/"))).await?,
        Commands::Now => print_text(client.get(format!("{base}/now"))).await?,
        Commands::List => print_response(client.get(format!("{base}/hubs"))).await?,
        Commands::Get { id } => print_response(client.get(format!("{base}/hubs/{id}"))).await?,
        Commands::Create { fields } => {
            let body = parse_fields(&fields)?;
            print_response(client.post(format!("{base}/hubs")).json(&body)).await?
        }
        Commands::Update { id, fields } => {
            let body = parse_fields(&fields)?;
            print_response(client.put(format!("{base}/hubs/{id}")).json(&body)).await?
        }
        Commands::Delete { id } => {
            print_response(client.delete(format!("{base}/hubs/{id}"))).await?
        }
    }

    Ok(())
}

fn parse_fields(raw: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err("hub fields must be a JSON object".into());
    }
    Ok(value)
}

async fn print_text(request: RequestBuilder) -> Result<(), Box<dyn std::error::Error>> {
    let res = request.send().await?;
    println!("{}", res.text().await?);
    Ok(())
}

async fn print_response(request: RequestBuilder) -> Result<(), Box<dyn std::error::Error>> {
    let res = request.send().await?;
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: hubs API returned status {status}");
        if !text.is_empty() {
            eprintln!("Response: {text}");
        }
        return Ok(());
    }

    if text.is_empty() {
        println!("{status}");
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
