use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "locale-cli")]
#[command(about = "Management CLI for the locale router", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, env = "LOCALE_ROUTER_ADMIN_KEY")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check router status and decision counts
    Status,
    /// List allowed locales with their URL segments
    Locales,
    /// Dry-run the routing decision for a request
    Decide {
        /// Request path, e.g. `/fr/` or `/`
        #[arg(short, long, default_value = "/")]
        path: String,
        /// Accept-Language header value
        #[arg(short, long)]
        accept_language: Option<String>,
        /// Stored language preference cookie value
        #[arg(short, long)]
        cookie: Option<String>,
    },
    /// Re-read the config file
    Reload,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let base = cli.url.trim_end_matches('/');
    let res = match cli.command {
        Commands::Status => {
            client
                .get(format!("{}/admin/status", base))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Locales => {
            client
                .get(format!("{}/admin/locales", base))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Decide {
            path,
            accept_language,
            cookie,
        } => {
            let mut query = vec![("path", path)];
            if let Some(value) = accept_language {
                query.push(("accept_language", value));
            }
            if let Some(value) = cookie {
                query.push(("cookie", value));
            }
            client
                .get(format!("{}/admin/decide", base))
                .query(&query)
                .headers(headers)
                .send()
                .await?
        }
        Commands::Reload => {
            client
                .post(format!("{}/admin/reload", base))
                .headers(headers)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
