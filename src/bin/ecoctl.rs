//! Command-line driver for the EcoSystem API client.
//!
//! Loads `.env`, builds the client from the environment, runs the startup
//! auto-login hook, then performs the requested call.

use clap::{Parser, Subcommand};

use ecosystem_client::{ApiClient, ClientConfig, TokenStore};

#[derive(Parser, Debug)]
#[command(name = "ecoctl", about = "EcoSystem API client")]
struct Args {
    /// API base URL (overrides ECOSYSTEM_API_URL and the localhost default)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in anonymously and print the new token
    Login,
    /// Request a one-off login code by email
    MagicCode { email: String },
    /// Authenticated JSON POST; data is an inline JSON document
    Post { endpoint: String, data: String },
    /// Authenticated JSON DELETE
    Delete { endpoint: String },
    /// Fetch a private HTML fragment
    Get { endpoint: String },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let args = Args::parse();
    let config = match args.api_url {
        Some(ref url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };

    let store = match TokenStore::open_default() {
        Ok(store) => store,
        Err(e) => {
            log::error!("Cannot open token store: {}", e);
            std::process::exit(1);
        }
    };
    let client = ApiClient::new(config, store);

    // Startup hook: establish an anonymous session if none is stored.
    // Carry on after a failed login; authenticated calls are then
    // rejected by the server.
    let _ = client.ensure_logged_on().await;

    if let Err(e) = run(&client, args.command).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(client: &ApiClient, command: Command) -> Result<(), ecosystem_client::ApiError> {
    match command {
        Command::Login => match client.log_on_anon().await? {
            Some(token) => println!("{}", token),
            None => println!("login succeeded but no token was issued"),
        },
        Command::MagicCode { email } => {
            client.request_magic_code(&email).await?;
            println!("magic code sent to {}", email);
        }
        Command::Post { endpoint, data } => {
            let body: serde_json::Value = serde_json::from_str(&data)
                .unwrap_or_else(|e| {
                    log::error!("Invalid JSON data: {}", e);
                    std::process::exit(2);
                });
            let resp: serde_json::Value = client.json_post(&endpoint, &body).await?;
            println!("{}", serde_json::to_string_pretty(&resp).unwrap_or_default());
        }
        Command::Delete { endpoint } => {
            let resp: serde_json::Value = client.json_delete(&endpoint).await?;
            println!("{}", serde_json::to_string_pretty(&resp).unwrap_or_default());
        }
        Command::Get { endpoint } => {
            let html = client.html_get(&endpoint).await?;
            println!("{}", html);
        }
    }
    Ok(())
}
