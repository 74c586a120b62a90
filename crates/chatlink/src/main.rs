use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chatlink::llm::Message;
use chatlink::{ChatClient, Settings};

/// Send a fixed two-message conversation to the configured provider.
#[derive(Debug, Parser)]
#[command(name = "chatlink", version, about)]
struct Cli {
    /// Path to the JSON settings file
    #[arg(
        short,
        long,
        env = "CHATLINK_SETTINGS",
        default_value = "secret_setting.json"
    )]
    settings: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings).await?;

    tracing::info!(
        provider = %settings.provider,
        base_url = %settings.base_url,
        model = %settings.model,
        json_mode = settings.json_mode,
        "loaded settings"
    );

    let client = ChatClient::from_settings(&settings)?;
    let messages = [
        Message::system("You are a helpful assistant. Reply in one short sentence."),
        Message::user("Say hello and tell me which model you are."),
    ];
    let completion = client.complete(&messages).await?;

    println!("\n--- RESPONSE ---\n{}", completion.content);
    println!("\n--- TOKENS ---\n{}", completion.total_tokens);

    Ok(())
}
