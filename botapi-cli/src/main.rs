//! botapi CLI: send messages and files, fetch updates, delete messages.
//! Config from env (and .env); `--token` overrides BOT_TOKEN.

use anyhow::{Context, Result};
use botapi_cli::{build_message, load_config, Cli, Commands};
use botapi_core::init_tracing;
use botapi_telegram::BotApi;
use clap::Parser;
use serde::Serialize;
use tracing::info;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.token)?;
    init_tracing(&config.log_file)?;

    let api = BotApi::new(&config)?;
    info!(command = ?cli.command, "Running command");

    match cli.command {
        Commands::Send {
            chat,
            text,
            file,
            reply_to,
            parse_mode,
        } => {
            let message = build_message(chat, text, file, reply_to, parse_mode);
            let envelope = api.send_message(&message).await?;
            print_json(&envelope)
        }
        Commands::Updates { offset } => {
            let envelope = api.get_updates(offset).await?;
            print_json(&envelope)
        }
        Commands::Delete { chat, message_id } => {
            let envelope = api.delete_message(&chat, message_id).await?;
            print_json(&envelope)
        }
    }
}
