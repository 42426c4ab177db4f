//! CLI parser, config loading and message building.

use anyhow::Result;
use botapi_core::OutboundMessage;
use botapi_telegram::TelegramConfig;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "botapi")]
#[command(about = "Telegram Bot API client CLI: send, updates, delete", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Bot token; overrides BOT_TOKEN.
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a text message, or a file with optional caption.
    Send {
        /// Target chat id (numeric or @channel).
        #[arg(short, long, allow_hyphen_values = true)]
        chat: String,
        /// Message text; the caption when --file is given.
        #[arg(long)]
        text: Option<String>,
        /// Local path or http(s) URL of a photo, video or audio file.
        #[arg(short, long)]
        file: Option<String>,
        /// Reply to this message id.
        #[arg(long)]
        reply_to: Option<i64>,
        /// Parse mode for text messages (default html).
        #[arg(long)]
        parse_mode: Option<String>,
    },
    /// Fetch pending updates once.
    Updates {
        #[arg(short, long)]
        offset: Option<i64>,
    },
    /// Delete a message.
    Delete {
        #[arg(short, long, allow_hyphen_values = true)]
        chat: String,
        #[arg(short, long)]
        message_id: i64,
    },
}

/// Load TelegramConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<TelegramConfig> {
    let mut config = TelegramConfig::load(token)?;
    config.bot_token = config.bot_token.trim().to_string();
    config.validate()?;
    Ok(config)
}

/// Builds the outbound message for `send`. A file takes precedence; text becomes its caption.
pub fn build_message(
    chat: String,
    text: Option<String>,
    file: Option<String>,
    reply_to: Option<i64>,
    parse_mode: Option<String>,
) -> OutboundMessage {
    let mut message = match file {
        Some(file) => OutboundMessage::file(chat, file),
        None => OutboundMessage::text(chat, text.clone().unwrap_or_default()),
    };
    if message.file_reference.is_some() {
        if let Some(caption) = text {
            message = message.with_caption(caption);
        }
    }
    if let Some(id) = reply_to {
        message = message.reply_to(id);
    }
    if let Some(mode) = parse_mode {
        message = message.with_parse_mode(mode);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_parse_send_text() {
        let cli = Cli::try_parse_from(["botapi", "send", "--chat", "-100123", "--text", "hi"])
            .unwrap();
        match cli.command {
            Commands::Send {
                chat, text, file, ..
            } => {
                assert_eq!(chat, "-100123");
                assert_eq!(text.as_deref(), Some("hi"));
                assert!(file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_token_and_delete() {
        let cli = Cli::try_parse_from([
            "botapi",
            "delete",
            "--chat",
            "123",
            "--message-id",
            "9",
            "--token",
            "abc",
        ])
        .unwrap();
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert!(matches!(
            cli.command,
            Commands::Delete { ref chat, message_id: 9 } if chat == "123"
        ));
    }

    #[test]
    fn test_parse_updates_offset() {
        let cli = Cli::try_parse_from(["botapi", "updates", "--offset", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::Updates { offset: Some(5) }));
    }

    #[test]
    fn test_send_requires_chat() {
        assert!(Cli::try_parse_from(["botapi", "send", "--text", "hi"]).is_err());
    }

    #[test]
    fn test_build_message_file_with_caption() {
        let message = build_message(
            "1".to_string(),
            Some("look".to_string()),
            Some("cat.png".to_string()),
            Some(4),
            None,
        );
        assert_eq!(message.file_reference_value(), Some("cat.png"));
        assert_eq!(message.text_value(), Some("look"));
        assert_eq!(message.reply_to_message_id, Some(4));
    }

    #[test]
    fn test_build_message_without_text_or_file_is_unroutable() {
        let message = build_message("1".to_string(), None, None, None, None);
        assert!(botapi_core::Route::classify(&message).is_none());
    }

    #[test]
    #[serial]
    fn test_load_config_token_override() {
        env::remove_var("BOT_TOKEN");
        let config = load_config(Some(" cli-token ".to_string())).unwrap();
        assert_eq!(config.bot_token, "cli-token");
    }

    #[test]
    #[serial]
    fn test_load_config_missing_token_fails() {
        env::remove_var("BOT_TOKEN");
        assert!(load_config(None).is_err());
    }
}
