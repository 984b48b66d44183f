use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use log::warn;
use std::sync::Arc;

use mail_chat::api::MailApi;
use mail_chat::api::http::HttpMailApi;
use mail_chat::auth::token_store;
use mail_chat::chat::conversation::Conversation;
use mail_chat::chat::session::Session;
use mail_chat::config::load_config;
use mail_chat::terminal::{run_plain, run_tui};

#[derive(Parser)]
#[command(name = "mail_chat")]
#[command(about = "Chat with your mailbox through the mail backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a chat (terminal UI)
    Chat {
        /// Read commands from stdin line by line instead of the UI
        #[arg(long)]
        plain: bool,
    },

    /// Store the backend bearer token in keyring
    Login {
        /// Token value; read from stdin when omitted
        #[arg(long)]
        token: Option<String>,
    },

    /// Log out on the backend and forget the stored token
    Logout,

    /// Print the signed-in address
    Profile,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;

    match cli.cmd {
        Command::Login { token } => {
            let token = match token {
                Some(t) => t,
                None => {
                    eprintln!("Paste bearer token (end with Ctrl-D):");
                    let mut t = String::new();
                    std::io::Read::read_to_string(&mut std::io::stdin(), &mut t)?;
                    t
                }
            };
            let token = token.trim();
            if token.is_empty() {
                return Err(anyhow!("empty token"));
            }
            token_store::save_token(&cfg.api_base, token)?;
            println!("Saved token for {}", cfg.api_base);
            Ok(())
        }

        Command::Logout => {
            let api = HttpMailApi::from_config(&cfg)?;
            if let Some(token) = token_store::load_token(&cfg.api_base)? {
                // best-effort: the local token goes away either way
                if let Err(e) = api.logout(&token) {
                    warn!("backend logout failed: {e}");
                }
            }
            token_store::delete_token(&cfg.api_base)?;
            println!("Logged out of {}", cfg.api_base);
            Ok(())
        }

        Command::Profile => {
            let api = HttpMailApi::from_config(&cfg)?;
            let token = token_store::resolve_token(&cfg.api_base)?;
            let profile = api
                .profile(&token)
                .map_err(|e| anyhow!("Could not load profile: {e}"))?;
            println!("{}", profile.email_address);
            Ok(())
        }

        Command::Chat { plain } => {
            let api = HttpMailApi::from_config(&cfg)?;
            let token = token_store::resolve_token(&cfg.api_base)?;

            let profile = api
                .profile(&token)
                .map_err(|e| anyhow!("Not signed in ({e}); run `mail_chat login`"))?;
            if let Some(expected) = &cfg.user_email
                && !expected.eq_ignore_ascii_case(&profile.email_address)
            {
                warn!(
                    "signed in as {} but config says {}",
                    profile.email_address, expected
                );
            }

            let conversation = Conversation::new(Session::new(token).with_profile(profile));
            if plain {
                run_plain(conversation, &api)
            } else {
                run_tui(conversation, Arc::new(api), cfg.user_email.as_deref())
            }
        }
    }
}
