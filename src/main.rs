use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use isrc_lookup::{bot, commands, config, error, info, management::CredentialManager, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Connect to Discord and serve lookup commands
    Run,

    /// Look up the ISRC of a Spotify track URL once and exit
    Lookup(LookupOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LookupOptions {
    /// Spotify track URL, e.g. https://open.spotify.com/track/<id>
    url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Run => {
            if let Err(e) = bot::run().await {
                error!("ISRC lookup bot stopped: {}", e);
            }
        }
        Command::Lookup(opt) => {
            let credentials = match CredentialManager::from_env().await {
                Ok(credentials) => credentials,
                Err(e) => error!("Failed to obtain spotify auth token: {}", e),
            };

            let reply = commands::lookup_url(&opt.url, &credentials).await;
            info!("{}", reply.content);
            if let Some(button) = reply.button {
                info!("{}: {}", button.label, button.url);
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
