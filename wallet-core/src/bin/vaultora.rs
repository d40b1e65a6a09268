//! Vaultora CLI
//!
//! Drives the wallet manager over a JSON-file store.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vaultora_core::{ChainId, FileBackend, Intent, ViewModel, WalletConfig, WalletManager};

#[derive(Parser)]
#[command(name = "vaultora")]
#[command(about = "Local HD wallet manager for Solana and Ethereum keys")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (defaults + VAULTORA_* env vars otherwise)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Store file, overrides the configured path
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new recovery phrase and its first wallet
    Generate {
        /// Chain: 501 | solana | 60 | eth
        #[arg(long)]
        chain: Option<ChainId>,
    },

    /// Start from an existing recovery phrase
    Import {
        phrase: String,

        #[arg(long)]
        chain: Option<ChainId>,
    },

    /// Derive the next wallet under the current phrase
    Add {
        #[arg(long)]
        chain: Option<ChainId>,
    },

    /// Delete the wallet at a zero-based position
    Delete { position: usize },

    /// Forget the phrase and every wallet
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },

    /// List wallets
    Show {
        /// Print private keys
        #[arg(long)]
        reveal: bool,
    },

    /// Print the recovery phrase
    Phrase,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => WalletConfig::from_json_file(path)?,
        None => WalletConfig::from_env()?,
    };
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    let default_chain = config.default_chain;

    let backend = FileBackend::new(config.store_path.clone());
    let mut manager = WalletManager::new(backend, config);
    let view = manager.hydrate();

    match cli.command {
        Commands::Generate { chain } => {
            let view = manager.handle_intent(Intent::Generate {
                chain: chain.unwrap_or(default_chain),
            })?;
            println!("New recovery phrase (write it down, never share it):\n");
            print_phrase(&view);
            println!();
            print_wallets(&view, false);
        }
        Commands::Import { phrase, chain } => {
            let view = manager.handle_intent(Intent::Import {
                phrase,
                chain: chain.unwrap_or(default_chain),
            })?;
            print_wallets(&view, false);
        }
        Commands::Add { chain } => {
            let view = manager.handle_intent(Intent::AddWallet {
                chain: chain.unwrap_or(default_chain),
            })?;
            print_wallets(&view, false);
        }
        Commands::Delete { position } => {
            let view = manager.handle_intent(Intent::DeleteWallet { position })?;
            println!("Wallet {position} deleted.");
            print_wallets(&view, false);
        }
        Commands::Clear { yes } => {
            if !yes {
                bail!("refusing to clear without --yes: the recovery phrase will be gone");
            }
            manager.handle_intent(Intent::ClearAll)?;
            println!("All wallets cleared.");
        }
        Commands::Show { reveal } => print_wallets(&view, reveal),
        Commands::Phrase => {
            if view.mnemonic.is_none() {
                bail!("no recovery phrase yet, run `vaultora generate` first");
            }
            print_phrase(&view);
        }
    }

    Ok(())
}

fn print_phrase(view: &ViewModel) {
    if let Some(phrase) = &view.mnemonic {
        for (i, word) in phrase.split_whitespace().enumerate() {
            println!("{:>2}. {}", i + 1, word);
        }
    }
}

fn print_wallets(view: &ViewModel, reveal: bool) {
    if view.wallets.is_empty() {
        println!("You have no wallets.");
        return;
    }
    for (i, wallet) in view.wallets.iter().enumerate() {
        println!("Wallet {i}");
        println!("  public:  {}", wallet.public_key);
        if reveal {
            println!("  private: {}", wallet.private_key);
        } else {
            println!("  private: {}", "•".repeat(24));
        }
    }
}
