//! Command-line interface.

pub mod check;
pub mod completions;
pub mod output;
pub mod prompt;
pub mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::config::Config;
use crate::core::protect::AgeProtector;
use crate::core::store::SecretStore;
use crate::error::{Result, StoreError};

/// Lockbox - per-user encrypted secrets with breach checks.
#[derive(Parser)]
#[command(
    name = "lockbox",
    about = "Per-user encrypted secrets with breach checks",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Store file (defaults to ~/.lockbox/store.dat)
    #[arg(long, global = true, env = "LOCKBOX_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a new, empty store
    New {
        /// Replace an existing store
        #[arg(short, long)]
        force: bool,
    },

    /// List property names
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a property value
    Get {
        /// Property name
        name: String,
    },

    /// Set a property (prompts when no value is given)
    Set {
        /// Property name
        name: String,
        /// Property value
        value: Option<String>,
    },

    /// Set a property to a random value
    Generate {
        /// Property name
        name: String,
        /// Number of characters
        #[arg(short, long)]
        length: Option<usize>,
        /// Include punctuation
        #[arg(short, long)]
        special: bool,
        /// Exclude punctuation even if config enables it
        #[arg(long, conflicts_with = "special")]
        no_special: bool,
        /// Print the generated value
        #[arg(long)]
        show: bool,
    },

    /// Delete a property
    Rm {
        /// Property name
        name: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Check whether a password appears in known breaches
    Check {
        /// Range endpoint base
        #[arg(long, env = "LOCKBOX_ENDPOINT")]
        endpoint: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a random password without storing it
    Password {
        /// Number of characters
        #[arg(short, long)]
        length: Option<usize>,
        /// Include punctuation
        #[arg(short, long)]
        special: bool,
        /// Exclude punctuation even if config enables it
        #[arg(long, conflicts_with = "special")]
        no_special: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Resolved settings shared by all commands.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub store_path: PathBuf,
}

impl Context {
    /// Merge the config file with command-line overrides.
    pub fn resolve(store_override: Option<PathBuf>) -> Result<Self> {
        let config = Config::load()?;
        let store_path = match store_override {
            Some(p) => p,
            None => config.store_path()?,
        };
        debug!(store = %store_path.display(), "context resolved");
        Ok(Self { config, store_path })
    }

    /// Open an existing store with the current user's identity.
    ///
    /// Never creates a key: a missing store or key is reported as is.
    pub fn open_store(&self) -> Result<SecretStore<AgeProtector>> {
        if !self.store_path.exists() {
            return Err(StoreError::NotFound(self.store_path.clone()).into());
        }
        let protector = AgeProtector::existing_for_current_user()?;
        Ok(SecretStore::new(self.store_path.clone(), protector))
    }

    /// Whether to draw punctuation: explicit flags win over config.
    pub fn special(&self, special: bool, no_special: bool) -> bool {
        if no_special {
            false
        } else {
            special || self.config.special()
        }
    }

    /// Store handle for `new`, generating the identity on first use.
    pub fn store_for_create(&self) -> Result<SecretStore<AgeProtector>> {
        let protector = AgeProtector::for_current_user()?;
        Ok(SecretStore::new(self.store_path.clone(), protector))
    }
}

/// Execute a command.
pub fn execute(command: Command, store_path: Option<PathBuf>) -> Result<()> {
    use Command::*;

    if let Completions { shell } = command {
        return completions::execute(shell);
    }

    let ctx = Context::resolve(store_path)?;

    match command {
        New { force } => store::new(&ctx, force),
        List { json } => store::list(&ctx, json),
        Get { name } => store::get(&ctx, &name),
        Set { name, value } => store::set(&ctx, &name, value),
        Generate {
            name,
            length,
            special,
            no_special,
            show,
        } => store::generate(&ctx, &name, length, ctx.special(special, no_special), show),
        Rm { name, yes } => store::rm(&ctx, &name, yes),
        Check { endpoint, json } => check::execute(&ctx, endpoint, json),
        Password {
            length,
            special,
            no_special,
        } => check::password(&ctx, length, ctx.special(special, no_special)),
        Completions { .. } => Ok(()),
    }
}
