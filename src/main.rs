//! Lockbox - per-user encrypted secrets with breach checks.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lockbox::cli::output;
use lockbox::cli::{execute, Cli};
use lockbox::error::{BreachError, Error, ProtectError, StoreError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("LOCKBOX_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("lockbox=debug")
        } else {
            EnvFilter::new("lockbox=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.store) {
        let suggestion = match &e {
            Error::Store(StoreError::NotFound(_)) => Some("run: lockbox new"),
            Error::Store(StoreError::PropertyNotFound(_)) => Some("run: lockbox list"),
            Error::Store(StoreError::CorruptStore(_)) => {
                Some("restore the store from a backup or run: lockbox new --force")
            }
            Error::Protect(ProtectError::NoKey(_)) => {
                Some("no key for this user and host; the store was created elsewhere")
            }
            Error::Protect(ProtectError::DecryptionFailed(_)) => {
                Some("the store was created by a different user or host")
            }
            Error::Breach(BreachError::TransportUnavailable(_)) => {
                Some("check your network connection")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
