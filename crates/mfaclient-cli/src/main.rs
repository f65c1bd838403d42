//! mfaclient - log in to a two-factor authentication API from the terminal.
//!
//! The session token is kept between runs, so `auto-login` and `whoami` can
//! restore the user without asking for credentials again.

mod app;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use mfaclient_core::Config;

/// Directory for a daily rolling log file, in addition to stderr
const ENV_LOG_DIR: &str = "MFACLIENT_LOG_DIR";

/// Prefix of the rolling log files
const LOG_FILE_PREFIX: &str = "mfaclient.log";

#[derive(Parser)]
#[command(name = "mfaclient", version, about)]
struct Cli {
    /// Keep the token in memory only; nothing is persisted
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify credentials and store the session token
    Login {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(long, env = "MFACLIENT_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// One-time code from your authenticator app
        #[arg(short, long)]
        code: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Restore the session from the stored token
    AutoLogin {
        /// Location to return to once the session is restored
        #[arg(long)]
        from: Option<String>,
    },
    /// Print the user the stored token belongs to
    Whoami,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var_os(ENV_LOG_DIR) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_tracing();

    let config = Config::load()?;
    let mut app = App::new(config, cli.ephemeral)?;

    let ok = match cli.command {
        Command::Login {
            username,
            password,
            code,
        } => app.login(username, password, code).await?,
        Command::Logout => {
            app.logout();
            true
        }
        Command::AutoLogin { from } => {
            app.auto_login(from.as_deref()).await;
            true
        }
        Command::Whoami => app.whoami().await?,
    };

    info!(ok, "mfaclient finished");
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
