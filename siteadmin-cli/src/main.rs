//! siteadmin - content administration console for the company website backend
//!
//! Lists, searches and pages through every content collection, and creates,
//! edits, deletes and toggles records over the backend's REST API.

mod columns;
mod commands;
mod paths;
mod render;
mod session;
mod settings;

use std::fs::File;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::{Config, LevelFilter, WriteLogger};
use siteadmin_lib::error::{AuthError, Error};

use commands::auth::{LoginArgs, RegisterArgs};
use commands::browse::BrowseArgs;
use commands::config::ConfigArgs;
use commands::gallery::{CaptionArgs, PriorityArgs};
use commands::records::{CreateArgs, DeleteArgs, EditArgs, ListArgs, ShowArgs, ToggleArgs};
use session::Session;
use settings::SettingsProvider;

#[derive(Parser, Debug)]
#[command(
    name = "siteadmin",
    version,
    about = "Manage website content from the terminal"
)]
struct Cli {
    /// Backend base URL (overrides the stored setting)
    #[arg(long, global = true, env = "SITEADMIN_URL")]
    url: Option<String>,

    /// Bearer token (overrides the stored login)
    #[arg(long, global = true, env = "SITEADMIN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and store the session token
    Login(LoginArgs),
    /// Create an account
    Register(RegisterArgs),
    /// Forget the stored session token
    Logout,
    /// Show inbox counts
    Dashboard,
    /// Print one page of a resource's table
    List(ListArgs),
    /// Page, search and sort a resource interactively
    Browse(BrowseArgs),
    /// Print every field of a record
    Show(ShowArgs),
    /// Create a record
    Create(CreateArgs),
    /// Change fields of an existing record
    Edit(EditArgs),
    /// Delete a record
    Delete(DeleteArgs),
    /// Flip a boolean flag on a record
    Toggle(ToggleArgs),
    /// Set the display priority of a gallery image
    Priority(PriorityArgs),
    /// Set the caption of a gallery image
    Caption(CaptionArgs),
    /// Show or change stored settings
    Config(ConfigArgs),
}

fn init_logging() {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    // Logging is best effort; commands still run without a log file
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
    }
}

async fn open_settings() -> Result<SettingsProvider> {
    let path = paths::settings_db().context("Could not determine the data directory")?;
    SettingsProvider::open(&path)
        .await
        .with_context(|| format!("Failed to open settings at {}", path.display()))
}

async fn run(cli: Cli) -> Result<()> {
    let session = Session::new(open_settings().await?, cli.url, cli.token);

    match cli.command {
        Commands::Login(args) => commands::run_login(&session, args).await,
        Commands::Register(args) => commands::run_register(&session, args).await,
        Commands::Logout => commands::run_logout(&session).await,
        Commands::Dashboard => commands::run_dashboard(&session).await,
        Commands::List(args) => commands::run_list(&session, args).await,
        Commands::Browse(args) => commands::run_browse(&session, args).await,
        Commands::Show(args) => commands::run_show(&session, args).await,
        Commands::Create(args) => commands::run_create(&session, args).await,
        Commands::Edit(args) => commands::run_edit(&session, args).await,
        Commands::Delete(args) => commands::run_delete(&session, args).await,
        Commands::Toggle(args) => commands::run_toggle(&session, args).await,
        Commands::Priority(args) => commands::run_priority(&session, args).await,
        Commands::Caption(args) => commands::run_caption(&session, args).await,
        Commands::Config(args) => commands::run_config(&session, args).await,
    }
}

/// Suggests logging in again when the backend refused the session.
fn auth_hint(error: &anyhow::Error) -> Option<&'static str> {
    match error.downcast_ref::<Error>() {
        Some(Error::Auth(AuthError::MissingToken)) => Some("Run `siteadmin login` first."),
        Some(Error::Auth(AuthError::TokenRejected { .. })) => {
            Some("Your session has expired. Run `siteadmin login` again.")
        }
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    log::debug!("siteadmin {} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        if let Some(hint) = auth_hint(&e) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}
