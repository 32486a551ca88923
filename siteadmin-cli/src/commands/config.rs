//! Stored settings.

use anyhow::Result;
use clap::Parser;
use siteadmin_lib::AdminClient;
use siteadmin_lib::auth::StaticTokenProvider;
use siteadmin_lib::table::PageSize;

use super::parse_page_size;
use crate::paths;
use crate::session::Session;
use crate::settings::{BACKEND_URL, TABLE_PAGE_SIZE};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Store the backend base URL
    #[arg(long)]
    pub url: Option<String>,

    /// Store the default rows per page (5, 10, 25 or 50)
    #[arg(long, value_parser = parse_page_size)]
    pub page_size: Option<PageSize>,
}

/// Updates the given settings, then prints them all.
pub async fn run_config(session: &Session, args: ConfigArgs) -> Result<()> {
    let settings = session.settings();

    if let Some(url) = &args.url {
        // Fail before storing a URL the client would reject
        AdminClient::builder()
            .url(url.as_str())
            .token_provider(StaticTokenProvider::new(""))
            .build()?;
        settings.set_backend_url(url).await?;
    }
    if let Some(size) = args.page_size {
        settings.set_page_size(size).await?;
    }

    let url = settings.backend_url().await?;
    let logged_in = settings.token().await?.is_some();
    println!("{:<16} {}", BACKEND_URL, url.as_deref().unwrap_or("(not set)"));
    println!("{:<16} {}", TABLE_PAGE_SIZE, settings.page_size().await?);
    println!(
        "{:<16} {}",
        "auth",
        if logged_in { "logged in" } else { "logged out" }
    );
    if let Some(db) = paths::settings_db() {
        println!("{:<16} {}", "settings file", db.display());
    }
    Ok(())
}
