//! Login, registration and logout.

use anyhow::{Context, Result};
use clap::Parser;
use inquire::Password;

use crate::session::Session;

#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long, short = 'u')]
    pub username: String,

    /// Password (prompted for when omitted)
    #[arg(long, short = 'p', env = "SITEADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long, short = 'u')]
    pub username: String,

    /// Password (prompted for, with confirmation, when omitted)
    #[arg(long, short = 'p')]
    pub password: Option<String>,
}

/// Exchanges credentials for a token and stores it.
pub async fn run_login(session: &Session, args: LoginArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => Password::new("Password:")
            .without_confirmation()
            .prompt()
            .context("Failed to read password")?,
    };

    let token = session
        .login_flow()
        .await?
        .login(&args.username, &password)
        .await?;
    session.settings().set_token(&token.access_token).await?;

    log::info!("Logged in as {}", args.username);
    println!("Logged in as {}", args.username);
    Ok(())
}

pub async fn run_register(session: &Session, args: RegisterArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => Password::new("Password:")
            .with_custom_confirmation_message("Confirm password:")
            .prompt()
            .context("Failed to read password")?,
    };

    session
        .login_flow()
        .await?
        .register(&args.username, &password)
        .await?;

    log::info!("Registered user {}", args.username);
    println!(
        "Registered {}. Log in with `siteadmin login -u {}`.",
        args.username, args.username
    );
    Ok(())
}

/// Forgets the stored token.
pub async fn run_logout(session: &Session) -> Result<()> {
    session.settings().clear_auth().await?;
    log::info!("Logged out");
    println!("Logged out");
    Ok(())
}
