//! Inbox counts shown on the dashboard.

use anyhow::Result;

use crate::session::Session;

pub async fn run_dashboard(session: &Session) -> Result<()> {
    let client = session.client().await?;
    let stats = client.dashboard().await?;

    println!("Dashboard");
    println!("  Career queries   {:>6}", stats.career_queries);
    println!("  Contact queries  {:>6}", stats.contact_queries);
    Ok(())
}
