//! Gallery image priority and caption.

use anyhow::{Result, bail};
use clap::Parser;

use crate::session::Session;

#[derive(Parser, Debug)]
pub struct PriorityArgs {
    /// Gallery image id
    pub image_id: String,

    /// Display priority, starting at 1
    pub priority: i64,
}

#[derive(Parser, Debug)]
pub struct CaptionArgs {
    /// Gallery image id
    pub image_id: String,

    /// New caption; an empty string removes it
    pub caption: String,
}

pub async fn run_priority(session: &Session, args: PriorityArgs) -> Result<()> {
    if args.priority < 1 {
        bail!("Priority must be 1 or higher");
    }
    let client = session.client().await?;
    client.set_priority(&args.image_id, args.priority).await?;
    println!("Priority of {} set to {}", args.image_id, args.priority);
    Ok(())
}

pub async fn run_caption(session: &Session, args: CaptionArgs) -> Result<()> {
    let client = session.client().await?;
    client.set_caption(&args.image_id, &args.caption).await?;
    if args.caption.is_empty() {
        println!("Caption of {} removed", args.image_id);
    } else {
        println!("Caption of {} updated", args.image_id);
    }
    Ok(())
}
