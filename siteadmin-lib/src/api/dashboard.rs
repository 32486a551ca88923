//! Dashboard counters

use super::crud::Op;
use crate::AdminClient;
use crate::error::Error;
use crate::model::Resource;

/// Inbox totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub career_queries: u64,
    pub contact_queries: u64,
}

impl AdminClient {
    /// Fetches both inbox counters concurrently.
    pub async fn dashboard(&self) -> Result<DashboardStats, Error> {
        let (careers, contacts) = tokio::try_join!(
            self.execute(Op::count(Resource::CareerQueries)),
            self.execute(Op::count(Resource::ContactQueries)),
        )?;
        Ok(DashboardStats {
            career_queries: careers.count().unwrap_or_default(),
            contact_queries: contacts.count().unwrap_or_default(),
        })
    }
}
