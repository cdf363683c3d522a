use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::planner::DayPart;
use crate::domain::RunId;

/// Counts for one collection run.
///
/// `pairs_planned == fetched + fetch_failures` and
/// `fetched == written + write_failures` always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub day_part: DayPart,
    pub collected_at: DateTime<Utc>,
    pub origins: usize,
    pub destinations: usize,
    pub pairs_planned: usize,
    pub fetched: usize,
    pub fetch_failures: usize,
    pub written: usize,
    pub write_failures: usize,
}

impl RunReport {
    /// Every planned pair was fetched and written.
    pub fn is_clean(&self) -> bool {
        self.fetch_failures == 0 && self.write_failures == 0
    }
}
