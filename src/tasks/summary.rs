use std::fmt::{Display, Formatter, Result};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of a completed pull loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub records: u64,
    pub bytes: u64,
    /// The loop ended because a stop flag was raised.
    pub cancelled: bool,
    /// The loop ended because the record limit was reached.
    pub limited: bool,
    pub started_at: DateTime<Utc>,
    pub seconds: f64,
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "records={}, bytes={}, cancelled={}, limited={}, t={:.3}s",
            self.records, self.bytes, self.cancelled, self.limited, self.seconds
        )
    }
}
