use std::fmt::Display;

use serde::Serialize;

/// Progress counters for a sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Number of successful page fetches, including a final empty page
    pub pages_fetched: usize,
    pub orders_inserted: usize,
}

impl Display for IngestSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} orders saved from {} pages", self.orders_inserted, self.pages_fetched)
    }
}
