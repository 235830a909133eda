//! Fetch-and-schedule substrate
//!
//! The extractors only *describe* fetches as tasks; this module actually
//! performs them: an HTTP client, a priority frontier with URL
//! de-duplication, and the coordinator loop wiring fetched responses
//! through the dispatcher into the sink.

mod coordinator;
mod fetcher;
mod scheduler;

pub use coordinator::{Coordinator, CrawlStats};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::storage::SqliteSink;
use crate::Result;
use std::path::Path;

/// Runs a complete crawl from the configured seeds into the configured sink
pub async fn crawl(config: Config) -> Result<CrawlStats> {
    let sink = SqliteSink::open(Path::new(&config.output.database_path))?;
    let mut coordinator = Coordinator::new(config, sink)?;
    coordinator.run().await
}
