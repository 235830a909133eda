//! Crawl coordination
//!
//! The coordinator seeds the frontier, keeps up to the configured number of
//! fetches in flight, and runs dispatch plus sink writes on its own task so
//! extraction and persistence stay single-threaded while the network side
//! overlaps.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::scheduler::Scheduler;
use crate::extract::{CrawlClock, ExtractContext};
use crate::storage::RecordSink;
use crate::task::{dispatch, priority, FetchTask, TaskPayload, UserIdCache};
use crate::Result;
use reqwest::Client;
use std::time::Duration;
use tokio::task::JoinSet;

/// Counters reported when a crawl run finishes
#[derive(Debug, Default, Clone, Copy)]
pub struct CrawlStats {
    pub pages_fetched: u64,
    pub pages_failed: u64,
    pub records_emitted: u64,
    pub tasks_scheduled: u64,
}

/// Drives one crawl run end to end
pub struct Coordinator<S: RecordSink> {
    config: Config,
    client: Client,
    scheduler: Scheduler,
    sink: S,
    cache: UserIdCache,
    clock: CrawlClock,
}

impl<S: RecordSink> Coordinator<S> {
    /// Builds a coordinator and seeds its frontier from the config
    pub fn new(config: Config, sink: S) -> Result<Self> {
        let client = build_http_client(&config.http)?;
        let mut scheduler = Scheduler::new();
        for seed in &config.crawler.seeds {
            scheduler.push(FetchTask {
                url: format!("{}/{}/info", config.crawler.base_url, seed),
                payload: TaskPayload::ProfileInfo,
                priority: priority::HIGH,
                dedupe: true,
            });
        }
        tracing::info!("seeded frontier with {} profile fetches", scheduler.len());

        Ok(Self {
            config,
            client,
            scheduler,
            sink,
            cache: UserIdCache::new(),
            clock: CrawlClock::now(),
        })
    }

    /// Runs the crawl loop until the frontier drains
    pub async fn run(&mut self) -> Result<CrawlStats> {
        let mut stats = CrawlStats::default();
        let mut in_flight: JoinSet<(FetchTask, FetchOutcome)> = JoinSet::new();
        let cap = self.config.crawler.max_concurrent_fetches as usize;
        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);

        loop {
            while in_flight.len() < cap {
                let Some(task) = self.scheduler.pop() else {
                    break;
                };
                tracing::debug!("fetching {}", task.url);
                let client = self.client.clone();
                in_flight.spawn(async move {
                    let outcome = fetch_url(&client, &task.url).await;
                    (task, outcome)
                });
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };
            let (task, outcome) = joined?;
            self.handle_outcome(task, outcome, &mut stats)?;

            let done = stats.pages_fetched + stats.pages_failed;
            if done % 25 == 0 {
                tracing::info!(
                    "progress: {} pages done, {} in frontier, {} records emitted",
                    done,
                    self.scheduler.len(),
                    stats.records_emitted
                );
            }
        }

        self.sink.flush()?;
        tracing::info!(
            "crawl complete: {} pages fetched ({} failed), {} records emitted, {} tasks scheduled",
            stats.pages_fetched,
            stats.pages_failed,
            stats.records_emitted,
            stats.tasks_scheduled
        );
        Ok(stats)
    }

    fn handle_outcome(
        &mut self,
        task: FetchTask,
        outcome: FetchOutcome,
        stats: &mut CrawlStats,
    ) -> Result<()> {
        match outcome {
            FetchOutcome::Success { body, .. } => {
                stats.pages_fetched += 1;
                let url = task.url.clone();
                let ctx = ExtractContext {
                    base_url: &self.config.crawler.base_url,
                    clock: self.clock,
                    cache: &self.cache,
                };
                match dispatch(task, &body, &ctx) {
                    Ok(extraction) => {
                        for record in &extraction.records {
                            self.sink.upsert(record)?;
                            stats.records_emitted += 1;
                        }
                        for follow_up in extraction.tasks {
                            if self.scheduler.push(follow_up) {
                                stats.tasks_scheduled += 1;
                            }
                        }
                    }
                    Err(e) => {
                        // A page-level mismatch loses that page's records
                        // only; the crawl goes on.
                        tracing::error!("extraction failed for {}: {}", url, e);
                    }
                }
            }
            FetchOutcome::HttpError { status_code } => {
                stats.pages_failed += 1;
                tracing::warn!("HTTP {} for {}", status_code, task.url);
            }
            FetchOutcome::NetworkError { error } => {
                stats.pages_failed += 1;
                tracing::warn!("fetch failed for {}: {}", task.url, error);
            }
        }
        Ok(())
    }
}
