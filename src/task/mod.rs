//! Crawl task model: typed follow-up fetches, their dispatcher, and the
//! shared user-id resolution cache

mod dispatcher;
mod fetch_task;
mod id_cache;

pub use dispatcher::dispatch;
pub use fetch_task::{priority, FetchTask, TaskPayload};
pub use id_cache::UserIdCache;
