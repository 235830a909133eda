//! Record persistence: the sink trait and its SQLite implementation

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteSink;
pub use traits::{RecordSink, SinkError, SinkResult};
