pub mod config;
pub mod connection;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::StoreConfig;
pub use connection::Connection;
pub use error::{Error, ErrorCode, Result};
pub use pipeline::{AggregateStore, DocumentCursor, Pipeline, ResultStream};
pub use report::{Report, ReportOptions, ReportOutput, ReportRows};
