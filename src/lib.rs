//! Structured, filterable logging with typed key/value tags.
//!
//! Callers attach typed tags to a message, per-logger filter clauses
//! decide whether the message is worth emitting, and emitted lines fan
//! out to every registered sink in registration order. The per-call
//! [`LogRecord`] freezes the filter decision when it is created and
//! flushes or discards exactly once when it goes out of scope.
//!
//! ```
//! use taglog::{Logger, StreamOutput, Tag, tag::log_level};
//!
//! let logger = Logger::new();
//! logger.add_output(StreamOutput::stdout());
//! logger.add_default_tag(log_level("info"));
//!
//! logger.log(&[Tag::int("count", 3)]).append("ready");
//! ```

pub mod config;
pub mod filter;
pub mod global;
pub mod logger;
pub mod output;
pub mod record;
pub mod tag;

pub use config::{ConfigError, LoggerConfig, load_config};
pub use filter::FilterClause;
pub use logger::Logger;
pub use output::{FileOutput, Output, SharedStream, StreamOutput};
pub use record::LogRecord;
pub use tag::{Tag, TagOperation, TagValue};
