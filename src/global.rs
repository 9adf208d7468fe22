//! Process-wide convenience logger.
//!
//! Libraries should take a [`Logger`] explicitly; applications that want
//! one logger for the whole process can use these free functions
//! instead of threading a context through every call site.

use std::sync::LazyLock;

use crate::logger::Logger;
use crate::output::Output;
use crate::record::LogRecord;
use crate::tag::Tag;

static GLOBAL: LazyLock<Logger> = LazyLock::new(Logger::new);

/// The shared logger behind the free functions.
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Begin a record on the process-wide logger.
pub fn log(tags: &[Tag]) -> LogRecord {
    GLOBAL.log(tags)
}

pub fn add_default_tag(tag: Tag) {
    GLOBAL.add_default_tag(tag);
}

pub fn add_log_output(output: impl Output + 'static) {
    GLOBAL.add_output(output);
}

pub fn create_filter_clause() -> u64 {
    GLOBAL.create_filter_clause()
}

pub fn add_filter_literal(id: u64, tag: Tag, inverted: bool) {
    GLOBAL.add_filter_literal(id, tag, inverted);
}

pub fn clear_filter_clause(id: u64) {
    GLOBAL.clear_filter_clause(id);
}
