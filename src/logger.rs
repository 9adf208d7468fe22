//! The logging context: default tags, filter clauses, and sinks.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::filter::{self, ClauseStore, FilterClause};
use crate::output::Output;
use crate::record::LogRecord;
use crate::tag::Tag;

/// UTC wall clock at millisecond precision, e.g. `2025-04-03T21:35:06.108`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

#[derive(Default)]
struct State {
    default_tags: BTreeMap<String, Tag>,
    clauses: ClauseStore,
    next_clause_id: u64,
    outputs: Vec<Arc<dyn Output>>,
}

/// An explicit logging context.
///
/// One `Logger` holds the default tag set, the filter clause store, and
/// the sink registry. Cloning is cheap and shares the same state, so a
/// logger can be handed to any number of threads; every structural
/// mutation and every per-call snapshot runs under a single internal
/// guard, which is never held across sink I/O.
///
/// Nothing on this surface returns an error or panics: logging must
/// never interrupt the caller's control flow.
#[derive(Clone, Default)]
pub struct Logger {
    state: Arc<Mutex<State>>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or override a default tag by key. Default tags are
    /// merged into every log call unless overridden at the call site.
    pub fn add_default_tag(&self, tag: Tag) {
        let mut state = self.lock();
        state.default_tags.insert(tag.key().to_string(), tag);
    }

    /// Register a destination. Sinks are never removed; a record fans
    /// out to them in registration order.
    pub fn add_output(&self, output: impl Output + 'static) {
        let mut state = self.lock();
        state.outputs.push(Arc::new(output));
    }

    /// Allocate and store an empty filter clause, returning its id.
    /// Ids are strictly increasing for the life of the logger and are
    /// never reused.
    pub fn create_filter_clause(&self) -> u64 {
        let mut state = self.lock();
        state.next_clause_id += 1;
        let id = state.next_clause_id;
        state.clauses.insert(id, FilterClause::default());
        id
    }

    /// Append a literal to a clause. An unknown id is a silent no-op.
    pub fn add_filter_literal(&self, id: u64, tag: Tag, inverted: bool) {
        let mut state = self.lock();
        if let Some(clause) = state.clauses.get_mut(&id) {
            if inverted {
                clause.inverted_literals.push(tag);
            } else {
                clause.normal_literals.push(tag);
            }
        }
    }

    /// Remove a clause. An unknown id is a silent no-op.
    pub fn clear_filter_clause(&self, id: u64) {
        let mut state = self.lock();
        state.clauses.remove(&id);
    }

    /// Begin a log record with the given call-site tags merged over the
    /// default tags (call-site wins on key collision).
    ///
    /// The returned record already carries the timestamp and the
    /// sorted-by-key tag prefix, and its proceed/suppress decision is
    /// frozen here — the filter store is consulted exactly once per
    /// call. Message text accumulates on the record; the flush-or-
    /// discard happens when the record goes out of scope.
    pub fn log(&self, tags: &[Tag]) -> LogRecord {
        let mut line = Utc::now().format(TIMESTAMP_FORMAT).to_string();

        let state = self.lock();
        let mut active = state.default_tags.clone();
        for tag in tags {
            active.insert(tag.key().to_string(), tag.clone());
        }
        for tag in active.values() {
            line.push(' ');
            line.push_str(&tag.text());
        }
        line.push(' ');

        let proceed = filter::evaluate(&state.clauses, &active);
        let outputs = state.outputs.clone();
        drop(state);

        LogRecord::new(line, proceed, outputs)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A thread that panicked while holding the guard cannot have
        // left the containers mid-update (no panicking paths below), so
        // poisoning is absorbed rather than propagated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
