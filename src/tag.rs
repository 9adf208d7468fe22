//! Typed key/value tags with relational matching.
//!
//! A tag annotates a log line (`key=value` in the rendered line) and,
//! when constructed with an operator, doubles as a filter predicate that
//! can be matched against a concrete tag with the same key.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Relational operator carried by a tag.
///
/// `None` marks a concrete value. Any other operator turns the tag into
/// a predicate; see [`Tag::matches`] for how predicates and concrete
/// values interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagOperation {
    #[default]
    None,
    Equal,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

/// The closed set of value kinds a tag can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Str(String),
    Int(i32),
    Int64(i64),
    Double(f64),
    Bool(bool),
}

impl TagValue {
    fn render(&self) -> String {
        match self {
            TagValue::Str(v) => format!("\"{v}\""),
            TagValue::Int(v) => v.to_string(),
            TagValue::Int64(v) => v.to_string(),
            // Fixed six fractional digits, the historical rendering that
            // downstream log consumers parse.
            TagValue::Double(v) => format!("{v:.6}"),
            TagValue::Bool(v) => if *v { "true" } else { "false" }.to_string(),
        }
    }

    /// Exact equality within one kind. Mixed kinds never compare equal,
    /// and doubles use exact IEEE equality (no tolerance).
    fn equals(&self, other: &TagValue) -> bool {
        match (self, other) {
            (TagValue::Str(a), TagValue::Str(b)) => a == b,
            (TagValue::Int(a), TagValue::Int(b)) => a == b,
            (TagValue::Int64(a), TagValue::Int64(b)) => a == b,
            (TagValue::Double(a), TagValue::Double(b)) => a == b,
            (TagValue::Bool(a), TagValue::Bool(b)) => a == b,
            _ => false,
        }
    }

    /// Evaluate `operation(self, criteria)`.
    ///
    /// Strings compare lexicographically, numeric kinds use their native
    /// ordering, and booleans support only `Equal`. Mixed kinds never
    /// match.
    fn compare(&self, operation: TagOperation, criteria: &TagValue) -> bool {
        match (self, criteria) {
            (TagValue::Str(a), TagValue::Str(b)) => ordered(a.cmp(b), operation),
            (TagValue::Int(a), TagValue::Int(b)) => ordered(a.cmp(b), operation),
            (TagValue::Int64(a), TagValue::Int64(b)) => ordered(a.cmp(b), operation),
            (TagValue::Double(a), TagValue::Double(b)) => match a.partial_cmp(b) {
                Some(ordering) => ordered(ordering, operation),
                None => false,
            },
            (TagValue::Bool(a), TagValue::Bool(b)) => {
                operation == TagOperation::Equal && a == b
            }
            _ => false,
        }
    }
}

fn ordered(ordering: Ordering, operation: TagOperation) -> bool {
    match operation {
        TagOperation::Equal => ordering == Ordering::Equal,
        TagOperation::LessThan => ordering == Ordering::Less,
        TagOperation::LessThanOrEqual => ordering != Ordering::Greater,
        TagOperation::GreaterThan => ordering == Ordering::Greater,
        TagOperation::GreaterThanOrEqual => ordering != Ordering::Less,
        TagOperation::None => false,
    }
}

/// A typed key/value pair, optionally carrying a relational operator.
///
/// Every instance of a semantic tag kind shares one key (tag-kind
/// constructors take a `&'static str`; config-defined tags get an owned
/// key with the same process-long lifetime in practice).
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    key: Cow<'static, str>,
    value: TagValue,
    operation: TagOperation,
}

impl Tag {
    /// String-valued tag; renders double-quoted.
    pub fn str(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::new(key, TagValue::Str(value.into()))
    }

    pub fn int(key: impl Into<Cow<'static, str>>, value: i32) -> Self {
        Self::new(key, TagValue::Int(value))
    }

    pub fn int64(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::new(key, TagValue::Int64(value))
    }

    pub fn double(key: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self::new(key, TagValue::Double(value))
    }

    pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        Self::new(key, TagValue::Bool(value))
    }

    fn new(key: impl Into<Cow<'static, str>>, value: TagValue) -> Self {
        Self {
            key: key.into(),
            value,
            operation: TagOperation::None,
        }
    }

    /// Turn the tag into a predicate carrying the given operator.
    pub fn with_operation(mut self, operation: TagOperation) -> Self {
        self.operation = operation;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &TagValue {
        &self.value
    }

    pub fn operation(&self) -> TagOperation {
        self.operation
    }

    /// Deterministic `key=value` rendering used both for log lines and
    /// diagnostics. String values are double-quoted, everything else is
    /// bare.
    pub fn text(&self) -> String {
        format!("{}={}", self.key, self.value.render())
    }

    /// Whether two tags are compatible and satisfy a comparison.
    ///
    /// Evaluated exactly in this order:
    /// 1. different keys never match;
    /// 2. two concrete tags match iff their values are equal;
    /// 3. one predicate side: the predicate's operator is applied with
    ///    the concrete side's value on the left and the predicate's
    ///    value as the criteria;
    /// 4. two predicates never match.
    pub fn matches(&self, other: &Tag) -> bool {
        if self.key != other.key {
            return false;
        }
        match (self.operation, other.operation) {
            (TagOperation::None, TagOperation::None) => self.value.equals(&other.value),
            (TagOperation::None, operation) => self.value.compare(operation, &other.value),
            (operation, TagOperation::None) => other.value.compare(operation, &self.value),
            _ => false,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Key shared by every log-level tag.
pub const LOG_LEVEL_KEY: &str = "log_level";

/// Construct a concrete `log_level` tag, e.g. `log_level("error")`.
pub fn log_level(value: impl Into<String>) -> Tag {
    Tag::str(LOG_LEVEL_KEY, value)
}
