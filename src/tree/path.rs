//! Fold paths: ordered segment sequences addressing nodes from the root.
//!
//! A segment is either a concrete child key or the wildcard sentinel `*`.
//! The marker key `folded` is reserved and can never be used as a segment.

use crate::error::FoldError;
use serde_json::Value;
use std::fmt;

/// Segment value that matches every direct child of the node reached so far.
pub const WILDCARD: &str = "*";

/// Reserved attribute name holding a node's folded flag in the serialized tree.
pub const MARKER_KEY: &str = "folded";

/// One step of a [`FoldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Wildcard,
}

impl Segment {
    /// Parse a raw segment, mapping `*` to [`Segment::Wildcard`].
    pub fn parse(raw: &str) -> Result<Self, FoldError> {
        match raw {
            WILDCARD => Ok(Segment::Wildcard),
            MARKER_KEY => Err(FoldError::InvalidArgument(format!(
                "'{}' is reserved and cannot be used as a path segment",
                MARKER_KEY
            ))),
            key => Ok(Segment::Key(key.to_string())),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }

    /// Concrete key, or `None` for the wildcard.
    pub fn key(&self) -> Option<&str> {
        match self {
            Segment::Key(key) => Some(key),
            Segment::Wildcard => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Wildcard => f.write_str(WILDCARD),
        }
    }
}

/// Ordered sequence of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FoldPath(Vec<Segment>);

impl FoldPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Build a path from raw string segments.
    pub fn parse<I, S>(raw: I) -> Result<Self, FoldError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(|s| Segment::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the final segment is the wildcard sentinel.
    pub fn ends_with_wildcard(&self) -> bool {
        self.0.last().is_some_and(Segment::is_wildcard)
    }

    pub fn has_wildcard(&self) -> bool {
        self.0.iter().any(Segment::is_wildcard)
    }
}

impl fmt::Display for FoldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}

impl From<Vec<Segment>> for FoldPath {
    fn from(value: Vec<Segment>) -> Self {
        Self(value)
    }
}

/// Conversion from caller-supplied path input into a validated [`FoldPath`].
///
/// Store operations accept anything implementing this trait. Input that is not
/// a sequence of strings is rejected with [`FoldError::InvalidArgument`].
pub trait AsFoldPath {
    fn to_fold_path(&self) -> Result<FoldPath, FoldError>;
}

impl AsFoldPath for FoldPath {
    fn to_fold_path(&self) -> Result<FoldPath, FoldError> {
        Ok(self.clone())
    }
}

impl AsFoldPath for [&str] {
    fn to_fold_path(&self) -> Result<FoldPath, FoldError> {
        FoldPath::parse(self)
    }
}

impl AsFoldPath for [String] {
    fn to_fold_path(&self) -> Result<FoldPath, FoldError> {
        FoldPath::parse(self)
    }
}

impl<const N: usize> AsFoldPath for [&str; N] {
    fn to_fold_path(&self) -> Result<FoldPath, FoldError> {
        FoldPath::parse(self)
    }
}

impl AsFoldPath for Vec<&str> {
    fn to_fold_path(&self) -> Result<FoldPath, FoldError> {
        FoldPath::parse(self)
    }
}

impl AsFoldPath for Vec<String> {
    fn to_fold_path(&self) -> Result<FoldPath, FoldError> {
        FoldPath::parse(self)
    }
}

impl AsFoldPath for Value {
    fn to_fold_path(&self) -> Result<FoldPath, FoldError> {
        let Value::Array(items) = self else {
            return Err(FoldError::InvalidArgument(format!(
                "path must be a sequence of strings, got {}",
                json_kind(self)
            )));
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(raw) => Segment::parse(raw),
                other => Err(FoldError::InvalidArgument(format!(
                    "path segments must be strings, got {}",
                    json_kind(other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FoldPath)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
