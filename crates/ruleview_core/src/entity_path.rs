use crate::RuleViewError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Separator between segments of an entity path.
pub const PATH_SEPARATOR: char = '/';

/// A validated, slash-delimited entity path such as `db1/schema1/table1/col1`.
///
/// Parsing rejects the empty string and any empty segment, so every value of
/// this type has at least one segment and no segment is empty. The tree
/// builder relies on that and never re-checks its input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityPath {
    raw: String,
}

impl EntityPath {
    pub fn parse(raw: &str) -> Result<Self, RuleViewError> {
        if raw.is_empty() {
            return Err(RuleViewError::InvalidPath(
                "path must not be empty".to_string(),
            ));
        }

        if let Some(index) = raw.split(PATH_SEPARATOR).position(str::is_empty) {
            return Err(RuleViewError::InvalidPath(format!(
                "'{}' has an empty segment at position {}",
                raw, index
            )));
        }

        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// Parses every string, failing on the first malformed one.
    pub fn parse_all<I, S>(raw: I) -> Result<Vec<Self>, RuleViewError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter().map(|s| Self::parse(s.as_ref())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split(PATH_SEPARATOR)
    }

    /// Index of the last segment (0 for a single-segment path).
    pub fn depth(&self) -> usize {
        self.raw.matches(PATH_SEPARATOR).count()
    }

    pub fn first_segment(&self) -> &str {
        self.raw
            .split_once(PATH_SEPARATOR)
            .map_or(self.raw.as_str(), |(head, _)| head)
    }

    pub fn last_segment(&self) -> &str {
        self.raw
            .rsplit_once(PATH_SEPARATOR)
            .map_or(self.raw.as_str(), |(_, tail)| tail)
    }

    /// Accumulated prefixes, shortest first: `a`, `a/b`, `a/b/c`.
    ///
    /// Each item is `(depth, prefix, segment)`.
    pub fn prefixes(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        let raw = self.raw.as_str();
        let mut start = 0;

        raw.split(PATH_SEPARATOR)
            .enumerate()
            .map(move |(depth, segment)| {
                let end = start + segment.len();
                start = end + PATH_SEPARATOR.len_utf8();
                (depth, &raw[..end], segment)
            })
    }
}

/// Returns the id of the parent node, or `None` for a root id.
pub fn parent_id(id: &str) -> Option<&str> {
    id.rsplit_once(PATH_SEPARATOR).map(|(parent, _)| parent)
}

impl fmt::Display for EntityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for EntityPath {
    type Err = RuleViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for EntityPath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Serialize for EntityPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for EntityPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
