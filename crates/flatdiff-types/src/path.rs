//! Typed paths into a [`Value`](crate::Value) tree.
//!
//! A path is a sequence of segments, rendered to its string form only at the
//! serialization boundary:
//!
//! - `.name` -- object key access
//! - `@3` -- array index access (decimal, no leading zeros)
//! - trailing `.` -- empty object at this position
//! - trailing `@` -- empty array at this position
//! - `""` -- the root
//!
//! Inside a key, `~` renders as `~0`, `.` as `~1` and `@` as `~2`. The empty
//! key renders as the lone escape `~e`, so `.` alone always means "empty
//! object".

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PathError;

/// One step of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Object key access.
    Key(String),
    /// Array index access.
    Index(usize),
    /// Terminal marker: an empty object lives here.
    EmptyMap,
    /// Terminal marker: an empty array lives here.
    EmptySeq,
}

impl Segment {
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::EmptyMap | Self::EmptySeq)
    }

    /// The kind of container this segment steps into (or marks as empty).
    pub fn container_kind(&self) -> ContainerKind {
        match self {
            Self::Key(_) | Self::EmptyMap => ContainerKind::Object,
            Self::Index(_) | Self::EmptySeq => ContainerKind::Array,
        }
    }
}

/// Object or array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Object,
    Array,
}

impl ContainerKind {
    /// The terminal marker segment for an empty container of this kind.
    pub fn marker(self) -> Segment {
        match self {
            Self::Object => Segment::EmptyMap,
            Self::Array => Segment::EmptySeq,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => f.write_str("object"),
            Self::Array => f.write_str("array"),
        }
    }
}

/// Address of a node inside a value tree.
///
/// Marker segments only ever appear last. Paths order lexicographically by
/// segment, so every path sharing a prefix sorts into one contiguous run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The root path, rendered as `""`.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from segments, rejecting markers anywhere but last.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self, PathError> {
        let last = segments.len().saturating_sub(1);
        if let Some(position) = segments
            .iter()
            .enumerate()
            .position(|(i, s)| s.is_marker() && i != last)
        {
            return Err(PathError::MisplacedMarker { position });
        }
        Ok(Self(segments))
    }

    /// Parse the string form of a path.
    ///
    /// ```
    /// use flatdiff_types::{Path, Segment};
    ///
    /// let path = Path::parse(".users@0.name").unwrap();
    /// assert_eq!(path.segments().len(), 3);
    /// assert_eq!(path.segments()[1], Segment::Index(0));
    /// assert!(Path::parse("users").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        let mut rest = input;

        while let Some(first) = rest.chars().next() {
            let offset = input.len() - rest.len();
            match first {
                '.' => {
                    let body = &rest[1..];
                    let end = body.find(['.', '@']).unwrap_or(body.len());
                    let raw = &body[..end];
                    rest = &body[end..];
                    if raw.is_empty() {
                        if !rest.is_empty() {
                            return Err(PathError::EmptyKey {
                                path: input.to_string(),
                                offset,
                            });
                        }
                        segments.push(Segment::EmptyMap);
                    } else {
                        let key = unescape_key(raw).ok_or_else(|| PathError::InvalidEscape {
                            path: input.to_string(),
                            key: raw.to_string(),
                        })?;
                        segments.push(Segment::Key(key));
                    }
                }
                '@' => {
                    let body = &rest[1..];
                    let end = body
                        .find(|c: char| !c.is_ascii_digit())
                        .unwrap_or(body.len());
                    let digits = &body[..end];
                    rest = &body[end..];
                    if digits.is_empty() {
                        if !rest.is_empty() {
                            return Err(PathError::MissingIndex {
                                path: input.to_string(),
                                offset,
                            });
                        }
                        segments.push(Segment::EmptySeq);
                    } else {
                        segments.push(Segment::Index(parse_index(input, digits)?));
                    }
                }
                ch => {
                    return Err(PathError::UnexpectedChar {
                        path: input.to_string(),
                        ch,
                        offset,
                    })
                }
            }
        }

        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Same as [`Path::is_root`].
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// Returns `true` if the path ends in an empty-container marker.
    pub fn is_terminated(&self) -> bool {
        self.0.last().is_some_and(Segment::is_marker)
    }

    /// The container kind marked by a trailing marker, if any.
    pub fn terminal(&self) -> Option<ContainerKind> {
        self.0
            .last()
            .filter(|s| s.is_marker())
            .map(Segment::container_kind)
    }

    /// This path with a trailing marker removed.
    pub fn without_marker(&self) -> Self {
        if self.is_terminated() {
            Self(self.0[..self.0.len() - 1].to_vec())
        } else {
            self.clone()
        }
    }

    /// Child path stepping into object key `key`.
    ///
    /// The receiver must not end in a marker.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with(Segment::Key(key.into()))
    }

    /// Child path stepping into array index `index`.
    ///
    /// The receiver must not end in a marker.
    pub fn index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    /// This path terminated by the empty-container marker of `kind`.
    pub fn marker(&self, kind: ContainerKind) -> Self {
        self.with(kind.marker())
    }

    /// Concatenate `tail` onto this path.
    ///
    /// The receiver must not end in a marker.
    pub fn join(&self, tail: &Path) -> Self {
        debug_assert!(!self.is_terminated(), "cannot extend terminated path {self}");
        let mut segments = Vec::with_capacity(self.0.len() + tail.0.len());
        segments.extend_from_slice(&self.0);
        segments.extend_from_slice(&tail.0);
        Self(segments)
    }

    /// Returns `true` if `prefix` is a (non-strict) segment prefix of this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// The path one segment up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.0.split_last().map(|(_, init)| Self(init.to_vec()))
    }

    /// Every strict prefix of this path paired with the segment that follows
    /// it, from the root down.
    pub fn ancestors(&self) -> impl Iterator<Item = (Path, &Segment)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, seg)| (Self(self.0[..i].to_vec()), seg))
    }

    fn with(&self, segment: Segment) -> Self {
        debug_assert!(!self.is_terminated(), "cannot extend terminated path {self}");
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Self(segments)
    }
}

fn parse_index(path: &str, digits: &str) -> Result<usize, PathError> {
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(PathError::LeadingZero {
            path: path.to_string(),
            digits: digits.to_string(),
        });
    }
    digits.parse().map_err(|_| PathError::IndexOverflow {
        path: path.to_string(),
        digits: digits.to_string(),
    })
}

/// Escape an object key for the string form of a path.
pub fn escape_key(key: &str) -> Cow<'_, str> {
    if key.is_empty() {
        return Cow::Borrowed("~e");
    }
    if !key.contains(['~', '.', '@']) {
        return Cow::Borrowed(key);
    }
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        match ch {
            '~' => out.push_str("~0"),
            '.' => out.push_str("~1"),
            '@' => out.push_str("~2"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Reverse [`escape_key`]. Returns `None` on a malformed escape.
pub fn unescape_key(raw: &str) -> Option<String> {
    if raw == "~e" {
        return Some(String::new());
    }
    if !raw.contains('~') {
        return Some(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            '0' => out.push('~'),
            '1' => out.push('.'),
            '2' => out.push('@'),
            _ => return None,
        }
    }
    Some(out)
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            match segment {
                Segment::Key(key) => write!(f, ".{}", escape_key(key))?,
                Segment::Index(i) => write!(f, "@{i}")?,
                Segment::EmptyMap => f.write_str(".")?,
                Segment::EmptySeq => f.write_str("@")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
