use thiserror::Error;

/// Errors produced while parsing the string form of a [`Path`](crate::Path).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("unexpected character {ch:?} at offset {offset} in path {path:?}")]
    UnexpectedChar {
        path: String,
        ch: char,
        offset: usize,
    },

    #[error("empty key at offset {offset} in path {path:?}")]
    EmptyKey { path: String, offset: usize },

    #[error("missing index digits at offset {offset} in path {path:?}")]
    MissingIndex { path: String, offset: usize },

    #[error("index {digits:?} in path {path:?} has a leading zero")]
    LeadingZero { path: String, digits: String },

    #[error("index {digits:?} in path {path:?} does not fit in usize")]
    IndexOverflow { path: String, digits: String },

    #[error("invalid escape in key {key:?} of path {path:?}")]
    InvalidEscape { path: String, key: String },

    #[error("marker segment at position {position} is not the last segment")]
    MisplacedMarker { position: usize },
}
