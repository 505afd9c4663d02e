//! Error types for iClass QR core
//!
//! Provides error handling for:
//! - Identifiers that normalize to nothing
//! - Saved-set edits (duplicates, bad indices, blank fields)
//! - Share payloads that fail to decode
//! - Launch links that fail to parse

/// Identifier errors
#[derive(Debug, thiserror::Error)]
pub enum IdentifierError {
    /// Input had no digits and was not a 32-hex code
    #[error("no usable identifier in '{raw}'")]
    Empty { raw: String },
}

/// Errors from saved-set operations
#[derive(Debug, thiserror::Error)]
pub enum SavedSetError {
    /// Identifier is already in the saved set
    #[error("id already saved: {0}")]
    AlreadySaved(String),

    /// Identifier normalized to nothing
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// Label is empty after trimming
    #[error("label must not be empty")]
    EmptyLabel,

    /// Index past the end of the set
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl SavedSetError {
    /// Check if the error is a duplicate-id rejection
    #[inline]
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::AlreadySaved(_))
    }
}

/// Reasons a share payload is rejected
///
/// Never crosses [`crate::share::decode`]; exposed through
/// [`crate::share::try_decode`] for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    /// Not valid base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not UTF-8 text
    #[error("invalid text encoding: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Not valid JSON
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// Top level lacks an `items` array
    #[error("payload has no items array")]
    MissingItems,

    /// An element has the wrong shape
    #[error("item {index} has invalid field '{field}'")]
    InvalidItem { index: usize, field: &'static str },
}

/// Launch link errors
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Not an absolute URL
    #[error("invalid url '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

impl LinkError {
    /// Create invalid URL error
    pub fn invalid_url(input: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            input: input.into(),
            source,
        }
    }
}
