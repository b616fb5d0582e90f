//! Error types for content document parsing
//!
//! Every failure leaving `parse_content` is one of these variants. Bad input
//! (malformed markup, undecodable bytes, over-deep nesting, ambiguous
//! controller payloads) is kept apart from environment problems
//! (`Configuration`) so the caller can decide between a client-facing
//! validation failure and a server failure.

use thiserror::Error;

/// Result type for content parsing operations
pub type ContentParseResult<T> = Result<T, ContentParseError>;

/// Fatal content parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentParseError {
    /// Parser settings are unusable (not input-dependent)
    #[error("XML parser configuration error: {0}")]
    Configuration(String),

    /// Input is not well-formed markup
    #[error("XML is not well-formed (at byte {position}): {message}")]
    MalformedInput { position: usize, message: String },

    /// Input could not be read or decoded
    #[error("Failed to read content XML: {0}")]
    Io(String),

    /// A controller carries more than one literal block and the active
    /// script policy refuses to pick one
    #[error("Ambiguous structure in <{tag}>: {reason}")]
    StructuralAmbiguity { tag: String, reason: String },

    /// Element nesting is deeper than the configured bound
    #[error("Element nesting exceeds the maximum depth of {max_depth}")]
    NestingTooDeep { max_depth: usize },
}

/// Coarse classification of a `ContentParseError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    MalformedInput,
    Io,
    StructuralAmbiguity,
}

impl ContentParseError {
    pub(crate) fn malformed(position: usize, message: impl Into<String>) -> Self {
        ContentParseError::MalformedInput {
            position,
            message: message.into(),
        }
    }

    /// Error category used by callers to pick a response
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentParseError::Configuration(_) => ErrorKind::Configuration,
            ContentParseError::MalformedInput { .. } | ContentParseError::NestingTooDeep { .. } => {
                ErrorKind::MalformedInput
            }
            ContentParseError::Io(_) => ErrorKind::Io,
            ContentParseError::StructuralAmbiguity { .. } => ErrorKind::StructuralAmbiguity,
        }
    }

    /// True when the failure was caused by the input rather than the environment
    pub fn is_input_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Configuration)
    }
}

impl From<quick_xml::Error> for ContentParseError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(e) => ContentParseError::Io(e.to_string()),
            quick_xml::Error::NonDecodable(e) => ContentParseError::Io(match e {
                Some(utf8) => format!("invalid UTF-8: {}", utf8),
                None => "input is not decodable".to_string(),
            }),
            other => ContentParseError::malformed(0, other.to_string()),
        }
    }
}
