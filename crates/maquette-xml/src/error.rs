//! Error types for encoding and decoding model documents.

use std::io;

use thiserror::Error;

/// Errors raised by the XML codec.
///
/// Decode errors carry the path of the offending element, written as
/// `project/package[0]/class[2]/name` with per-tag sibling indices, so a
/// caller can point at the exact location in a large document. Decoding
/// never leaves a partially built tree behind: the tree is returned only
/// on success.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Sink or source access failed. Fatal to the operation; retries
    /// belong to the caller.
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    /// The document is structurally invalid: unparsable syntax, or a
    /// required child element is missing.
    #[error("malformed document at {path}: {message}")]
    Malformed { path: String, message: String },

    /// A tag appeared where a typed child element was expected.
    #[error("unknown element kind `{tag}` at {path}")]
    UnknownElement { tag: String, path: String },
}

impl XmlError {
    /// Create a [`XmlError::Malformed`] error.
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an [`XmlError::UnknownElement`] error.
    pub fn unknown_element(tag: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnknownElement {
            tag: tag.into(),
            path: path.into(),
        }
    }
}
