//! Error types for Maquette operations.
//!
//! This module provides the main error type [`MaquetteError`] which wraps
//! the error conditions that can occur while resolving descriptors,
//! building models, and encoding or decoding documents.

use std::io;

use thiserror::Error;

use maquette_xml::XmlError;

/// The main error type for Maquette operations.
///
/// Recovery decisions belong to the caller: nothing here is retried
/// internally. An `UnresolvedType` from a provider aborts only the type
/// being built; batch building skips it and continues with the
/// remaining, independent types.
#[derive(Debug, Error)]
pub enum MaquetteError {
    /// The provider could not resolve a qualified name.
    #[error("unresolved type `{name}`")]
    UnresolvedType { name: String },

    /// Encoding or decoding a model document failed.
    #[error(transparent)]
    Codec(#[from] XmlError),

    /// Reading a schema or writing an artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A descriptor schema could not be parsed.
    #[error("invalid schema: {message}")]
    Schema { message: String },
}

impl MaquetteError {
    /// Create an `UnresolvedType` error.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedType { name: name.into() }
    }
}
