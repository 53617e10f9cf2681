//! Error adapter for converting MaquetteError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use maquette::{MaquetteError, maquette_xml::XmlError};

/// Adapter for [`MaquetteError`] variants.
///
/// This adapter wraps a [`MaquetteError`] and implements
/// [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct ErrorAdapter<'a>(pub &'a MaquetteError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MaquetteError::UnresolvedType { .. } => "maquette::unresolved",
            MaquetteError::Codec(XmlError::Io(_)) | MaquetteError::Io(_) => "maquette::io",
            MaquetteError::Codec(XmlError::Malformed { .. }) => "maquette::codec::malformed",
            MaquetteError::Codec(XmlError::UnknownElement { .. }) => "maquette::codec::unknown",
            MaquetteError::Schema { .. } => "maquette::schema",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            MaquetteError::UnresolvedType { .. } => {
                "check that the type is declared in the schema under its qualified name"
            }
            MaquetteError::Codec(XmlError::Malformed { .. }) => {
                "the path points at the offending element in the document"
            }
            MaquetteError::Codec(XmlError::UnknownElement { .. }) => {
                "only package, class, interface, enum, and annotation elements are accepted here"
            }
            MaquetteError::Schema { .. } => "the schema must be a JSON object with a `types` array",
            MaquetteError::Codec(XmlError::Io(_)) | MaquetteError::Io(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_code_and_help() {
        let err = MaquetteError::unresolved("a.b.Ghost");
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "maquette::unresolved");
        assert!(adapter.help().is_some());
        assert_eq!(adapter.to_string(), "unresolved type `a.b.Ghost`");
    }

    #[test]
    fn test_codec_error_keeps_its_path_in_the_message() {
        let err = MaquetteError::Codec(XmlError::malformed(
            "project/package[0]/class[1]",
            "missing required child `name`",
        ));
        let adapter = ErrorAdapter(&err);

        assert_eq!(
            adapter.code().unwrap().to_string(),
            "maquette::codec::malformed"
        );
        assert!(adapter.to_string().contains("project/package[0]/class[1]"));
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = MaquetteError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "maquette::io");
        assert!(adapter.help().is_none());
    }
}
