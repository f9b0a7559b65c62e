//! Error adapter for converting ArchimateError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Malformed
//! documents are reported with the offending byte labelled in the source.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use archimate::ArchimateError;
use archimate_parser::ParseError;

use crate::config::ConfigError;

/// Adapter implementing [`MietteDiagnostic`] for [`ArchimateError`].
pub struct ErrorAdapter<'a>(pub &'a ArchimateError);

impl ErrorAdapter<'_> {
    fn parse_source(&self) -> Option<(&ParseError, &String)> {
        match self.0 {
            ArchimateError::Parse { err, src } if !src.is_empty() => Some((err, src)),
            _ => None,
        }
    }

    fn config_error(&self) -> Option<&ConfigError> {
        match self.0 {
            ArchimateError::Io(err) => err.get_ref()?.downcast_ref::<ConfigError>(),
            _ => None,
        }
    }
}

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
        let code = match self.0 {
            ArchimateError::Io(_) if self.config_error().is_some() => "archimate::config",
            ArchimateError::Io(_) => "archimate::io",
            ArchimateError::Parse { err, .. } => match err {
                ParseError::Markup { .. } => "archimate::markup",
                ParseError::MissingRoot { .. } => "archimate::missing_root",
                ParseError::Write(_) => "archimate::write",
            },
            ArchimateError::UnknownElementType { .. } => "archimate::unknown_type",
            ArchimateError::ElementNotFound { .. } => "archimate::element_not_found",
            ArchimateError::GroupNotFound { .. } => "archimate::group_not_found",
            ArchimateError::NotAGroup { .. } => "archimate::not_a_group",
            ArchimateError::DiagramObjectNotFound { .. } => "archimate::diagram_object_not_found",
            ArchimateError::RelationshipNotFound { .. } => "archimate::relationship_not_found",
            ArchimateError::MissingField { .. } => "archimate::missing_field",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if let Some(err) = self.config_error() {
            let path = err.path().display();
            let help = match err {
                ConfigError::MissingFile(_) => {
                    format!("create `{path}` or run without `--config` to use the defaults")
                }
                ConfigError::Parse { .. } => {
                    format!("check the `[layout]` and `[document]` sections of `{path}`")
                }
                ConfigError::Read { .. } => format!("make sure `{path}` is a readable file"),
            };
            return Some(Box::new(help));
        }

        let help = match self.0 {
            ArchimateError::Parse {
                err: ParseError::MissingRoot { .. },
                ..
            } => "the document must be an Archi model with an `archimate:model` root",
            ArchimateError::ElementNotFound { .. } => {
                "use `archimate inspect` to check the model, element ids look like `id-<32 hex digits>`"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        let (_, src) = self.parse_source()?;
        Some(src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (err, src) = self.parse_source()?;
        let ParseError::Markup { message, position } = err else {
            return None;
        };

        let span = markup_span(*position, src.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(message.clone()),
            span,
        ))))
    }
}

/// Convert a byte position reported by the reader to a one-byte miette
/// [`SourceSpan`] inside the source.
fn markup_span(position: u64, len: usize) -> SourceSpan {
    let offset = usize::try_from(position).unwrap_or(len).min(len.saturating_sub(1));
    SourceSpan::new(offset.into(), usize::from(len > 0))
}
