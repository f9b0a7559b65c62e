//! Reader and writer for the Archi `.archimate` exchange format.
//!
//! Conversion happens in two stages. The [`markup`] module turns document
//! text into a generic [`markup::Node`] tree and back; [`parse`] and
//! [`serialize`] map between that tree and an [`archimate_core::Model`].
//!
//! ```
//! # use archimate_core::Model;
//! let text = archimate_parser::serialize(&Model::new("Demo")).unwrap();
//! let model = archimate_parser::parse(&text).unwrap();
//! assert_eq!(model.name, "Demo");
//! ```

pub mod codec;
pub mod error;
pub mod markup;
pub mod parse;
pub mod serialize;

use archimate_core::Model;
use log::debug;

pub use error::{ParseError, Result};

/// Parses document text into a [`Model`].
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not well-formed markup or its root
/// is not an ArchiMate model.
pub fn parse(text: &str) -> Result<Model> {
    debug!(length = text.len(); "Parsing document");
    let root = markup::parse_document(text)?;
    parse::parse_model(&root)
}

/// Serializes a [`Model`] into document text.
///
/// # Errors
///
/// Returns [`ParseError::Write`] if the document cannot be written.
pub fn serialize(model: &Model) -> Result<String> {
    markup::build_document(&serialize::serialize_model(model))
}
