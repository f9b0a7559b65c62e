//! Identifier generation for model entities.
//!
//! Every folder, element, diagram child and connection carries an identifier
//! of the form `id-` followed by 32 lowercase hexadecimal characters. Ids are
//! generated independently on every call; nothing keeps a registry of the ids
//! already in use, so uniqueness is probabilistic.

use uuid::Uuid;

/// Prefix shared by every generated identifier.
pub const ID_PREFIX: &str = "id-";

/// Total length of a generated identifier.
pub const ID_LEN: usize = ID_PREFIX.len() + 32;

/// Generates a fresh identifier.
///
/// # Examples
///
/// ```
/// use archimate_core::identifier::{generate_id, is_generated_id};
///
/// let id = generate_id();
/// assert_eq!(id.len(), 35);
/// assert!(is_generated_id(&id));
/// ```
pub fn generate_id() -> String {
    format!("{ID_PREFIX}{}", Uuid::new_v4().simple())
}

/// Returns `true` if `id` has the shape produced by [`generate_id`].
///
/// Ids loaded from documents are not required to have this shape.
pub fn is_generated_id(id: &str) -> bool {
    id.len() == ID_LEN
        && id.starts_with(ID_PREFIX)
        && id[ID_PREFIX.len()..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
