//! Fixed constants of the `.archimate` exchange format.
//!
//! The namespace URIs, the root identifier and the version string are read by
//! the Archi toolchain and must match it exactly.

/// Namespace prefix carried by every `xsi:type` value.
pub const TYPE_PREFIX: &str = "archimate:";

/// Qualified name of the document root.
pub const ROOT_NODE: &str = "archimate:model";

/// XML Schema instance namespace, declared as `xmlns:xsi`.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Archi model namespace, declared as `xmlns:archimate`.
pub const ARCHIMATE_NAMESPACE: &str = "http://www.archimatetool.com/archimate";

/// Identifier written on the document root.
pub const MODEL_ID: &str = "id-4d1c0f52b7a94c6e8e3f1a2b5c6d7e8f";

/// Model version written on the document root.
pub const MODEL_VERSION: &str = "5.0.0";

/// Element type backing every view.
pub const DIAGRAM_MODEL_TYPE: &str = "ArchimateDiagramModel";

/// Removes the [`TYPE_PREFIX`] from a type attribute, if present.
///
/// # Examples
///
/// ```
/// # use archimate_core::schema::strip_type_prefix;
/// assert_eq!(strip_type_prefix("archimate:BusinessActor"), "BusinessActor");
/// assert_eq!(strip_type_prefix("BusinessActor"), "BusinessActor");
/// ```
pub fn strip_type_prefix(kind: &str) -> &str {
    kind.strip_prefix(TYPE_PREFIX).unwrap_or(kind)
}

/// Adds the [`TYPE_PREFIX`] to a bare type name.
pub fn with_type_prefix(kind: &str) -> String {
    format!("{TYPE_PREFIX}{kind}")
}
