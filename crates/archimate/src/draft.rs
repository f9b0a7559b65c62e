//! Partial element descriptions used by [`crate::ArchimateModel::upsert`].

use archimate_core::{Attributes, Child, Element, Properties};

use crate::error::{ArchimateError, Result};

/// A partial element.
///
/// Only fields that are set are written when the draft is applied. `name`
/// and `kind` are required by upsert; `id` is only used when a new element is
/// created.
///
/// # Examples
///
/// ```
/// # use archimate::ElementDraft;
/// let draft = ElementDraft::new("ApplicationComponent", "CRM")
///     .with_documentation("Customer records")
///     .with_property("tier", "1");
/// assert_eq!(draft.name.as_deref(), Some("CRM"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementDraft {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub name: Option<String>,
    pub documentation: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub properties: Option<Properties>,
    pub children: Option<Vec<Child>>,
    pub attributes: Option<Attributes>,
}

impl ElementDraft {
    /// Creates a draft for an element of type `kind` named `name`.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Creates a draft for a relationship of type `kind` between two elements.
    pub fn relationship(
        kind: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            ..Self::new(kind, "")
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Adds one property to the draft.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key, value);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(Attributes::new)
            .insert(name.into(), value.into());
        self
    }

    /// Returns the required `(name, kind)` identity of the draft.
    pub(crate) fn identity(&self) -> Result<(&str, &str)> {
        let name = self
            .name
            .as_deref()
            .ok_or(ArchimateError::MissingField { field: "name" })?;
        let kind = self
            .kind
            .as_deref()
            .ok_or(ArchimateError::MissingField { field: "type" })?;
        Ok((name, kind))
    }

    /// Overwrites every field set in the draft except `id`. Properties are
    /// merged key by key; extra attributes likewise.
    pub(crate) fn apply_to(self, element: &mut Element) {
        if let Some(name) = self.name {
            element.name = name;
        }
        if let Some(kind) = self.kind {
            element.kind = kind;
        }
        if let Some(documentation) = self.documentation {
            element.documentation = Some(documentation);
        }
        if let Some(source) = self.source {
            element.source = Some(source);
        }
        if let Some(target) = self.target {
            element.target = Some(target);
        }
        if let Some(properties) = self.properties {
            element
                .properties
                .get_or_insert_with(Properties::new)
                .merge(&properties);
        }
        if let Some(children) = self.children {
            element.children = children;
        }
        if let Some(attributes) = self.attributes {
            element.attributes.extend(attributes);
        }
    }

    /// Turns the draft into a new element with the given id.
    pub(crate) fn into_element(self, id: String) -> Element {
        let mut element = Element {
            id,
            ..Element::default()
        };
        self.apply_to(&mut element);
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_requires_name_and_type() {
        let draft = ElementDraft {
            kind: Some("Node".to_string()),
            ..ElementDraft::default()
        };
        assert!(matches!(
            draft.identity(),
            Err(ArchimateError::MissingField { field: "name" })
        ));

        let draft = ElementDraft {
            name: Some("Server".to_string()),
            ..ElementDraft::default()
        };
        assert!(matches!(
            draft.identity(),
            Err(ArchimateError::MissingField { field: "type" })
        ));
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let mut element = Element::new("id-1", "Node", "Server");
        element.documentation = Some("Primary".to_string());

        ElementDraft::new("Node", "Server")
            .with_id("id-other")
            .with_property("os", "linux")
            .apply_to(&mut element);

        assert_eq!(element.id, "id-1");
        assert_eq!(element.documentation.as_deref(), Some("Primary"));
        assert_eq!(element.property("os"), Some("linux"));
    }

    #[test]
    fn test_relationship_draft() {
        let element = ElementDraft::relationship("ServingRelationship", "a", "b")
            .into_element("id-r".to_string());
        assert!(element.is_relationship());
        assert_eq!(element.name, "");
    }
}
