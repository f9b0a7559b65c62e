//! Top-level folders and the element type table.
//!
//! A model always holds exactly nine top-level folders, one per [`FolderKey`].
//! The order of [`FolderKey::ALL`] is the order folders are written to a
//! document, and every element type resolves to exactly one key through
//! [`FolderKey::for_element_type`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{element::Element, identifier::generate_id};

/// Key of one of the nine fixed top-level folders.
///
/// The snake_case names used by serde are the folder `type` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderKey {
    Strategy,
    Business,
    Application,
    Technology,
    Motivation,
    ImplementationMigration,
    Other,
    Relations,
    Diagrams,
}

impl FolderKey {
    /// All keys in document order.
    pub const ALL: [FolderKey; 9] = [
        FolderKey::Strategy,
        FolderKey::Business,
        FolderKey::Application,
        FolderKey::Technology,
        FolderKey::Motivation,
        FolderKey::ImplementationMigration,
        FolderKey::Other,
        FolderKey::Relations,
        FolderKey::Diagrams,
    ];

    /// Returns the value of the folder's `type` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            FolderKey::Strategy => "strategy",
            FolderKey::Business => "business",
            FolderKey::Application => "application",
            FolderKey::Technology => "technology",
            FolderKey::Motivation => "motivation",
            FolderKey::ImplementationMigration => "implementation_migration",
            FolderKey::Other => "other",
            FolderKey::Relations => "relations",
            FolderKey::Diagrams => "diagrams",
        }
    }

    /// Returns the canonical display name written for this folder.
    pub fn display_name(self) -> &'static str {
        match self {
            FolderKey::Strategy => "Strategy",
            FolderKey::Business => "Business",
            FolderKey::Application => "Application",
            FolderKey::Technology => "Technology & Physical",
            FolderKey::Motivation => "Motivation",
            FolderKey::ImplementationMigration => "Implementation & Migration",
            FolderKey::Other => "Other",
            FolderKey::Relations => "Relations",
            FolderKey::Diagrams => "Views",
        }
    }

    /// Position of this key within [`FolderKey::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Resolves the folder an element type belongs to.
    ///
    /// Types are bare names without the `archimate:` prefix. Returns `None`
    /// for types outside the table.
    ///
    /// # Examples
    ///
    /// ```
    /// # use archimate_core::folder::FolderKey;
    /// assert_eq!(FolderKey::for_element_type("BusinessActor"), Some(FolderKey::Business));
    /// assert_eq!(FolderKey::for_element_type("ServingRelationship"), Some(FolderKey::Relations));
    /// assert_eq!(FolderKey::for_element_type("Spaceship"), None);
    /// ```
    pub fn for_element_type(kind: &str) -> Option<FolderKey> {
        ELEMENT_TYPES
            .iter()
            .find(|(name, _)| *name == kind)
            .map(|(_, key)| *key)
    }
}

impl fmt::Display for FolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string that is not a folder `type`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown folder key `{0}`")]
pub struct UnknownFolderKey(pub String);

impl FromStr for FolderKey {
    type Err = UnknownFolderKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FolderKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownFolderKey(s.to_string()))
    }
}

/// Element type to folder table.
pub const ELEMENT_TYPES: &[(&str, FolderKey)] = &[
    // Strategy
    ("Resource", FolderKey::Strategy),
    ("Capability", FolderKey::Strategy),
    ("ValueStream", FolderKey::Strategy),
    ("CourseOfAction", FolderKey::Strategy),
    // Business
    ("BusinessActor", FolderKey::Business),
    ("BusinessRole", FolderKey::Business),
    ("BusinessCollaboration", FolderKey::Business),
    ("BusinessInterface", FolderKey::Business),
    ("BusinessProcess", FolderKey::Business),
    ("BusinessFunction", FolderKey::Business),
    ("BusinessInteraction", FolderKey::Business),
    ("BusinessEvent", FolderKey::Business),
    ("BusinessService", FolderKey::Business),
    ("BusinessObject", FolderKey::Business),
    ("Contract", FolderKey::Business),
    ("Representation", FolderKey::Business),
    ("Product", FolderKey::Business),
    // Application
    ("ApplicationComponent", FolderKey::Application),
    ("ApplicationCollaboration", FolderKey::Application),
    ("ApplicationInterface", FolderKey::Application),
    ("ApplicationFunction", FolderKey::Application),
    ("ApplicationInteraction", FolderKey::Application),
    ("ApplicationProcess", FolderKey::Application),
    ("ApplicationEvent", FolderKey::Application),
    ("ApplicationService", FolderKey::Application),
    ("DataObject", FolderKey::Application),
    // Technology & Physical
    ("Node", FolderKey::Technology),
    ("Device", FolderKey::Technology),
    ("SystemSoftware", FolderKey::Technology),
    ("TechnologyCollaboration", FolderKey::Technology),
    ("TechnologyInterface", FolderKey::Technology),
    ("Path", FolderKey::Technology),
    ("CommunicationNetwork", FolderKey::Technology),
    ("TechnologyFunction", FolderKey::Technology),
    ("TechnologyProcess", FolderKey::Technology),
    ("TechnologyInteraction", FolderKey::Technology),
    ("TechnologyEvent", FolderKey::Technology),
    ("TechnologyService", FolderKey::Technology),
    ("Artifact", FolderKey::Technology),
    ("Equipment", FolderKey::Technology),
    ("Facility", FolderKey::Technology),
    ("DistributionNetwork", FolderKey::Technology),
    ("Material", FolderKey::Technology),
    // Motivation
    ("Stakeholder", FolderKey::Motivation),
    ("Driver", FolderKey::Motivation),
    ("Assessment", FolderKey::Motivation),
    ("Goal", FolderKey::Motivation),
    ("Outcome", FolderKey::Motivation),
    ("Principle", FolderKey::Motivation),
    ("Requirement", FolderKey::Motivation),
    ("Constraint", FolderKey::Motivation),
    ("Meaning", FolderKey::Motivation),
    ("Value", FolderKey::Motivation),
    // Implementation & Migration
    ("WorkPackage", FolderKey::ImplementationMigration),
    ("Deliverable", FolderKey::ImplementationMigration),
    ("ImplementationEvent", FolderKey::ImplementationMigration),
    ("Plateau", FolderKey::ImplementationMigration),
    ("Gap", FolderKey::ImplementationMigration),
    // Other
    ("Location", FolderKey::Other),
    ("Grouping", FolderKey::Other),
    ("Junction", FolderKey::Other),
    // Relations
    ("AccessRelationship", FolderKey::Relations),
    ("AggregationRelationship", FolderKey::Relations),
    ("AssignmentRelationship", FolderKey::Relations),
    ("AssociationRelationship", FolderKey::Relations),
    ("CompositionRelationship", FolderKey::Relations),
    ("FlowRelationship", FolderKey::Relations),
    ("InfluenceRelationship", FolderKey::Relations),
    ("RealizationRelationship", FolderKey::Relations),
    ("ServingRelationship", FolderKey::Relations),
    ("SpecializationRelationship", FolderKey::Relations),
    ("TriggeringRelationship", FolderKey::Relations),
    // Views
    ("ArchimateDiagramModel", FolderKey::Diagrams),
    ("SketchModel", FolderKey::Diagrams),
];

/// A folder of elements.
///
/// `elements` is `None` until the folder is first populated, which keeps a
/// folder loaded without elements distinguishable from one emptied by edits.
/// Top-level folders may contain nested sub-folders.
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub name: String,
    pub id: String,
    pub elements: Option<Vec<Element>>,
    pub folders: Vec<Folder>,
}

impl Folder {
    /// Creates an empty folder.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            elements: None,
            folders: Vec::new(),
        }
    }

    /// Creates the default empty folder for `key`, with a fresh id.
    pub fn for_key(key: FolderKey) -> Self {
        Self::new(key.display_name(), generate_id())
    }

    /// Returns the direct elements of this folder.
    pub fn elements(&self) -> &[Element] {
        self.elements.as_deref().unwrap_or_default()
    }

    /// Appends an element as the last direct element.
    pub fn push(&mut self, element: Element) {
        self.elements.get_or_insert_with(Vec::new).push(element);
    }

    /// Iterates over the elements of this folder and all nested sub-folders,
    /// direct elements first.
    pub fn iter_recursive(&self) -> Box<dyn Iterator<Item = &Element> + '_> {
        Box::new(
            self.elements()
                .iter()
                .chain(self.folders.iter().flat_map(|folder| folder.iter_recursive())),
        )
    }

    /// Finds the first element matching `predicate`, searching sub-folders
    /// after the direct elements.
    pub fn find(&self, predicate: impl Fn(&Element) -> bool + Copy) -> Option<&Element> {
        self.iter_recursive().find(|element| predicate(*element))
    }

    /// Mutable counterpart of [`Folder::find`].
    pub fn find_mut(
        &mut self,
        predicate: impl Fn(&Element) -> bool + Copy,
    ) -> Option<&mut Element> {
        if let Some(elements) = self.elements.as_mut() {
            if let Some(position) = elements.iter().position(predicate) {
                return elements.get_mut(position);
            }
        }
        self.folders
            .iter_mut()
            .find_map(|folder| folder.find_mut(predicate))
    }

    /// Removes the element with the given id from this folder or a
    /// sub-folder, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        if let Some(elements) = self.elements.as_mut() {
            if let Some(position) = elements.iter().position(|element| element.id == id) {
                return Some(elements.remove(position));
            }
        }
        self.folders.iter_mut().find_map(|folder| folder.remove(id))
    }

    /// Number of elements in this folder and its sub-folders.
    pub fn len_recursive(&self) -> usize {
        self.elements().len()
            + self
                .folders
                .iter()
                .map(Folder::len_recursive)
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: &str, name: &str) -> Element {
        Element::new(id, "BusinessActor", name)
    }

    #[test]
    fn test_folder_keys_round_trip_through_str() {
        for key in FolderKey::ALL {
            assert_eq!(key.as_str().parse::<FolderKey>(), Ok(key));
        }
        assert_eq!(
            "views".parse::<FolderKey>(),
            Err(UnknownFolderKey("views".to_string()))
        );
    }

    #[test]
    fn test_index_matches_declaration_order() {
        for (position, key) in FolderKey::ALL.into_iter().enumerate() {
            assert_eq!(key.index(), position);
        }
    }

    #[test]
    fn test_every_table_entry_resolves_to_its_folder() {
        for (kind, key) in ELEMENT_TYPES {
            assert_eq!(FolderKey::for_element_type(kind), Some(*key));
        }
        assert_eq!(FolderKey::for_element_type("businessactor"), None);
    }

    #[test]
    fn test_elements_absent_until_first_push() {
        let mut folder = Folder::for_key(FolderKey::Business);
        assert!(folder.elements.is_none());
        assert!(folder.elements().is_empty());

        folder.push(element("a", "Alice"));
        assert_eq!(folder.elements().len(), 1);
    }

    #[test]
    fn test_find_and_remove_search_sub_folders() {
        let mut nested = Folder::new("Actors", "f-2");
        nested.push(element("b", "Bob"));

        let mut folder = Folder::new("Business", "f-1");
        folder.push(element("a", "Alice"));
        folder.folders.push(nested);

        assert_eq!(folder.len_recursive(), 2);
        assert_eq!(folder.find(|e| e.name == "Bob").map(|e| e.id.as_str()), Some("b"));

        folder
            .find_mut(|e| e.id == "b")
            .expect("nested element")
            .name = "Robert".to_string();
        assert!(folder.find(|e| e.name == "Robert").is_some());

        let removed = folder.remove("b").expect("removed");
        assert_eq!(removed.name, "Robert");
        assert_eq!(folder.len_recursive(), 1);
        assert!(folder.remove("missing").is_none());
    }
}
