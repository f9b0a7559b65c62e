//! The model root.

use crate::{
    element::{Element, Properties},
    folder::{Folder, FolderKey},
};

/// An in-memory ArchiMate model.
///
/// Holds one [`Folder`] per [`FolderKey`]; the set of folders is fixed and
/// always complete, even when folders are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Document name.
    pub name: String,
    /// Model-level documentation.
    pub purpose: Option<String>,
    /// Model-level properties.
    pub properties: Option<Properties>,
    folders: [Folder; 9],
}

impl Model {
    /// Creates an empty model with default folders.
    ///
    /// # Examples
    ///
    /// ```
    /// # use archimate_core::{Model, FolderKey};
    /// let model = Model::new("Enterprise");
    /// assert_eq!(model.folder(FolderKey::Diagrams).name, "Views");
    /// assert_eq!(model.element_count(), 0);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            purpose: None,
            properties: None,
            folders: FolderKey::ALL.map(Folder::for_key),
        }
    }

    /// Returns the folder for `key`.
    pub fn folder(&self, key: FolderKey) -> &Folder {
        &self.folders[key.index()]
    }

    /// Returns the folder for `key` mutably.
    pub fn folder_mut(&mut self, key: FolderKey) -> &mut Folder {
        &mut self.folders[key.index()]
    }

    /// Replaces the folder for `key`.
    pub fn set_folder(&mut self, key: FolderKey, folder: Folder) {
        self.folders[key.index()] = folder;
    }

    /// Iterates over all folders in document order.
    pub fn folders(&self) -> impl Iterator<Item = (FolderKey, &Folder)> {
        FolderKey::ALL.into_iter().zip(self.folders.iter())
    }

    /// Iterates over every element of every folder, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.folders.iter().flat_map(|folder| folder.iter_recursive())
    }

    /// Total number of elements across all folders.
    pub fn element_count(&self) -> usize {
        self.folders.iter().map(Folder::len_recursive).sum()
    }

    /// Finds an element by id across all folders.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements().find(|element| element.id == id)
    }

    /// Finds an element by id across all folders, mutably.
    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.folders
            .iter_mut()
            .find_map(|folder| folder.find_mut(|element| element.id == id))
    }

    /// Returns `true` if any folder holds an element with this id.
    pub fn contains_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_has_all_folders() {
        let model = Model::new("Test");
        let keys: Vec<_> = model.folders().map(|(key, _)| key).collect();
        assert_eq!(keys, FolderKey::ALL.to_vec());

        for (key, folder) in model.folders() {
            assert_eq!(folder.name, key.display_name());
            assert!(folder.elements.is_none());
        }
    }

    #[test]
    fn test_element_lookup_spans_folders() {
        let mut model = Model::new("Test");
        model
            .folder_mut(FolderKey::Business)
            .push(Element::new("a", "BusinessActor", "Alice"));
        model
            .folder_mut(FolderKey::Technology)
            .push(Element::new("n", "Node", "Server"));

        assert_eq!(model.element_count(), 2);
        assert_eq!(model.element("n").map(|e| e.name.as_str()), Some("Server"));
        assert!(model.contains_element("a"));
        assert!(!model.contains_element("missing"));

        model.element_mut("a").expect("element").name = "Alicia".to_string();
        assert_eq!(model.element("a").map(|e| e.name.as_str()), Some("Alicia"));
    }
}
