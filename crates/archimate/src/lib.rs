//! ArchiMate - Editable in-memory models in the Archi `.archimate` format.
//!
//! [`ArchimateModel`] owns a [`Model`] and is the entry point for loading and
//! saving documents, creating or updating elements, and building views.
//! Element identity for editing is the pair `(name, type)`; ids never change
//! once assigned.

pub mod config;
pub mod layout;

mod draft;
mod error;
mod summary;
mod views;

pub use archimate_core::{
    Bounds, Child, Connection, DiagramObject, Element, Folder, FolderKey, Group, Model, Note,
    Properties, Style, View, ViewChild, identifier,
};

pub use draft::ElementDraft;
pub use error::{ArchimateError, Result};
pub use summary::ModelSummary;
pub use views::{GenerateOptions, StyleUpdate, ViewOptions};

use std::{fs, io, path::Path};

use log::{debug, info, warn};

use archimate_core::identifier::generate_id;

use config::AppConfig;

/// An editable ArchiMate model.
///
/// # Examples
///
/// ```
/// use archimate::{ArchimateModel, ElementDraft, FolderKey};
///
/// let mut model = ArchimateModel::default();
/// model
///     .upsert(ElementDraft::new("BusinessActor", "Customer"))
///     .expect("known type");
///
/// let customer = model.find_element_in_folder_by_name(FolderKey::Business, "Customer");
/// assert!(customer.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchimateModel {
    model: Model,
    config: AppConfig,
}

impl ArchimateModel {
    /// Creates an empty model named after the configured default name.
    pub fn new(config: AppConfig) -> Self {
        let model = Model::new(config.document().default_name());
        Self { model, config }
    }

    /// Wraps an existing [`Model`].
    pub fn from_model(model: Model, config: AppConfig) -> Self {
        Self { model, config }
    }

    /// Parses a document.
    ///
    /// # Errors
    ///
    /// Returns [`ArchimateError::Parse`] if the document is malformed or is
    /// not an ArchiMate model.
    pub fn from_document(text: &str, config: AppConfig) -> Result<Self> {
        let model = archimate_parser::parse(text)
            .map_err(|err| ArchimateError::new_parse_error(err, text))?;
        info!(name = model.name, elements = model.element_count(); "Model loaded");
        Ok(Self::from_model(model, config))
    }

    /// Parses a document, falling back to an empty model if it cannot be read
    /// as an ArchiMate model.
    pub fn load_str(text: &str, config: AppConfig) -> Self {
        match archimate_parser::parse(text) {
            Ok(model) => {
                info!(name = model.name, elements = model.element_count(); "Model loaded");
                Self::from_model(model, config)
            }
            Err(err) => {
                warn!(err:%; "Invalid document, starting from an empty model");
                Self::new(config)
            }
        }
    }

    /// Loads a document from `path`.
    ///
    /// A missing file or an invalid document yields an empty model.
    ///
    /// # Errors
    ///
    /// Returns [`ArchimateError::Io`] if the file exists but cannot be read.
    pub fn load_file(path: impl AsRef<Path>, config: AppConfig) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::load_str(&text, config)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path:? = path; "No document found, starting from an empty model");
                Ok(Self::new(config))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Serializes the model as a document.
    ///
    /// # Errors
    ///
    /// Returns [`ArchimateError::Parse`] if the document cannot be written.
    pub fn to_document(&self) -> Result<String> {
        Ok(archimate_parser::serialize(&self.model)?)
    }

    /// Writes the model to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_document()?)?;
        info!(path:? = path; "Model saved");
        Ok(())
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns per-folder statistics of the model.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary::of(&self.model)
    }

    /// Creates or updates an element identified by `(name, type)`.
    ///
    /// The folder is resolved from the type. If an element with the same name
    /// and type exists, every field set in `draft` except the id overwrites
    /// it, and properties are merged key by key. Otherwise a new element is
    /// appended to the folder, keeping the draft id if it has one.
    ///
    /// Returns a copy of the stored element.
    ///
    /// # Errors
    ///
    /// Returns [`ArchimateError::MissingField`] if the draft has no name or
    /// type, and [`ArchimateError::UnknownElementType`] if the type is not an
    /// ArchiMate type.
    pub fn upsert(&mut self, draft: ElementDraft) -> Result<Element> {
        let (name, kind) = draft.identity()?;
        let (name, kind) = (name.to_string(), kind.to_string());
        let key = FolderKey::for_element_type(&kind)
            .ok_or_else(|| ArchimateError::UnknownElementType { kind: kind.clone() })?;

        let folder = self.model.folder_mut(key);
        let matches = |element: &Element| element.name == name && element.kind == kind;

        if let Some(element) = folder.find_mut(matches) {
            draft.apply_to(element);
            debug!(id = element.id, kind; "Updated element");
            return Ok(element.clone());
        }

        let id = draft.id.clone().unwrap_or_else(generate_id);
        let element = draft.into_element(id);
        debug!(id = element.id, kind, folder:% = key; "Created element");
        folder.push(element.clone());
        Ok(element)
    }

    /// Returns the first element named `name` in the folder for `key`.
    pub fn find_element_in_folder_by_name(&self, key: FolderKey, name: &str) -> Option<&Element> {
        self.model.folder(key).find(|element| element.name == name)
    }

    /// Returns all elements of type `kind`, across all folders.
    pub fn find_elements_by_type(&self, kind: &str) -> Vec<&Element> {
        self.model
            .elements()
            .filter(|element| element.kind == kind)
            .collect()
    }

    /// Returns all elements of the folder for `key`, sub-folders included.
    pub fn find_elements_by_folder(&self, key: FolderKey) -> Vec<&Element> {
        self.model.folder(key).iter_recursive().collect()
    }

    /// Returns the element with `id`, searching all folders.
    pub fn find_element_by_id(&self, id: &str) -> Option<&Element> {
        self.model.element(id)
    }

    /// Returns the relationships that start or end at `element_id`.
    pub fn relationships_of(&self, element_id: &str) -> Vec<&Element> {
        self.model
            .folder(FolderKey::Relations)
            .iter_recursive()
            .filter(|element| element.is_relationship() && element.touches(element_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_rejects_unknown_type() {
        let mut model = ArchimateModel::default();
        let result = model.upsert(ElementDraft::new("Spaceship", "Enterprise"));
        assert!(matches!(
            result,
            Err(ArchimateError::UnknownElementType { kind }) if kind == "Spaceship"
        ));
        assert_eq!(model.model().element_count(), 0);
    }

    #[test]
    fn test_upsert_matches_case_sensitively() {
        let mut model = ArchimateModel::default();
        model
            .upsert(ElementDraft::new("Node", "Server"))
            .expect("upsert");
        model
            .upsert(ElementDraft::new("Node", "server"))
            .expect("upsert");
        assert_eq!(model.find_elements_by_type("Node").len(), 2);
    }

    #[test]
    fn test_upsert_keeps_draft_id_for_new_elements() {
        let mut model = ArchimateModel::default();
        let element = model
            .upsert(ElementDraft::new("Goal", "Grow").with_id("id-goal"))
            .expect("upsert");
        assert_eq!(element.id, "id-goal");
        assert!(model.find_element_by_id("id-goal").is_some());
    }

    #[test]
    fn test_new_uses_configured_name() {
        let config = AppConfig::new(
            config::LayoutConfig::default(),
            config::DocumentConfig::new(Some("Landscape".to_string())),
        );
        assert_eq!(ArchimateModel::new(config).model().name, "Landscape");
    }

    #[test]
    fn test_load_str_falls_back_to_empty_model() {
        let model = ArchimateModel::load_str("<html/>", AppConfig::default());
        assert_eq!(model.model().element_count(), 0);

        assert!(matches!(
            ArchimateModel::from_document("<html/>", AppConfig::default()),
            Err(ArchimateError::Parse { .. })
        ));
    }
}
