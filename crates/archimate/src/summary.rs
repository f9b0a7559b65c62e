//! Element statistics of a model.

use std::fmt::{self, Display};

use archimate_core::{FolderKey, Model, schema::DIAGRAM_MODEL_TYPE};

/// Element counts of a model, per folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub name: String,
    /// Number of elements per folder, sub-folders included, in folder order.
    pub folders: Vec<(FolderKey, usize)>,
    pub relationship_count: usize,
    pub view_count: usize,
}

impl ModelSummary {
    /// Collects the statistics of `model`.
    pub fn of(model: &Model) -> Self {
        Self {
            name: model.name.clone(),
            folders: model
                .folders()
                .map(|(key, folder)| (key, folder.len_recursive()))
                .collect(),
            relationship_count: model
                .elements()
                .filter(|element| element.is_relationship())
                .count(),
            view_count: model
                .folder(FolderKey::Diagrams)
                .iter_recursive()
                .filter(|element| element.kind == DIAGRAM_MODEL_TYPE)
                .count(),
        }
    }

    /// Total number of elements across all folders.
    pub fn element_count(&self) -> usize {
        self.folders.iter().map(|(_, count)| count).sum()
    }
}

impl Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.name)?;
        for (key, count) in &self.folders {
            writeln!(f, "  {:<28} {count}", key.display_name())?;
        }
        writeln!(f, "Elements:      {}", self.element_count())?;
        writeln!(f, "Relationships: {}", self.relationship_count)?;
        write!(f, "Views:         {}", self.view_count)
    }
}
