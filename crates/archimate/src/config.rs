//! Configuration types for ArchiMate model editing.
//!
//! All types implement [`serde::Deserialize`] for loading from external
//! sources; every field has a default, so an empty document is a valid
//! configuration.
//!
//! # Example
//!
//! ```
//! # use archimate::config::AppConfig;
//! # use archimate::layout::LayoutAlgorithm;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().algorithm(), LayoutAlgorithm::Grid);
//! assert!(config.layout().include_relationships());
//! ```

use serde::Deserialize;

use crate::layout::LayoutAlgorithm;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// View generation settings.
    #[serde(default)]
    layout: LayoutConfig,

    /// Settings for newly created documents.
    #[serde(default)]
    document: DocumentConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, document: DocumentConfig) -> Self {
        Self { layout, document }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the document configuration.
    pub fn document(&self) -> &DocumentConfig {
        &self.document
    }
}

/// Defaults used when generating views.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Default [`LayoutAlgorithm`].
    #[serde(default)]
    algorithm: LayoutAlgorithm,

    /// Whether generated views connect elements that share a relationship.
    #[serde(default = "default_include_relationships")]
    include_relationships: bool,
}

fn default_include_relationships() -> bool {
    true
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: LayoutAlgorithm::default(),
            include_relationships: default_include_relationships(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `algorithm` - Placement strategy for generated views.
    /// * `include_relationships` - Whether to draw known relationships.
    pub fn new(algorithm: LayoutAlgorithm, include_relationships: bool) -> Self {
        Self {
            algorithm,
            include_relationships,
        }
    }

    pub fn algorithm(&self) -> LayoutAlgorithm {
        self.algorithm
    }

    pub fn include_relationships(&self) -> bool {
        self.include_relationships
    }
}

/// Settings for newly created documents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentConfig {
    /// Name given to a model created from scratch.
    #[serde(default)]
    default_name: Option<String>,
}

impl DocumentConfig {
    pub fn new(default_name: Option<String>) -> Self {
        Self { default_name }
    }

    /// Returns the configured name for new models, or an empty name.
    pub fn default_name(&self) -> &str {
        self.default_name.as_deref().unwrap_or_default()
    }
}
