//! ArchiMate Core Types and Definitions
//!
//! This crate provides the foundational types for in-memory ArchiMate models
//! as stored by the Archi `.archimate` exchange format. It includes:
//!
//! - **Identifiers**: `id-` prefixed random identifiers ([`identifier`])
//! - **Folders**: The nine fixed top-level folders and the element type table ([`folder`])
//! - **Elements**: Concepts, relationships and their diagram children ([`element`])
//! - **Geometry**: Diagram bounds ([`geometry`] module)
//! - **Model**: The folder-keyed model root ([`model::Model`])
//! - **Views**: The editable projection of diagram elements ([`view`] module)
//! - **Schema**: Fixed constants of the exchange format ([`schema`] module)

pub mod element;
pub mod folder;
pub mod geometry;
pub mod identifier;
pub mod model;
pub mod schema;
pub mod view;

pub use element::{Attributes, Child, Element, Properties, SourceConnection, Style};
pub use folder::{Folder, FolderKey};
pub use geometry::Bounds;
pub use model::Model;
pub use view::{Connection, DiagramObject, Group, Note, View, ViewChild};
