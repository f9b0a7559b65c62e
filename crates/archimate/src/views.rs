//! View management.
//!
//! Every operation projects the backing `ArchimateDiagramModel` element into
//! a [`View`], edits the projection, and writes the whole view back. An
//! unknown *view* id is soft (`None` / `false`); unknown elements, groups,
//! diagram objects and relationships are errors.

use log::{debug, info};

use archimate_core::{
    Bounds, Connection, DiagramObject, FolderKey, Group, Style, View, ViewChild,
    identifier::generate_id,
};

use crate::{
    ArchimateModel,
    error::{ArchimateError, Result},
    layout::LayoutAlgorithm,
};

/// Optional attributes of a new view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewOptions {
    pub documentation: Option<String>,
    pub viewpoint: Option<String>,
    pub background: Option<String>,
}

/// Options of [`ArchimateModel::generate_view_from_elements`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub layout: LayoutAlgorithm,
    /// Connect objects whose elements share a relationship.
    pub include_relationships: bool,
    pub view: ViewOptions,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            layout: LayoutAlgorithm::default(),
            include_relationships: true,
            view: ViewOptions::default(),
        }
    }
}

/// A style patch for an existing diagram node.
///
/// Style fields that are set overwrite the node's; `bounds`, when set,
/// replaces the node's bounds wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleUpdate {
    pub style: Style,
    pub bounds: Option<Bounds>,
}

impl ArchimateModel {
    /// Returns [`GenerateOptions`] seeded from the layout configuration.
    pub fn generate_options(&self) -> GenerateOptions {
        let layout = self.config().layout();
        GenerateOptions {
            layout: layout.algorithm(),
            include_relationships: layout.include_relationships(),
            view: ViewOptions::default(),
        }
    }

    /// Creates an empty view at the end of the `diagrams` folder.
    pub fn create_view(&mut self, name: &str, options: ViewOptions) -> View {
        let mut element = View::new_element(generate_id(), name);
        let view = View {
            id: element.id.clone(),
            name: name.to_string(),
            documentation: options.documentation,
            viewpoint: options.viewpoint,
            background: options.background,
            children: Vec::new(),
            properties: None,
        };
        view.write_to(&mut element);

        self.model_mut().folder_mut(FolderKey::Diagrams).push(element);
        info!(id = view.id, name; "View created");
        view
    }

    /// Returns the view with `view_id`, if it exists.
    pub fn get_view(&self, view_id: &str) -> Option<View> {
        self.model()
            .folder(FolderKey::Diagrams)
            .find(|element| element.id == view_id)
            .and_then(View::from_element)
    }

    /// Returns every view of the model, in folder order.
    pub fn list_views(&self) -> Vec<View> {
        self.model()
            .folder(FolderKey::Diagrams)
            .iter_recursive()
            .filter_map(View::from_element)
            .collect()
    }

    /// Removes the view with `view_id`.
    ///
    /// Elements drawn on the view are not affected. Returns `false` if there
    /// is no such view.
    pub fn delete_view(&mut self, view_id: &str) -> bool {
        let removed = self
            .model_mut()
            .folder_mut(FolderKey::Diagrams)
            .remove(view_id)
            .is_some();
        debug!(view_id, removed; "Delete view");
        removed
    }

    fn store_view(&mut self, view: &View) {
        if let Some(element) = self
            .model_mut()
            .folder_mut(FolderKey::Diagrams)
            .find_mut(|element| element.id == view.id)
        {
            view.write_to(element);
        }
    }

    fn require_element(&self, element_id: &str) -> Result<()> {
        if self.model().contains_element(element_id) {
            Ok(())
        } else {
            Err(ArchimateError::ElementNotFound {
                id: element_id.to_string(),
            })
        }
    }

    /// Draws the element `element_id` at the top level of a view.
    ///
    /// Returns `Ok(None)` if the view does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ArchimateError::ElementNotFound`] if no folder holds the
    /// element.
    pub fn add_diagram_object(
        &mut self,
        view_id: &str,
        element_id: &str,
        bounds: Bounds,
        style: Option<Style>,
    ) -> Result<Option<DiagramObject>> {
        let Some(mut view) = self.get_view(view_id) else {
            return Ok(None);
        };
        self.require_element(element_id)?;

        let object = new_diagram_object(element_id, bounds, style);
        view.children.push(ViewChild::DiagramObject(object.clone()));
        self.store_view(&view);

        debug!(view_id, element_id, object_id = object.id; "Diagram object added");
        Ok(Some(object))
    }

    /// Adds an empty group at the top level of a view.
    ///
    /// Returns `None` if the view does not exist.
    pub fn add_group(
        &mut self,
        view_id: &str,
        name: &str,
        bounds: Bounds,
        style: Option<Style>,
    ) -> Option<Group> {
        let mut view = self.get_view(view_id)?;

        let mut group = Group::new(generate_id(), name, bounds);
        group.style = style.unwrap_or_default();
        view.children.push(ViewChild::Group(group.clone()));
        self.store_view(&view);

        debug!(view_id, group_id = group.id; "Group added");
        Some(group)
    }

    /// Draws the element `element_id` inside a group of a view. The group
    /// may be nested at any depth.
    ///
    /// Returns `Ok(None)` if the view does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ArchimateError::GroupNotFound`] or
    /// [`ArchimateError::NotAGroup`] if `group_id` does not name a group, and
    /// [`ArchimateError::ElementNotFound`] for an unknown element.
    pub fn add_diagram_object_to_group(
        &mut self,
        view_id: &str,
        group_id: &str,
        element_id: &str,
        bounds: Bounds,
        style: Option<Style>,
    ) -> Result<Option<DiagramObject>> {
        let Some(mut view) = self.get_view(view_id) else {
            return Ok(None);
        };

        let group = match view.find_mut(group_id) {
            Some(ViewChild::Group(group)) => group,
            Some(_) => {
                return Err(ArchimateError::NotAGroup {
                    id: group_id.to_string(),
                });
            }
            None => {
                return Err(ArchimateError::GroupNotFound {
                    id: group_id.to_string(),
                });
            }
        };
        self.require_element(element_id)?;

        let object = new_diagram_object(element_id, bounds, style);
        group.children.push(ViewChild::DiagramObject(object.clone()));
        self.store_view(&view);

        debug!(view_id, group_id, object_id = object.id; "Diagram object added to group");
        Ok(Some(object))
    }

    /// Connects two nodes of a view.
    ///
    /// The full connection is recorded on the source node; the target node
    /// only lists its id. Returns `Ok(None)` if the view does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ArchimateError::DiagramObjectNotFound`] if either node is
    /// missing or cannot be connected, and
    /// [`ArchimateError::RelationshipNotFound`] if `relationship_id` does not
    /// name an element of the model.
    pub fn add_connection(
        &mut self,
        view_id: &str,
        source_id: &str,
        target_id: &str,
        relationship_id: Option<&str>,
        style: Option<Style>,
    ) -> Result<Option<Connection>> {
        let Some(mut view) = self.get_view(view_id) else {
            return Ok(None);
        };

        for node_id in [source_id, target_id] {
            if !view.find(node_id).is_some_and(ViewChild::is_connectable) {
                return Err(ArchimateError::DiagramObjectNotFound {
                    id: node_id.to_string(),
                });
            }
        }
        if let Some(relationship_id) = relationship_id {
            if !self.model().contains_element(relationship_id) {
                return Err(ArchimateError::RelationshipNotFound {
                    id: relationship_id.to_string(),
                });
            }
        }

        let mut connection = Connection::new(
            generate_id(),
            source_id,
            target_id,
            relationship_id.map(str::to_string),
        );
        connection.style = style.unwrap_or_default();

        if let Some(outgoing) = view
            .find_mut(source_id)
            .and_then(ViewChild::source_connections_mut)
        {
            outgoing.push(connection.clone());
        }
        if let Some(incoming) = view
            .find_mut(target_id)
            .and_then(ViewChild::target_connections_mut)
        {
            incoming.push(connection.id.clone());
        }
        self.store_view(&view);

        debug!(view_id, source_id, target_id, connection_id = connection.id; "Connection added");
        Ok(Some(connection))
    }

    /// Creates a view drawing `element_ids`, placed by `options.layout`.
    ///
    /// With `include_relationships`, every relationship of the `relations`
    /// folder whose two ends are both listed is drawn between the matching
    /// objects. The first failure aborts the operation; the view and the
    /// objects added so far are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ArchimateError::ElementNotFound`] if an id does not name an
    /// element.
    pub fn generate_view_from_elements(
        &mut self,
        name: &str,
        element_ids: &[&str],
        options: GenerateOptions,
    ) -> Result<View> {
        let view = self.create_view(name, options.view);
        let total = element_ids.len();

        for (index, element_id) in element_ids.iter().enumerate() {
            let bounds = options.layout.position(index, total);
            self.add_diagram_object(&view.id, element_id, bounds, None)?;
        }

        if options.include_relationships {
            let relationships: Vec<(String, String, String)> = self
                .model()
                .folder(FolderKey::Relations)
                .iter_recursive()
                .filter_map(|element| {
                    let source = element.source.as_deref()?;
                    let target = element.target.as_deref()?;
                    let listed = |id: &str| element_ids.iter().any(|listed| *listed == id);
                    (listed(source) && listed(target)).then(|| {
                        (element.id.clone(), source.to_string(), target.to_string())
                    })
                })
                .collect();

            for (relationship_id, source, target) in relationships {
                let endpoints = self.get_view(&view.id).and_then(|current| {
                    let source = current.find_object_for_element(&source)?.id.clone();
                    let target = current.find_object_for_element(&target)?.id.clone();
                    Some((source, target))
                });
                if let Some((source_object, target_object)) = endpoints {
                    self.add_connection(
                        &view.id,
                        &source_object,
                        &target_object,
                        Some(&relationship_id),
                        None,
                    )?;
                }
            }
        }

        info!(
            view_id = view.id,
            objects = total,
            layout:% = options.layout;
            "View generated"
        );
        Ok(self.get_view(&view.id).unwrap_or(view))
    }

    /// Applies a style patch to a node of a view, searching nested groups.
    ///
    /// Returns `false` if the view or the node does not exist.
    pub fn update_diagram_object_style(
        &mut self,
        view_id: &str,
        object_id: &str,
        update: &StyleUpdate,
    ) -> bool {
        let Some(mut view) = self.get_view(view_id) else {
            return false;
        };
        let Some(node) = view.find_mut(object_id) else {
            return false;
        };

        if let Some(style) = node.style_mut() {
            style.merge(&update.style);
        }
        if let (Some(bounds), Some(replacement)) = (node.bounds_mut(), update.bounds) {
            *bounds = replacement;
        }
        self.store_view(&view);

        debug!(view_id, object_id; "Style updated");
        true
    }
}

fn new_diagram_object(element_id: &str, bounds: Bounds, style: Option<Style>) -> DiagramObject {
    let mut object = DiagramObject::new(generate_id(), element_id, bounds);
    object.style = style.unwrap_or_default();
    object
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementDraft;

    fn model_with_actor() -> (ArchimateModel, String) {
        let mut model = ArchimateModel::default();
        let actor = model
            .upsert(ElementDraft::new("BusinessActor", "Customer"))
            .expect("upsert");
        (model, actor.id)
    }

    #[test]
    fn test_unknown_view_is_soft() {
        let (mut model, actor) = model_with_actor();

        assert!(model.get_view("id-missing").is_none());
        assert!(matches!(
            model.add_diagram_object("id-missing", &actor, Bounds::default(), None),
            Ok(None)
        ));
        assert!(
            model
                .add_group("id-missing", "Zone", Bounds::default(), None)
                .is_none()
        );
        assert!(!model.update_diagram_object_style(
            "id-missing",
            "id-x",
            &StyleUpdate::default()
        ));
        assert!(!model.delete_view("id-missing"));
    }

    #[test]
    fn test_add_diagram_object_requires_element() {
        let (mut model, _) = model_with_actor();
        let view = model.create_view("Main", ViewOptions::default());

        let result = model.add_diagram_object(&view.id, "id-missing", Bounds::default(), None);

        assert!(matches!(result, Err(ArchimateError::ElementNotFound { id }) if id == "id-missing"));
        assert!(model.get_view(&view.id).expect("view").children.is_empty());
    }

    #[test]
    fn test_group_lookup_errors() {
        let (mut model, actor) = model_with_actor();
        let view = model.create_view("Main", ViewOptions::default());
        let object = model
            .add_diagram_object(&view.id, &actor, Bounds::default(), None)
            .expect("add")
            .expect("view");

        assert!(matches!(
            model.add_diagram_object_to_group(&view.id, "id-nope", &actor, Bounds::default(), None),
            Err(ArchimateError::GroupNotFound { .. })
        ));
        assert!(matches!(
            model.add_diagram_object_to_group(&view.id, &object.id, &actor, Bounds::default(), None),
            Err(ArchimateError::NotAGroup { .. })
        ));
    }

    #[test]
    fn test_nested_group_insertion() {
        let (mut model, actor) = model_with_actor();
        let view = model.create_view("Main", ViewOptions::default());
        let outer = model
            .add_group(&view.id, "Outer", Bounds::new(0.0, 0.0, 500.0, 400.0), None)
            .expect("group");

        let mut stored = model.get_view(&view.id).expect("view");
        let inner = Group::new("id-inner", "Inner", Bounds::new(10.0, 10.0, 200.0, 200.0));
        if let Some(ViewChild::Group(group)) = stored.find_mut(&outer.id) {
            group.children.push(ViewChild::Group(inner));
        }
        model.store_view(&stored);

        let object = model
            .add_diagram_object_to_group(&view.id, "id-inner", &actor, Bounds::default(), None)
            .expect("add")
            .expect("view");

        let view = model.get_view(&view.id).expect("view");
        assert!(matches!(view.find(&object.id), Some(ViewChild::DiagramObject(_))));
        assert_eq!(view.children.len(), 1);
    }

    #[test]
    fn test_update_style_merges_and_replaces_bounds() {
        let (mut model, actor) = model_with_actor();
        let view = model.create_view("Main", ViewOptions::default());
        let style = Style {
            fill_color: Some("#ffffb5".to_string()),
            font: Some("Arial".to_string()),
            ..Style::default()
        };
        let object = model
            .add_diagram_object(&view.id, &actor, Bounds::new(1.0, 1.0, 10.0, 10.0), Some(style))
            .expect("add")
            .expect("view");

        let update = StyleUpdate {
            style: Style {
                fill_color: Some("#c0c0c0".to_string()),
                ..Style::default()
            },
            bounds: Some(Bounds::new(5.0, 6.0, 7.0, 8.0)),
        };
        assert!(model.update_diagram_object_style(&view.id, &object.id, &update));
        assert!(!model.update_diagram_object_style(&view.id, "id-none", &update));

        let view = model.get_view(&view.id).expect("view");
        let Some(ViewChild::DiagramObject(updated)) = view.find(&object.id) else {
            panic!("Expected a diagram object");
        };
        assert_eq!(updated.style.fill_color.as_deref(), Some("#c0c0c0"));
        assert_eq!(updated.style.font.as_deref(), Some("Arial"));
        assert_eq!(updated.bounds, Bounds::new(5.0, 6.0, 7.0, 8.0));
    }

    #[test]
    fn test_generate_options_follow_config() {
        let options = ArchimateModel::default().generate_options();
        assert_eq!(options, GenerateOptions::default());
    }
}
