//! Editable projection of view elements.
//!
//! A [`View`] is not stored on its own: it is materialised from an element of
//! type `ArchimateDiagramModel` with [`View::from_element`] and written back
//! with [`View::write_to`]. The diagram tree of the element is projected into
//! the tagged [`ViewChild`] variant so that tree searches can dispatch on the
//! kind of node instead of probing fields.
//!
//! Connections are recorded asymmetrically: the full [`Connection`] lives on
//! the node it starts from, while the node it ends at only lists the
//! connection id in `target_connections`.

use crate::{
    element::{Attributes, Child, Element, Properties, SourceConnection, Style},
    geometry::Bounds,
    schema::DIAGRAM_MODEL_TYPE,
};

/// Child type of a group node.
pub const GROUP_TYPE: &str = "Group";
/// Child type of a node drawing a model element.
pub const DIAGRAM_OBJECT_TYPE: &str = "DiagramObject";
/// Child type of a free-text note.
pub const NOTE_TYPE: &str = "Note";
/// Type of connections drawn between nodes.
pub const CONNECTION_TYPE: &str = "Connection";

const VIEWPOINT_ATTRIBUTE: &str = "viewpoint";
const BACKGROUND_ATTRIBUTE: &str = "background";

/// A connection between two nodes of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: String,
    pub kind: String,
    pub name: Option<String>,
    pub source: String,
    pub target: String,
    pub archimate_relationship: Option<String>,
    pub style: Style,
    pub documentation: Option<String>,
    pub attributes: Attributes,
    pub bendpoints: Vec<Attributes>,
}

impl Connection {
    /// Creates a plain connection between two nodes.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        archimate_relationship: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: CONNECTION_TYPE.to_string(),
            name: None,
            source: source.into(),
            target: target.into(),
            archimate_relationship,
            style: Style::default(),
            documentation: None,
            attributes: Attributes::new(),
            bendpoints: Vec::new(),
        }
    }
}

impl From<SourceConnection> for Connection {
    fn from(connection: SourceConnection) -> Self {
        Self {
            id: connection.id,
            kind: connection.kind,
            name: connection.name,
            source: connection.source,
            target: connection.target,
            archimate_relationship: connection.archimate_relationship,
            style: connection.style,
            documentation: connection.documentation,
            attributes: connection.attributes,
            bendpoints: connection.bendpoints,
        }
    }
}

impl From<Connection> for SourceConnection {
    fn from(connection: Connection) -> Self {
        Self {
            id: connection.id,
            kind: connection.kind,
            name: connection.name,
            source: connection.source,
            target: connection.target,
            archimate_relationship: connection.archimate_relationship,
            style: connection.style,
            documentation: connection.documentation,
            attributes: connection.attributes,
            bendpoints: connection.bendpoints,
        }
    }
}

/// A node drawing a model element.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramObject {
    pub id: String,
    pub archimate_element: String,
    pub name: Option<String>,
    pub bounds: Bounds,
    pub style: Style,
    pub source_connections: Vec<Connection>,
    pub target_connections: Vec<String>,
    pub documentation: Option<String>,
    pub attributes: Attributes,
    /// Nodes drawn nested inside this one.
    pub children: Vec<ViewChild>,
}

impl DiagramObject {
    /// Creates a diagram object for `archimate_element`.
    pub fn new(id: impl Into<String>, archimate_element: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            archimate_element: archimate_element.into(),
            name: None,
            bounds,
            style: Style::default(),
            source_connections: Vec::new(),
            target_connections: Vec::new(),
            documentation: None,
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }
}

/// A visual group containing further nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: Option<String>,
    pub bounds: Bounds,
    pub style: Style,
    pub children: Vec<ViewChild>,
    pub source_connections: Vec<Connection>,
    pub target_connections: Vec<String>,
    pub documentation: Option<String>,
    pub attributes: Attributes,
}

impl Group {
    /// Creates an empty group.
    pub fn new(id: impl Into<String>, name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            bounds,
            style: Style::default(),
            children: Vec::new(),
            source_connections: Vec::new(),
            target_connections: Vec::new(),
            documentation: None,
            attributes: Attributes::new(),
        }
    }
}

/// A free-text note.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub bounds: Bounds,
    pub content: Option<String>,
    pub style: Style,
    pub source_connections: Vec<Connection>,
    pub target_connections: Vec<String>,
    pub documentation: Option<String>,
    pub attributes: Attributes,
}

/// A node of the view tree.
///
/// `Opaque` keeps diagram nodes of any other type (view references, sketch
/// stickies, ...) verbatim so that writing a view back never drops them.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewChild {
    Group(Group),
    DiagramObject(DiagramObject),
    Connection(Connection),
    Note(Note),
    Opaque(Child),
}

impl ViewChild {
    /// Returns the id of the node.
    pub fn id(&self) -> &str {
        match self {
            ViewChild::Group(group) => &group.id,
            ViewChild::DiagramObject(object) => &object.id,
            ViewChild::Connection(connection) => &connection.id,
            ViewChild::Note(note) => &note.id,
            ViewChild::Opaque(child) => &child.id,
        }
    }

    /// Returns the nested nodes, for node kinds that can contain others.
    pub fn children(&self) -> Option<&[ViewChild]> {
        match self {
            ViewChild::Group(group) => Some(group.children.as_slice()),
            ViewChild::DiagramObject(object) => Some(object.children.as_slice()),
            _ => None,
        }
    }

    /// Mutable counterpart of [`ViewChild::children`].
    pub fn children_mut(&mut self) -> Option<&mut Vec<ViewChild>> {
        match self {
            ViewChild::Group(group) => Some(&mut group.children),
            ViewChild::DiagramObject(object) => Some(&mut object.children),
            _ => None,
        }
    }

    /// Returns the style of the node.
    pub fn style_mut(&mut self) -> Option<&mut Style> {
        match self {
            ViewChild::Group(group) => Some(&mut group.style),
            ViewChild::DiagramObject(object) => Some(&mut object.style),
            ViewChild::Connection(connection) => Some(&mut connection.style),
            ViewChild::Note(note) => Some(&mut note.style),
            ViewChild::Opaque(child) => Some(&mut child.style),
        }
    }

    /// Returns the bounds of the node; connections have none.
    pub fn bounds_mut(&mut self) -> Option<&mut Bounds> {
        match self {
            ViewChild::Group(group) => Some(&mut group.bounds),
            ViewChild::DiagramObject(object) => Some(&mut object.bounds),
            ViewChild::Note(note) => Some(&mut note.bounds),
            ViewChild::Opaque(child) => Some(&mut child.bounds),
            ViewChild::Connection(_) => None,
        }
    }

    /// Returns the outgoing connections of nodes that can be connected.
    pub fn source_connections_mut(&mut self) -> Option<&mut Vec<Connection>> {
        match self {
            ViewChild::Group(group) => Some(&mut group.source_connections),
            ViewChild::DiagramObject(object) => Some(&mut object.source_connections),
            ViewChild::Note(note) => Some(&mut note.source_connections),
            ViewChild::Connection(_) | ViewChild::Opaque(_) => None,
        }
    }

    /// Returns the incoming connection ids of nodes that can be connected.
    pub fn target_connections_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            ViewChild::Group(group) => Some(&mut group.target_connections),
            ViewChild::DiagramObject(object) => Some(&mut object.target_connections),
            ViewChild::Note(note) => Some(&mut note.target_connections),
            ViewChild::Connection(_) | ViewChild::Opaque(_) => None,
        }
    }

    /// Returns `true` if connections can start or end at this node.
    pub fn is_connectable(&self) -> bool {
        matches!(
            self,
            ViewChild::Group(_) | ViewChild::DiagramObject(_) | ViewChild::Note(_)
        )
    }
}

/// `targetConnections` is a whitespace-separated id list. It is written back
/// joined by single spaces, and an empty list drops the attribute.
fn split_references(references: Option<String>) -> Vec<String> {
    references
        .map(|refs| refs.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

fn join_references(references: &[String]) -> Option<String> {
    (!references.is_empty()).then(|| references.join(" "))
}

fn project_children(children: Vec<Child>) -> Vec<ViewChild> {
    children.into_iter().map(ViewChild::from).collect()
}

fn project_connections(connections: Vec<SourceConnection>) -> Vec<Connection> {
    connections.into_iter().map(Connection::from).collect()
}

fn restore_children(children: &[ViewChild]) -> Vec<Child> {
    children.iter().map(Child::from).collect()
}

fn restore_connections(connections: &[Connection]) -> Vec<SourceConnection> {
    connections.iter().cloned().map(SourceConnection::from).collect()
}

impl From<Child> for ViewChild {
    fn from(mut child: Child) -> Self {
        match child.kind.as_str() {
            GROUP_TYPE if child.archimate_element.is_none() && child.content.is_none() => {
                ViewChild::Group(Group {
                    id: child.id,
                    name: child.name,
                    bounds: child.bounds,
                    style: child.style,
                    children: project_children(child.children),
                    source_connections: project_connections(child.source_connections),
                    target_connections: split_references(child.target_connections),
                    documentation: child.documentation,
                    attributes: child.attributes,
                })
            }
            DIAGRAM_OBJECT_TYPE if child.archimate_element.is_some() && child.content.is_none() => {
                ViewChild::DiagramObject(DiagramObject {
                    id: child.id,
                    archimate_element: child.archimate_element.unwrap_or_default(),
                    name: child.name,
                    bounds: child.bounds,
                    style: child.style,
                    source_connections: project_connections(child.source_connections),
                    target_connections: split_references(child.target_connections),
                    documentation: child.documentation,
                    attributes: child.attributes,
                    children: project_children(child.children),
                })
            }
            NOTE_TYPE
                if child.children.is_empty()
                    && child.name.is_none()
                    && child.archimate_element.is_none() =>
            {
                ViewChild::Note(Note {
                    id: child.id,
                    bounds: child.bounds,
                    content: child.content,
                    style: child.style,
                    source_connections: project_connections(child.source_connections),
                    target_connections: split_references(child.target_connections),
                    documentation: child.documentation,
                    attributes: child.attributes,
                })
            }
            CONNECTION_TYPE
                if child.attributes.contains_key("source")
                    && child.attributes.contains_key("target") =>
            {
                let source = child.attributes.shift_remove("source").unwrap_or_default();
                let target = child.attributes.shift_remove("target").unwrap_or_default();
                let archimate_relationship = child.attributes.shift_remove("archimateRelationship");
                ViewChild::Connection(Connection {
                    id: child.id,
                    kind: child.kind,
                    name: child.name,
                    source,
                    target,
                    archimate_relationship,
                    style: child.style,
                    documentation: child.documentation,
                    attributes: child.attributes,
                    bendpoints: Vec::new(),
                })
            }
            _ => ViewChild::Opaque(child),
        }
    }
}

impl From<&ViewChild> for Child {
    fn from(view_child: &ViewChild) -> Self {
        match view_child {
            ViewChild::Group(group) => Child {
                id: group.id.clone(),
                kind: GROUP_TYPE.to_string(),
                name: group.name.clone(),
                bounds: group.bounds,
                style: group.style.clone(),
                target_connections: join_references(&group.target_connections),
                documentation: group.documentation.clone(),
                attributes: group.attributes.clone(),
                source_connections: restore_connections(&group.source_connections),
                children: restore_children(&group.children),
                ..Child::default()
            },
            ViewChild::DiagramObject(object) => Child {
                id: object.id.clone(),
                kind: DIAGRAM_OBJECT_TYPE.to_string(),
                name: object.name.clone(),
                bounds: object.bounds,
                archimate_element: Some(object.archimate_element.clone()),
                style: object.style.clone(),
                target_connections: join_references(&object.target_connections),
                documentation: object.documentation.clone(),
                attributes: object.attributes.clone(),
                source_connections: restore_connections(&object.source_connections),
                children: restore_children(&object.children),
                ..Child::default()
            },
            ViewChild::Note(note) => Child {
                id: note.id.clone(),
                kind: NOTE_TYPE.to_string(),
                bounds: note.bounds,
                style: note.style.clone(),
                target_connections: join_references(&note.target_connections),
                documentation: note.documentation.clone(),
                content: note.content.clone(),
                attributes: note.attributes.clone(),
                source_connections: restore_connections(&note.source_connections),
                ..Child::default()
            },
            ViewChild::Connection(connection) => {
                let mut attributes = Attributes::new();
                attributes.insert("source".to_string(), connection.source.clone());
                attributes.insert("target".to_string(), connection.target.clone());
                if let Some(relationship) = &connection.archimate_relationship {
                    attributes.insert("archimateRelationship".to_string(), relationship.clone());
                }
                attributes.extend(connection.attributes.clone());
                Child {
                    id: connection.id.clone(),
                    kind: connection.kind.clone(),
                    name: connection.name.clone(),
                    style: connection.style.clone(),
                    documentation: connection.documentation.clone(),
                    attributes,
                    ..Child::default()
                }
            }
            ViewChild::Opaque(child) => child.clone(),
        }
    }
}

/// A named diagram of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub id: String,
    pub name: String,
    pub documentation: Option<String>,
    pub viewpoint: Option<String>,
    pub background: Option<String>,
    pub children: Vec<ViewChild>,
    pub properties: Option<Properties>,
}

impl View {
    /// Projects a view element into a [`View`].
    ///
    /// Returns `None` if `element` is not of type `ArchimateDiagramModel`.
    pub fn from_element(element: &Element) -> Option<View> {
        if element.kind != DIAGRAM_MODEL_TYPE {
            return None;
        }

        Some(View {
            id: element.id.clone(),
            name: element.name.clone(),
            documentation: element.documentation.clone(),
            viewpoint: element.attributes.get(VIEWPOINT_ATTRIBUTE).cloned(),
            background: element.attributes.get(BACKGROUND_ATTRIBUTE).cloned(),
            children: project_children(element.children.clone()),
            properties: element.properties.clone(),
        })
    }

    /// Creates the backing element of a new, empty view.
    pub fn new_element(id: impl Into<String>, name: impl Into<String>) -> Element {
        Element::new(id, DIAGRAM_MODEL_TYPE, name)
    }

    /// Writes the whole view back into its backing element, replacing the
    /// element's diagram tree.
    pub fn write_to(&self, element: &mut Element) {
        element.name = self.name.clone();
        element.documentation = self.documentation.clone();
        element.properties = self.properties.clone();
        element.children = restore_children(&self.children);
        set_attribute(&mut element.attributes, VIEWPOINT_ATTRIBUTE, &self.viewpoint);
        set_attribute(&mut element.attributes, BACKGROUND_ATTRIBUTE, &self.background);
    }

    /// Depth-first search for the node with `id`.
    pub fn find(&self, id: &str) -> Option<&ViewChild> {
        find_in(&self.children, id)
    }

    /// Depth-first search for the node with `id`, mutably.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut ViewChild> {
        find_in_mut(&mut self.children, id)
    }

    /// Depth-first search for the first diagram object drawing `element_id`.
    pub fn find_object_for_element(&self, element_id: &str) -> Option<&DiagramObject> {
        self.diagram_objects()
            .into_iter()
            .find(|object| object.archimate_element == element_id)
    }

    /// All diagram objects of the view in depth-first order.
    pub fn diagram_objects(&self) -> Vec<&DiagramObject> {
        let mut objects = Vec::new();
        collect_objects(&self.children, &mut objects);
        objects
    }
}

fn set_attribute(attributes: &mut Attributes, name: &str, value: &Option<String>) {
    match value {
        Some(value) => {
            attributes.insert(name.to_string(), value.clone());
        }
        None => {
            attributes.shift_remove(name);
        }
    }
}

fn find_in<'a>(children: &'a [ViewChild], id: &str) -> Option<&'a ViewChild> {
    for child in children {
        if child.id() == id {
            return Some(child);
        }
        if let Some(found) = child.children().and_then(|nested| find_in(nested, id)) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(children: &'a mut [ViewChild], id: &str) -> Option<&'a mut ViewChild> {
    for child in children {
        if child.id() == id {
            return Some(child);
        }
        if let Some(nested) = child.children_mut() {
            if let Some(found) = find_in_mut(nested, id) {
                return Some(found);
            }
        }
    }
    None
}

fn collect_objects<'a>(children: &'a [ViewChild], objects: &mut Vec<&'a DiagramObject>) {
    for child in children {
        if let ViewChild::DiagramObject(object) = child {
            objects.push(object);
        }
        if let Some(nested) = child.children() {
            collect_objects(nested, objects);
        }
    }
}
