//! Node tree to [`Model`].
//!
//! Folders are matched by their `type` attribute in the fixed key order; a
//! folder absent from the document keeps its default. Repeated child nodes
//! (`element`, `property`, `child`, `sourceConnection`) may occur once or many
//! times and are read the same way.

use archimate_core::{
    Child, Element, Folder, FolderKey, Model, Properties,
    schema::{ROOT_NODE, strip_type_prefix},
};
use log::{debug, trace};

use crate::{
    codec::{
        BOUNDS, DOCUMENTATION, SOURCE_CONNECTION, XSI_TYPE, bounds_from_node, extra_attributes,
        source_connection_from_node, style_from_node,
    },
    error::{ParseError, Result},
    markup::Node,
};

const FOLDER: &str = "folder";
const ELEMENT: &str = "element";
const CHILD: &str = "child";
const PROPERTY: &str = "property";
const PURPOSE: &str = "purpose";
const CONTENT: &str = "content";

const ELEMENT_ATTRIBUTES: [&str; 5] = [XSI_TYPE, "id", "name", "source", "target"];
const CHILD_ATTRIBUTES: [&str; 5] = [
    XSI_TYPE,
    "id",
    "name",
    "archimateElement",
    "targetConnections",
];

/// Builds a [`Model`] from the root node of a document.
///
/// # Errors
///
/// Returns [`ParseError::MissingRoot`] if `root` is not an `archimate:model`
/// node. Any namespace prefix on the root name is accepted.
pub fn parse_model(root: &Node) -> Result<Model> {
    if local_name(&root.name) != local_name(ROOT_NODE) {
        return Err(ParseError::MissingRoot {
            found: root.name.clone(),
        });
    }

    let mut model = Model::new(root.attribute("name").unwrap_or_default());
    model.purpose = root.child_text(PURPOSE).map(str::to_string);
    model.properties = properties_from_node(root);

    for key in FolderKey::ALL {
        let found = root
            .children_named(FOLDER)
            .find(|folder| folder.attribute("type") == Some(key.as_str()));
        if let Some(node) = found {
            model.set_folder(key, folder_from_node(node));
        }
    }

    debug!(
        name = model.name,
        elements = model.element_count();
        "Model parsed"
    );
    Ok(model)
}

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn folder_from_node(node: &Node) -> Folder {
    let mut folder = Folder::new(
        node.attribute("name").unwrap_or_default(),
        node.attribute("id").unwrap_or_default(),
    );

    let elements: Vec<Element> = node.children_named(ELEMENT).map(element_from_node).collect();
    if !elements.is_empty() {
        folder.elements = Some(elements);
    }
    folder.folders = node.children_named(FOLDER).map(folder_from_node).collect();

    trace!(name = folder.name, elements = folder.elements().len(); "Read folder");
    folder
}

fn element_from_node(node: &Node) -> Element {
    Element {
        id: node.attribute("id").unwrap_or_default().to_string(),
        kind: strip_type_prefix(node.attribute(XSI_TYPE).unwrap_or_default()).to_string(),
        name: node.attribute("name").unwrap_or_default().to_string(),
        documentation: node.child_text(DOCUMENTATION).map(str::to_string),
        source: node.attribute("source").map(str::to_string),
        target: node.attribute("target").map(str::to_string),
        properties: properties_from_node(node),
        children: node.children_named(CHILD).map(child_from_node).collect(),
        attributes: node
            .attributes
            .iter()
            .filter(|(name, _)| !ELEMENT_ATTRIBUTES.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
    }
}

/// Reads `property` nodes in order; a later duplicate key overwrites an
/// earlier one. Returns `None` when there are no properties.
fn properties_from_node(node: &Node) -> Option<Properties> {
    let properties: Properties = node
        .children_named(PROPERTY)
        .filter_map(|property| {
            let key = property.attribute("key")?;
            Some((key, property.attribute("value").unwrap_or_default()))
        })
        .collect();
    (!properties.is_empty()).then_some(properties)
}

fn child_from_node(node: &Node) -> Child {
    Child {
        id: node.attribute("id").unwrap_or_default().to_string(),
        kind: strip_type_prefix(node.attribute(XSI_TYPE).unwrap_or_default()).to_string(),
        name: node.attribute("name").map(str::to_string),
        bounds: bounds_from_node(node.child_named(BOUNDS)),
        archimate_element: node.attribute("archimateElement").map(str::to_string),
        style: style_from_node(node),
        target_connections: node.attribute("targetConnections").map(str::to_string),
        documentation: node.child_text(DOCUMENTATION).map(str::to_string),
        content: node.child_text(CONTENT).map(str::to_string),
        attributes: extra_attributes(node, &CHILD_ATTRIBUTES),
        source_connections: node
            .children_named(SOURCE_CONNECTION)
            .map(source_connection_from_node)
            .collect(),
        children: node.children_named(CHILD).map(child_from_node).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_document;
    use archimate_core::Bounds;

    fn parse(text: &str) -> Model {
        parse_model(&parse_document(text).expect("markup")).expect("model")
    }

    #[test]
    fn test_missing_folders_get_defaults() {
        let model = parse(
            r##"<archimate:model xmlns:archimate="http://www.archimatetool.com/archimate" name="Sparse">
                 <folder name="People" id="f-1" type="business">
                   <element xsi:type="archimate:BusinessActor" name="Alice" id="a"/>
                 </folder>
               </archimate:model>"##,
        );

        assert_eq!(model.name, "Sparse");
        let business = model.folder(FolderKey::Business);
        assert_eq!(business.name, "People");
        assert_eq!(business.id, "f-1");
        assert_eq!(business.elements()[0].kind, "BusinessActor");

        let strategy = model.folder(FolderKey::Strategy);
        assert_eq!(strategy.name, "Strategy");
        assert!(strategy.elements.is_none());
    }

    #[test]
    fn test_properties_last_duplicate_wins() {
        let model = parse(
            r##"<archimate:model name="M">
                 <folder type="application" name="Application" id="f">
                   <element xsi:type="archimate:ApplicationComponent" name="CRM" id="c">
                     <documentation>Customer data</documentation>
                     <property key="tier" value="1"/>
                     <property key="owner" value="sales"/>
                     <property key="tier" value="2"/>
                   </element>
                 </folder>
               </archimate:model>"##,
        );

        let element = model.element("c").expect("element");
        assert_eq!(element.documentation.as_deref(), Some("Customer data"));
        let properties: Vec<_> = element.properties.as_ref().expect("props").iter().collect();
        assert_eq!(properties, vec![("tier", "2"), ("owner", "sales")]);
    }

    #[test]
    fn test_nested_children_and_connections() {
        let model = parse(
            r##"<archimate:model name="M">
                 <folder type="diagrams" name="Views" id="f">
                   <element xsi:type="archimate:ArchimateDiagramModel" name="V" id="v" viewpoint="layered">
                     <child xsi:type="archimate:Group" id="g" name="Zone" fillColor="#eeeeee">
                       <bounds x="10" y="20" width="400" height="300"/>
                       <child xsi:type="archimate:DiagramObject" id="o1" archimateElement="a" targetConnections="c1">
                         <bounds x="5" y="oops"/>
                       </child>
                     </child>
                     <child xsi:type="archimate:DiagramObject" id="o2" archimateElement="b">
                       <sourceConnection xsi:type="archimate:Connection" id="c1" source="o2" target="o1" archimateRelationship="r"/>
                       <sourceConnection xsi:type="archimate:Connection" id="c2" source="o2" target="g"/>
                     </child>
                   </element>
                 </folder>
               </archimate:model>"##,
        );

        let view = model.element("v").expect("view");
        assert_eq!(view.attributes.get("viewpoint").map(String::as_str), Some("layered"));

        let group = &view.children[0];
        assert_eq!(group.kind, "Group");
        assert_eq!(group.bounds, Bounds::new(10.0, 20.0, 400.0, 300.0));
        assert_eq!(group.style.fill_color.as_deref(), Some("#eeeeee"));
        assert!(group.attributes.is_empty());

        let nested = &group.children[0];
        assert_eq!(nested.bounds, Bounds::new(5.0, 0.0, 0.0, 0.0));
        assert_eq!(nested.target_connections.as_deref(), Some("c1"));

        let object = &view.children[1];
        assert_eq!(object.source_connections.len(), 2);
        assert_eq!(
            object.source_connections[0].archimate_relationship.as_deref(),
            Some("r")
        );
    }

    #[test]
    fn test_model_metadata_and_subfolders() {
        let model = parse(
            r##"<archimate:model name="M">
                 <folder type="technology" name="Technology &amp; Physical" id="t">
                   <folder name="Data centre" id="t-sub">
                     <element xsi:type="archimate:Node" name="Rack" id="n"/>
                   </folder>
                 </folder>
                 <purpose>Reference model</purpose>
                 <property key="status" value="draft"/>
               </archimate:model>"##,
        );

        assert_eq!(model.purpose.as_deref(), Some("Reference model"));
        assert_eq!(
            model.properties.as_ref().and_then(|p| p.get("status")),
            Some("draft")
        );
        let technology = model.folder(FolderKey::Technology);
        assert!(technology.elements.is_none());
        assert_eq!(technology.folders[0].name, "Data centre");
        assert!(model.contains_element("n"));
    }

    #[test]
    fn test_rejects_foreign_root() {
        let root = parse_document("<svg/>").expect("markup");
        assert!(matches!(
            parse_model(&root),
            Err(ParseError::MissingRoot { found }) if found == "svg"
        ));
    }
}
