//! Model elements and their diagram children.
//!
//! An [`Element`] is either a concept (an actor, a service, a node, ...) or a
//! relationship between two concepts, in which case both `source` and
//! `target` are set. Elements of the `diagrams` folder additionally carry a
//! tree of [`Child`] nodes describing what is drawn on the view.

use indexmap::IndexMap;

use crate::geometry::Bounds;

/// Attributes outside the known set of a record, in document order.
///
/// Kept so that attributes such as `viewpoint` on a view or `accessType` on an
/// access relationship survive a load/save cycle.
pub type Attributes = IndexMap<String, String>;

/// Ordered key/value properties.
///
/// Keys are unique. Inserting an existing key overwrites its value in place,
/// so iteration order is the order in which keys were first inserted.
///
/// # Examples
///
/// ```
/// # use archimate_core::element::Properties;
/// let mut properties = Properties::new();
/// properties.insert("version", "1.0");
/// properties.insert("owner", "ops");
/// properties.insert("version", "2.0");
///
/// let entries: Vec<_> = properties.iter().collect();
/// assert_eq!(entries, vec![("version", "2.0"), ("owner", "ops")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(IndexMap<String, String>);

impl Properties {
    /// Creates an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a property.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value of a property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Merges `other` into this map key by key; keys not named in `other`
    /// are preserved.
    pub fn merge(&mut self, other: &Properties) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Iterates over properties in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

/// Visual style of a diagram child or connection.
///
/// Values are kept as the exact attribute text so they are written back
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    pub fill_color: Option<String>,
    pub line_color: Option<String>,
    pub font_color: Option<String>,
    pub font: Option<String>,
    pub line_width: Option<String>,
    pub alpha: Option<String>,
    pub text_alignment: Option<String>,
    pub text_position: Option<String>,
    pub border_type: Option<String>,
}

impl Style {
    /// Attribute names of the style fields, in the order they are written.
    pub const ATTRIBUTES: [&'static str; 9] = [
        "fillColor",
        "lineColor",
        "fontColor",
        "font",
        "lineWidth",
        "alpha",
        "textAlignment",
        "textPosition",
        "borderType",
    ];

    fn slot(&self, attribute: &str) -> Option<&Option<String>> {
        let slot = match attribute {
            "fillColor" => &self.fill_color,
            "lineColor" => &self.line_color,
            "fontColor" => &self.font_color,
            "font" => &self.font,
            "lineWidth" => &self.line_width,
            "alpha" => &self.alpha,
            "textAlignment" => &self.text_alignment,
            "textPosition" => &self.text_position,
            "borderType" => &self.border_type,
            _ => return None,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, attribute: &str) -> Option<&mut Option<String>> {
        let slot = match attribute {
            "fillColor" => &mut self.fill_color,
            "lineColor" => &mut self.line_color,
            "fontColor" => &mut self.font_color,
            "font" => &mut self.font,
            "lineWidth" => &mut self.line_width,
            "alpha" => &mut self.alpha,
            "textAlignment" => &mut self.text_alignment,
            "textPosition" => &mut self.text_position,
            "borderType" => &mut self.border_type,
            _ => return None,
        };
        Some(slot)
    }

    /// Returns the value of a style attribute by its document name.
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.slot(attribute)?.as_deref()
    }

    /// Sets a style attribute by its document name.
    ///
    /// Returns `false` if `attribute` is not a style attribute.
    pub fn set(&mut self, attribute: &str, value: impl Into<String>) -> bool {
        match self.slot_mut(attribute) {
            Some(slot) => {
                *slot = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Iterates over the set style attributes in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        Self::ATTRIBUTES
            .into_iter()
            .filter_map(|attribute| self.get(attribute).map(|value| (attribute, value)))
    }

    /// Shallow merge: every field set in `patch` overwrites this style.
    pub fn merge(&mut self, patch: &Style) {
        for (attribute, value) in patch.iter() {
            self.set(attribute, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// An outgoing connection drawn from a diagram child.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceConnection {
    pub id: String,
    pub kind: String,
    pub name: Option<String>,
    pub source: String,
    pub target: String,
    pub archimate_relationship: Option<String>,
    pub style: Style,
    pub documentation: Option<String>,
    pub attributes: Attributes,
    /// Bend points of the routed line, as raw attribute records.
    pub bendpoints: Vec<Attributes>,
}

/// A node in the diagram tree of a view element.
///
/// Children nest: a `Group` child contains further children. Each child may
/// anchor any number of outgoing [`SourceConnection`]s, while incoming
/// connections are listed by id in `target_connections` as a single
/// space-separated reference string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Child {
    pub id: String,
    pub kind: String,
    pub name: Option<String>,
    pub bounds: Bounds,
    pub archimate_element: Option<String>,
    pub style: Style,
    pub target_connections: Option<String>,
    pub documentation: Option<String>,
    /// Text of a `Note` child.
    pub content: Option<String>,
    pub attributes: Attributes,
    pub source_connections: Vec<SourceConnection>,
    pub children: Vec<Child>,
}

/// A concept or relationship of the model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub id: String,
    /// Type name without the `archimate:` prefix.
    pub kind: String,
    pub name: String,
    pub documentation: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub properties: Option<Properties>,
    pub children: Vec<Child>,
    pub attributes: Attributes,
}

impl Element {
    /// Creates an element with only identity fields set.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if both `source` and `target` are set.
    pub fn is_relationship(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }

    /// Returns `true` if this relationship connects `element_id` on either end.
    pub fn touches(&self, element_id: &str) -> bool {
        self.source.as_deref() == Some(element_id) || self.target.as_deref() == Some(element_id)
    }

    /// Returns the value of a property, if any.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)
    }
}
