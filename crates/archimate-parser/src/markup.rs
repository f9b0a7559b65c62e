//! Generic attributed-node tree and its text form.
//!
//! [`parse_document`] turns XML text into a tree of [`Node`]s and
//! [`build_document`] writes such a tree back as pretty-printed XML. Neither
//! knows anything about ArchiMate; the schema mapping lives in
//! [`crate::parse`] and [`crate::serialize`].
//!
//! Names are kept qualified exactly as written (`archimate:model`,
//! `xsi:type`), and namespace declarations are ordinary attributes.

use indexmap::IndexMap;
use log::trace;
use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::{ParseError, Result};

/// An element of the markup tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
    pub text: Option<String>,
}

impl Node {
    /// Creates a node with no attributes, children or text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute (builder style).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Sets the text content (builder style).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets an attribute, overwriting an existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Appends a child node.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Iterates over the children with the given name.
    ///
    /// A single child and a run of repeated children are handled alike.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Returns the first child with the given name.
    pub fn child_named(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns the text of the first child with the given name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child_named(name)?.text.as_deref()
    }

    /// Returns `true` if the node has no attributes, no children and no text.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
            && self.children.is_empty()
            && self.text.as_deref().is_none_or(str::is_empty)
    }
}

fn markup_error(reader: &Reader<&[u8]>, message: impl ToString) -> ParseError {
    ParseError::Markup {
        message: message.to_string(),
        position: reader.buffer_position() as u64,
    }
}

fn node_from_start(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Node> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|err| markup_error(reader, err))?
        .to_string();

    let mut node = Node::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| markup_error(reader, err))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|err| markup_error(reader, err))?
            .to_string();
        let value = attribute
            .unescape_value()
            .map_err(|err| markup_error(reader, err))?
            .into_owned();
        node.attributes.insert(key, value);
    }
    Ok(node)
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

fn append_text(stack: &mut [Node], text: &str) {
    if let Some(current) = stack.last_mut() {
        current.text.get_or_insert_with(String::new).push_str(text);
    }
}

/// Parses markup text into a node tree, returning the document root.
///
/// Whitespace-only text between elements is ignored; other text is kept
/// verbatim on the enclosing node.
///
/// # Errors
///
/// Returns [`ParseError::Markup`] if the text is not well-formed or contains
/// no root element.
///
/// # Examples
///
/// ```
/// # use archimate_parser::markup::parse_document;
/// let root = parse_document(r#"<a x="1"><b/><b/></a>"#).unwrap();
/// assert_eq!(root.attribute("x"), Some("1"));
/// assert_eq!(root.children_named("b").count(), 2);
/// ```
pub fn parse_document(text: &str) -> Result<Node> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| markup_error(&reader, err))?;

        match event {
            Event::Start(start) => {
                let node = node_from_start(&reader, &start)?;
                stack.push(node);
            }
            Event::Empty(start) => {
                let node = node_from_start(&reader, &start)?;
                attach(&mut stack, &mut root, node);
            }
            Event::End(_) => {
                let Some(node) = stack.pop() else {
                    return Err(markup_error(&reader, "unbalanced closing tag"));
                };
                attach(&mut stack, &mut root, node);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|err| markup_error(&reader, err))?;
                if !text.trim().is_empty() {
                    append_text(&mut stack, &text);
                }
            }
            Event::CData(data) => {
                append_text(&mut stack, &String::from_utf8_lossy(&data));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(markup_error(&reader, "unexpected end of document"));
    }

    let root = root.ok_or_else(|| markup_error(&reader, "document has no root element"))?;
    trace!(root = root.name; "Parsed markup tree");
    Ok(root)
}

fn write_error(err: impl ToString) -> ParseError {
    ParseError::Write(err.to_string())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    let mut start = BytesStart::new(node.name.as_str());
    for (name, value) in &node.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    let text = node.text.as_deref().filter(|text| !text.is_empty());
    let children: Vec<&Node> = node.children.iter().filter(|c| !c.is_empty()).collect();

    if text.is_none() && children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    if let Some(text) = text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error)?;
    }
    for child in children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.name.as_str())))
        .map_err(write_error)
}

/// Writes a node tree as an indented XML document with a declaration.
///
/// Nodes without attributes, children or text are left out, except the root.
///
/// # Errors
///
/// Returns [`ParseError::Write`] if the writer fails.
pub fn build_document(root: &Node) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    write_node(&mut writer, root)?;

    let mut text = String::from_utf8(writer.into_inner()).map_err(write_error)?;
    text.push('\n');
    Ok(text)
}
