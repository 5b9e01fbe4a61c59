//! Metadata XML model
//!
//! A small owned element tree. Metadata documents are plain element/text
//! trees with a namespace attribute on the root, which is all this models.
//! Parsing and serialization go through `quick-xml`.

use std::fmt;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{MetaformError, MetaformResult};

/// Namespace carried by every metadata document
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// A node inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with attributes and ordered children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element holding a single text node
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.children.push(XmlNode::Text(text.into()));
        element
    }

    /// Root element of a metadata document: `<Name xmlns="...">`
    pub fn metadata_root(name: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element
            .attributes
            .push(("xmlns".to_string(), METADATA_NAMESPACE.to_string()));
        element
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, in document order
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element named `name`
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// Every child element named `name`
    pub fn children_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a XmlElement> + 'n
    where
        'a: 'n,
    {
        self.elements().filter(move |e| e.name == name)
    }

    /// Concatenated text of direct text nodes, if there are any
    pub fn text(&self) -> Option<String> {
        let mut out: Option<String> = None;
        for node in &self.children {
            if let XmlNode::Text(text) = node {
                out.get_or_insert_with(String::new).push_str(text);
            }
        }
        out
    }

    /// Text of the first child element named `name`
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).and_then(XmlElement::text)
    }

    pub fn push(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Keep only the child elements matching `keep`; text nodes are kept
    pub fn retain_elements(&mut self, mut keep: impl FnMut(&XmlElement) -> bool) {
        self.children.retain(|node| match node {
            XmlNode::Element(element) => keep(element),
            XmlNode::Text(_) => true,
        });
    }

    /// Copy of this element without children, attributes kept
    pub fn shallow_clone(&self) -> XmlElement {
        XmlElement {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }

    /// Serialize as a standalone metadata document
    pub fn to_document(&self) -> MetaformResult<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(serialize_error)?;
        write_element(&mut writer, self)?;
        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        Ok(bytes)
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name)
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> MetaformResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(serialize_error);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(serialize_error)?;
    for node in &element.children {
        match node {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(serialize_error)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(serialize_error)
}

fn serialize_error(err: impl fmt::Display) -> MetaformError {
    MetaformError::Xml {
        path: Default::default(),
        message: err.to_string(),
    }
}

/// Parse a metadata document and return its root element
///
/// `path` is only used for error messages.
pub fn parse_document(bytes: &[u8], path: &Path) -> MetaformResult<XmlElement> {
    let error = |message: String| MetaformError::Xml {
        path: path.to_path_buf(),
        message,
    };

    let source = std::str::from_utf8(bytes).map_err(|e| error(e.to_string()))?;
    let mut reader = Reader::from_str(source);
    reader.trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event().map_err(|e| error(e.to_string()))? {
            Event::Start(start) => {
                stack.push(start_element(&start).map_err(error)?);
            }
            Event::Empty(start) => {
                let element = start_element(&start).map_err(error)?;
                attach(&mut stack, &mut root, element).map_err(error)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| error("unbalanced closing tag".to_string()))?;
                attach(&mut stack, &mut root, element).map_err(error)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| error(e.to_string()))?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&data).into_owned();
                    parent.children.push(XmlNode::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(error(format!("unclosed element <{}>", stack[0].name)));
    }
    root.ok_or_else(|| error("document has no root element".to_string()))
}

fn start_element(start: &BytesStart<'_>) -> Result<XmlElement, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(|e| e.to_string())?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), String> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(format!("second root element <{}>", element.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>Account</label>
    <fields>
        <fullName>Name</fullName>
        <type>Text</type>
    </fields>
    <enableHistory>true</enableHistory>
</CustomObject>
"#;

    #[test]
    fn parses_nested_elements() {
        let root = parse_document(ACCOUNT.as_bytes(), Path::new("Account.object")).unwrap();
        assert_eq!(root.name, "CustomObject");
        assert_eq!(root.attribute("xmlns"), Some(METADATA_NAMESPACE));
        assert_eq!(root.child_text("label").as_deref(), Some("Account"));
        let field = root.child("fields").unwrap();
        assert_eq!(field.child_text("fullName").as_deref(), Some("Name"));
        assert_eq!(root.elements().count(), 3);
    }

    #[test]
    fn serializes_back_to_the_same_document() {
        let root = parse_document(ACCOUNT.as_bytes(), Path::new("Account.object")).unwrap();
        let bytes = root.to_document().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), ACCOUNT);
    }

    #[test]
    fn escapes_text_and_writes_empty_elements() {
        let mut root = XmlElement::metadata_root("CustomLabels");
        root.push(XmlElement::with_text("value", "a < b & c"));
        root.push(XmlElement::new("empty"));
        let text = String::from_utf8(root.to_document().unwrap()).unwrap();
        assert!(text.contains("<value>a &lt; b &amp; c</value>"));
        assert!(text.contains("<empty/>"));

        let reparsed = parse_document(text.as_bytes(), Path::new("x")).unwrap();
        assert_eq!(reparsed.child_text("value").as_deref(), Some("a < b & c"));
    }

    #[test]
    fn rejects_malformed_documents() {
        let err = parse_document(b"<a><b></a>", Path::new("bad.xml")).unwrap_err();
        assert!(matches!(err, MetaformError::Xml { .. }));
        assert!(err.to_string().contains("bad.xml"));

        let err = parse_document(b"", Path::new("empty.xml")).unwrap_err();
        assert!(err.to_string().contains("no root element"));
    }

    #[test]
    fn retain_elements_drops_matching_children() {
        let mut root = parse_document(ACCOUNT.as_bytes(), Path::new("a")).unwrap();
        root.retain_elements(|e| e.name != "fields");
        assert!(root.child("fields").is_none());
        assert_eq!(root.elements().count(), 2);
    }

    #[test]
    fn children_named_results_outlive_the_name() {
        let root = parse_document(ACCOUNT.as_bytes(), Path::new("Account.object")).unwrap();
        let field = {
            let name = String::from("fields");
            let first = root.children_named(&name).next();
            first
        };
        assert_eq!(field.and_then(|f| f.child_text("fullName")).as_deref(), Some("Name"));
    }
}
