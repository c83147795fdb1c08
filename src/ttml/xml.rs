/*!
 * Owned XML tree built on top of `quick-xml`.
 *
 * The document model only needs element names, attributes and text, so the
 * reader events are folded into a small owned tree. Names keep their prefix
 * but every lookup goes through the local name.
 */

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::errors::DocumentError;

/// A node in the parsed XML tree
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Qualified name as written, e.g. `tts:color` or `p`
    pub name: String,
    /// Attributes as `(qualified name, value)` pairs
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

/// Strip a namespace prefix (`tts:color` -> `color`)
pub fn local_name(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Look up an attribute by local name
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local_name(key) == local)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over attributes as `(local name, value)`
    pub fn attributes_local(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (local_name(key), value.as_str()))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given local name
    pub fn first_child(&self, local: &str) -> Option<&XmlElement> {
        self.child_elements().find(|child| child.local_name() == local)
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(XmlNode::Text(existing)) = self.children.last_mut() {
            existing.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }
}

/// Entry point for turning document text into an [`XmlElement`] tree
pub struct XmlDocument;

impl XmlDocument {
    /// Parse a complete document and return its root element
    pub fn parse(document: &str) -> Result<XmlElement, DocumentError> {
        let mut reader = Reader::from_str(document);
        reader.config_mut().trim_text(false);
        let mut buf = Vec::with_capacity(64);
        let mut stack: Vec<XmlElement> = Vec::with_capacity(8);
        let mut root: Option<XmlElement> = None;
        let mut entity_buf = String::with_capacity(16);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = element_from_start(&reader, &e)?;
                    stack.push(element);
                }
                Ok(Event::Empty(e)) => {
                    let element = element_from_start(&reader, &e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack.pop().ok_or_else(|| {
                        DocumentError::Xml("unbalanced end tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e.decode().map_err(|err| {
                        DocumentError::Xml(format!("Decode error: {:?}", err))
                    })?;
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&normalize_line_endings(&text));
                    }
                }
                Ok(Event::CData(e)) => {
                    let text = reader.decoder().decode(&e).map_err(|err| {
                        DocumentError::Xml(format!("Decode error: {:?}", err))
                    })?;
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&normalize_line_endings(&text));
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    let entity_name = e.decode().map_err(|err| {
                        DocumentError::Xml(format!("Decode error: {:?}", err))
                    })?;
                    entity_buf.clear();
                    entity_buf.push('&');
                    entity_buf.push_str(entity_name.as_ref());
                    entity_buf.push(';');
                    let resolved = quick_xml::escape::unescape(&entity_buf).map_err(|err| {
                        DocumentError::Xml(format!("Unescape error: {:?}", err))
                    })?;
                    if let Some(current) = stack.last_mut() {
                        current.push_text(resolved.as_ref());
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    return Err(DocumentError::Xml(format!(
                        "XML error at position {}: {:?}",
                        reader.buffer_position(),
                        err
                    )));
                }
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(DocumentError::Xml(format!(
                "unexpected end of document inside <{}>",
                stack.last().map(|e| e.name.as_str()).unwrap_or_default()
            )));
        }

        root.ok_or_else(|| DocumentError::Xml("document has no root element".to_string()))
    }
}

/// `\r\n` and lone `\r` become `\n`. Character references such as `&#13;`
/// arrive through `GeneralRef` and are left alone.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), DocumentError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(DocumentError::Xml(format!(
            "more than one root element (found <{}>)",
            element.name
        )))
    }
}

fn element_from_start(
    reader: &Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<XmlElement, DocumentError> {
    let name = reader
        .decoder()
        .decode(e.name().as_ref())
        .map_err(|err| DocumentError::Xml(format!("Decode error: {:?}", err)))?
        .into_owned();

    let mut element = XmlElement::new(name);
    for attr in e.attributes().flatten() {
        let key = match reader.decoder().decode(attr.key.as_ref()) {
            Ok(v) => v.into_owned(),
            Err(_) => continue,
        };
        let value = match attr.decode_and_unescape_value(reader.decoder()) {
            Ok(v) => v.into_owned(),
            Err(_) => continue,
        };
        element.attributes.push((key, value));
    }
    Ok(element)
}
