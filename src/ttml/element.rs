/*!
 * Typed document elements and the owned element tree.
 *
 * Every node owns its children outright, so `Clone` on an [`ElementNode`]
 * produces a fully independent copy of the subtree. Traversals carry parent
 * context explicitly instead of storing back-pointers.
 */

use std::ops::ControlFlow;

use log::warn;

use crate::ttml::style::{StyleAttribute, StyleAttributeSet};
use crate::ttml::timing::{parse_timecode, ClockTime};
use crate::ttml::xml::{XmlElement, XmlNode};

/// Kind of a document element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Style,
    Region,
    Body,
    Div,
    P,
    Span,
    /// Text content not wrapped in an explicit `<span>`
    AnonymousSpan,
    LineBreak,
}

impl ElementKind {
    /// Map a tag local name to its kind, `None` for unrecognized tags
    pub fn from_tag(local_name: &str) -> Option<Self> {
        match local_name {
            "style" => Some(Self::Style),
            "region" => Some(Self::Region),
            "body" => Some(Self::Body),
            "div" => Some(Self::Div),
            "p" => Some(Self::P),
            "span" => Some(Self::Span),
            "br" => Some(Self::LineBreak),
            _ => None,
        }
    }

    /// Kinds that are carried along with their parent rather than selected on their own
    pub fn is_pass_through(self) -> bool {
        matches!(self, Self::AnonymousSpan | Self::LineBreak)
    }
}

/// Value of `xml:space`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespaceMode {
    #[default]
    Unset,
    Default,
    Preserve,
}

impl WhitespaceMode {
    pub fn from_attribute(value: &str) -> Self {
        match value.trim() {
            "preserve" => Self::Preserve,
            "default" => Self::Default,
            other => {
                warn!("Unknown xml:space value \"{}\", ignoring", other);
                Self::Unset
            }
        }
    }
}

/// A single element of the document with its parsed attributes
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentElement {
    pub kind: ElementKind,
    pub id: Option<String>,
    /// Referenced style ids, in the order they were listed
    pub styles: Vec<String>,
    pub region: Option<String>,
    pub begin: Option<ClockTime>,
    pub end: Option<ClockTime>,
    pub style_set: StyleAttributeSet,
    pub text: Option<String>,
    pub whitespace: WhitespaceMode,
}

impl DocumentElement {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            id: None,
            styles: Vec::new(),
            region: None,
            begin: None,
            end: None,
            style_set: StyleAttributeSet::new(),
            text: None,
            whitespace: WhitespaceMode::Unset,
        }
    }

    /// An anonymous span carrying literal text
    pub fn anonymous_span(text: impl Into<String>) -> Self {
        let mut element = Self::new(ElementKind::AnonymousSpan);
        element.text = Some(text.into());
        element
    }

    /// Build an element from an XML element, `None` when the tag is not recognized
    pub fn from_xml(xml: &XmlElement) -> Option<Self> {
        let kind = ElementKind::from_tag(xml.local_name())?;
        let mut element = Self::new(kind);

        for (name, value) in xml.attributes_local() {
            match name {
                "id" => element.id = Some(value.to_string()),
                "style" => {
                    element.styles = value.split_whitespace().map(str::to_string).collect();
                }
                "region" => element.region = Some(value.to_string()),
                "begin" => element.begin = parse_timecode(value),
                "end" => element.end = parse_timecode(value),
                "space" => element.whitespace = WhitespaceMode::from_attribute(value),
                _ => {}
            }
        }

        if matches!(kind, ElementKind::Style | ElementKind::Region) {
            for (name, value) in xml.attributes_local() {
                if let Some(attr) = StyleAttribute::from_local_name(name) {
                    element.style_set.set(attr, value);
                }
            }
            if element.style_set.is_empty() && element.styles.is_empty() {
                warn!(
                    "{:?} \"{}\" contains no styling attributes",
                    kind,
                    element.id.as_deref().unwrap_or_default()
                );
            }
        }

        Some(element)
    }
}

/// A node of the element tree
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub element: DocumentElement,
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    pub fn new(element: DocumentElement) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }

    pub fn with_children(element: DocumentElement, children: Vec<ElementNode>) -> Self {
        Self { element, children }
    }

    pub fn kind(&self) -> ElementKind {
        self.element.kind
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk; the visitor may stop the traversal early
    pub fn visit<F>(&self, visitor: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&ElementNode) -> ControlFlow<()>,
    {
        visitor(self)?;
        for child in &self.children {
            child.visit(visitor)?;
        }
        ControlFlow::Continue(())
    }

    /// Total number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ElementNode::node_count).sum::<usize>()
    }

    /// Concatenated text of the subtree, useful for diagnostics and tests
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let _ = self.visit(&mut |node| {
            match node.kind() {
                ElementKind::LineBreak => out.push('\n'),
                _ => {
                    if let Some(text) = &node.element.text {
                        out.push_str(text);
                    }
                }
            }
            ControlFlow::Continue(())
        });
        out
    }

    /// Build a subtree from XML.
    ///
    /// Unrecognized child tags are skipped together with everything below them,
    /// and whitespace-only text nodes are ignored.
    pub fn from_xml(xml: &XmlElement) -> Option<Self> {
        let element = DocumentElement::from_xml(xml)?;
        let mut node = Self::new(element);

        for child in &xml.children {
            match child {
                XmlNode::Element(child_xml) => match Self::from_xml(child_xml) {
                    Some(child_node) => node.children.push(child_node),
                    None => warn!(
                        "Ignoring unrecognized element <{}> and its content",
                        child_xml.name
                    ),
                },
                XmlNode::Text(text) => {
                    if text.trim().is_empty() {
                        continue;
                    }
                    node.children
                        .push(Self::new(DocumentElement::anonymous_span(text.as_str())));
                }
            }
        }

        Some(node)
    }
}
