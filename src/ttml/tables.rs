/*!
 * Id-keyed tables of `<style>` and `<region>` definitions read from `<head>`.
 */

use std::collections::HashMap;

use log::{debug, warn};

use crate::ttml::element::{DocumentElement, ElementKind};
use crate::ttml::xml::XmlElement;

/// Definitions keyed by id, iterated in document order
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    entries: Vec<DocumentElement>,
    index: HashMap<String, usize>,
}

pub type StyleTable = ElementTable;
pub type RegionTable = ElementTable;

impl ElementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition. Returns `false` if the id was already taken;
    /// the first definition of an id always wins.
    pub fn insert(&mut self, element: DocumentElement) -> bool {
        let Some(id) = element.id.clone().filter(|id| !id.is_empty()) else {
            warn!("{:?} definition without an id, ignoring", element.kind);
            return false;
        };
        if self.index.contains_key(&id) {
            warn!("Duplicate {:?} id \"{}\", keeping the first definition", element.kind, id);
            return false;
        }
        self.index.insert(id, self.entries.len());
        self.entries.push(element);
        true
    }

    pub fn get(&self, id: &str) -> Option<&DocumentElement> {
        self.index.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentElement> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DocumentElement> {
        self.entries.iter_mut()
    }
}

/// Collect every `<style>` under `<head><styling>`
pub fn build_style_table(head: &XmlElement) -> StyleTable {
    build_table(head, "styling", ElementKind::Style)
}

/// Collect every `<region>` under `<head><layout>`
pub fn build_region_table(head: &XmlElement) -> RegionTable {
    build_table(head, "layout", ElementKind::Region)
}

fn build_table(head: &XmlElement, container: &str, kind: ElementKind) -> ElementTable {
    let mut table = ElementTable::new();

    for section in head.child_elements().filter(|e| e.local_name() == container) {
        for child in section.child_elements() {
            match DocumentElement::from_xml(child) {
                Some(element) if element.kind == kind => {
                    table.insert(element);
                }
                _ => debug!("Skipping <{}> inside <{}>", child.name, container),
            }
        }
    }

    debug!("Built {:?} table with {} entries", kind, table.len());
    table
}
