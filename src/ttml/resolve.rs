/*!
 * Style resolution: referenced named styles and the inheritance cascade.
 *
 * Referenced styles are merged onto an element in list order, so a later
 * reference overrides an earlier one and any referenced value overrides what
 * the element declared itself.
 */

use log::warn;

use crate::ttml::element::{DocumentElement, ElementKind, ElementNode};
use crate::ttml::style::StyleAttributeSet;
use crate::ttml::tables::{RegionTable, StyleTable};

/// Merge every referenced style into the element's own set, pre-order
pub fn resolve_referenced_styles(node: &mut ElementNode, styles: &StyleTable) {
    resolve_element_styles(&mut node.element, styles);
    for child in &mut node.children {
        resolve_referenced_styles(child, styles);
    }
}

/// Regions may reference named styles too
pub fn resolve_region_styles(regions: &mut RegionTable, styles: &StyleTable) {
    for region in regions.iter_mut() {
        resolve_element_styles(region, styles);
    }
}

fn resolve_element_styles(element: &mut DocumentElement, styles: &StyleTable) {
    for style_id in &element.styles {
        match styles.get(style_id) {
            Some(style) => {
                element.style_set = element.style_set.merge(&style.style_set);
            }
            None => warn!(
                "{:?} references unknown style \"{}\"",
                element.kind, style_id
            ),
        }
    }
}

/// Propagate styling from parents to children.
///
/// The root keeps its own set. Anonymous spans take their parent's full set
/// with their own values on top; everything else goes through
/// [`StyleAttributeSet::inherit`].
pub fn apply_inheritance(root: &mut ElementNode) {
    let parent_set = root.element.style_set.clone();
    inherit_children(root, &parent_set);
}

fn inherit_children(node: &mut ElementNode, parent_set: &StyleAttributeSet) {
    for child in &mut node.children {
        child.element.style_set = if child.kind() == ElementKind::AnonymousSpan {
            parent_set.merge(&child.element.style_set)
        } else {
            StyleAttributeSet::inherit(parent_set, Some(&child.element.style_set))
        };
        let child_set = child.element.style_set.clone();
        inherit_children(child, &child_set);
    }
}
