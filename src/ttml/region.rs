/*!
 * Splitting the body into one tree per region.
 *
 * Each leaf is first assigned the region of its nearest self-or-ancestor
 * declaration. The body is then cloned once per region and everything that
 * belongs elsewhere is pruned away; the surviving fragment is hung under a
 * copy of the region element.
 */

use log::{debug, warn};

use crate::ttml::element::{DocumentElement, ElementKind, ElementNode};
use crate::ttml::style::StyleAttribute;
use crate::ttml::tables::RegionTable;
use crate::ttml::timing::ClockTime;

/// Give every leaf an effective region id.
///
/// Leaves with no region anywhere on their ancestor chain are dropped, as are
/// ancestors left without children. Returns `false` when nothing survives.
pub fn resolve_regions(root: &mut ElementNode) -> bool {
    resolve_node(root, None)
}

fn resolve_node(node: &mut ElementNode, inherited: Option<&str>) -> bool {
    if node.is_leaf() {
        if node.element.region.is_none() {
            match inherited {
                Some(region) => node.element.region = Some(region.to_string()),
                None => {
                    warn!(
                        "Dropping {:?} element that is not assigned to any region",
                        node.kind()
                    );
                    return false;
                }
            }
        }
        return true;
    }

    let effective = node.element.region.clone().or(inherited.map(str::to_string));
    node.children
        .retain_mut(|child| resolve_node(child, effective.as_deref()));
    !node.children.is_empty()
}

/// Produce one region tree for every region with content.
///
/// Leaves that reference a region missing from the table end up in no tree.
pub fn split_by_region(body: &ElementNode, regions: &RegionTable) -> Vec<ElementNode> {
    warn_undeclared_regions(body, regions);

    let mut trees = Vec::new();
    for region in regions.iter() {
        let Some(region_id) = region.id.as_deref() else {
            continue;
        };

        let mut fragment = body.clone();
        if !keep_for_region(&mut fragment, region_id) {
            debug!("Region \"{}\" has no content", region_id);
            continue;
        }

        let mut region_element = region.clone();
        region_element.styles.clear();
        fill_from_region(&mut fragment, &region_element);
        trees.push(ElementNode::with_children(region_element, vec![fragment]));
    }

    debug!("Split body into {} region trees", trees.len());
    trees
}

/// Prune `node` down to what belongs to `region_id`. Returns `false` if the
/// node itself has to go.
fn keep_for_region(node: &mut ElementNode, region_id: &str) -> bool {
    if !node.kind().is_pass_through() {
        if let Some(region) = node.element.region.as_deref() {
            if region != region_id {
                return false;
            }
        }
    }

    if node.is_leaf() {
        return true;
    }

    node.children
        .retain_mut(|child| keep_for_region(child, region_id));
    !node.children.is_empty() || node.kind().is_pass_through()
}

fn fill_from_region(node: &mut ElementNode, region: &DocumentElement) {
    node.element.style_set.fill_inheritable_from(&region.style_set);
    for child in &mut node.children {
        fill_from_region(child, region);
    }
}

fn warn_undeclared_regions(body: &ElementNode, regions: &RegionTable) {
    let _ = body.visit(&mut |node| {
        if let Some(region) = node.element.region.as_deref() {
            if !regions.contains(region) {
                warn!(
                    "{:?} element references undeclared region \"{}\", dropping it",
                    node.kind(),
                    region
                );
            }
        }
        std::ops::ControlFlow::Continue(())
    });
}

/// Append an empty, timed `div` for every region that always shows its
/// background, so the region stays on screen even without text.
///
/// The placeholder spans the body's own timing when it declares both begin and
/// end, and `[container_begin, container_begin + container_duration)` otherwise.
pub fn add_background_placeholders(
    body: &mut ElementNode,
    regions: &RegionTable,
    container_begin: ClockTime,
    container_duration: ClockTime,
) {
    let (begin, end) = match (body.element.begin, body.element.end) {
        (Some(begin), Some(end)) => (begin, end),
        _ => (
            container_begin,
            container_begin.saturating_add(container_duration),
        ),
    };

    for region in regions.iter() {
        let always = region
            .style_set
            .get(StyleAttribute::ShowBackground)
            .is_some_and(|value| value.trim() == "always");
        let Some(region_id) = region.id.as_deref() else {
            continue;
        };
        if !always {
            continue;
        }

        let mut placeholder = DocumentElement::new(ElementKind::Div);
        placeholder.region = Some(region_id.to_string());
        placeholder.begin = Some(begin);
        placeholder.end = Some(end);
        body.children.push(ElementNode::new(placeholder));
        debug!("Added background placeholder for region \"{}\"", region_id);
    }
}
