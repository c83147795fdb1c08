/*!
 * Partitioning the timeline into scenes.
 *
 * A sweep over every begin and end time found in the region trees. At each
 * transition the currently open scene is closed and a snapshot of whatever is
 * active from that instant on opens the next one. Consecutive scenes therefore
 * share their boundary exactly, and a scene is only opened when something is
 * visible.
 */

use std::ops::ControlFlow;

use log::{debug, warn};

use crate::ttml::element::ElementNode;
use crate::ttml::timing::{format_timecode, ClockTime};

/// A time interval together with the region trees active during it
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub begin: ClockTime,
    pub end: ClockTime,
    /// One pruned clone per region with active content
    pub regions: Vec<ElementNode>,
}

impl Scene {
    pub fn duration(&self) -> ClockTime {
        self.end.saturating_sub(self.begin)
    }
}

struct OpenScene {
    begin: ClockTime,
    regions: Vec<ElementNode>,
}

/// Split the timeline covered by `region_trees` into non-overlapping scenes
pub fn segment(region_trees: &[ElementNode]) -> Vec<Scene> {
    let mut scenes = Vec::new();
    let mut open: Option<OpenScene> = None;
    // `None` means the sweep has not started, so a transition at 0 still counts
    let mut cursor: Option<ClockTime> = None;

    while let Some(next) = next_transition(region_trees, cursor) {
        if let Some(scene) = open.take() {
            scenes.push(Scene {
                begin: scene.begin,
                end: next,
                regions: scene.regions,
            });
        }

        let snapshot = active_snapshot(region_trees, next);
        if !snapshot.is_empty() {
            open = Some(OpenScene {
                begin: next,
                regions: snapshot,
            });
        }

        cursor = Some(next);
    }

    if let Some(scene) = open {
        warn!(
            "Scene starting at {} was never closed, dropping it",
            format_timecode(scene.begin)
        );
    }

    debug!("Segmented timeline into {} scenes", scenes.len());
    scenes
}

/// Smallest begin or end time strictly after `cursor`
pub fn next_transition(region_trees: &[ElementNode], cursor: Option<ClockTime>) -> Option<ClockTime> {
    let after = |time: ClockTime| cursor.is_none_or(|c| time > c);
    let mut next: Option<ClockTime> = None;

    for tree in region_trees {
        let _ = tree.visit(&mut |node| {
            for time in [node.element.begin, node.element.end].into_iter().flatten() {
                if after(time) && next.is_none_or(|n| time < n) {
                    next = Some(time);
                }
            }
            ControlFlow::Continue(())
        });
    }

    next
}

/// Clone every region tree and strip what is not active at `time`.
/// Trees left without content are discarded.
pub fn active_snapshot(region_trees: &[ElementNode], time: ClockTime) -> Vec<ElementNode> {
    region_trees
        .iter()
        .filter_map(|tree| {
            let mut snapshot = tree.clone();
            strip_inactive(&mut snapshot, time);
            (!snapshot.children.is_empty()).then_some(snapshot)
        })
        .collect()
}

fn strip_inactive(node: &mut ElementNode, time: ClockTime) {
    for child in &mut node.children {
        strip_inactive(child, time);
    }
    node.children
        .retain(|child| !(child.children.is_empty() && !is_active(child, time)));
}

/// Untimed nodes count as inactive
fn is_active(node: &ElementNode, time: ClockTime) -> bool {
    match (node.element.begin, node.element.end) {
        (Some(begin), Some(end)) => begin <= time && time < end,
        _ => false,
    }
}
