/*!
 * Materialization of scenes into the structure handed to layout.
 *
 * Every region snapshot becomes an [`Area`], every paragraph a [`Block`] and
 * every span leaf or line break an [`InlineElement`] pointing into the scene's
 * text payload. The region trees must follow the
 * `Region -> Body -> Div -> P -> (Span | AnonymousSpan | LineBreak)` shape;
 * anything else is logged and skipped.
 */

use log::error;
use serde::{Deserialize, Serialize};

use crate::ttml::element::{ElementKind, ElementNode};
use crate::ttml::render_style::{CellResolution, Color, ResolvedStyle};
use crate::ttml::scene::Scene;
use crate::ttml::timing::ClockTime;

/// One scene ready for layout. Times are in nanoseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneOutput {
    pub begin: ClockTime,
    pub duration: ClockTime,
    pub areas: Vec<Area>,
    /// UTF-8 text payload, indexed by [`InlineElement::text_index`]
    pub text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub style: ResolvedStyle,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub style: ResolvedStyle,
    pub elements: Vec<InlineElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineElement {
    pub style: ResolvedStyle,
    pub text_index: usize,
}

impl SceneOutput {
    pub fn end(&self) -> ClockTime {
        self.begin.saturating_add(self.duration)
    }

    /// Text an element points at
    pub fn text_of(&self, element: &InlineElement) -> Option<&str> {
        self.text.get(element.text_index).map(String::as_str)
    }

    /// Concatenated text of every element of every block, in order
    pub fn plain_text(&self) -> String {
        self.areas
            .iter()
            .flat_map(|area| &area.blocks)
            .flat_map(|block| &block.elements)
            .filter_map(|element| self.text_of(element))
            .collect()
    }
}

/// Turn segmented scenes into output scenes
pub fn materialize(scenes: &[Scene], cells: CellResolution) -> Vec<SceneOutput> {
    scenes
        .iter()
        .map(|scene| materialize_scene(scene, cells))
        .collect()
}

pub fn materialize_scene(scene: &Scene, cells: CellResolution) -> SceneOutput {
    let mut builder = SceneBuilder {
        cells,
        text: Vec::new(),
    };
    let areas = scene
        .regions
        .iter()
        .filter_map(|region| builder.area(region))
        .collect();

    SceneOutput {
        begin: scene.begin,
        duration: scene.duration(),
        areas,
        text: builder.text,
    }
}

struct SceneBuilder {
    cells: CellResolution,
    text: Vec<String>,
}

impl SceneBuilder {
    fn style(&self, node: &ElementNode) -> ResolvedStyle {
        ResolvedStyle::resolve(&node.element.style_set, self.cells)
    }

    fn area(&mut self, region: &ElementNode) -> Option<Area> {
        if !expect_kind(region, ElementKind::Region, "region tree root") {
            return None;
        }

        let mut blocks = Vec::new();
        for body in &region.children {
            if !expect_kind(body, ElementKind::Body, "region") {
                continue;
            }
            let body_background = self.style(body).background_color;
            for div in &body.children {
                if !expect_kind(div, ElementKind::Div, "body") {
                    continue;
                }
                let div_background = self.style(div).background_color;
                for p in &div.children {
                    if !expect_kind(p, ElementKind::P, "div") {
                        continue;
                    }
                    blocks.push(self.block(p, [div_background, body_background]));
                }
            }
        }

        Some(Area {
            style: self.style(region),
            blocks,
        })
    }

    /// `ancestors` are the div and body backgrounds, nearest first
    fn block(&mut self, p: &ElementNode, ancestors: [Color; 2]) -> Block {
        let mut style = self.style(p);
        if style.background_color.is_transparent() {
            if let Some(color) = ancestors.into_iter().find(|c| !c.is_transparent()) {
                style.background_color = color;
            }
        }

        let mut elements = Vec::new();
        for child in &p.children {
            self.inline(child, &mut elements);
        }

        Block { style, elements }
    }

    fn inline(&mut self, node: &ElementNode, elements: &mut Vec<InlineElement>) {
        match node.kind() {
            ElementKind::Span => {
                for child in &node.children {
                    self.inline(child, elements);
                }
            }
            ElementKind::AnonymousSpan => {
                let text = node.element.text.clone().unwrap_or_default();
                self.push(node, text, elements);
            }
            ElementKind::LineBreak => self.push(node, "\n".to_string(), elements),
            other => error!("Unexpected {:?} inside a paragraph, skipping it", other),
        }
    }

    fn push(&mut self, node: &ElementNode, text: String, elements: &mut Vec<InlineElement>) {
        self.text.push(text);
        elements.push(InlineElement {
            style: self.style(node),
            text_index: self.text.len() - 1,
        });
    }
}

fn expect_kind(node: &ElementNode, kind: ElementKind, parent: &str) -> bool {
    if node.kind() == kind {
        return true;
    }
    error!(
        "Unexpected {:?} in {}, expected {:?}; skipping branch",
        node.kind(),
        parent,
        kind
    );
    false
}
