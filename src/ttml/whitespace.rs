/*!
 * `xml:space` resolution and whitespace normalization of text leaves.
 *
 * Trimming at the edges of rendered lines spans several elements and is left
 * to the layout stage.
 */

use crate::ttml::element::{ElementNode, WhitespaceMode};

/// Resolve the effective whitespace mode top-down and normalize leaf text.
///
/// `document_mode` is the value declared on `<tt>`; the root inherits it unless
/// it declares its own.
pub fn normalize_whitespace(root: &mut ElementNode, document_mode: WhitespaceMode) {
    let inherited = match document_mode {
        WhitespaceMode::Preserve => WhitespaceMode::Preserve,
        _ => WhitespaceMode::Default,
    };
    normalize_node(root, inherited);
}

fn normalize_node(node: &mut ElementNode, inherited: WhitespaceMode) {
    let mode = match node.element.whitespace {
        WhitespaceMode::Unset => inherited,
        declared => declared,
    };
    node.element.whitespace = mode;

    if node.is_leaf() {
        if mode != WhitespaceMode::Preserve {
            if let Some(text) = node.element.text.as_mut() {
                *text = collapse_whitespace(text);
            }
        }
        return;
    }

    for child in &mut node.children {
        normalize_node(child, mode);
    }
}

/// Replace line feeds with spaces, then collapse runs of spaces to one
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_space = false;
    for ch in text.chars() {
        let ch = if ch == '\n' { ' ' } else { ch };
        if ch == ' ' {
            if previous_space {
                continue;
            }
            previous_space = true;
        } else {
            previous_space = false;
        }
        out.push(ch);
    }
    out
}
