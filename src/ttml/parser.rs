/*!
 * Document entry point: runs the whole pipeline from XML text to scenes.
 */

use log::{debug, info, warn};

use crate::errors::DocumentError;
use crate::ttml::element::{ElementNode, WhitespaceMode};
use crate::ttml::output::{materialize, SceneOutput};
use crate::ttml::region::{add_background_placeholders, resolve_regions, split_by_region};
use crate::ttml::render_style::CellResolution;
use crate::ttml::resolve::{apply_inheritance, resolve_referenced_styles, resolve_region_styles};
use crate::ttml::scene::segment;
use crate::ttml::tables::{build_region_table, build_style_table};
use crate::ttml::timing::{resolve_timings, ClockTime, MSECOND, SECOND};
use crate::ttml::whitespace::normalize_whitespace;
use crate::ttml::xml::XmlDocument;

/// Container begin used when the caller supplies none
pub const DEFAULT_CONTAINER_BEGIN: ClockTime = MSECOND;

/// Container duration used when the caller supplies none
pub const DEFAULT_CONTAINER_DURATION: ClockTime = 24 * 60 * 60 * SECOND;

/// Parser for TTML / EBU-TT-D documents
#[derive(Debug, Clone)]
pub struct TtmlParser {
    /// Grid used when the document declares no valid `ttp:cellResolution`
    pub cell_resolution: CellResolution,
    pub container_begin: ClockTime,
    pub container_duration: ClockTime,
}

impl Default for TtmlParser {
    fn default() -> Self {
        Self {
            cell_resolution: CellResolution::default(),
            container_begin: DEFAULT_CONTAINER_BEGIN,
            container_duration: DEFAULT_CONTAINER_DURATION,
        }
    }
}

impl TtmlParser {
    pub fn new(
        cell_resolution: CellResolution,
        container_begin: ClockTime,
        container_duration: ClockTime,
    ) -> Self {
        Self {
            cell_resolution,
            container_begin,
            container_duration,
        }
    }

    /// Parse a complete document into its ordered scenes.
    ///
    /// `container_begin` and `container_duration` time the placeholders of
    /// always-visible region backgrounds and fall back to the parser's own
    /// values. Only document-level failures are returned as errors; everything
    /// else is logged and the offending part dropped.
    pub fn parse(
        &self,
        document: &str,
        container_begin: Option<ClockTime>,
        container_duration: Option<ClockTime>,
    ) -> Result<Vec<SceneOutput>, DocumentError> {
        let root = XmlDocument::parse(document)?;
        if root.local_name() != "tt" {
            return Err(DocumentError::WrongRoot(root.name.clone()));
        }

        let document_whitespace = root
            .attribute("space")
            .map(WhitespaceMode::from_attribute)
            .unwrap_or_default();
        let cells = self.cell_resolution_of(root.attribute("cellResolution"));

        let head = root.first_child("head").ok_or(DocumentError::MissingHead)?;
        let styles = build_style_table(head);
        let mut regions = build_region_table(head);
        resolve_region_styles(&mut regions, &styles);
        debug!(
            "Loaded {} styles and {} regions",
            styles.len(),
            regions.len()
        );

        let Some(mut body) = root.first_child("body").and_then(ElementNode::from_xml) else {
            warn!("Document has no body, nothing to display");
            return Ok(Vec::new());
        };

        resolve_referenced_styles(&mut body, &styles);
        apply_inheritance(&mut body);
        normalize_whitespace(&mut body, document_whitespace);
        add_background_placeholders(
            &mut body,
            &regions,
            container_begin.unwrap_or(self.container_begin),
            container_duration.unwrap_or(self.container_duration),
        );

        if !resolve_timings(&mut body) || !resolve_regions(&mut body) {
            warn!("No timed content assigned to a region, nothing to display");
            return Ok(Vec::new());
        }

        let region_trees = split_by_region(&body, &regions);
        let scenes = segment(&region_trees);
        let output = materialize(&scenes, cells);

        info!(
            "Parsed document into {} scenes across {} regions",
            output.len(),
            region_trees.len()
        );
        Ok(output)
    }

    fn cell_resolution_of(&self, declared: Option<&str>) -> CellResolution {
        match declared {
            Some(value) => CellResolution::parse(value).unwrap_or_else(|| {
                warn!(
                    "Invalid cellResolution \"{}\", using {}x{}",
                    value, self.cell_resolution.columns, self.cell_resolution.rows
                );
                self.cell_resolution
            }),
            None => self.cell_resolution,
        }
    }
}

/// Parse with default settings
pub fn parse(
    document: &str,
    container_begin: Option<ClockTime>,
    container_duration: Option<ClockTime>,
) -> Result<Vec<SceneOutput>, DocumentError> {
    TtmlParser::default().parse(document, container_begin, container_duration)
}
