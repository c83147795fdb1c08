/*!
 * TTML / EBU-TT-D document model and timeline segmentation.
 *
 * The pipeline, in the order [`parser::TtmlParser::parse`] runs it:
 * - `xml`: owned XML tree on top of `quick-xml`
 * - `element`, `tables`: typed element tree and the head's style/region tables
 * - `resolve`: referenced styles and the inheritance cascade
 * - `whitespace`: `xml:space` handling
 * - `timing`: timecodes and begin/end propagation
 * - `region`: one tree per region
 * - `scene`: sweep-line partition of the timeline
 * - `render_style`, `output`: numeric styles and the Area/Block/Element output
 */

pub mod element;
pub mod output;
pub mod parser;
pub mod region;
pub mod render_style;
pub mod resolve;
pub mod scene;
pub mod style;
pub mod tables;
pub mod timing;
pub mod whitespace;
pub mod xml;

pub use output::{Area, Block, InlineElement, SceneOutput};
pub use parser::{parse, TtmlParser};
pub use render_style::{CellResolution, Color, ResolvedStyle};
pub use scene::Scene;
pub use style::{StyleAttribute, StyleAttributeSet};
pub use timing::{ClockTime, MSECOND, SECOND};
