/*!
 * Conversion of raw styling strings into the numeric style handed to layout.
 *
 * Lengths become fractions of the root container: percentages are divided by
 * 100 and cell units by the cell-resolution grid (`rows` vertically,
 * `columns` horizontally). Font-size percentages are relative to the default
 * one-cell font. Unparseable values keep the default and log a warning.
 */

use log::warn;
use serde::{Deserialize, Serialize};

use crate::ttml::style::{StyleAttribute, StyleAttributeSet};

/// Size of the cell grid lengths in `c` units are measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellResolution {
    pub columns: u32,
    pub rows: u32,
}

impl Default for CellResolution {
    fn default() -> Self {
        Self { columns: 32, rows: 15 }
    }
}

impl CellResolution {
    /// Parse a `ttp:cellResolution` value such as `"40 24"`
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace();
        let columns = parts.next()?.parse::<u32>().ok()?;
        let rows = parts.next()?.parse::<u32>().ok()?;
        if parts.next().is_some() || columns == 0 || rows == 0 {
            return None;
        }
        Some(Self { columns, rows })
    }
}

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)`, `rgba(r,g,b,a)` or a named color
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(args) = value.strip_prefix("rgba(").and_then(|v| v.strip_suffix(')')) {
            let c = parse_components(args)?;
            return match c.as_slice() {
                [r, g, b, a] => Some(Self::rgba(*r, *g, *b, *a)),
                _ => None,
            };
        }
        if let Some(args) = value.strip_prefix("rgb(").and_then(|v| v.strip_suffix(')')) {
            let c = parse_components(args)?;
            return match c.as_slice() {
                [r, g, b] => Some(Self::rgba(*r, *g, *b, 255)),
                _ => None,
            };
        }
        Self::named(value)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return None;
        }
        let byte = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
        let alpha = if hex.len() == 8 { byte(6)? } else { 255 };
        Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, alpha))
    }

    fn named(name: &str) -> Option<Self> {
        let rgb = match name.to_ascii_lowercase().as_str() {
            "transparent" => return Some(Self::TRANSPARENT),
            "black" => (0, 0, 0),
            "silver" => (192, 192, 192),
            "gray" => (128, 128, 128),
            "white" => (255, 255, 255),
            "maroon" => (128, 0, 0),
            "red" => (255, 0, 0),
            "purple" => (128, 0, 128),
            "fuchsia" | "magenta" => (255, 0, 255),
            "green" => (0, 128, 0),
            "lime" => (0, 255, 0),
            "olive" => (128, 128, 0),
            "yellow" => (255, 255, 0),
            "navy" => (0, 0, 128),
            "blue" => (0, 0, 255),
            "teal" => (0, 128, 128),
            "aqua" | "cyan" => (0, 255, 255),
            _ => return None,
        };
        Some(Self::rgba(rgb.0, rgb.1, rgb.2, 255))
    }
}

fn parse_components(args: &str) -> Option<Vec<u8>> {
    args.split(',')
        .map(|part| part.trim().parse::<u8>().ok())
        .collect()
}

macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $keyword:literal),+ $(,)? } default $default:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $(
                #[doc = concat!("`", $keyword, "`")]
                $variant,
            )+
        }

        impl $name {
            pub fn from_keyword(value: &str) -> Option<Self> {
                match value.trim() {
                    $($keyword => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }
    };
}

keyword_enum!(
    /// Inline progression direction
    Direction { Ltr => "ltr", Rtl => "rtl" } default Ltr
);
keyword_enum!(
    TextAlign {
        Start => "start",
        Left => "left",
        Center => "center",
        Right => "right",
        End => "end",
        Justify => "justify",
    } default Start
);
keyword_enum!(
    FontStyle { Normal => "normal", Italic => "italic", Oblique => "oblique" } default Normal
);
keyword_enum!(
    FontWeight { Normal => "normal", Bold => "bold" } default Normal
);
keyword_enum!(
    TextDecoration {
        None => "none",
        Underline => "underline",
        LineThrough => "lineThrough",
        Overline => "overline",
    } default None
);
keyword_enum!(
    UnicodeBidi { Normal => "normal", Embed => "embed", BidiOverride => "bidiOverride" } default Normal
);
keyword_enum!(
    WrapOption { Wrap => "wrap", NoWrap => "noWrap" } default Wrap
);
keyword_enum!(
    MultiRowAlign { Auto => "auto", Start => "start", Center => "center", End => "end" } default Auto
);
keyword_enum!(
    DisplayAlign { Before => "before", Center => "center", After => "after" } default Before
);
keyword_enum!(
    Overflow { Hidden => "hidden", Visible => "visible" } default Hidden
);
keyword_enum!(
    WritingMode {
        LrTb => "lrtb",
        RlTb => "rltb",
        TbRl => "tbrl",
        TbLr => "tblr",
        Lr => "lr",
        Rl => "rl",
        Tb => "tb",
    } default LrTb
);
keyword_enum!(
    ShowBackground { Always => "always", WhenActive => "whenActive" } default Always
);

/// Fully resolved numeric style of an area, block or inline element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    pub direction: Direction,
    pub font_family: String,
    /// Font height as a fraction of the root container height
    pub font_size: f64,
    /// Line height as a multiple of the font size, `None` for `normal`
    pub line_height: Option<f64>,
    pub text_align: TextAlign,
    pub color: Color,
    pub background_color: Color,
    pub font_style: FontStyle,
    pub font_weight: FontWeight,
    pub text_decoration: TextDecoration,
    pub unicode_bidi: UnicodeBidi,
    pub wrap_option: WrapOption,
    pub multi_row_align: MultiRowAlign,
    /// Horizontal fraction of the root container
    pub line_padding: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub extent_w: f64,
    pub extent_h: f64,
    pub display_align: DisplayAlign,
    pub overflow: Overflow,
    pub padding_before: f64,
    pub padding_end: f64,
    pub padding_after: f64,
    pub padding_start: f64,
    pub writing_mode: WritingMode,
    pub show_background: ShowBackground,
}

impl ResolvedStyle {
    /// Defaults with a `100%` font on the given cell grid
    pub fn defaults(cells: CellResolution) -> Self {
        Self {
            direction: Direction::default(),
            font_family: "default".to_string(),
            font_size: 1.0 / cells.rows as f64,
            line_height: None,
            text_align: TextAlign::default(),
            color: Color::WHITE,
            background_color: Color::TRANSPARENT,
            font_style: FontStyle::default(),
            font_weight: FontWeight::default(),
            text_decoration: TextDecoration::default(),
            unicode_bidi: UnicodeBidi::default(),
            wrap_option: WrapOption::default(),
            multi_row_align: MultiRowAlign::default(),
            line_padding: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
            extent_w: 1.0,
            extent_h: 1.0,
            display_align: DisplayAlign::default(),
            overflow: Overflow::default(),
            padding_before: 0.0,
            padding_end: 0.0,
            padding_after: 0.0,
            padding_start: 0.0,
            writing_mode: WritingMode::default(),
            show_background: ShowBackground::default(),
        }
    }

    /// Resolve a raw attribute set against the cell grid
    pub fn resolve(set: &StyleAttributeSet, cells: CellResolution) -> Self {
        let mut style = Self::defaults(cells);

        for (attr, value) in set.present() {
            if !style.apply(attr, value, cells) {
                warn!("Ignoring invalid {} value \"{}\"", attr.local_name(), value);
            }
        }

        // Padding percentages refer to the region extent, which may have been
        // set after padding in attribute order.
        if let Some(padding) = set.get(StyleAttribute::Padding) {
            style.apply_padding(padding, cells);
        }

        if style.origin_x + style.extent_w > 1.0 {
            style.extent_w = (1.0 - style.origin_x).max(0.0);
        }
        if style.origin_y + style.extent_h > 1.0 {
            style.extent_h = (1.0 - style.origin_y).max(0.0);
        }

        style
    }

    fn apply(&mut self, attr: StyleAttribute, value: &str, cells: CellResolution) -> bool {
        fn keyword<T>(slot: &mut T, parsed: Option<T>) -> bool {
            match parsed {
                Some(v) => {
                    *slot = v;
                    true
                }
                None => false,
            }
        }

        match attr {
            StyleAttribute::Direction => keyword(&mut self.direction, Direction::from_keyword(value)),
            StyleAttribute::FontFamily => {
                self.font_family = value.trim().to_string();
                true
            }
            StyleAttribute::FontSize => {
                // With two components the second one is the vertical size
                let component = value.split_whitespace().last().unwrap_or_default();
                keyword(&mut self.font_size, parse_font_size(component, cells.rows))
            }
            StyleAttribute::LineHeight => {
                if value.trim() == "normal" {
                    self.line_height = None;
                    return true;
                }
                match parse_length(value, cells.rows) {
                    Some(height) if value.trim().ends_with('%') => {
                        self.line_height = Some(height);
                        true
                    }
                    Some(height) if self.font_size > 0.0 => {
                        self.line_height = Some(height / self.font_size);
                        true
                    }
                    _ => false,
                }
            }
            StyleAttribute::TextAlign => keyword(&mut self.text_align, TextAlign::from_keyword(value)),
            StyleAttribute::Color => keyword(&mut self.color, Color::parse(value)),
            StyleAttribute::BackgroundColor => {
                keyword(&mut self.background_color, Color::parse(value))
            }
            StyleAttribute::FontStyle => keyword(&mut self.font_style, FontStyle::from_keyword(value)),
            StyleAttribute::FontWeight => {
                keyword(&mut self.font_weight, FontWeight::from_keyword(value))
            }
            StyleAttribute::TextDecoration => {
                keyword(&mut self.text_decoration, TextDecoration::from_keyword(value))
            }
            StyleAttribute::UnicodeBidi => {
                keyword(&mut self.unicode_bidi, UnicodeBidi::from_keyword(value))
            }
            StyleAttribute::WrapOption => {
                keyword(&mut self.wrap_option, WrapOption::from_keyword(value))
            }
            StyleAttribute::MultiRowAlign => {
                keyword(&mut self.multi_row_align, MultiRowAlign::from_keyword(value))
            }
            StyleAttribute::LinePadding => {
                keyword(&mut self.line_padding, parse_length(value, cells.columns))
            }
            StyleAttribute::Origin => match parse_pair(value, cells) {
                Some((x, y)) => {
                    self.origin_x = x;
                    self.origin_y = y;
                    true
                }
                None => false,
            },
            StyleAttribute::Extent => match parse_pair(value, cells) {
                Some((w, h)) => {
                    self.extent_w = w;
                    self.extent_h = h;
                    true
                }
                None => false,
            },
            StyleAttribute::DisplayAlign => {
                keyword(&mut self.display_align, DisplayAlign::from_keyword(value))
            }
            StyleAttribute::Overflow => keyword(&mut self.overflow, Overflow::from_keyword(value)),
            StyleAttribute::Padding => true,
            StyleAttribute::WritingMode => {
                keyword(&mut self.writing_mode, WritingMode::from_keyword(value))
            }
            StyleAttribute::ShowBackground => {
                keyword(&mut self.show_background, ShowBackground::from_keyword(value))
            }
        }
    }

    /// `before end after start`, expanded from one to four values
    fn apply_padding(&mut self, value: &str, cells: CellResolution) {
        let parts: Vec<&str> = value.split_whitespace().collect();
        let (before, end, after, start) = match parts.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [before, horizontal, after] => (*before, *horizontal, *after, *horizontal),
            [before, end, after, start] => (*before, *end, *after, *start),
            _ => {
                warn!("Ignoring invalid padding value \"{}\"", value);
                return;
            }
        };

        let vertical = |part: &str| padding_length(part, cells.rows, self.extent_h);
        let horizontal = |part: &str| padding_length(part, cells.columns, self.extent_w);
        match (vertical(before), horizontal(end), vertical(after), horizontal(start)) {
            (Some(b), Some(e), Some(a), Some(s)) => {
                self.padding_before = b;
                self.padding_end = e;
                self.padding_after = a;
                self.padding_start = s;
            }
            _ => warn!("Ignoring invalid padding value \"{}\"", value),
        }
    }
}

/// Percentages of the region extent, cells of the root grid
fn padding_length(part: &str, cells_on_axis: u32, extent: f64) -> Option<f64> {
    let length = parse_length(part, cells_on_axis)?;
    if part.trim().ends_with('%') {
        Some(length * extent)
    } else {
        Some(length)
    }
}

/// `"N%"` -> N / 100, `"Nc"` -> N / cells
pub fn parse_length(value: &str, cells_on_axis: u32) -> Option<f64> {
    let value = value.trim();
    if let Some(number) = value.strip_suffix('%') {
        return number.trim().parse::<f64>().ok().map(|n| n / 100.0);
    }
    if let Some(number) = value.strip_suffix('c') {
        if cells_on_axis == 0 {
            return None;
        }
        return number
            .trim()
            .parse::<f64>()
            .ok()
            .map(|n| n / cells_on_axis as f64);
    }
    None
}

/// Percentages are relative to the default font height of one cell
fn parse_font_size(value: &str, rows: u32) -> Option<f64> {
    let size = parse_length(value, rows)?;
    if value.trim().ends_with('%') {
        Some(size / rows as f64)
    } else {
        Some(size)
    }
}

fn parse_pair(value: &str, cells: CellResolution) -> Option<(f64, f64)> {
    let mut parts = value.split_whitespace();
    let x = parse_length(parts.next()?, cells.columns)?;
    let y = parse_length(parts.next()?, cells.rows)?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}
