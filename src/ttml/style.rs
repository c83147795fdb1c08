/*!
 * Sparse styling attribute sets and their combination rules.
 *
 * Values are kept in their raw document form (`"80%"`, `"#ffffff"`,
 * `"10% 90%"`) until the output stage converts them. Two sets combine either by
 * `merge` (every attribute present on the right overrides) or by `inherit`
 * (inheritable attributes fill gaps on the child only).
 */

use serde::{Deserialize, Serialize};

/// The styling properties understood by the document model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleAttribute {
    Direction,
    FontFamily,
    FontSize,
    LineHeight,
    TextAlign,
    Color,
    BackgroundColor,
    FontStyle,
    FontWeight,
    TextDecoration,
    UnicodeBidi,
    WrapOption,
    MultiRowAlign,
    LinePadding,
    Origin,
    Extent,
    DisplayAlign,
    Overflow,
    Padding,
    WritingMode,
    ShowBackground,
}

impl StyleAttribute {
    pub const ALL: [StyleAttribute; 21] = [
        Self::Direction,
        Self::FontFamily,
        Self::FontSize,
        Self::LineHeight,
        Self::TextAlign,
        Self::Color,
        Self::BackgroundColor,
        Self::FontStyle,
        Self::FontWeight,
        Self::TextDecoration,
        Self::UnicodeBidi,
        Self::WrapOption,
        Self::MultiRowAlign,
        Self::LinePadding,
        Self::Origin,
        Self::Extent,
        Self::DisplayAlign,
        Self::Overflow,
        Self::Padding,
        Self::WritingMode,
        Self::ShowBackground,
    ];

    /// Attribute local name as it appears in the document (`tts:` / `ebutts:` stripped)
    pub fn local_name(self) -> &'static str {
        match self {
            Self::Direction => "direction",
            Self::FontFamily => "fontFamily",
            Self::FontSize => "fontSize",
            Self::LineHeight => "lineHeight",
            Self::TextAlign => "textAlign",
            Self::Color => "color",
            Self::BackgroundColor => "backgroundColor",
            Self::FontStyle => "fontStyle",
            Self::FontWeight => "fontWeight",
            Self::TextDecoration => "textDecoration",
            Self::UnicodeBidi => "unicodeBidi",
            Self::WrapOption => "wrapOption",
            Self::MultiRowAlign => "multiRowAlign",
            Self::LinePadding => "linePadding",
            Self::Origin => "origin",
            Self::Extent => "extent",
            Self::DisplayAlign => "displayAlign",
            Self::Overflow => "overflow",
            Self::Padding => "padding",
            Self::WritingMode => "writingMode",
            Self::ShowBackground => "showBackground",
        }
    }

    pub fn from_local_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.local_name() == name)
    }

    /// Whether a child picks this attribute up from its parent during inheritance
    pub fn is_inheritable(self) -> bool {
        !matches!(
            self,
            Self::BackgroundColor
                | Self::Origin
                | Self::Extent
                | Self::DisplayAlign
                | Self::Overflow
                | Self::Padding
                | Self::WritingMode
                | Self::ShowBackground
                | Self::UnicodeBidi
        )
    }
}

/// Sparse mapping of styling properties to raw string values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAttributeSet {
    pub direction: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub line_height: Option<String>,
    pub text_align: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub font_style: Option<String>,
    pub font_weight: Option<String>,
    pub text_decoration: Option<String>,
    pub unicode_bidi: Option<String>,
    pub wrap_option: Option<String>,
    pub multi_row_align: Option<String>,
    pub line_padding: Option<String>,
    pub origin: Option<String>,
    pub extent: Option<String>,
    pub display_align: Option<String>,
    pub overflow: Option<String>,
    pub padding: Option<String>,
    pub writing_mode: Option<String>,
    pub show_background: Option<String>,
}

impl StyleAttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, attr: StyleAttribute) -> &Option<String> {
        match attr {
            StyleAttribute::Direction => &self.direction,
            StyleAttribute::FontFamily => &self.font_family,
            StyleAttribute::FontSize => &self.font_size,
            StyleAttribute::LineHeight => &self.line_height,
            StyleAttribute::TextAlign => &self.text_align,
            StyleAttribute::Color => &self.color,
            StyleAttribute::BackgroundColor => &self.background_color,
            StyleAttribute::FontStyle => &self.font_style,
            StyleAttribute::FontWeight => &self.font_weight,
            StyleAttribute::TextDecoration => &self.text_decoration,
            StyleAttribute::UnicodeBidi => &self.unicode_bidi,
            StyleAttribute::WrapOption => &self.wrap_option,
            StyleAttribute::MultiRowAlign => &self.multi_row_align,
            StyleAttribute::LinePadding => &self.line_padding,
            StyleAttribute::Origin => &self.origin,
            StyleAttribute::Extent => &self.extent,
            StyleAttribute::DisplayAlign => &self.display_align,
            StyleAttribute::Overflow => &self.overflow,
            StyleAttribute::Padding => &self.padding,
            StyleAttribute::WritingMode => &self.writing_mode,
            StyleAttribute::ShowBackground => &self.show_background,
        }
    }

    fn slot_mut(&mut self, attr: StyleAttribute) -> &mut Option<String> {
        match attr {
            StyleAttribute::Direction => &mut self.direction,
            StyleAttribute::FontFamily => &mut self.font_family,
            StyleAttribute::FontSize => &mut self.font_size,
            StyleAttribute::LineHeight => &mut self.line_height,
            StyleAttribute::TextAlign => &mut self.text_align,
            StyleAttribute::Color => &mut self.color,
            StyleAttribute::BackgroundColor => &mut self.background_color,
            StyleAttribute::FontStyle => &mut self.font_style,
            StyleAttribute::FontWeight => &mut self.font_weight,
            StyleAttribute::TextDecoration => &mut self.text_decoration,
            StyleAttribute::UnicodeBidi => &mut self.unicode_bidi,
            StyleAttribute::WrapOption => &mut self.wrap_option,
            StyleAttribute::MultiRowAlign => &mut self.multi_row_align,
            StyleAttribute::LinePadding => &mut self.line_padding,
            StyleAttribute::Origin => &mut self.origin,
            StyleAttribute::Extent => &mut self.extent,
            StyleAttribute::DisplayAlign => &mut self.display_align,
            StyleAttribute::Overflow => &mut self.overflow,
            StyleAttribute::Padding => &mut self.padding,
            StyleAttribute::WritingMode => &mut self.writing_mode,
            StyleAttribute::ShowBackground => &mut self.show_background,
        }
    }

    pub fn get(&self, attr: StyleAttribute) -> Option<&str> {
        self.slot(attr).as_deref()
    }

    pub fn contains(&self, attr: StyleAttribute) -> bool {
        self.slot(attr).is_some()
    }

    pub fn set(&mut self, attr: StyleAttribute, value: impl Into<String>) {
        *self.slot_mut(attr) = Some(value.into());
    }

    pub fn is_empty(&self) -> bool {
        StyleAttribute::ALL.iter().all(|attr| !self.contains(*attr))
    }

    /// Attributes present in this set, in declaration order
    pub fn present(&self) -> impl Iterator<Item = (StyleAttribute, &str)> {
        StyleAttribute::ALL
            .into_iter()
            .filter_map(move |attr| self.get(attr).map(|value| (attr, value)))
    }

    /// Copy of `self` with every attribute present in `other` overwritten
    pub fn merge(&self, other: &StyleAttributeSet) -> StyleAttributeSet {
        let mut merged = self.clone();
        for (attr, value) in other.present() {
            merged.set(attr, value);
        }
        merged
    }

    /// Copy of `child` with inheritable attributes filled in from `parent`.
    ///
    /// A font size declared on both sides is relative: the child's percentage
    /// is scaled by the parent's.
    pub fn inherit(parent: &StyleAttributeSet, child: Option<&StyleAttributeSet>) -> StyleAttributeSet {
        let mut result = child.cloned().unwrap_or_default();

        for (attr, parent_value) in parent.present() {
            if !attr.is_inheritable() {
                continue;
            }
            let child_value = result.get(attr).map(str::to_string);
            match child_value {
                None => result.set(attr, parent_value),
                Some(child_value) if attr == StyleAttribute::FontSize => {
                    if let Some(scaled) = scale_font_size(parent_value, &child_value) {
                        result.set(attr, scaled);
                    }
                }
                Some(_) => {}
            }
        }

        result
    }

    /// Fill attributes still absent from `self` with inheritable values of `source`.
    /// Unlike [`StyleAttributeSet::inherit`] no font-size scaling takes place.
    pub fn fill_inheritable_from(&mut self, source: &StyleAttributeSet) {
        for (attr, value) in source.present() {
            if attr.is_inheritable() && !self.contains(attr) {
                self.set(attr, value);
            }
        }
    }
}

/// `parent% * child% / 100`, when both values are single percentages
fn scale_font_size(parent: &str, child: &str) -> Option<String> {
    let parent_pct = single_percentage(parent)?;
    let child_pct = single_percentage(child)?;
    let scaled = (parent_pct * child_pct / 100.0).round();
    Some(format!("{}%", scaled))
}

fn single_percentage(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.split_whitespace().count() != 1 {
        return None;
    }
    value.strip_suffix('%')?.trim().parse::<f64>().ok()
}
