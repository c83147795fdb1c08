/*!
 * Tests for style attribute merging and inheritance
 */

use ttml_scenes::ttml::{StyleAttribute, StyleAttributeSet};

fn set_of(pairs: &[(StyleAttribute, &str)]) -> StyleAttributeSet {
    let mut set = StyleAttributeSet::new();
    for (attr, value) in pairs {
        set.set(*attr, *value);
    }
    set
}

#[test]
fn test_merge_shouldBeIdempotentOnRepeatedLeftSide() {
    let a = set_of(&[(StyleAttribute::Color, "red"), (StyleAttribute::FontSize, "80%")]);
    let b = set_of(&[(StyleAttribute::Color, "blue"), (StyleAttribute::TextAlign, "center")]);

    let once = a.merge(&b);
    let twice = a.merge(&once);

    assert_eq!(once, twice);
    assert_eq!(once.get(StyleAttribute::Color), Some("blue"));
    assert_eq!(once.get(StyleAttribute::FontSize), Some("80%"));
}

#[test]
fn test_inherit_shouldNotCopyNonInheritableAttributes() {
    let parent = set_of(&[
        (StyleAttribute::BackgroundColor, "black"),
        (StyleAttribute::Origin, "0% 0%"),
        (StyleAttribute::Extent, "100% 100%"),
        (StyleAttribute::DisplayAlign, "after"),
        (StyleAttribute::Overflow, "visible"),
        (StyleAttribute::Padding, "1c"),
        (StyleAttribute::WritingMode, "tbrl"),
        (StyleAttribute::ShowBackground, "always"),
        (StyleAttribute::UnicodeBidi, "embed"),
        (StyleAttribute::Color, "white"),
    ]);

    let child = StyleAttributeSet::inherit(&parent, None);

    assert_eq!(child.present().count(), 1);
    assert_eq!(child.get(StyleAttribute::Color), Some("white"));
}

#[test]
fn test_inherit_withChildValue_shouldKeepChildValue() {
    let parent = set_of(&[(StyleAttribute::Color, "white"), (StyleAttribute::FontFamily, "serif")]);
    let own = set_of(&[(StyleAttribute::Color, "lime")]);

    let child = StyleAttributeSet::inherit(&parent, Some(&own));

    assert_eq!(child.get(StyleAttribute::Color), Some("lime"));
    assert_eq!(child.get(StyleAttribute::FontFamily), Some("serif"));
}

#[test]
fn test_inherit_withRelativeFontSizes_shouldScale() {
    let parent = set_of(&[(StyleAttribute::FontSize, "200%")]);
    let own = set_of(&[(StyleAttribute::FontSize, "50%")]);

    let child = StyleAttributeSet::inherit(&parent, Some(&own));

    assert_eq!(child.get(StyleAttribute::FontSize), Some("100%"));
}

#[test]
fn test_inherit_shouldLeaveInputsUntouched() {
    let parent = set_of(&[(StyleAttribute::FontSize, "200%")]);
    let own = set_of(&[(StyleAttribute::FontSize, "50%")]);
    let (parent_before, own_before) = (parent.clone(), own.clone());

    let first = StyleAttributeSet::inherit(&parent, Some(&own));
    let second = StyleAttributeSet::inherit(&parent, Some(&own));

    assert_eq!(first, second);
    assert_eq!(parent, parent_before);
    assert_eq!(own, own_before);
}
