/*!
 * Integration tests for the document-to-scenes pipeline
 */

use ttml_scenes::errors::DocumentError;
use ttml_scenes::ttml::{parse, Color, SceneOutput, TtmlParser, SECOND};
use ttml_scenes::ttml::render_style::{FontStyle, ShowBackground, TextAlign};
use crate::common;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn texts(scene: &SceneOutput) -> String {
    scene.plain_text()
}

#[test]
fn test_parse_withSingleParagraph_shouldProduceOneStyledScene() {
    common::init_test_logging();
    let scenes = parse(&common::hello_document(), None, None).unwrap();

    assert_eq!(scenes.len(), 1);
    let scene = &scenes[0];
    assert_eq!(scene.begin, SECOND);
    assert_eq!(scene.end(), 3 * SECOND);
    assert_eq!(scene.areas.len(), 1);
    assert_eq!(scene.areas[0].blocks.len(), 1);
    assert_eq!(scene.areas[0].blocks[0].elements.len(), 1);
    assert_eq!(scene.text_of(&scene.areas[0].blocks[0].elements[0]), Some("Hello"));

    let area = &scene.areas[0].style;
    assert!(approx(area.origin_x, 0.1));
    assert!(approx(area.origin_y, 0.1));
    assert!(approx(area.extent_w, 0.8));
    assert!(approx(area.extent_h, 0.2));
}

#[test]
fn test_parse_withOverlappingParagraphs_shouldSplitIntoThreeScenes() {
    let doc = common::ttml_document(
        r#"<body><div>
            <p begin="00:00:00.000" end="00:00:02.000" region="r1">A</p>
            <p begin="00:00:01.000" end="00:00:03.000" region="r1">B</p>
        </div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    let bounds: Vec<_> = scenes.iter().map(|s| (s.begin / SECOND, s.end() / SECOND)).collect();
    assert_eq!(bounds, vec![(0, 1), (1, 2), (2, 3)]);
    assert_eq!(texts(&scenes[0]), "A");
    assert_eq!(texts(&scenes[1]), "AB");
    assert_eq!(scenes[1].areas[0].blocks.len(), 2);
    assert_eq!(texts(&scenes[2]), "B");
}

#[test]
fn test_parse_withTwoRegions_shouldProduceOneAreaPerRegion() {
    let doc = common::ttml_document(
        r#"<body><div>
            <p begin="00:00:00.000" end="00:00:02.000" region="r1">top</p>
            <p begin="00:00:00.000" end="00:00:02.000" region="r2">bottom</p>
            <p begin="00:00:00.000" end="00:00:02.000" region="r3">nowhere</p>
        </div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].areas.len(), 2);
    assert_eq!(texts(&scenes[0]), "topbottom");
    assert!(approx(scenes[0].areas[1].style.origin_y, 0.7));
}

#[test]
fn test_parse_withReferencedStyle_shouldResolveInlineStyle() {
    let doc = common::ttml_document(
        r#"<body><div><p begin="00:00:00.000" end="00:00:01.000" region="r1" style="s1">x</p></div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    let block = &scenes[0].areas[0].blocks[0];
    assert_eq!(block.elements[0].style.color, Color::rgba(255, 255, 0, 255));
    assert_eq!(block.style.background_color, Color::rgba(0, 0, 0, 128));
    assert!(approx(block.elements[0].style.font_size, 1.0 / 15.0));
}

#[test]
fn test_parse_withRegionStyles_shouldFillContentAndArea() {
    let head = r#"<head>
        <styling>
            <style xml:id="italic" tts:fontStyle="italic" tts:textAlign="center"/>
        </styling>
        <layout>
            <region xml:id="r1" style="italic" tts:origin="0% 80%" tts:extent="100% 20%" tts:color="cyan"/>
        </layout>
    </head>"#;
    let doc = common::ttml_document_with_head(
        head,
        r#"<body><div><p begin="00:00:00.000" end="00:00:01.000" region="r1">x</p></div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    let area = &scenes[0].areas[0];
    let element = &area.blocks[0].elements[0];
    assert_eq!(area.style.font_style, FontStyle::Italic);
    assert_eq!(element.style.font_style, FontStyle::Italic);
    assert_eq!(element.style.text_align, TextAlign::Center);
    assert_eq!(element.style.color, Color::rgba(0, 255, 255, 255));
}

#[test]
fn test_parse_withSpansAndBreaks_shouldKeepInlineOrder() {
    let doc = common::ttml_document(
        r#"<body><div><p begin="00:00:00.000" end="00:00:01.000" region="r1">
            <span>first   line</span><br/><span>second</span>
        </p></div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    assert_eq!(scenes[0].text, vec!["first line", "\n", "second"]);
}

#[test]
fn test_parse_withPreservedWhitespace_shouldKeepRuns() {
    let doc = common::ttml_document(
        r#"<body xml:space="preserve"><div><p begin="00:00:00.000" end="00:00:01.000" region="r1">a  b</p></div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    assert_eq!(texts(&scenes[0]), "a  b");
}

#[test]
fn test_parse_withInheritedTiming_shouldUseDivTiming() {
    let doc = common::ttml_document(
        r#"<body><div begin="00:00:02.000" end="00:00:04.000" region="r1"><p>x</p><p>y</p></div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    assert_eq!(scenes.len(), 1);
    assert_eq!((scenes[0].begin, scenes[0].end()), (2 * SECOND, 4 * SECOND));
    assert_eq!(texts(&scenes[0]), "xy");
}

#[test]
fn test_parse_withBeginOnlyParagraph_shouldEndWithEnclosingDiv() {
    let doc = common::ttml_document(
        r#"<body><div begin="00:00:00.000" end="00:00:10.000" region="r1"><p>early</p><p begin="00:00:05.000">late</p></div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    assert_eq!(scenes.len(), 2);
    assert_eq!((scenes[0].begin, scenes[0].end()), (0, 5 * SECOND));
    assert_eq!(texts(&scenes[0]), "early");
    assert_eq!((scenes[1].begin, scenes[1].end()), (5 * SECOND, 10 * SECOND));
    assert_eq!(texts(&scenes[1]), "earlylate");
}

#[test]
fn test_parse_withCrlfLineEndings_shouldNotLeakCarriageReturns() {
    let doc = common::ttml_document(
        "<body><div><p begin=\"00:00:00.000\" end=\"00:00:01.000\" region=\"r1\">Hello\n    world</p></div></body>",
    )
    .replace('\n', "\r\n");

    let scenes = parse(&doc, None, None).unwrap();

    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].text, vec!["Hello world"]);
}

#[test]
fn test_parse_withUntimedAndRegionlessContent_shouldDropIt() {
    common::init_test_logging();
    let doc = common::ttml_document(
        r#"<body><div>
            <p region="r1">never shown</p>
            <p begin="00:00:00.000" end="00:00:01.000">no region</p>
            <p begin="00:00:00.000" end="00:00:01.000" region="r1">kept</p>
        </div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    assert_eq!(scenes.len(), 1);
    assert_eq!(texts(&scenes[0]), "kept");
}

#[test]
fn test_parse_withAlwaysVisibleBackground_shouldEmitEmptyArea() {
    let head = r#"<head><layout>
        <region xml:id="bg" tts:origin="0% 0%" tts:extent="100% 100%" tts:backgroundColor="black" tts:showBackground="always"/>
    </layout></head>"#;
    let doc = common::ttml_document_with_head(head, "<body><div/></body>");

    let scenes = TtmlParser::default()
        .parse(&doc, Some(0), Some(10 * SECOND))
        .unwrap();

    assert_eq!(scenes.len(), 1);
    assert_eq!((scenes[0].begin, scenes[0].duration), (0, 10 * SECOND));
    let area = &scenes[0].areas[0];
    assert!(area.blocks.is_empty());
    assert_eq!(area.style.show_background, ShowBackground::Always);
    assert_eq!(area.style.background_color, Color::rgba(0, 0, 0, 255));
}

#[test]
fn test_parse_withUnknownElement_shouldSkipItsSubtree() {
    let doc = common::ttml_document(
        r#"<body><div>
            <metadata><p begin="00:00:00.000" end="00:00:01.000" region="r1">hidden</p></metadata>
            <p begin="00:00:00.000" end="00:00:01.000" region="r1">shown</p>
        </div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    assert_eq!(texts(&scenes[0]), "shown");
}

#[test]
fn test_parse_withFatalProblems_shouldReturnError() {
    assert!(matches!(parse("not xml at all <", None, None), Err(DocumentError::Xml(_))));
    assert_eq!(
        parse("<root/>", None, None),
        Err(DocumentError::WrongRoot("root".to_string()))
    );
    assert_eq!(
        parse(r#"<tt xmlns="http://www.w3.org/ns/ttml"><body/></tt>"#, None, None),
        Err(DocumentError::MissingHead)
    );
}

#[test]
fn test_parse_shouldProduceContiguousNonEmptyScenes() {
    let doc = common::ttml_document(
        r#"<body><div>
            <p begin="00:00:00.000" end="00:00:05.000" region="r1">A</p>
            <p begin="00:00:01.000" end="00:00:02.000" region="r2">B</p>
            <p begin="00:00:03.000" end="00:00:07.000" region="r1">C</p>
            <p begin="00:00:04.000" end="00:00:06.000" region="r2">D</p>
        </div></body>"#,
    );

    let scenes = parse(&doc, None, None).unwrap();

    assert_eq!(scenes.first().unwrap().begin, 0);
    assert_eq!(scenes.last().unwrap().end(), 7 * SECOND);
    for pair in scenes.windows(2) {
        assert_eq!(pair[0].end(), pair[1].begin);
    }
    assert!(scenes.iter().all(|s| s.duration > 0 && !s.areas.is_empty()));
}
