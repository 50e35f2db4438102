use super::*;
use crate::test_support;

#[test]
fn empty_or_garbage_fonts_are_asset_errors() {
    let err = FontAsset::from_bytes(Vec::new()).unwrap_err();
    assert!(matches!(err, WidgetError::Asset(_)), "{err}");

    let err = FontAsset::from_bytes(b"not a font at all".to_vec()).unwrap_err();
    assert!(matches!(err, WidgetError::Asset(_)), "{err}");
}

#[test]
fn loaded_font_reports_family_and_digest() {
    let font = test_support::font();
    assert!(!font.family().is_empty());
    assert!(!font.bytes().is_empty());

    let sha = font.sha256_hex();
    assert_eq!(sha.len(), 64);
    assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(sha, font.sha256_hex());
}

#[test]
fn layout_line_shapes_glyphs_at_requested_size() {
    let font = test_support::font();
    let small = font
        .layout_line("Fates List", 10.0, TextBrushRgba8::default())
        .unwrap();
    let large = font
        .layout_line("Fates List", 40.0, TextBrushRgba8::default())
        .unwrap();
    assert_eq!(large.lines().count(), 1);
    assert!(large.width() > small.width() * 3.0);

    let Err(err) = font.layout_line("x", 0.0, TextBrushRgba8::default()) else {
        panic!("zero font size must be rejected");
    };
    assert!(matches!(err, WidgetError::Render(_)), "{err}");
}
