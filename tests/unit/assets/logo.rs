use super::*;
use crate::test_support;

const RED_SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;

#[test]
fn raster_logo_is_fitted_to_size() {
    let png = test_support::png_bytes(&test_support::solid(96, 48, [0, 0, 255, 255]));
    let logo = prepare_logo(&png, 24).unwrap();
    assert_eq!(logo.dimensions(), (24, 24));
    assert_eq!(logo.get_pixel(12, 12).0, [0, 0, 255, 255]);
}

#[test]
fn svg_logo_is_rasterized_at_size() {
    let logo = prepare_logo(RED_SQUARE_SVG.as_bytes(), 24).unwrap();
    assert_eq!(logo.dimensions(), (24, 24));
    assert_eq!(logo.get_pixel(12, 12).0, [255, 0, 0, 255]);
    assert_eq!(logo.get_pixel(0, 0).0, [255, 0, 0, 255]);
}

#[test]
fn wide_svg_is_letterboxed() {
    let svg = r##"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="#00ff00"/></svg>"##;
    let logo = prepare_logo(svg.as_bytes(), 20).unwrap();
    assert_eq!(logo.get_pixel(10, 10).0, [0, 255, 0, 255]);
    assert_eq!(logo.get_pixel(10, 1)[3], 0);
    assert_eq!(logo.get_pixel(10, 18)[3], 0);
}

#[test]
fn zero_size_is_a_dimension_error() {
    let err = prepare_logo(RED_SQUARE_SVG.as_bytes(), 0).unwrap_err();
    assert!(matches!(err, WidgetError::Dimension(_)), "{err}");
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let err = prepare_logo(b"definitely not an image", 24).unwrap_err();
    assert!(matches!(err, WidgetError::Decode(_)), "{err}");
}

#[test]
fn missing_logo_file_is_an_asset_error() {
    let err = load_logo("target/does-not-exist/listicon.png", 24).unwrap_err();
    assert!(matches!(err, WidgetError::Asset(_)), "{err}");
}
