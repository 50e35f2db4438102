use serde_json::json;

use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_color("#ff0000").unwrap(), image::Rgba([255, 0, 0, 255]));
    assert_eq!(parse_color("00ff0080").unwrap(), image::Rgba([0, 255, 0, 128]));
    assert_eq!(parse_color("#0f0").unwrap(), image::Rgba([0, 255, 0, 255]));
    assert_eq!(parse_color("#fff8").unwrap(), image::Rgba([255, 255, 255, 136]));
    assert_eq!(parse_color("  #ABCDEF ").unwrap(), image::Rgba([171, 205, 239, 255]));
}

#[test]
fn parses_names_and_functional_forms() {
    assert_eq!(parse_color("Navy").unwrap(), image::Rgba([0, 0, 128, 255]));
    assert_eq!(parse_color("transparent").unwrap(), TRANSPARENT);
    assert_eq!(
        parse_color("rgb(10, 20, 30)").unwrap(),
        image::Rgba([10, 20, 30, 255])
    );
    assert_eq!(
        parse_color("rgba(10,20,30,0.5)").unwrap(),
        image::Rgba([10, 20, 30, 128])
    );
    assert_eq!(
        parse_color("rgba(10,20,30,64)").unwrap(),
        image::Rgba([10, 20, 30, 64])
    );
}

#[test]
fn rejects_garbage() {
    for bad in ["", "#12", "#gggggg", "rgb(1,2)", "rgb(300,0,0)", "notacolor", "#ééé"] {
        assert!(parse_color(bad).is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn unrecognized_values_fall_back() {
    assert_eq!(color_or_default(None, BLACK), BLACK);
    assert_eq!(color_or_default(Some(""), BLACK), BLACK);
    assert_eq!(color_or_default(Some("nope"), BLACK), BLACK);
    assert_eq!(
        color_or_default(Some("#336699"), BLACK),
        image::Rgba([0x33, 0x66, 0x99, 255])
    );
}

#[test]
fn color_def_deserializes_strings_and_arrays() {
    let c: ColorDef = serde_json::from_value(json!("#0000ff")).unwrap();
    assert_eq!(c.to_rgba8(), image::Rgba([0, 0, 255, 255]));

    let c: ColorDef = serde_json::from_value(json!([1, 2, 3])).unwrap();
    assert_eq!(c, ColorDef([1, 2, 3, 255]));

    let c: ColorDef = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(c, ColorDef([1, 2, 3, 4]));

    assert!(serde_json::from_value::<ColorDef>(json!([1, 2])).is_err());
}
