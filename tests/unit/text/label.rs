use super::*;
use crate::test_support;

fn lit_pixels(img: &RgbaImage) -> usize {
    img.pixels().filter(|p| p[0] > 128).count()
}

#[test]
fn label_defaults_match_widget_text() {
    let label = Label::new(["a", "b"]).at(3, 4).with_size(10.0);
    assert_eq!(label.lines, vec!["a".to_string(), "b".to_string()]);
    assert_eq!((label.x, label.y), (3, 4));
    assert_eq!(label.dpi, 72.0);
    assert_eq!(label.spacing, 1.25);
    assert_eq!(label.color, WHITE);
    assert_eq!(label.size_px(), 10.0);
    assert_eq!(Label::new(["x"]).size_px(), 25.0);
}

#[test]
fn draws_text_and_reports_extent() {
    let font = test_support::font();
    let mut canvas = test_support::solid(200, 100, [0, 0, 0, 255]);
    let label = Label::new(["Hello", "testbot"]).at(10, 10);

    let extent = draw_label(&mut canvas, &font, &label).unwrap();

    // 10 + 25 = 35, then two advances of 31.25px.
    assert_eq!(extent.end_y, 98);
    assert_eq!(extent.last_line_chars, 7);
    assert!(extent.last_line_width > 40 && extent.last_line_width < 190);
    assert!(lit_pixels(&canvas) > 50, "expected white glyph pixels");

    // Nothing is drawn left of the anchor or above the block.
    for y in 0..100 {
        for x in 0..8 {
            assert_eq!(canvas.get_pixel(x, y)[0], 0);
        }
    }
    for x in 0..200 {
        for y in 0..8 {
            assert_eq!(canvas.get_pixel(x, y)[0], 0);
        }
    }
}

#[test]
fn rendering_is_deterministic() {
    let font = test_support::font();
    let label = Label::new(["Fates List"]).at(5, 5);
    let mut a = test_support::solid(160, 50, [0, 0, 0, 255]);
    let mut b = a.clone();
    draw_label(&mut a, &font, &label).unwrap();
    draw_label(&mut b, &font, &label).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn empty_lines_advance_without_drawing() {
    let font = test_support::font();
    let mut canvas = test_support::solid(50, 50, [0, 0, 0, 255]);
    let before = canvas.clone();

    let extent = draw_label(&mut canvas, &font, &Label::new(["", ""]).with_size(8.0)).unwrap();
    assert_eq!(canvas.as_raw(), before.as_raw());
    assert_eq!(extent.last_line_chars, 0);
    assert_eq!(extent.last_line_width, 0);
    // 8 + 2 * 10
    assert_eq!(extent.end_y, 28);

    let none = draw_label(&mut canvas, &font, &Label::new(Vec::<String>::new())).unwrap();
    assert_eq!(none.end_y, 25);
}

#[test]
fn text_outside_the_canvas_is_clipped() {
    let font = test_support::font();
    let mut canvas = test_support::solid(40, 20, [0, 0, 0, 255]);
    draw_label(&mut canvas, &font, &Label::new(["clipped"]).at(-30, 5)).unwrap();
    draw_label(&mut canvas, &font, &Label::new(["gone"]).at(100, 100)).unwrap();
    assert_eq!(canvas.dimensions(), (40, 20));
}

#[test]
fn invalid_sizes_are_render_errors() {
    let font = test_support::font();
    let mut canvas = test_support::solid(10, 10, [0, 0, 0, 255]);
    let err = draw_label(&mut canvas, &font, &Label::new(["x"]).with_size(0.0)).unwrap_err();
    assert!(matches!(err, WidgetError::Render(_)));

    let mut label = Label::new(["x"]);
    label.spacing = f64::NAN;
    let err = draw_label(&mut canvas, &font, &label).unwrap_err();
    assert!(matches!(err, WidgetError::Render(_)));
}

#[test]
fn lines_wider_than_the_raster_limit_are_clipped_not_rejected() {
    let font = test_support::font();
    let mut canvas = test_support::solid(120, 40, [0, 0, 0, 255]);
    let long = "W".repeat(4000);

    let extent = draw_label(&mut canvas, &font, &Label::new([long.as_str()]).at(-500, 2)).unwrap();
    assert!(extent.last_line_width > u32::from(u16::MAX));
    assert_eq!(extent.last_line_chars, 4000);
    assert!(lit_pixels(&canvas) > 100);
}
