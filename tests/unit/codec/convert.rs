use super::*;

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        let a = if (x + y) % 5 == 0 { 128 } else { 255 };
        image::Rgba([(x * 37 % 256) as u8, (y * 53 % 256) as u8, ((x ^ y) % 256) as u8, a])
    })
}

#[test]
fn png_and_lossless_webp_round_trip_exactly() {
    let img = gradient(13, 7);
    for format in [OutputFormat::Png, OutputFormat::WebP] {
        let bytes = encode(&img, format).unwrap();
        assert_eq!(detect(&bytes).unwrap(), format.kind());
        let back = decode(&bytes).unwrap();
        assert_eq!(back.dimensions(), img.dimensions());
        assert_eq!(back.as_raw(), img.as_raw(), "{format} round trip differs");
    }
}

#[test]
fn jpeg_output_keeps_dimensions() {
    let img = RgbaImage::from_pixel(16, 9, image::Rgba([200, 10, 10, 255]));
    let bytes = encode(&img, OutputFormat::Jpeg).unwrap();
    assert_eq!(detect(&bytes).unwrap(), ImageKind::Jpeg);
    let back = decode(&bytes).unwrap();
    assert_eq!(back.dimensions(), (16, 9));
    assert_eq!(back.get_pixel(8, 4)[3], 255);
}

#[test]
fn empty_and_garbage_buffers_are_decode_errors() {
    assert!(matches!(decode(&[]), Err(WidgetError::Decode(_))));
    assert!(matches!(decode(b"not an image"), Err(WidgetError::Decode(_))));

    // Valid signature, truncated body.
    let mut bytes = encode(&gradient(4, 4), OutputFormat::Png).unwrap();
    bytes.truncate(20);
    assert!(matches!(decode(&bytes), Err(WidgetError::Decode(_))));
}

#[test]
fn convert_between_containers() {
    let img = gradient(8, 8);
    let png = encode(&img, OutputFormat::Png).unwrap();

    let webp = convert(&png, ImageKind::WebP).unwrap();
    assert_eq!(detect(&webp).unwrap(), ImageKind::WebP);
    assert_eq!(decode(&webp).unwrap().as_raw(), img.as_raw());

    let png_again = convert(&webp, ImageKind::Png).unwrap();
    assert_eq!(decode(&png_again).unwrap().as_raw(), img.as_raw());

    assert!(matches!(
        convert(&png, ImageKind::Gif),
        Err(WidgetError::Conversion(_))
    ));
}

#[test]
fn gif_input_decodes_first_frame() {
    let frame = RgbaImage::from_pixel(3, 2, image::Rgba([0, 0, 255, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(frame)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Gif)
        .unwrap();

    let still = decode(&buf).unwrap();
    assert_eq!(still.dimensions(), (3, 2));
    assert_eq!(still.get_pixel(1, 1), &image::Rgba([0, 0, 255, 255]));

    let png = convert(&buf, ImageKind::Png).unwrap();
    assert_eq!(detect(&png).unwrap(), ImageKind::Png);
}

#[test]
fn raw_buffers_are_length_checked() {
    let img = decode_raw_rgba8(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(img.get_pixel(1, 0), &image::Rgba([5, 6, 7, 8]));

    assert!(matches!(
        decode_raw_rgba8(2, 2, vec![0; 8]),
        Err(WidgetError::Dimension(_))
    ));
    assert!(matches!(
        decode_raw_rgba8(0, 2, vec![]),
        Err(WidgetError::Dimension(_))
    ));
}
