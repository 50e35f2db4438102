use super::*;

const COLORS: [[u8; 4]; 5] = [
    [0, 0, 0, 255],
    [255, 255, 255, 255],
    [12, 200, 99, 0],
    [1, 0, 0, 255],
    [128, 64, 32, 17],
];

#[test]
fn distance_is_reflexive_and_symmetric() {
    for a in COLORS {
        let a = image::Rgba(a);
        assert_eq!(color_distance(a, a), 0);
        for b in COLORS {
            let b = image::Rgba(b);
            assert_eq!(color_distance(a, b), color_distance(b, a));
        }
    }
}

#[test]
fn distance_uses_16_bit_channels_and_ignores_alpha() {
    let black = image::Rgba([0, 0, 0, 255]);
    assert_eq!(color_distance(black, image::Rgba([1, 0, 0, 255])), 257);
    assert_eq!(color_distance(black, image::Rgba([255, 255, 255, 255])), 3 * 65535);
    assert_eq!(color_distance(black, image::Rgba([0, 0, 0, 0])), 0);
}

#[test]
fn replaces_only_matching_pixels() {
    let mut img = RgbaImage::from_pixel(3, 1, image::Rgba([0, 0, 0, 255]));
    img.put_pixel(1, 0, image::Rgba([1, 0, 0, 255]));
    img.put_pixel(2, 0, image::Rgba([200, 0, 0, 255]));

    let out = replace_color(&img, image::Rgba([0, 0, 0, 255]), image::Rgba([9, 9, 9, 255]));
    assert_eq!(out.get_pixel(0, 0), &image::Rgba([9, 9, 9, 255]));
    // 257 is above the default threshold.
    assert_eq!(out.get_pixel(1, 0), &image::Rgba([1, 0, 0, 255]));
    assert_eq!(out.get_pixel(2, 0), &image::Rgba([200, 0, 0, 255]));

    let loose = replace_color_with_threshold(
        &img,
        image::Rgba([0, 0, 0, 255]),
        image::Rgba([9, 9, 9, 255]),
        300,
    );
    assert_eq!(loose.get_pixel(1, 0), &image::Rgba([9, 9, 9, 255]));
    assert_eq!(loose.get_pixel(2, 0), &image::Rgba([200, 0, 0, 255]));
}

#[test]
fn replacing_a_color_with_itself_is_identity() {
    let img = RgbaImage::from_fn(6, 6, |x, y| image::Rgba([(x * 40) as u8, (y * 40) as u8, 7, 200]));
    for target in COLORS {
        for threshold in [0, 100, 10_000, u32::MAX] {
            let target = image::Rgba(target);
            let out = replace_color_with_threshold(&img, target, target, threshold);
            assert_eq!(out.as_raw(), img.as_raw());
        }
    }
}
