use super::*;
use crate::{foundation::error::WidgetError, test_support};

#[test]
fn avatar_bytes_are_decoded() {
    let png = test_support::png_bytes(&test_support::solid(5, 7, [1, 2, 3, 255]));
    let user = WidgetUser::from_avatar_bytes("42", "testbot", &png).unwrap();
    assert_eq!(user.id, "42");
    assert_eq!(user.username, "testbot");
    assert_eq!(user.avatar.dimensions(), (5, 7));
}

#[test]
fn empty_avatar_is_a_decode_error() {
    let err = WidgetUser::from_avatar_bytes("1", "x", &[]).unwrap_err();
    assert!(matches!(err, WidgetError::Decode(_)), "{err}");
}

#[test]
fn background_defaults_to_black() {
    assert_eq!(WidgetOptions::default().background(), BLACK);
    assert_eq!(WidgetOptions::with_bgcolor("not a color").background(), BLACK);
    assert_eq!(
        WidgetOptions::with_bgcolor("#336699").background().0,
        [0x33, 0x66, 0x99, 255]
    );
}

#[test]
fn options_deserialize_with_missing_fields() {
    let opts: WidgetOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, WidgetOptions::default());
    let opts: WidgetOptions = serde_json::from_str(r#"{"bgcolor":"red"}"#).unwrap();
    assert_eq!(opts.bgcolor.as_deref(), Some("red"));
}
