//! Tests for color parsing and validation.

use super::*;

#[test]
fn parse_hex_6_digit() {
    let c = parse_color("#00ffaa").unwrap();
    assert_eq!(c, Color::from_rgba(0, 255, 170, 255));
}

#[test]
fn parse_hex_8_digit() {
    let c = parse_color("#00ffaa80").unwrap();
    assert_eq!(c, Color::from_rgba(0, 255, 170, 128));
}

#[test]
fn parse_hex_3_digit() {
    let c = parse_color("#f00").unwrap();
    assert_eq!(c, Color::from_rgba(255, 0, 0, 255));
}

#[test]
fn parse_rgb_without_alpha() {
    let c = parse_color("rgb(10, 20, 30)").unwrap();
    assert_eq!(c, Color::from_rgba(10, 20, 30, 255));
}

#[test]
fn parse_rgba_float_alpha() {
    let c = parse_color("rgba(0,212,255,0.5)").unwrap();
    assert_eq!(c.a, 128);
}

#[test]
fn parse_rgba_integer_alpha() {
    let c = parse_color("rgba(1,2,3,200)").unwrap();
    assert_eq!(c.a, 200);
}

#[test]
fn parse_rgba_with_spaces() {
    let c = parse_color("rgba( 100 , 180 , 255 , 0.9 )").unwrap();
    assert_eq!((c.r, c.g, c.b, c.a), (100, 180, 255, 230));
}

#[test]
fn parse_trims_whitespace() {
    assert!(parse_color("  #000000  ").is_ok());
}

#[test]
fn reject_bad_hex() {
    assert!(parse_color("#gg0000").is_err());
    assert!(parse_color("#12345").is_err());
}

#[test]
fn reject_out_of_range_channel() {
    assert!(parse_color("rgb(256,0,0)").is_err());
    assert!(parse_color("rgba(0,0,0,1.5)").is_err());
}

#[test]
fn reject_named_colors() {
    let err = parse_color("teal").unwrap_err();
    assert!(err.to_string().contains("unrecognized color format"));
}

#[test]
fn validate_color_matches_parse() {
    for s in ["#000000", "#00ffaa", "#fff", "rgb(1,2,3)", "rgba(1,2,3,0.5)"] {
        assert!(validate_color(s), "{s} should be valid");
    }
    for s in ["", "teal", "#12", "rgb(300,0,0)", "rgba(1,2)"] {
        assert!(!validate_color(s), "{s} should be invalid");
    }
}

#[test]
fn rgb_f32_is_plain_byte_division() {
    let rgb = parse_rgb_f32("#00ffaa").unwrap();
    assert_eq!(rgb[0], 0.0);
    assert_eq!(rgb[1], 1.0);
    assert!((rgb[2] - 170.0 / 255.0).abs() < 1e-6);
}
