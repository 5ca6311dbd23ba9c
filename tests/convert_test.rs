//! Library-level conversion tests: PNG bytes in, sixel or BMP bytes out.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use sixelv::config::{Config, OutputFormat};
use sixelv::convert::{convert_file, write_image};
use sixelv::decode::decode_png;
use sixelv::error::CliError;

fn settings(yaml: &str) -> Config {
    Config::from_yaml(yaml).unwrap()
}

#[test]
fn test_white_png_to_sixel_bytes() {
    let scratch = Scratch::new();
    let input = scratch.write("white.png", &solid_rgb(4, 6, [255, 255, 255]));
    let converter = settings("color: \"8\"\nreduce: fast\nsuppress_palette: true\n")
        .converter()
        .unwrap();

    let mut out = Vec::new();
    convert_file(&input, &converter, OutputFormat::Sixel, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\x1bP7;1;q\"1;1;4;6#7!4~$$-\x1b\\"
    );
}

#[test]
fn test_palette_registers_emitted() {
    let image = decode_png(solid_rgb(1, 1, [0, 0, 0]).as_slice()).unwrap();
    let converter = settings("color: mono").converter().unwrap();
    let mut out = Vec::new();
    write_image(&image, &converter, OutputFormat::Sixel, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\x1bP7;1;q\"1;1;1;1#0;2;0;0;0#1;2;100;100;100#0@$$-\x1b\\"
    );
}

#[test]
fn test_resize_from_config() {
    let image = decode_png(gray_ramp(100, 25).as_slice()).unwrap();
    let converter = settings("width: 40\ncolor: \"16\"").converter().unwrap();
    let mut out = Vec::new();
    write_image(&image, &converter, OutputFormat::Sixel, &mut out).unwrap();
    assert_sixel(&out, 40, 10);
}

#[test]
fn test_ormode_stream() {
    let image = decode_png(gray_ramp(16, 12).as_slice()).unwrap();
    let converter = settings("color: \"16\"\normode: true").converter().unwrap();
    let mut out = Vec::new();
    write_image(&image, &converter, OutputFormat::Sixel, &mut out).unwrap();
    assert!(out.starts_with(b"\x1bP7;5;q"), "OR mode selects P2=5");
    assert_sixel(&out, 16, 12);
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("$-"), "OR mode bands end with a bare '-'");
}

#[test]
fn test_bmp_output() {
    let image = decode_png(gray_ramp(5, 3).as_slice()).unwrap();
    let converter = settings("color: mono").converter().unwrap();
    let mut out = Vec::new();
    write_image(&image, &converter, OutputFormat::Bmp, &mut out).unwrap();
    assert_bmp(&out, 5, 3);
    for px in out[54..].chunks(16).flat_map(|row| row[..15].chunks(3)) {
        assert!(
            px == [0, 0, 0] || px == [255, 255, 255],
            "mono BMP pixels must be palette colors, got {px:?}"
        );
    }
}

#[test]
fn test_transparent_png_paints_index_zero() {
    let png = png_bytes(png::ColorType::Rgba, 1, 1, &[255, 255, 255, 0]);
    let image = decode_png(png.as_slice()).unwrap();
    let converter = settings("color: \"8\"\nsuppress_palette: true").converter().unwrap();
    let mut out = Vec::new();
    write_image(&image, &converter, OutputFormat::Sixel, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "\x1bP7;1;q\"1;1;1;1#0@$$-\x1b\\");
}

#[test]
fn test_same_seed_same_bytes() {
    let image = decode_png(gray_ramp(32, 12).as_slice()).unwrap();
    let converter = settings("color: \"8\"\nnoise: 64\nseed: 7").converter().unwrap();
    let mut first = Vec::new();
    let mut second = Vec::new();
    write_image(&image, &converter, OutputFormat::Sixel, &mut first).unwrap();
    write_image(&image, &converter, OutputFormat::Sixel, &mut second).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_not_a_png() {
    let scratch = Scratch::new();
    let input = scratch.write("fake.png", b"this is not an image");
    let converter = Config::default().converter().unwrap();
    let mut out = Vec::new();
    let err = convert_file(&input, &converter, OutputFormat::Sixel, &mut out).unwrap_err();
    assert!(matches!(err, CliError::Decode(_)));
    assert!(out.is_empty());
}
