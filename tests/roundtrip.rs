use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use std::io::Cursor;

use lsb_stego::processing::{bits, PixelGrid, SelectionMap, StegoKey};
use lsb_stego::{Codec, CodecOptions, Framing, StegoError};

fn codec(framing: Framing) -> Codec {
    Codec::new(CodecOptions {
        canonical_width: 48,
        canonical_height: 48,
        framing,
    })
}

fn encode_png(img: DynamicImage) -> Vec<u8> {
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

fn gradient(width: u32, height: u32) -> Vec<u8> {
    encode_png(DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 3) as u8, (y * 5) as u8, ((x + y) * 2) as u8])
    })))
}

#[test]
fn test_roundtrip_various_messages() {
    let codec = codec(Framing::Raw);
    let cover = gradient(100, 60);
    let messages = ["", "a", "This is a secret message!", "naïve café — 日本語 🦀"];

    for (i, message) in messages.iter().enumerate() {
        let key = 1000 + i as i64;
        let report = codec.embed(&cover, message, key).unwrap();
        assert_eq!(report.message_length_bits, message.len() * 8);

        let out = codec
            .extract(&report.image, key, Some(report.message_length_bits))
            .unwrap();
        assert_eq!(&out.message, message);
    }
}

#[test]
fn test_greyscale_cover_roundtrip() {
    let codec = codec(Framing::LengthPrefixed);
    let cover = encode_png(DynamicImage::ImageLuma8(GrayImage::from_pixel(30, 30, Luma([128]))));

    let report = codec.embed(&cover, "grey", 5).unwrap();
    let out = codec.extract(&report.image, 5, None).unwrap();
    assert_eq!(out.message, "grey");
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cover.png");
    let output = dir.path().join("nested/out/stego.png");
    std::fs::write(&input, gradient(20, 20)).unwrap();

    let codec = codec(Framing::Raw);
    let report = codec.embed_file(&input, &output, "from disk", 42).unwrap();
    assert!(output.exists());

    let out = codec
        .extract_file(&output, 42, Some(report.message_length_bits))
        .unwrap();
    assert_eq!(out.message, "from disk");
}

#[test]
fn test_wrong_key_does_not_recover_message() {
    let codec = codec(Framing::Raw);
    let report = codec
        .embed(&gradient(48, 48), "the eagle has landed", 11)
        .unwrap();

    let out = codec
        .extract(&report.image, 12, Some(report.message_length_bits))
        .unwrap();
    assert_ne!(out.message, "the eagle has landed");
}

#[test]
fn test_embedding_preserves_high_bits() {
    let codec = codec(Framing::Raw);
    let cover = gradient(48, 48);
    let report = codec.embed(&cover, "non destructive", 77).unwrap();

    let before = PixelGrid::from_bytes(&cover).unwrap();
    let after = PixelGrid::from_bytes(&report.image).unwrap();
    let map = SelectionMap::generate(StegoKey::from(77), 48, 48);

    for (slot, (&a, &b)) in before.samples().iter().zip(after.samples()).enumerate() {
        assert_eq!(a & 0xFE, b & 0xFE);
        if !map.flags()[slot] {
            assert_eq!(a, b);
        }
    }
}

#[test]
fn test_short_length_decodes_empty() {
    let codec = codec(Framing::Raw);
    let report = codec.embed(&gradient(10, 10), "Hi", 1).unwrap();
    let out = codec.extract(&report.image, 1, Some(5)).unwrap();
    assert_eq!(out.message, "");
    assert_eq!(out.bits_extracted, 5);
}

#[test]
fn test_fatal_errors() {
    let codec = codec(Framing::Raw);
    assert!(matches!(
        codec.embed(b"\x89PNG broken", "x", 1),
        Err(StegoError::ImageDecode(_))
    ));
    assert!(matches!(
        codec.extract(&gradient(4, 4), 1 << 40, None),
        Err(StegoError::InvalidKey { .. })
    ));
}

#[test]
fn test_bit_codec_matches_embedded_stream() {
    let codec = codec(Framing::Raw);
    let report = codec.embed(&gradient(48, 48), "Hi", 3).unwrap();

    let grid = PixelGrid::from_bytes(&report.image).unwrap();
    let map = SelectionMap::generate(StegoKey::from(3), grid.width(), grid.height());
    let read = lsb_stego::processing::extract::extract(&grid, &map, Some(16)).unwrap();
    assert_eq!(read, bits::encode("Hi"));
}
