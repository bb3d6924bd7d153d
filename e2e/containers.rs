//! E2E Test Suite 04: Container Formats
//!
//! Wire-level checks of the four container framings produced and consumed by
//! the sessions, cross-checked against flate2's stream encoders/decoders.

use std::io::{Read, Write};

use streamdeflate::engine::gzip::{DEFAULT_HEADER, HEADER_SIZE, TRAILER_SIZE};
use streamdeflate::{
    CodecConfig, CompressionLevel, ContainerFormat, DecompressorSession, FlushMode, InputWindow,
};

fn corpus() -> Vec<u8> {
    let mut v = Vec::with_capacity(40_000);
    for i in 0..2_000u32 {
        v.extend_from_slice(format!("record {i:05}: value={} ", i * 31 % 977).as_bytes());
    }
    v
}

fn compress(data: &[u8], container: ContainerFormat, level: CompressionLevel) -> Vec<u8> {
    let config = CodecConfig {
        level,
        container,
        ..CodecConfig::default()
    };
    streamdeflate::compress_to_vec(data, &config).expect("compress")
}

fn adler32(data: &[u8]) -> u32 {
    let (mut a, mut b) = (1u32, 0u32);
    for &byte in data {
        a = (a + byte as u32) % 65_521;
        b = (b + a) % 65_521;
    }
    (b << 16) | a
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: gzip framing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_gzip_header_and_trailer_layout() {
    let data = corpus();
    let z = compress(&data, ContainerFormat::Gzip, CompressionLevel::Level2);
    assert_eq!(&z[..HEADER_SIZE], &DEFAULT_HEADER);

    let trailer = &z[z.len() - TRAILER_SIZE..];
    let crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    let size = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);
    assert_eq!(crc, crc32fast::hash(&data));
    assert_eq!(size, data.len() as u32);

    let mut plain = Vec::new();
    flate2::read::GzDecoder::new(&z[..])
        .read_to_end(&mut plain)
        .unwrap();
    assert_eq!(plain, data);
}

#[test]
fn test_headerless_gzip_decodes_after_prepending_header() {
    let data = corpus();
    let bare = compress(&data, ContainerFormat::GzipNoHeader, CompressionLevel::Level1);
    let full = compress(&data, ContainerFormat::Gzip, CompressionLevel::Level1);
    assert_eq!(bare.len() + HEADER_SIZE, full.len());

    let mut framed = DEFAULT_HEADER.to_vec();
    framed.extend_from_slice(&bare);
    let mut plain = Vec::new();
    flate2::read::GzDecoder::new(&framed[..])
        .read_to_end(&mut plain)
        .unwrap();
    assert_eq!(plain, data);

    assert_eq!(
        streamdeflate::decompress_to_vec(&bare, ContainerFormat::GzipNoHeader).unwrap(),
        data
    );
}

#[test]
fn test_flate2_gzip_decodes_in_sessions() {
    let data = corpus();
    let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
    enc.write_all(&data).unwrap();
    let z = enc.finish().unwrap();
    assert_eq!(
        streamdeflate::decompress_to_vec(&z, ContainerFormat::Gzip).unwrap(),
        data
    );
}

#[test]
fn test_gzip_member_boundary_is_respected() {
    let first = compress(b"alpha member", ContainerFormat::Gzip, CompressionLevel::Level1);
    let second = compress(b"beta member", ContainerFormat::Gzip, CompressionLevel::Level1);
    let mut both = first.clone();
    both.extend_from_slice(&second);

    let mut s = DecompressorSession::init(ContainerFormat::Gzip);
    let mut win = InputWindow::new(&both);
    let mut buf = [0u8; 256];
    let mut plain = Vec::new();
    while !s.is_finished() {
        let n = s.decompress_step(&mut win, &mut buf).unwrap();
        plain.extend_from_slice(&buf[..n]);
    }
    assert_eq!(plain, b"alpha member");
    assert_eq!(win.offset(), first.len());
    assert_eq!(s.remaining(), second.len());

    s.reset();
    let mut rest = Vec::new();
    while !s.is_finished() {
        let n = s.decompress_step(&mut win, &mut buf).unwrap();
        rest.extend_from_slice(&buf[..n]);
    }
    assert_eq!(rest, b"beta member");
    assert!(win.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: zlib framing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_zlib_header_and_adler_trailer() {
    let data = corpus();
    for level in [
        CompressionLevel::Level0,
        CompressionLevel::Level1,
        CompressionLevel::Level2,
        CompressionLevel::Level3,
    ] {
        let z = compress(&data, ContainerFormat::Zlib, level);
        assert_eq!(z[0] & 0x0f, 8, "CM must be deflate");
        assert_eq!((u16::from(z[0]) << 8 | u16::from(z[1])) % 31, 0, "FCHECK");
        let tail = &z[z.len() - 4..];
        assert_eq!(
            u32::from_be_bytes([tail[0], tail[1], tail[2], tail[3]]),
            adler32(&data)
        );

        let mut plain = Vec::new();
        flate2::read::ZlibDecoder::new(&z[..])
            .read_to_end(&mut plain)
            .unwrap();
        assert_eq!(plain, data);
    }
}

#[test]
fn test_flate2_zlib_decodes_in_sessions() {
    let data = corpus();
    let mut enc = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::best());
    enc.write_all(&data).unwrap();
    let z = enc.finish().unwrap();
    assert_eq!(
        streamdeflate::decompress_to_vec(&z, ContainerFormat::Zlib).unwrap(),
        data
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: raw deflate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_raw_deflate_has_no_framing() {
    let data = corpus();
    let raw = compress(&data, ContainerFormat::Deflate, CompressionLevel::Level1);
    let zlib = compress(&data, ContainerFormat::Zlib, CompressionLevel::Level1);
    assert_eq!(raw.len() + 2 + 4, zlib.len());
    assert_eq!(&zlib[2..zlib.len() - 4], &raw[..]);

    let mut plain = Vec::new();
    flate2::read::DeflateDecoder::new(&raw[..])
        .read_to_end(&mut plain)
        .unwrap();
    assert_eq!(plain, data);
}

#[test]
fn test_sync_flushed_deflate_decodes_with_flate2() {
    let data = corpus();
    let config = CodecConfig {
        flush: FlushMode::Sync,
        buffer_size: 700,
        ..CodecConfig::default()
    };
    let mut w = streamdeflate::CompressWriter::new(Vec::new(), config).unwrap();
    for chunk in data.chunks(1_234) {
        w.write_all(chunk).unwrap();
        w.flush().unwrap();
    }
    let z = w.finish().unwrap();

    let mut plain = Vec::new();
    flate2::read::DeflateDecoder::new(&z[..])
        .read_to_end(&mut plain)
        .unwrap();
    assert_eq!(plain, data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: Names and codes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_container_codes_and_names() {
    let all = [
        (ContainerFormat::Deflate, 0, "deflate"),
        (ContainerFormat::Gzip, 1, "gzip"),
        (ContainerFormat::GzipNoHeader, 2, "gzip-no-header"),
        (ContainerFormat::Zlib, 3, "zlib"),
    ];
    for (container, code, name) in all {
        assert_eq!(container.code(), code);
        assert_eq!(ContainerFormat::from_code(code), Some(container));
        assert_eq!(container.name(), name);
        assert_eq!(name.parse::<ContainerFormat>().unwrap(), container);
        assert_eq!(container.to_string(), name);
    }
    assert_eq!(ContainerFormat::from_code(4), None);
    assert!("lzma".parse::<ContainerFormat>().is_err());
}
