// Default engines driven directly through the engine traits, checked against
// flate2's own encoders and decoders.

use std::io::{Read, Write};

use streamdeflate::engine::gzip::{self, FCOMMENT, FHCRC, FNAME};
use streamdeflate::engine::{
    workspace_size, CompressEngine, CompressStatus, DecompressEngine, DeflateEngine, DeflateState,
    InflateEngine, InflateState, InflateStatus, ZState, CONTAINER_DEFLATE, CONTAINER_GZIP,
    CONTAINER_GZIP_NO_HDR, CONTAINER_ZLIB, FLUSH_FULL, FLUSH_NONE, FLUSH_SYNC,
};

fn text(len: usize) -> Vec<u8> {
    b"It was the best of times, it was the worst of times. "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

/// Drive the compress engine to the end with the given window sizes.
fn engine_compress(
    level: u32,
    flush: u32,
    container: u32,
    data: &[u8],
    in_chunk: usize,
    out_chunk: usize,
) -> Vec<u8> {
    let mut engine = DeflateEngine::new();
    let mut state = DeflateState::new(level, flush, container);
    engine.init(&mut state);
    let mut ws = vec![0u8; workspace_size(level)];
    let mut out = Vec::new();
    let mut buf = vec![0u8; out_chunk];
    let mut pos = 0;
    while state.state != ZState::End {
        let end = (pos + in_chunk).min(data.len());
        let input = &data[pos..end];
        state.end_of_stream = end == data.len();
        state.avail_in = input.len();
        state.avail_out = buf.len();
        let status = engine.step(&mut state, input, &mut buf, &mut ws);
        assert_eq!(status, CompressStatus::Ok);
        pos += input.len() - state.avail_in;
        out.extend_from_slice(&buf[..out_chunk - state.avail_out]);
    }
    assert_eq!(state.total_in, data.len() as u64);
    assert_eq!(state.total_out, out.len() as u64);
    out
}

fn engine_inflate(container: u32, z: &[u8], out_chunk: usize) -> (Vec<u8>, InflateStatus) {
    let mut engine = InflateEngine::new();
    let mut state = InflateState::new(container);
    engine.init(&mut state);
    let mut buf = vec![0u8; out_chunk];
    let mut out = Vec::new();
    let mut pos = 0;
    loop {
        let input = &z[pos..];
        state.avail_in = input.len();
        state.avail_out = buf.len();
        let status = engine.step(&mut state, input, &mut buf);
        let produced = out_chunk - state.avail_out;
        out.extend_from_slice(&buf[..produced]);
        pos += input.len() - state.avail_in;
        if !status.is_progress() || state.is_terminal() {
            return (out, status);
        }
        if status == InflateStatus::EndInput && produced == 0 {
            return (out, status);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Interop with flate2
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn gzip_output_reads_back_with_flate2() {
    let data = text(10_000);
    let z = engine_compress(2, FLUSH_NONE, CONTAINER_GZIP, &data, 333, 50);
    let mut plain = Vec::new();
    flate2::read::GzDecoder::new(&z[..])
        .read_to_end(&mut plain)
        .unwrap();
    assert_eq!(plain, data);
}

#[test]
fn zlib_output_reads_back_with_flate2() {
    let data = text(4_321);
    let z = engine_compress(3, FLUSH_SYNC, CONTAINER_ZLIB, &data, 100, 64);
    let mut plain = Vec::new();
    flate2::read::ZlibDecoder::new(&z[..])
        .read_to_end(&mut plain)
        .unwrap();
    assert_eq!(plain, data);
}

#[test]
fn raw_deflate_reads_back_with_flate2() {
    let data = text(777);
    let z = engine_compress(0, FLUSH_FULL, CONTAINER_DEFLATE, &data, 50, 13);
    let mut plain = Vec::new();
    flate2::read::DeflateDecoder::new(&z[..])
        .read_to_end(&mut plain)
        .unwrap();
    assert_eq!(plain, data);
}

#[test]
fn headerless_gzip_is_body_plus_trailer() {
    let data = text(2_000);
    let with_header = engine_compress(1, FLUSH_NONE, CONTAINER_GZIP, &data, 2_000, 4_096);
    let without = engine_compress(1, FLUSH_NONE, CONTAINER_GZIP_NO_HDR, &data, 2_000, 4_096);
    assert_eq!(&with_header[gzip::HEADER_SIZE..], &without[..]);
}

#[test]
fn flate2_gzip_with_optional_fields_decodes() {
    let data = text(3_000);
    let mut enc = flate2::GzBuilder::new()
        .filename("chapter1.txt")
        .comment("two cities")
        .extra(vec![1, 2, 3, 4])
        .write(Vec::new(), flate2::Compression::best());
    enc.write_all(&data).unwrap();
    let z = enc.finish().unwrap();
    assert_ne!(z[3] & (FNAME | FCOMMENT), 0);

    let (plain, status) = engine_inflate(CONTAINER_GZIP, &z, 71);
    assert_eq!(status, InflateStatus::Ok);
    assert_eq!(plain, data);
}

#[test]
fn gzip_header_crc_is_verified() {
    let data = text(100);
    let body = engine_compress(1, FLUSH_NONE, CONTAINER_GZIP_NO_HDR, &data, 100, 1_024);
    let mut header = gzip::DEFAULT_HEADER.to_vec();
    header[3] = FHCRC;
    let crc = crc32fast::hash(&header) as u16;

    let mut good = header.clone();
    good.extend_from_slice(&crc.to_le_bytes());
    good.extend_from_slice(&body);
    assert_eq!(engine_inflate(CONTAINER_GZIP, &good, 256), (data, InflateStatus::Ok));

    let mut bad = header;
    bad.extend_from_slice(&(crc ^ 1).to_le_bytes());
    bad.extend_from_slice(&body);
    assert_eq!(
        engine_inflate(CONTAINER_GZIP, &bad, 256).1,
        InflateStatus::IncorrectChecksum
    );
}

#[test]
fn zlib_adler_mismatch_is_an_error() {
    let data = text(500);
    let mut z = engine_compress(1, FLUSH_NONE, CONTAINER_ZLIB, &data, 500, 1_024);
    let n = z.len();
    z[n - 1] ^= 0x55;
    let (_, status) = engine_inflate(CONTAINER_ZLIB, &z, 1_024);
    assert!(!status.is_progress(), "{status}");
}

#[test]
fn wrong_container_on_decode_is_detected() {
    let data = text(500);
    let z = engine_compress(1, FLUSH_NONE, CONTAINER_DEFLATE, &data, 500, 1_024);
    let (_, status) = engine_inflate(CONTAINER_GZIP, &z, 1_024);
    assert_eq!(status, InflateStatus::InvalidWrapper);
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn undersized_workspace_is_rejected_per_level() {
    for level in 1..=3 {
        let mut engine = DeflateEngine::new();
        let mut state = DeflateState::new(level, FLUSH_NONE, CONTAINER_DEFLATE);
        engine.init(&mut state);
        let mut ws = vec![0u8; workspace_size(level) - 1];
        let status = engine.step(&mut state, b"abc", &mut [0u8; 32], &mut ws);
        assert_eq!(status, CompressStatus::InvalidLevelBuf, "level {level}");
        assert_eq!(state.state, ZState::Init);
        assert_eq!(state.total_in, 0);
    }
}

#[test]
fn validation_repeats_until_configuration_is_fixed() {
    let mut engine = DeflateEngine::new();
    let mut state = DeflateState::new(0, 5, CONTAINER_DEFLATE);
    engine.init(&mut state);
    for _ in 0..3 {
        assert_eq!(
            engine.step(&mut state, b"x", &mut [0u8; 8], &mut []),
            CompressStatus::InvalidFlush
        );
    }
}
