//! E2E Test Suite 01: Session Streaming
//!
//! Drives the default compressor and decompressor sessions through fixed,
//! reused buffers the way an embedding caller would. Covers:
//! - Single-step compression of a small buffer
//! - Byte-at-a-time feeding through a recycled compressed-input buffer
//! - Byte conservation and monotonic window offsets
//! - Zero-capacity output windows
//! - Finished sessions, reset and reuse

use streamdeflate::{
    CompressionLevel, CompressorSession, ContainerFormat, DecompressorSession, Error, FlushMode,
    InputWindow, UsageError,
};

fn prose(len: usize) -> Vec<u8> {
    b"Streams are drained in steps; every step reports what it took and what it gave. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

/// Compress all of `data` feeding `in_chunk` bytes and collecting through an
/// `out_chunk` buffer.
fn compress_chunked(
    data: &[u8],
    container: ContainerFormat,
    in_chunk: usize,
    out_chunk: usize,
) -> Vec<u8> {
    let mut s = CompressorSession::init(CompressionLevel::Level1, FlushMode::None, container)
        .expect("init");
    let mut out = Vec::new();
    let mut buf = vec![0u8; out_chunk];
    let mut chunks = data.chunks(in_chunk).peekable();
    loop {
        let chunk = chunks.next().unwrap_or(&[]);
        let eos = chunks.peek().is_none();
        let mut win = InputWindow::new(chunk);
        loop {
            let n = s.compress_step(&mut win, &mut buf, eos).expect("compress step");
            out.extend_from_slice(&buf[..n]);
            if s.is_finished() || (win.is_empty() && !eos) {
                break;
            }
        }
        if s.is_finished() {
            break;
        }
    }
    out
}

fn decompress_all(z: &[u8], container: ContainerFormat) -> Vec<u8> {
    let mut s = DecompressorSession::init(container);
    let mut win = InputWindow::new(z);
    let mut buf = [0u8; 4096];
    let mut out = Vec::new();
    while !s.is_finished() {
        let n = s.decompress_step(&mut win, &mut buf).expect("decompress step");
        out.extend_from_slice(&buf[..n]);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: 1000 bytes, level 1, one step
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_small_buffer_finishes_in_one_step() {
    let data = prose(1000);
    let mut s = CompressorSession::init(
        CompressionLevel::Level1,
        FlushMode::None,
        ContainerFormat::Deflate,
    )
    .unwrap();
    let mut win = InputWindow::new(&data);
    let mut out = [0u8; 4096];

    let n = s.compress_step(&mut win, &mut out, true).unwrap();
    assert!(s.is_finished(), "1000 bytes into 4096 should finish at once");
    assert!(n > 0);
    assert_eq!(s.bytes_written(), n as u64);
    assert_eq!(s.bytes_read(), 1000);
    assert!(win.is_empty());

    assert_eq!(decompress_all(&out[..n], ContainerFormat::Deflate), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: Byte-at-a-time through a 64-byte compressed-input buffer
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_byte_at_a_time_through_recycled_buffer() {
    for container in [
        ContainerFormat::Deflate,
        ContainerFormat::Gzip,
        ContainerFormat::GzipNoHeader,
        ContainerFormat::Zlib,
    ] {
        let data = prose(3000);
        let z = compress_chunked(&data, container, 3000, 8192);

        let mut s = DecompressorSession::init(container);
        let mut ring = [0u8; 64];
        let mut out = vec![0u8; 64 * 1024];
        let mut total = 0usize;
        for (k, &byte) in z.iter().enumerate() {
            assert!(!s.is_finished(), "{container}: finished early at byte {k}");
            let slot = k % ring.len();
            ring[slot] = byte;
            let mut win = InputWindow::with_bounds(&ring, slot, 1).unwrap();
            let n = s.decompress_step(&mut win, &mut out[total..]).unwrap();
            assert_eq!(s.remaining(), 0, "{container}: byte {k} not consumed");
            assert_eq!(win.offset(), slot + 1);
            total += n;
        }
        assert!(s.is_finished(), "{container}");
        assert_eq!(total, data.len(), "{container}");
        assert_eq!(&out[..total], &data[..], "{container}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: Conservation of bytes across fragmented steps
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_conservation_across_fragments() {
    let data = prose(20_000);
    let mut s = CompressorSession::init(
        CompressionLevel::Level2,
        FlushMode::Sync,
        ContainerFormat::Gzip,
    )
    .unwrap();
    let mut consumed = 0u64;
    let mut produced = 0u64;
    let mut buf = [0u8; 37];
    let mut pos = 0;
    let mut sizes = [1usize, 7, 113, 512, 4096].iter().cycle();
    while !s.is_finished() {
        let end = (pos + sizes.next().copied().unwrap_or(1)).min(data.len());
        let mut win = InputWindow::new(&data[pos..end]);
        let before = win.offset();
        let n = s.compress_step(&mut win, &mut buf, end == data.len()).unwrap();
        consumed += (win.offset() - before) as u64;
        produced += n as u64;
        pos += win.offset();
    }
    assert_eq!(consumed, data.len() as u64);
    assert_eq!(consumed, s.bytes_read());
    assert_eq!(produced, s.bytes_written());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: Window offsets only move forward
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_window_offset_is_monotonic() {
    let data = prose(10_000);
    let z = compress_chunked(&data, ContainerFormat::Zlib, 999, 128);

    let mut s = DecompressorSession::init(ContainerFormat::Zlib);
    let mut win = InputWindow::new(&z);
    let mut buf = [0u8; 50];
    let mut last = win.offset();
    let mut steps = 0;
    while !s.is_finished() {
        s.decompress_step(&mut win, &mut buf).unwrap();
        assert!(win.offset() >= last);
        assert!(win.offset() <= win.capacity());
        assert_eq!(win.len(), s.remaining());
        last = win.offset();
        steps += 1;
    }
    assert!(steps > 1);
    assert_eq!(s.bytes_written(), data.len() as u64);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: Zero-capacity output windows
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_zero_capacity_output_is_harmless() {
    let data = prose(500);
    let mut s = CompressorSession::init(
        CompressionLevel::Level0,
        FlushMode::None,
        ContainerFormat::Gzip,
    )
    .unwrap();
    let mut win = InputWindow::new(&data);
    assert_eq!(s.compress_step(&mut win, &mut [], false).unwrap(), 0);
    assert_eq!(s.bytes_written(), 0);

    let mut out = Vec::new();
    let mut buf = [0u8; 256];
    while !s.is_finished() {
        let n = s.compress_step(&mut win, &mut buf, true).unwrap();
        out.extend_from_slice(&buf[..n]);
    }

    let mut d = DecompressorSession::init(ContainerFormat::Gzip);
    let mut zwin = InputWindow::new(&out);
    assert_eq!(d.decompress_step(&mut zwin, &mut []).unwrap(), 0);
    assert_eq!(d.bytes_written(), 0);
    assert!(!d.is_finished());
    let mut plain = Vec::new();
    while !d.is_finished() {
        let n = d.decompress_step(&mut zwin, &mut buf).unwrap();
        plain.extend_from_slice(&buf[..n]);
    }
    assert_eq!(plain, data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: Finished sessions stay finished
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_finished_session_rejects_steps_and_keeps_counters() {
    let data = prose(2000);
    let mut s = CompressorSession::init(
        CompressionLevel::Level3,
        FlushMode::Full,
        ContainerFormat::Deflate,
    )
    .unwrap();
    let mut win = InputWindow::new(&data);
    let mut buf = [0u8; 8192];
    s.compress_step(&mut win, &mut buf, true).unwrap();
    assert!(s.is_finished());
    let (read, written) = (s.bytes_read(), s.bytes_written());

    for _ in 0..3 {
        let err = s
            .compress_step(&mut InputWindow::new(b"more"), &mut buf, true)
            .unwrap_err();
        assert!(matches!(err, Error::Usage(UsageError::StepAfterFinish)));
        assert!(s.is_finished());
        assert_eq!((s.bytes_read(), s.bytes_written()), (read, written));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: Empty stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_stream_round_trips() {
    for container in [
        ContainerFormat::Deflate,
        ContainerFormat::Gzip,
        ContainerFormat::GzipNoHeader,
        ContainerFormat::Zlib,
    ] {
        let z = compress_chunked(&[], container, 1, 16);
        assert!(!z.is_empty(), "{container}: even an empty stream has a final block");
        assert!(decompress_all(&z, container).is_empty(), "{container}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: Reset and reuse
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_reset_reuses_both_sessions() {
    let mut c = CompressorSession::init(
        CompressionLevel::Level2,
        FlushMode::None,
        ContainerFormat::Gzip,
    )
    .unwrap();
    let mut d = DecompressorSession::init(ContainerFormat::Gzip);
    let mut zbuf = [0u8; 4096];
    let mut pbuf = [0u8; 4096];

    for message in [
        &b"first message"[..],
        &b"second, longer message body"[..],
        &b""[..],
    ] {
        c.reset();
        d.reset();
        assert_eq!((c.bytes_read(), c.bytes_written()), (0, 0));
        assert_eq!(d.bytes_written(), 0);

        let n = c
            .compress_step(&mut InputWindow::new(message), &mut zbuf, true)
            .unwrap();
        assert!(c.is_finished());

        let m = d
            .decompress_step(&mut InputWindow::new(&zbuf[..n]), &mut pbuf)
            .unwrap();
        assert!(d.is_finished());
        assert_eq!(&pbuf[..m], message);
    }
    c.end();
    d.end();
}
