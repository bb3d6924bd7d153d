//! E2E Test Suite 02: Error Handling
//!
//! Every failure a caller can provoke through the public session API:
//! rejected configuration, corrupt and truncated streams, misuse of finished
//! sessions and malformed windows. Errors must be reported by the step that
//! detects them, leave the input window untouched and keep counters readable.

use std::io;

use streamdeflate::{
    CodecConfig, CompressionLevel, CompressorSession, ConfigError, ContainerFormat, DataError,
    DecompressorSession, Error, ErrorCategory, FlushMode, InputWindow, UsageError,
};

fn gzip_of(data: &[u8]) -> Vec<u8> {
    let config = CodecConfig {
        container: ContainerFormat::Gzip,
        ..CodecConfig::default()
    };
    streamdeflate::compress_to_vec(data, &config).expect("compress")
}

fn step_all(s: &mut DecompressorSession, z: &[u8]) -> Result<Vec<u8>, Error> {
    let mut win = InputWindow::new(z);
    let mut buf = [0u8; 512];
    let mut out = Vec::new();
    while !s.is_finished() {
        let n = s.decompress_step(&mut win, &mut buf)?;
        out.extend_from_slice(&buf[..n]);
        if n == 0 && win.is_empty() {
            break;
        }
    }
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: Rejected configuration codes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_configuration_fails_first_step() {
    let cases = [
        (4, 0, 0, ConfigError::InvalidLevel(4)),
        (0, 3, 0, ConfigError::InvalidFlush(3)),
        (0, 0, 4, ConfigError::InvalidFormat(4)),
    ];
    for (level, flush, container, expected) in cases {
        let mut s = CompressorSession::init_raw(level, flush, container).unwrap();
        let data = b"never compressed";
        let mut win = InputWindow::new(data);
        for _ in 0..2 {
            let err = s.compress_step(&mut win, &mut [0u8; 64], true).unwrap_err();
            match &err {
                Error::Config(kind) => assert_eq!(*kind, expected),
                other => panic!("({level},{flush},{container}): unexpected {other:?}"),
            }
            assert_eq!(err.category(), ErrorCategory::Configuration);
            assert!(!err.is_retryable());
        }
        assert_eq!(win.offset(), 0);
        assert_eq!((s.bytes_read(), s.bytes_written()), (0, 0));
        assert!(!s.is_finished());
    }
}

#[test]
fn test_level_is_checked_before_other_fields() {
    let mut s = CompressorSession::init_raw(9, 9, 9).unwrap();
    let err = s
        .compress_step(&mut InputWindow::new(b"x"), &mut [0u8; 8], false)
        .unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::InvalidLevel(9))));
}

#[test]
fn test_config_errors_convert_to_invalid_input() {
    let mut s = CompressorSession::init_raw(0, 7, 0).unwrap();
    let err = s
        .compress_step(&mut InputWindow::new(b"x"), &mut [0u8; 8], false)
        .unwrap_err();
    assert_eq!(io::Error::from(err).kind(), io::ErrorKind::InvalidInput);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: Corrupt streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_bad_gzip_magic_is_invalid_wrapper() {
    let mut z = gzip_of(b"payload");
    z[0] = b'P';
    let mut s = DecompressorSession::init(ContainerFormat::Gzip);
    match step_all(&mut s, &z) {
        Err(Error::Data(DataError::InvalidWrapper)) => {}
        other => panic!("unexpected {other:?}"),
    }
    assert!(!s.is_finished());
}

#[test]
fn test_gzip_crc_mismatch_is_incorrect_checksum() {
    let mut z = gzip_of(b"payload that will not check out");
    let n = z.len();
    z[n - 8] ^= 0xff;
    let mut s = DecompressorSession::init(ContainerFormat::Gzip);
    match step_all(&mut s, &z) {
        Err(Error::Data(DataError::IncorrectChecksum)) => {}
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_gzip_length_mismatch_is_incorrect_checksum() {
    let mut z = gzip_of(b"sized payload");
    let n = z.len();
    z[n - 4] ^= 0x01;
    let mut s = DecompressorSession::init(ContainerFormat::Gzip);
    assert!(matches!(
        step_all(&mut s, &z),
        Err(Error::Data(DataError::IncorrectChecksum))
    ));
}

#[test]
fn test_reserved_block_type_is_stream_data_error() {
    // BFINAL=1, BTYPE=11
    let z = [0x07u8, 0x00, 0x00, 0x00];
    let mut s = DecompressorSession::init(ContainerFormat::Deflate);
    let mut win = InputWindow::new(&z);
    let err = s.decompress_step(&mut win, &mut [0u8; 64]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::StreamData);
    assert_eq!(win.offset(), 0, "window must not move on error");
    assert_eq!(s.bytes_written(), 0);
    assert_eq!(io::Error::from(err).kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_lookback_before_first_byte_is_invalid_lookback() {
    // Fixed block: length 3, distance 1, EOB. Nothing has been decoded yet.
    let z = [0x03u8, 0x02, 0x00];
    let mut s = DecompressorSession::init(ContainerFormat::Deflate);
    let mut win = InputWindow::new(&z);
    match s.decompress_step(&mut win, &mut [0u8; 64]) {
        Err(Error::Data(DataError::InvalidLookback)) => {}
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(win.offset(), 0);
    assert_eq!(s.remaining(), win.len());
    assert_eq!(s.bytes_written(), 0);
    assert!(!s.is_finished());
}

#[test]
fn test_out_of_alphabet_literal_is_invalid_symbol() {
    // Fixed block carrying lit/len symbol 286.
    let z = [0x1Bu8, 0x03, 0x00, 0x00];
    let mut s = DecompressorSession::init(ContainerFormat::Deflate);
    let mut win = InputWindow::new(&z);
    match s.decompress_step(&mut win, &mut [0u8; 64]) {
        Err(Error::Data(DataError::InvalidSymbol)) => {}
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(win.offset(), 0);
    assert_eq!(s.remaining(), win.len());
}

#[test]
fn test_corrupt_body_after_valid_header_keeps_remaining_in_sync() {
    // The gzip header parses; the first block then uses the reserved type.
    let mut z = gzip_of(b"header is fine");
    z[10] = 0x07;
    let mut s = DecompressorSession::init(ContainerFormat::Gzip);
    let mut win = InputWindow::new(&z);
    let err = s.decompress_step(&mut win, &mut [0u8; 64]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::StreamData);
    assert_eq!(win.offset(), 0);
    assert_eq!(s.remaining(), z.len());
    assert_eq!(s.remaining(), win.len());
}

#[test]
fn test_zlib_header_check_failure() {
    let mut s = DecompressorSession::init(ContainerFormat::Zlib);
    let err = step_all(&mut s, &[0x78, 0x00, 0x01, 0x02]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::StreamData);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: Truncated streams never finish
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_truncated_stream_reports_progress_but_not_finished() {
    let data: Vec<u8> = (0..5_000u32).map(|i| (i % 13) as u8).collect();
    let z = gzip_of(&data);
    for cut in [0, 5, 10, z.len() / 2, z.len() - 8, z.len() - 1] {
        let mut s = DecompressorSession::init(ContainerFormat::Gzip);
        let out = step_all(&mut s, &z[..cut]).unwrap();
        assert!(!s.is_finished(), "cut at {cut}");
        assert!(out.len() <= data.len());
        assert_eq!(&out[..], &data[..out.len()]);
        assert_eq!(s.remaining(), 0);

        // An empty step on a starved session is still progress.
        let n = s
            .decompress_step(&mut InputWindow::new(&[]), &mut [0u8; 16])
            .unwrap();
        assert_eq!(n, 0);
        assert!(!s.is_finished());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: Usage errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_step_after_finish_on_both_sessions() {
    let z = gzip_of(b"done");
    let mut d = DecompressorSession::init(ContainerFormat::Gzip);
    step_all(&mut d, &z).unwrap();
    assert!(d.is_finished());
    let err = d
        .decompress_step(&mut InputWindow::new(&z), &mut [0u8; 16])
        .unwrap_err();
    assert!(matches!(err, Error::Usage(UsageError::StepAfterFinish)));
    assert_eq!(err.category(), ErrorCategory::Usage);

    let mut c = CompressorSession::init(
        CompressionLevel::Level0,
        FlushMode::None,
        ContainerFormat::Deflate,
    )
    .unwrap();
    c.compress_step(&mut InputWindow::new(b"done"), &mut [0u8; 64], true)
        .unwrap();
    assert!(c.is_finished());
    let err = c
        .compress_step(&mut InputWindow::new(&[]), &mut [0u8; 64], true)
        .unwrap_err();
    assert!(matches!(err, Error::Usage(UsageError::StepAfterFinish)));

    c.reset();
    assert!(!c.is_finished());
    c.compress_step(&mut InputWindow::new(b"again"), &mut [0u8; 64], true)
        .unwrap();
    assert!(c.is_finished());
}

#[test]
fn test_window_bounds_are_checked_at_construction() {
    let buf = [0u8; 16];
    assert!(InputWindow::with_bounds(&buf, 16, 0).is_ok());
    assert!(InputWindow::with_bounds(&buf, 8, 8).is_ok());

    for (offset, len) in [(17, 0), (8, 9), (0, 17), (usize::MAX, 2)] {
        match InputWindow::with_bounds(&buf, offset, len) {
            Err(UsageError::WindowOutOfBounds {
                offset: o,
                len: l,
                capacity,
            }) => {
                assert_eq!((o, l, capacity), (offset, len, 16));
            }
            other => panic!("({offset},{len}): unexpected {other:?}"),
        }
    }

    let err: Error = InputWindow::with_bounds(&buf, 20, 0).unwrap_err().into();
    assert_eq!(err.category(), ErrorCategory::Usage);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: Errors surfaced through the one-shot helpers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_one_shot_truncation_is_unexpected_eof() {
    let z = gzip_of(&[42u8; 1_000]);
    match streamdeflate::decompress_to_vec(&z[..z.len() - 3], ContainerFormat::Gzip) {
        Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_one_shot_wrong_container() {
    let z = gzip_of(b"gzip bytes");
    let err = streamdeflate::decompress_to_vec(&z, ContainerFormat::Zlib).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::StreamData);
}
