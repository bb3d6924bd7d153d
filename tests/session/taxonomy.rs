// Every native status code surfaced through a session lands in one category.

use std::io;

use streamdeflate::engine::{CompressStatus, InflateStatus};
use streamdeflate::{
    CompressorSession, ConfigError, DataError, DecompressorSession, Error, ErrorCategory,
    InputWindow,
};

use crate::mock::{Action, ScriptedCompress, ScriptedInflate};

fn compress_outcome(status: CompressStatus) -> Result<usize, Error> {
    let engine = ScriptedCompress::new([Action::new(0, 0, status)]);
    let mut s = CompressorSession::with_engine(engine, 2, 1, 0).unwrap();
    s.compress_step(&mut InputWindow::new(b"data"), &mut [0u8; 8], false)
}

fn inflate_outcome(status: InflateStatus) -> Result<usize, Error> {
    let engine = ScriptedInflate::new([Action::new(0, 0, status)]);
    let mut s = DecompressorSession::with_engine(engine, 0);
    s.decompress_step(&mut InputWindow::new(b"data"), &mut [0u8; 8])
}

#[test]
fn compress_statuses() {
    assert!(compress_outcome(CompressStatus::Ok).is_ok());
    let cases = [
        (CompressStatus::InvalidFlush, ErrorCategory::Configuration),
        (CompressStatus::InvalidLevel, ErrorCategory::Configuration),
        (CompressStatus::InvalidLevelBuf, ErrorCategory::Configuration),
        (CompressStatus::InvalidFormat, ErrorCategory::Configuration),
        (CompressStatus::InvalidState, ErrorCategory::Usage),
    ];
    for (status, category) in cases {
        let err = compress_outcome(status).unwrap_err();
        assert_eq!(err.category(), category, "{status}");
        assert!(!err.is_retryable());
    }
}

#[test]
fn level_buf_error_reports_the_real_workspace() {
    match compress_outcome(CompressStatus::InvalidLevelBuf).unwrap_err() {
        Error::Config(ConfigError::InvalidLevelBuf { level, have, need }) => {
            assert_eq!(level, 2);
            assert_eq!(have, need);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn inflate_statuses() {
    assert!(inflate_outcome(InflateStatus::Ok).is_ok());
    assert!(inflate_outcome(InflateStatus::EndInput).is_ok());
    let cases = [
        (InflateStatus::OutOverflow, DataError::OutputOverflow),
        (InflateStatus::InvalidBlock, DataError::InvalidBlock),
        (InflateStatus::InvalidSymbol, DataError::InvalidSymbol),
        (InflateStatus::InvalidLookback, DataError::InvalidLookback),
        (InflateStatus::InvalidWrapper, DataError::InvalidWrapper),
        (InflateStatus::IncorrectChecksum, DataError::IncorrectChecksum),
    ];
    for (status, expected) in cases {
        match inflate_outcome(status) {
            Err(Error::Data(kind)) => assert_eq!(kind, expected, "{status}"),
            other => panic!("{status}: unexpected {other:?}"),
        }
    }
}

#[test]
fn data_errors_are_io_class() {
    let err = inflate_outcome(InflateStatus::InvalidLookback).unwrap_err();
    let io_err: io::Error = err.into();
    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
}
