// Decompressor session reconciliation and finish detection.

use streamdeflate::engine::InflateStatus;
use streamdeflate::{DataError, DecompressorSession, Error, ErrorCategory, InputWindow, UsageError};

use crate::mock::{Action, ScriptedInflate};

fn session(actions: Vec<Action<InflateStatus>>) -> DecompressorSession<ScriptedInflate> {
    DecompressorSession::with_engine(ScriptedInflate::new(actions), 0)
}

#[test]
fn end_input_alone_never_finishes() {
    let data = [0u8; 12];
    let mut s = session(vec![Action::new(12, 30, InflateStatus::EndInput)]);
    let mut win = InputWindow::new(&data);
    let n = s.decompress_step(&mut win, &mut [0u8; 64]).unwrap();
    assert_eq!(n, 30);
    assert!(!s.is_finished());
    assert_eq!(s.remaining(), 0);
    assert!(win.is_empty());
}

#[test]
fn terminal_block_state_finishes_regardless_of_progress_status() {
    for status in [InflateStatus::Ok, InflateStatus::EndInput] {
        let data = [0u8; 5];
        let mut s = session(vec![Action::new(5, 2, status).terminal()]);
        let mut win = InputWindow::new(&data);
        s.decompress_step(&mut win, &mut [0u8; 8]).unwrap();
        assert!(s.is_finished(), "{status}");
    }
}

#[test]
fn terminal_state_is_recorded_even_when_status_is_an_error() {
    let mut s = session(vec![Action::new(1, 0, InflateStatus::IncorrectChecksum).terminal()]);
    let mut win = InputWindow::new(b"abc");
    let err = s.decompress_step(&mut win, &mut [0u8; 8]).unwrap_err();
    assert!(matches!(err, Error::Data(DataError::IncorrectChecksum)));
    assert!(s.is_finished());
    assert_eq!(win.offset(), 0);
}

#[test]
fn remaining_reports_unconsumed_input() {
    let data = [0u8; 50];
    let mut s = session(vec![Action::new(20, 8, InflateStatus::Ok)]);
    let mut win = InputWindow::new(&data);
    s.decompress_step(&mut win, &mut [0u8; 8]).unwrap();
    assert_eq!(s.remaining(), 30);
    assert_eq!(win.len(), 30);
    assert_eq!(win.offset(), 20);
    assert_eq!(s.bytes_written(), 8);
}

#[test]
fn data_errors_keep_counters_readable() {
    let data = [0u8; 10];
    let mut s = session(vec![
        Action::new(4, 6, InflateStatus::Ok),
        Action::new(3, 0, InflateStatus::InvalidSymbol),
    ]);
    let mut win = InputWindow::new(&data);
    s.decompress_step(&mut win, &mut [0u8; 6]).unwrap();
    let err = s.decompress_step(&mut win, &mut [0u8; 6]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::StreamData);
    assert_eq!(s.bytes_written(), 6);
    assert_eq!(win.offset(), 4);
    assert!(!s.is_finished());
}

#[test]
fn failed_step_reports_whole_window_as_remaining() {
    let data = [0u8; 10];
    let mut s = session(vec![Action::new(7, 0, InflateStatus::InvalidLookback)]);
    let mut win = InputWindow::new(&data);
    let err = s.decompress_step(&mut win, &mut [0u8; 6]).unwrap_err();
    assert!(matches!(err, Error::Data(DataError::InvalidLookback)));
    assert_eq!(win.offset(), 0);
    assert_eq!(s.remaining(), 10);
    assert_eq!(s.remaining(), win.len());
}

#[test]
fn step_after_finish_and_reset() {
    let mut s = session(vec![Action::new(1, 1, InflateStatus::Ok).terminal()]);
    let mut win = InputWindow::new(b"zz");
    s.decompress_step(&mut win, &mut [0u8; 4]).unwrap();
    let err = s.decompress_step(&mut win, &mut [0u8; 4]).unwrap_err();
    assert!(matches!(err, Error::Usage(UsageError::StepAfterFinish)));

    s.reset();
    assert_eq!(s.engine().inits, 2);
    assert!(!s.is_finished());
    assert_eq!(s.bytes_written(), 0);
    assert_eq!(s.container(), 0);
    s.end();
}

#[test]
fn overreported_input_is_an_engine_state_error() {
    let mut s = session(vec![Action::new(0, 0, InflateStatus::Ok).overreport()]);
    let err = s
        .decompress_step(&mut InputWindow::new(b"q"), &mut [0u8; 2])
        .unwrap_err();
    assert!(matches!(err, Error::Usage(UsageError::InvalidEngineState)));
}
