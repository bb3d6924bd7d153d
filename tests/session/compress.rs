// Compressor session reconciliation, driven through the scripted engine.

use streamdeflate::engine::{CompressStatus, DeflateState, LVL1_WORKSPACE};
use streamdeflate::{CompressorSession, ConfigError, Error, ErrorCategory, InputWindow, UsageError};

use crate::mock::{Action, ScriptedCompress, FILL};

fn session(actions: Vec<Action<CompressStatus>>) -> CompressorSession<ScriptedCompress> {
    CompressorSession::with_engine(ScriptedCompress::new(actions), 0, 0, 0).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Cursor reconciliation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn offset_and_length_follow_consumption() {
    let data = [1u8; 100];
    let mut s = session(vec![
        Action::new(30, 5, CompressStatus::Ok),
        Action::new(50, 7, CompressStatus::Ok),
    ]);
    let mut win = InputWindow::new(&data);
    let mut out = [0u8; 16];

    assert_eq!(s.compress_step(&mut win, &mut out, false).unwrap(), 5);
    assert_eq!((win.offset(), win.len()), (30, 70));
    assert_eq!(&out[..5], &[FILL; 5]);

    assert_eq!(s.compress_step(&mut win, &mut out, false).unwrap(), 7);
    assert_eq!((win.offset(), win.len()), (80, 20));
    assert_eq!(s.bytes_read(), 80);
    assert_eq!(s.bytes_written(), 12);
}

#[test]
fn engine_sees_window_remainder_and_full_output() {
    let data = [0u8; 40];
    let mut s = session(vec![Action::new(10, 0, CompressStatus::Ok)]);
    let mut win = InputWindow::with_bounds(&data, 5, 30).unwrap();
    let mut out = [0u8; 9];
    s.compress_step(&mut win, &mut out, true).unwrap();
    let seen = s.engine().seen[0];
    assert_eq!(seen.in_len, 30);
    assert_eq!(seen.out_len, 9);
    assert!(seen.end_of_stream);
    assert_eq!(win.offset(), 15);
}

#[test]
fn empty_input_without_end_of_stream_reaches_the_engine() {
    let mut s = session(vec![Action::new(0, 4, CompressStatus::Ok)]);
    let mut win = InputWindow::new(&[]);
    let n = s.compress_step(&mut win, &mut [0u8; 8], false).unwrap();
    assert_eq!(n, 4);
    assert_eq!(s.engine().seen.len(), 1);
    assert!(!s.is_finished());
}

#[test]
fn zero_capacity_output_returns_zero() {
    let data = [9u8; 8];
    let mut s = session(vec![Action::new(3, 10, CompressStatus::Ok)]);
    let mut win = InputWindow::new(&data);
    let n = s.compress_step(&mut win, &mut [], false).unwrap();
    assert_eq!(n, 0);
    assert_eq!(win.offset(), 3);
    assert_eq!(s.bytes_written(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Finish / reset / end
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn terminal_state_sets_finished_and_blocks_further_steps() {
    let data = [2u8; 10];
    let mut s = session(vec![Action::new(10, 3, CompressStatus::Ok).terminal()]);
    let mut win = InputWindow::new(&data);
    let mut out = [0u8; 8];
    s.compress_step(&mut win, &mut out, true).unwrap();
    assert!(s.is_finished());

    let (read, written) = (s.bytes_read(), s.bytes_written());
    let err = s.compress_step(&mut win, &mut out, true).unwrap_err();
    assert!(matches!(err, Error::Usage(UsageError::StepAfterFinish)));
    assert_eq!((s.bytes_read(), s.bytes_written()), (read, written));
    assert_eq!(s.engine().seen.len(), 1);
}

#[test]
fn reset_reinitialises_engine_and_keeps_workspace() {
    let mut s = CompressorSession::with_engine(
        ScriptedCompress::new([Action::new(1, 1, CompressStatus::Ok).terminal()]),
        1,
        2,
        3,
    )
    .unwrap();
    assert_eq!(s.engine().inits, 1);
    s.compress_step(&mut InputWindow::new(b"a"), &mut [0u8; 4], true)
        .unwrap();
    assert!(s.is_finished());

    s.reset();
    assert_eq!(s.engine().inits, 2);
    assert!(!s.is_finished());
    assert_eq!((s.bytes_read(), s.bytes_written()), (0, 0));
    assert_eq!(s.workspace_len(), LVL1_WORKSPACE);
    assert_eq!((s.level(), s.flush_mode(), s.container()), (1, 2, 3));

    s.compress_step(&mut InputWindow::new(b"b"), &mut [0u8; 4], true)
        .unwrap();
    assert_eq!(s.engine().seen[1].workspace_len, LVL1_WORKSPACE);
}

#[test]
fn caller_supplied_workspace_is_passed_through() {
    let s = CompressorSession::from_parts(
        ScriptedCompress::default(),
        DeflateState::new(2, 0, 0),
        vec![0u8; 17],
    );
    assert_eq!(s.workspace_len(), 17);
    s.end();
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn configuration_error_leaves_window_and_counters_alone() {
    let data = [3u8; 20];
    let mut s = CompressorSession::with_engine(
        ScriptedCompress::new([Action::new(7, 2, CompressStatus::InvalidFlush)]),
        0,
        9,
        0,
    )
    .unwrap();
    let mut win = InputWindow::new(&data);
    let err = s.compress_step(&mut win, &mut [0u8; 8], false).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::InvalidFlush(9))));
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert!(!err.is_retryable());
    assert_eq!((win.offset(), win.len()), (0, 20));
    assert!(!s.is_finished());
}

#[test]
fn out_of_range_cursors_are_an_engine_state_error() {
    let data = [0u8; 4];
    let mut s = session(vec![Action::new(0, 0, CompressStatus::Ok).overreport()]);
    let mut win = InputWindow::new(&data);
    let err = s.compress_step(&mut win, &mut [0u8; 4], false).unwrap_err();
    assert!(matches!(err, Error::Usage(UsageError::InvalidEngineState)));
    assert_eq!(win.offset(), 0);
}

#[test]
fn invalid_state_status_is_a_usage_error() {
    let mut s = session(vec![Action::new(0, 0, CompressStatus::InvalidState)]);
    let err = s
        .compress_step(&mut InputWindow::new(b"x"), &mut [0u8; 4], false)
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Usage);
}

#[test]
fn default_engine_rejects_bad_container_on_first_step() {
    let mut s = CompressorSession::init_raw(0, 0, 9).unwrap();
    let err = s
        .compress_step(&mut InputWindow::new(b"abc"), &mut [0u8; 64], true)
        .unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::InvalidFormat(9))));
}
