#![no_main]
use libfuzzer_sys::fuzz_target;

use streamdeflate::{
    CompressionLevel, CompressorSession, ContainerFormat, DecompressorSession, FlushMode,
    InputWindow,
};

fuzz_target!(|input: &[u8]| {
    // First two bytes pick the configuration and window sizes.
    let (cfg, data) = match input {
        [a, b, rest @ ..] => ((*a, *b), rest),
        _ => return,
    };
    let level = CompressionLevel::from_code(u32::from(cfg.0 & 3)).unwrap_or_default();
    let flush = FlushMode::from_code(u32::from((cfg.0 >> 2) % 3)).unwrap_or_default();
    let container = ContainerFormat::from_code(u32::from((cfg.0 >> 4) & 3)).unwrap_or_default();
    let in_chunk = usize::from(cfg.1 >> 4) + 1;
    let out_chunk = usize::from(cfg.1 & 0x0f) * 16 + 1;

    let mut c = CompressorSession::init(level, flush, container).unwrap();
    let mut z = Vec::new();
    let mut buf = vec![0u8; out_chunk];
    let mut pos = 0;
    while !c.is_finished() {
        let end = (pos + in_chunk).min(data.len());
        let mut win = InputWindow::new(&data[pos..end]);
        let n = c.compress_step(&mut win, &mut buf, end == data.len()).unwrap();
        z.extend_from_slice(&buf[..n]);
        pos += win.offset();
    }
    assert_eq!(c.bytes_read(), data.len() as u64);

    let mut d = DecompressorSession::init(container);
    let mut win = InputWindow::new(&z);
    let mut plain = Vec::new();
    while !d.is_finished() {
        let n = d
            .decompress_step(&mut win, &mut buf)
            .unwrap_or_else(|e| panic!("self-compressed stream rejected: {e}"));
        plain.extend_from_slice(&buf[..n]);
    }
    assert_eq!(plain, data, "{} bytes in, {} bytes back", data.len(), plain.len());
});
