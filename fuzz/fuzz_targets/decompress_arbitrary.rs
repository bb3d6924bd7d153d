#![no_main]
use libfuzzer_sys::fuzz_target;

use streamdeflate::{ContainerFormat, DecompressorSession, InputWindow};

// Arbitrary bytes must never panic; errors are expected and fine.
fuzz_target!(|input: &[u8]| {
    let Some((&selector, data)) = input.split_first() else {
        return;
    };
    let container = ContainerFormat::from_code(u32::from(selector & 3)).unwrap_or_default();
    let chunk = usize::from(selector >> 2) + 1;

    let mut s = DecompressorSession::init(container);
    let mut out = [0u8; 1024];
    let mut pos = 0;
    while !s.is_finished() && pos < data.len() {
        let end = (pos + chunk).min(data.len());
        let mut win = InputWindow::new(&data[pos..end]);
        match s.decompress_step(&mut win, &mut out) {
            Ok(n) => {
                if n == 0 && win.offset() == 0 {
                    break;
                }
                pos += win.offset();
            }
            Err(_) => break,
        }
    }
});
