// Independent sessions share no mutable state and can run side by side.

use rayon::prelude::*;

use streamdeflate::{
    CompressionLevel, CompressorSession, ContainerFormat, DecompressorSession, FlushMode,
    InputWindow,
};

fn payload(seed: u32, len: usize) -> Vec<u8> {
    let mut x = seed.wrapping_mul(2_654_435_761).max(1);
    (0..len)
        .map(|i| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            if i % 3 == 0 {
                b'a' + (x % 4) as u8
            } else {
                (x >> 24) as u8
            }
        })
        .collect()
}

fn compress(data: &[u8], level: CompressionLevel, container: ContainerFormat) -> Vec<u8> {
    let mut s = CompressorSession::init(level, FlushMode::None, container).unwrap();
    let mut out = Vec::new();
    let mut buf = [0u8; 97];
    for chunk in data.chunks(211) {
        let mut win = InputWindow::new(chunk);
        while !win.is_empty() {
            let n = s.compress_step(&mut win, &mut buf, false).unwrap();
            out.extend_from_slice(&buf[..n]);
        }
    }
    let mut win = InputWindow::new(&[]);
    while !s.is_finished() {
        let n = s.compress_step(&mut win, &mut buf, true).unwrap();
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(s.bytes_read(), data.len() as u64);
    assert_eq!(s.bytes_written(), out.len() as u64);
    out
}

fn decompress(z: &[u8], container: ContainerFormat) -> Vec<u8> {
    let mut s = DecompressorSession::init(container);
    let mut out = Vec::new();
    let mut buf = [0u8; 61];
    let mut win = InputWindow::new(z);
    while !s.is_finished() {
        let n = s.decompress_step(&mut win, &mut buf).unwrap();
        out.extend_from_slice(&buf[..n]);
    }
    out
}

#[test]
fn sessions_on_many_threads_do_not_interfere() {
    let containers = [
        ContainerFormat::Deflate,
        ContainerFormat::Gzip,
        ContainerFormat::GzipNoHeader,
        ContainerFormat::Zlib,
    ];
    let levels = [
        CompressionLevel::Level0,
        CompressionLevel::Level1,
        CompressionLevel::Level2,
        CompressionLevel::Level3,
    ];
    let results: Vec<bool> = (0u32..32)
        .into_par_iter()
        .map(|seed| {
            let container = containers[seed as usize % 4];
            let level = levels[(seed as usize / 4) % 4];
            let data = payload(seed, 1_000 + seed as usize * 137);
            let z = compress(&data, level, container);
            decompress(&z, container) == data
        })
        .collect();
    assert!(results.iter().all(|&ok| ok));
}
