//! Operation dispatch: open the streams and run one compress or decompress pass.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::Context;

use crate::cli::args::Args;
use crate::config::CodecConfig;
use crate::displaylevel;
use crate::io::{CompressWriter, DecompressReader};

/// Byte counts of one completed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn Read>> {
    Ok(match path {
        Some(p) => Box::new(BufReader::new(
            File::open(p).with_context(|| format!("cannot open input {}", p.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    })
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("cannot create output {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Compress everything from `input` into `output`.
pub fn compress_stream<R: Read, W: Write>(
    mut input: R,
    output: W,
    config: CodecConfig,
) -> anyhow::Result<RunStats> {
    let mut writer = CompressWriter::new(output, config).context("cannot start compressor")?;
    io::copy(&mut input, &mut writer).context("compression failed")?;
    writer.try_finish().context("cannot finish compressed stream")?;
    let stats = RunStats {
        bytes_in: writer.bytes_read(),
        bytes_out: writer.bytes_written(),
    };
    writer.finish()?.flush()?;
    Ok(stats)
}

/// Decompress one stream from `input` into `output`.
pub fn decompress_stream<R: Read, W: Write>(
    input: R,
    mut output: W,
    config: CodecConfig,
) -> anyhow::Result<RunStats> {
    let mut reader = DecompressReader::with_buffer_size(input, config.container, config.buffer_size);
    let written = io::copy(&mut reader, &mut output).context("decompression failed")?;
    output.flush()?;
    if reader.remaining() > 0 {
        displaylevel!(
            2,
            "Warning : {} trailing bytes after end of stream ignored\n",
            reader.remaining()
        );
    }
    Ok(RunStats {
        bytes_in: 0,
        bytes_out: written,
    })
}

/// Run the operation `args` describes on top of `base` settings.
pub fn run(args: &Args, base: CodecConfig) -> anyhow::Result<RunStats> {
    let config = args.codec_config(base)?;
    displaylevel!(
        3,
        "{} {}: level={:?} flush={:?} container={} buffer={}\n",
        if args.decompress { "Decompressing" } else { "Compressing" },
        args.input.as_deref().unwrap_or("stdin"),
        config.level,
        config.flush,
        config.container,
        config.buffer_size
    );

    let input = open_input(args.input_path().as_deref())?;
    let output = open_output(args.output_path().as_deref())?;

    if args.decompress {
        let stats = decompress_stream(input, output, config)?;
        displaylevel!(2, "Decoded {} bytes\n", stats.bytes_out);
        Ok(stats)
    } else {
        let stats = compress_stream(input, output, config)?;
        let ratio = if stats.bytes_in == 0 {
            0.0
        } else {
            stats.bytes_out as f64 * 100.0 / stats.bytes_in as f64
        };
        displaylevel!(
            2,
            "Compressed {} bytes into {} bytes ==> {:.2}%\n",
            stats.bytes_in,
            stats.bytes_out,
            ratio
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ContainerFormat;

    #[test]
    fn compress_then_decompress_in_memory() {
        let data = b"cli pass ".repeat(500);
        let config = CodecConfig {
            container: ContainerFormat::Gzip,
            buffer_size: 512,
            ..CodecConfig::default()
        };
        let mut z = Vec::new();
        let c = compress_stream(&data[..], &mut z, config).unwrap();
        assert_eq!(c.bytes_in, data.len() as u64);
        assert_eq!(c.bytes_out, z.len() as u64);

        let mut plain = Vec::new();
        let d = decompress_stream(&z[..], &mut plain, config).unwrap();
        assert_eq!(plain, data);
        assert_eq!(d.bytes_out, data.len() as u64);
    }
}
