//! The `.eval` binary container.
//!
//! ```text
//! magic        8 bytes   b"EVALLOG\x01"
//! header_len   u32 LE
//! header       deflate(JSON LogHeader)
//! sample_count u32 LE
//! sample_count x { sample_len u32 LE, deflate(JSON EvalSample) }
//! ```
//!
//! The header section comes first so a header-only read stops after it.

use crate::eval_log::codec::{LogCodec, decode_lenient, decode_strict};
use crate::eval_log::{EvalLog, EvalSample, LogError, LogHeader};
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

pub(crate) const MAGIC: &[u8; 8] = b"EVALLOG\x01";

/// Upper bound for a single compressed section (1 GiB).
const MAX_SECTION_LEN: u32 = 1 << 30;

#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryCodec;

impl BinaryCodec {
    fn open(path: &Path) -> Result<BufReader<File>, LogError> {
        let file = File::open(path).map_err(|e| LogError::io(path, e))?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 8];
        read_exact(&mut reader, &mut magic, path, "magic")?;
        if &magic != MAGIC {
            return Err(LogError::malformed(path, "not an .eval container (bad magic)"));
        }

        Ok(reader)
    }
}

impl LogCodec for BinaryCodec {
    fn read_header(&self, path: &Path) -> Result<LogHeader, LogError> {
        let mut reader = Self::open(path)?;
        let header = read_section(&mut reader, path, "header")?;
        decode_strict(path, &header)
    }

    fn read(&self, path: &Path) -> Result<EvalLog, LogError> {
        let mut reader = Self::open(path)?;
        let header = read_section(&mut reader, path, "header")?;
        let header: LogHeader = decode_lenient(path, &header)?;

        let count = read_u32(&mut reader, path, "sample count")?;
        let mut samples = Vec::with_capacity(count.min(4096) as usize);
        for _ in 0..count {
            let sample = read_section(&mut reader, path, "sample")?;
            let sample: EvalSample = decode_lenient(path, &sample)?;
            samples.push(sample);
        }

        Ok(EvalLog {
            header,
            samples: Some(samples),
        })
    }

    fn encode(&self, log: &EvalLog, path: &Path) -> Result<Vec<u8>, LogError> {
        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);

        let header = serde_json::to_vec(&log.header).map_err(|e| LogError::encode(path, e))?;
        write_section(&mut out, &header, path)?;

        let samples = log.samples.as_deref().unwrap_or_default();
        let count = u32::try_from(samples.len())
            .map_err(|_| LogError::encode(path, "too many samples for container"))?;
        out.extend_from_slice(&count.to_le_bytes());

        for sample in samples {
            let json = serde_json::to_vec(sample).map_err(|e| LogError::encode(path, e))?;
            write_section(&mut out, &json, path)?;
        }

        Ok(out)
    }
}

fn read_exact(
    reader: &mut impl Read,
    buf: &mut [u8],
    path: &Path,
    what: &str,
) -> Result<(), LogError> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => LogError::malformed(path, format!("truncated {what}")),
        _ => LogError::io(path, err),
    })
}

fn read_u32(reader: &mut impl Read, path: &Path, what: &str) -> Result<u32, LogError> {
    let mut buf = [0u8; 4];
    read_exact(reader, &mut buf, path, what)?;
    Ok(u32::from_le_bytes(buf))
}

/// Reads one length-prefixed, deflate-compressed section and returns the
/// decompressed bytes.
fn read_section(reader: &mut impl Read, path: &Path, what: &str) -> Result<Vec<u8>, LogError> {
    let len = read_u32(reader, path, what)?;
    if len > MAX_SECTION_LEN {
        return Err(LogError::malformed(
            path,
            format!("{what} section too large ({len} bytes)"),
        ));
    }

    let mut compressed = vec![0u8; len as usize];
    read_exact(reader, &mut compressed, path, what)?;

    let mut decoded = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_end(&mut decoded)
        .map_err(|err| LogError::malformed(path, format!("corrupt {what} section: {err}")))?;

    Ok(decoded)
}

fn write_section(out: &mut Vec<u8>, data: &[u8], path: &Path) -> Result<(), LogError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| LogError::encode(path, e))?;
    let compressed = encoder.finish().map_err(|e| LogError::encode(path, e))?;

    let len = u32::try_from(compressed.len())
        .ok()
        .filter(|len| *len <= MAX_SECTION_LEN)
        .ok_or_else(|| LogError::encode(path, "section exceeds container limit"))?;

    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&compressed);
    Ok(())
}
