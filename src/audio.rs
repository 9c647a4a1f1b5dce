//! PCM persistence. The API returns raw 16-bit linear PCM; previews and
//! synthesis output are written as WAV through `hound`, or passed through
//! untouched for raw PCM output.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// WAV header parameters. The API always answers with mono 24 kHz 16-bit
/// samples; callers may override channel count and rate for resampled
/// output paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioEncoding {
    pub channels: u16,
    pub sample_rate: u32,
}

impl Default for AudioEncoding {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 24_000,
        }
    }
}

/// Writes PCM bytes under a WAV header. Whole-file write: open, truncate,
/// write, close.
pub fn write_wav(path: &Path, pcm: &[u8], encoding: &AudioEncoding) -> Result<()> {
    let spec = hound::WavSpec {
        channels: encoding.channels,
        sample_rate: encoding.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for sample in pcm.chunks_exact(2) {
        writer.write_sample(i16::from_le_bytes([sample[0], sample[1]]))?;
    }
    writer.finalize()?;
    Ok(())
}

/// Raw PCM passthrough.
pub fn write_pcm(path: &Path, pcm: &[u8]) -> Result<()> {
    fs::write(path, pcm)?;
    Ok(())
}

/// Durable-storage seam for the preview cache. File existence is the sole
/// source of truth for "already generated".
pub trait Storage: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn persist(&self, path: &Path, pcm: &[u8], encoding: &AudioEncoding) -> Result<()>;
}

pub struct DiskStorage;

impl Storage for DiskStorage {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn persist(&self, path: &Path, pcm: &[u8], encoding: &AudioEncoding) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        write_wav(path, pcm, encoding)
    }
}
