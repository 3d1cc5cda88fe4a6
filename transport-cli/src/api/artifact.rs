//! Write-once archive of raw API responses.
//!
//! Every response body the client receives is dumped, pretty-printed, to a
//! file named after the Unix time at which it was written. Files are never
//! rewritten or evicted.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use super::error::ApiError;

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_RESPONSES_DIR: &str = "responses";

/// Directory of response artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a payload to a new file and return its path.
    ///
    /// Creates the directory if needed. If a file with the same timestamp
    /// already exists, a `-N` suffix is added rather than overwriting it.
    pub fn save(&self, payload: &Value) -> Result<PathBuf, ApiError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ApiError::Artifact {
            path: self.dir.clone(),
            source,
        })?;

        let stem = timestamp_stem(SystemTime::now());
        let (path, file) = self.create_unique(&stem)?;

        write_pretty(file, payload).map_err(|source| ApiError::Artifact {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    fn create_unique(&self, stem: &str) -> Result<(PathBuf, File), ApiError> {
        let mut attempt = 0u32;
        loop {
            let name = match attempt {
                0 => format!("{stem}.json"),
                n => format!("{stem}-{n}.json"),
            };
            let path = self.dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => return Err(ApiError::Artifact { path, source }),
            }
        }
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_RESPONSES_DIR)
    }
}

fn write_pretty(file: File, payload: &Value) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, payload)?;
    writer.flush()
}

/// Seconds since the epoch with a microsecond fraction, e.g. `1760860800.123456`.
fn timestamp_stem(now: SystemTime) -> String {
    let elapsed = now.duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("{}.{:06}", elapsed.as_secs(), elapsed.subsec_micros())
}
