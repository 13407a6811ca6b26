//! Incremental line reader for a file that is being appended to.
//!
//! `FileTailer` remembers how many bytes it has consumed and only ever returns
//! complete lines that appeared after that point.

use crate::error::{Result, TaildiffError};
use crate::file_handler::validation::validate_file_path;
use async_trait::async_trait;
use log::{debug, warn};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const READ_CHUNK: usize = 64 * 1024;

/// Source of lines newly available since the previous call.
#[async_trait]
pub trait LineSupplier: Send {
    /// Return the complete lines appended since the last call. Never returns a
    /// line twice. Stops early, keeping the unread remainder for the next
    /// call, once `cancel` is set.
    async fn read_new_lines(&mut self, cancel: &Arc<AtomicBool>) -> Result<Vec<String>>;

    /// Path of the followed file
    fn path(&self) -> &Path;
}

/// Follows one file by byte offset.
#[derive(Debug)]
pub struct FileTailer {
    path: PathBuf,
    position: u64,
    pending: Vec<u8>,
}

/// What one blocking read produced.
struct Chunk {
    bytes: Vec<u8>,
    start: u64,
    truncated: bool,
}

impl FileTailer {
    /// Create a tailer positioned at the start of `path`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        validate_file_path(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            position: 0,
            pending: Vec::new(),
        })
    }

    /// Bytes consumed so far, including a held-back partial line.
    pub fn position(&self) -> u64 {
        self.position
    }

    fn read_from(path: &Path, position: u64, cancel: &AtomicBool) -> Result<Chunk> {
        let mut file = File::open(path)
            .map_err(|e| TaildiffError::file_error(format!("Cannot open {}", path.display()), e))?;
        let len = file
            .metadata()
            .map_err(|e| TaildiffError::file_error("Failed to read file metadata", e))?
            .len();

        let (start, truncated) = if len < position {
            (0, true)
        } else {
            (position, false)
        };

        file.seek(SeekFrom::Start(start))?;
        let mut bytes = Vec::with_capacity((len - start).min(READ_CHUNK as u64 * 16) as usize);
        let mut chunk = vec![0u8; READ_CHUNK];
        while !cancel.load(Ordering::Relaxed) {
            let read = file.read(&mut chunk)?;
            if read == 0 {
                break;
            }
            bytes.extend_from_slice(&chunk[..read]);
        }

        Ok(Chunk {
            bytes,
            start,
            truncated,
        })
    }
}

#[async_trait]
impl LineSupplier for FileTailer {
    async fn read_new_lines(&mut self, cancel: &Arc<AtomicBool>) -> Result<Vec<String>> {
        if cancel.load(Ordering::Relaxed) {
            return Ok(Vec::new());
        }

        let path = self.path.clone();
        let position = self.position;
        let flag = Arc::clone(cancel);
        let chunk = tokio::task::spawn_blocking(move || FileTailer::read_from(&path, position, &flag))
            .await
            .map_err(|e| TaildiffError::other(format!("Tail read task failed: {e}")))??;

        if chunk.truncated {
            warn!(
                "{} shrank below offset {}, reading from the start",
                self.path.display(),
                self.position
            );
            self.pending.clear();
        }

        self.position = chunk.start + chunk.bytes.len() as u64;
        let lines = split_lines(&mut self.pending, &chunk.bytes);
        if !lines.is_empty() {
            debug!("Read {} new lines from {}", lines.len(), self.path.display());
        }
        Ok(lines)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Split `data` into complete lines, prefixing whatever partial line is held in
/// `pending`. A trailing unterminated line is left in `pending`.
pub fn split_lines(pending: &mut Vec<u8>, data: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line_start = 0;

    for newline in memchr::memchr_iter(b'\n', data) {
        let mut line = &data[line_start..newline];
        let owned;
        if !pending.is_empty() {
            pending.extend_from_slice(line);
            owned = std::mem::take(pending);
            line = &owned;
        }
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        lines.push(String::from_utf8_lossy(line).into_owned());
        line_start = newline + 1;
    }

    pending.extend_from_slice(&data[line_start..]);
    lines
}
