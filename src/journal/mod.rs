use crate::error::TrackerError;
use crate::models::ActivitySample;
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One configured candidate location for the activity log: either a single
/// path, or an ordered list of alternatives where the first that opens wins.
#[derive(Debug, Clone)]
pub enum Target {
    Path(PathBuf),
    PathList(Vec<PathBuf>),
}

/// Append-only JSON Lines writer for activity samples.
///
/// Candidates are tried in order on `open`; the first path that can be
/// opened for appending becomes the bound destination. Each `write` emits
/// one complete line and flushes immediately, so a record survives abrupt
/// process termination right after the call returns. Dropping the writer
/// flushes and closes any bound stream.
pub struct JournalWriter {
    targets: Vec<Target>,
    resolved: Option<PathBuf>,
    stream: Option<File>,
}

impl JournalWriter {
    pub fn new(targets: Vec<Target>) -> Self {
        Self {
            targets,
            resolved: None,
            stream: None,
        }
    }

    /// True iff a stream is currently bound; writes are only valid while open.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// The path the writer is bound to, or `None` if never successfully opened.
    pub fn resolved_path(&self) -> Option<&Path> {
        self.resolved.as_deref()
    }

    /// Try each target in order (and each path within a `PathList` in order)
    /// until one opens; the first success across the flattened search binds
    /// the stream and returns the resolved path. Exhausting every candidate
    /// returns `NoWritableTarget` and leaves the writer closed and reusable.
    ///
    /// Opening an already-open writer is a no-op.
    pub fn open(&mut self) -> Result<&Path, TrackerError> {
        if self.is_open() {
            return self.resolved_path().ok_or(TrackerError::NoWritableTarget);
        }

        let mut bound = None;
        for target in &self.targets {
            bound = match target {
                Target::Path(path) => try_open(path),
                Target::PathList(paths) => paths.iter().find_map(|path| try_open(path)),
            };
            if bound.is_some() {
                break;
            }
        }

        match bound {
            Some((stream, path)) => {
                self.stream = Some(stream);
                self.resolved = Some(path);
                self.resolved_path().ok_or(TrackerError::NoWritableTarget)
            }
            None => Err(TrackerError::NoWritableTarget),
        }
    }

    /// Serialize the sample and append it as one newline-terminated record,
    /// flushing before returning. Fails with `JournalNotOpen` if no stream
    /// is bound.
    pub fn write(&mut self, sample: &ActivitySample) -> Result<(), TrackerError> {
        let stream = self.stream.as_mut().ok_or(TrackerError::JournalNotOpen)?;

        let mut line = sample.to_json_line();
        line.push('\n');
        stream.write_all(line.as_bytes())?;
        stream.flush()?;
        Ok(())
    }
}

/// Attempt one candidate. Any failure (empty path, parent directory
/// creation error, open error) reports `None` so the search moves on
/// without leaving partial state behind.
fn try_open(candidate: &Path) -> Option<(File, PathBuf)> {
    if candidate.as_os_str().is_empty() {
        return None;
    }

    if let Some(parent) = candidate.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(err) = fs::create_dir_all(parent) {
            debug!("skipping journal candidate {}: {err}", candidate.display());
            return None;
        }
    }

    // Append mode: existing records are never truncated.
    match OpenOptions::new().append(true).create(true).open(candidate) {
        Ok(file) => Some((file, candidate.to_path_buf())),
        Err(err) => {
            debug!("skipping journal candidate {}: {err}", candidate.display());
            None
        }
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.flush();
        }
    }
}
