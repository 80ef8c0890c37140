//! Locked line-oriented file access shared by both logs.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use pert_core::errors::{MalformedRecord, StorageError};
use pert_core::tracing::events;

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn lock_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::LockFailed {
        path: path.display().to_string(),
        source,
    }
}

/// Append `line` plus a newline under an exclusive lock, then flush and sync.
///
/// The line is written with a single `write_all` so concurrent readers never
/// observe a partial record.
pub(crate) fn append_line(path: &Path, line: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error(path))?;
    let mut lock = fd_lock::RwLock::new(file);
    let mut guard = lock.write().map_err(lock_error(path))?;

    let mut buf = String::with_capacity(line.len() + 1);
    buf.push_str(line);
    buf.push('\n');

    guard.write_all(buf.as_bytes()).map_err(io_error(path))?;
    guard.flush().map_err(io_error(path))?;
    guard.sync_data().map_err(io_error(path))?;
    Ok(())
}

/// Read the whole file under a shared lock. A missing file reads as `None`.
pub(crate) fn read_locked(path: &Path) -> Result<Option<String>, StorageError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path)(e)),
    };
    let lock = fd_lock::RwLock::new(file);
    let guard = lock.read().map_err(lock_error(path))?;

    let mut reader: &File = &guard;
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(io_error(path))?;
    Ok(Some(content))
}

/// Parse every non-blank line, collecting failures instead of stopping.
pub(crate) fn parse_lines<T>(
    path: &Path,
    content: &str,
    mut parse: impl FnMut(&str) -> Result<T, String>,
) -> (Vec<T>, Vec<MalformedRecord>) {
    let mut parsed = Vec::new();
    let mut malformed = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse(trimmed) {
            Ok(value) => parsed.push(value),
            Err(message) => {
                let record = MalformedRecord {
                    line: idx + 1,
                    message,
                };
                tracing::warn!(
                    event = events::RECORD_SKIPPED,
                    path = %path.display(),
                    line = record.line,
                    error = %record.message,
                    "skipping malformed line"
                );
                malformed.push(record);
            }
        }
    }

    (parsed, malformed)
}
