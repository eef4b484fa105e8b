//! JSON file helpers with atomic writes
//!
//! A collection file is replaced in one rename, so readers see either the
//! old array or the new one, never a half-written file.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SessionBookError;

/// What is on disk at a JSON file path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Missing,
    Valid,
    Invalid,
}

impl std::fmt::Display for FileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileState::Missing => write!(f, "not created"),
            FileState::Valid => write!(f, "ok"),
            FileState::Invalid => write!(f, "unreadable"),
        }
    }
}

/// Read a JSON file, or `T::default()` when it does not exist
pub fn read_json<T, P>(path: P) -> Result<T, SessionBookError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(SessionBookError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_str(&text).map_err(|e| {
        SessionBookError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Replace a JSON file atomically: write a sibling temp file, then rename
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SessionBookError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let mut bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| SessionBookError::Storage(format!("Failed to serialize data: {}", e)))?;
    bytes.push(b'\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SessionBookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);
    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(&bytes)?;
        file.sync_all()
    });

    if let Err(e) = written.and_then(|_| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(SessionBookError::Storage(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

/// Whether a JSON file is missing, parseable or corrupt
pub fn inspect_json<P: AsRef<Path>>(path: P) -> FileState {
    match fs::read_to_string(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => FileState::Missing,
        Err(_) => FileState::Invalid,
        Ok(text) => match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(_) => FileState::Valid,
            Err(_) => FileState::Invalid,
        },
    }
}

/// Temp file next to `path`; it must share the directory for the rename to be atomic
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
