//! Helpers for reading and writing files.

use std::{fmt, fs, io};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use log::trace;
use serde::{de::DeserializeOwned, Serialize};


/// Creates a file at the given path, creating parent directories as needed.
pub fn create_file_with_path(path: &Path) -> Result<File, FileError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            trace!("Creating path: {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| {
                FileError::new("could not create dir", parent, e)
            })?;
        }
    }
    File::create(path).map_err(|e| {
        FileError::new("could not create file", path, e)
    })
}

/// Saves the content to the file, replacing whatever was there.
pub fn save(content: &[u8], full_path: &Path) -> Result<(), FileError> {
    let mut f = create_file_with_path(full_path)?;
    f.write_all(content).map_err(|e| {
        FileError::new("could not write to", full_path, e)
    })?;
    trace!("Saved file: {}", full_path.display());
    Ok(())
}

/// Saves an object as pretty printed JSON.
pub fn save_json<O: Serialize>(
    object: &O, full_path: &Path
) -> Result<(), FileError> {
    let json = serde_json::to_vec_pretty(object).map_err(|e| {
        FileError::new(
            "could not serialize content for", full_path,
            io::Error::new(io::ErrorKind::InvalidData, e)
        )
    })?;
    save(&json, full_path)
}

/// Reads a JSON file into an object.
///
/// Returns `Ok(None)` if there is no file.
pub fn load_json<O: DeserializeOwned>(
    full_path: &Path
) -> Result<Option<O>, FileError> {
    let bytes = match fs::read(full_path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(FileError::new("could not read", full_path, e)),
    };
    serde_json::from_slice(&bytes).map(Some).map_err(|e| {
        FileError::new(
            "could not parse JSON in", full_path,
            io::Error::new(io::ErrorKind::InvalidData, e)
        )
    })
}

/// Deletes a file. A file that is already gone is not an error.
pub fn delete_file(full_path: &Path) -> Result<(), FileError> {
    trace!("Removing file: {}", full_path.display());
    match fs::remove_file(full_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FileError::new("could not remove file", full_path, e)),
    }
}


//------------ FileError -----------------------------------------------------

#[derive(Debug)]
pub struct FileError {
    context: &'static str,
    path: PathBuf,
    cause: io::Error,
}

impl FileError {
    pub fn new(context: &'static str, path: &Path, cause: io::Error) -> Self {
        FileError { context, path: path.to_path_buf(), cause }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} '{}': {}", self.context, self.path.display(), self.cause)
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}


//============ Tests =========================================================
