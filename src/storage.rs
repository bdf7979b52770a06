//! Transient slot holding the last test result between screens.
//!
//! One writer (test submission), one reader (result screen entry), cleared
//! on retake.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::models::TestResult;

/// Storage key of the stored result.
pub const RESULT_KEY: &str = "testResult";

pub trait ResultSlot {
    fn store(&mut self, result: &TestResult) -> Result<(), StorageError>;

    /// `Ok(None)` when nothing is stored.
    fn load(&self) -> Result<Option<TestResult>, StorageError>;

    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Keeps the encoded result in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSlot for MemorySlot {
    fn store(&mut self, result: &TestResult) -> Result<(), StorageError> {
        self.value = Some(serde_json::to_string(result)?);
        Ok(())
    }

    fn load(&self) -> Result<Option<TestResult>, StorageError> {
        match &self.value {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.value = None;
        Ok(())
    }
}

/// Stores the encoded result as `<dir>/testResult.json`.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", RESULT_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSlot for FileSlot {
    fn store(&mut self, result: &TestResult) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec(result)?)?;
        tracing::debug!(path = %self.path.display(), "stored test result");
        Ok(())
    }

    fn load(&self) -> Result<Option<TestResult>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
