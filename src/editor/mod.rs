//! Result editor.
//!
//! Holds the most recent document (from generation or a loaded file) as an
//! editable plain-text buffer. Any edit is accepted without live validation;
//! save and convert each parse the buffer first and fail fast when it is not
//! valid JSON.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;
use thiserror::Error;

use crate::client::{ClientError, GenerationClient};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("conversion failed: {0}")]
    Convert(#[from] ClientError),
}

/// Lifecycle of the convert action. `Done` and `Failed` stay visible until
/// the caller resets the phase (after its fixed display delay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvertPhase {
    #[default]
    Idle,
    Converting,
    Done,
    Failed,
}

/// Editable view of the current bootcamp document.
#[derive(Debug, Default)]
pub struct ResultEditor {
    buffer: String,
    document: Option<Value>,
    phase: ConvertPhase,
}

impl ResultEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    pub fn phase(&self) -> ConvertPhase {
        self.phase
    }

    /// Free-text edit of the buffer. No validation happens here.
    pub fn edit(&mut self, contents: impl Into<String>) {
        self.buffer = contents.into();
    }

    /// Replace the editor contents with a freshly generated document.
    pub fn set_document(&mut self, document: Value) -> Result<(), EditorError> {
        self.buffer = serde_json::to_string_pretty(&document)?;
        self.document = Some(document);
        Ok(())
    }

    /// Load a user-selected JSON file, replacing both the buffer and the
    /// in-memory value. A read or parse failure leaves the previous state
    /// untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), EditorError> {
        let raw = fs::read_to_string(path).map_err(|source| EditorError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let document: Value = serde_json::from_str(&raw)?;
        self.buffer = raw;
        self.document = Some(document);
        log::info!("Loaded bootcamp document from {}", path.display());
        Ok(())
    }

    /// Parse the buffer, re-serialize it indented, and write it to a
    /// timestamp-named JSON file in `dir`. Returns the written path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, EditorError> {
        let value: Value = serde_json::from_str(&self.buffer)?;
        let pretty = serde_json::to_string_pretty(&value)?;
        let path = dir.join(download_name("json"));
        fs::write(&path, pretty).map_err(|source| EditorError::Write {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Saved bootcamp JSON to {}", path.display());
        Ok(path)
    }

    /// Parse the buffer, run it through the conversion endpoint, and write
    /// the DOCX bytes to a timestamp-named file in `dir`.
    ///
    /// A parse failure aborts before the phase leaves `Idle`; conversion and
    /// write failures leave the phase at `Failed`.
    pub async fn convert_with(
        &mut self,
        client: &GenerationClient,
        dir: &Path,
    ) -> Result<PathBuf, EditorError> {
        let value: Value = serde_json::from_str(&self.buffer)?;

        self.phase = ConvertPhase::Converting;
        let bytes = match client.convert(&value).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.phase = ConvertPhase::Failed;
                return Err(e.into());
            }
        };

        let path = dir.join(download_name("docx"));
        if let Err(source) = fs::write(&path, &bytes) {
            self.phase = ConvertPhase::Failed;
            return Err(EditorError::Write {
                path: path.display().to_string(),
                source,
            });
        }

        self.phase = ConvertPhase::Done;
        log::info!("Saved DOCX to {}", path.display());
        Ok(path)
    }

    /// Return the convert button to its idle state.
    pub fn reset_phase(&mut self) {
        self.phase = ConvertPhase::Idle;
    }
}

/// Timestamped download filename, e.g. `bootcamp-20260807-143000.json`.
fn download_name(ext: &str) -> String {
    format!("bootcamp-{}.{}", Local::now().format("%Y%m%d-%H%M%S"), ext)
}
