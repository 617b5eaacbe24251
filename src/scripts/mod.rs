//! External script collaborators.
//!
//! Curriculum generation and DOCX conversion are performed by opaque external
//! scripts invoked as subprocesses. The [`ScriptRunner`] trait is the seam
//! between the HTTP handlers and those processes; [`PythonScriptEngine`] is
//! the production implementation.

pub mod engine;

pub use engine::PythonScriptEngine;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while running an external script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to spawn {script}: {source}")]
    Spawn {
        script: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{script} did not finish within {seconds} seconds")]
    Timeout { script: String, seconds: u64 },
    #[error("{script} exited with status {code}")]
    Exit { script: String, code: i32 },
    #[error("generator script is missing its AI credential; set GEMINI_API_KEY in the script environment")]
    MissingCredential,
    #[error("failed to encode converter input: {0}")]
    EncodeInput(#[source] serde_json::Error),
    #[error("failed to stage converter input file: {0}")]
    StageInput(#[source] std::io::Error),
    #[error("failed to read script output: {0}")]
    ReadOutput(#[source] std::io::Error),
    #[error("script output was not valid JSON: {0}")]
    ParseOutput(#[source] serde_json::Error),
}

/// Parameters handed to the curriculum generator script.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateParams {
    pub name: String,
    pub duration: u32,
    pub level: String,
    /// Description plus any additional free-text context.
    pub context: String,
}

/// Seam for the external generator and converter processes.
#[async_trait]
pub trait ScriptRunner {
    /// Run the generator and return its parsed JSON output.
    async fn generate_curriculum(
        &self,
        params: &GenerateParams,
    ) -> Result<serde_json::Value, ScriptError>;

    /// Run the converter on a document and return the produced DOCX bytes.
    async fn convert_document(&self, document: &serde_json::Value)
        -> Result<Vec<u8>, ScriptError>;
}
