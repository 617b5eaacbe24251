//! Subprocess engine for the external Python scripts.
//!
//! Handles the low-level details of staging temporary files, invoking the
//! scripts with argument arrays, bounding their execution time, and reading
//! back what they produced.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::process::Command;
use uuid::Uuid;

use super::{GenerateParams, ScriptError, ScriptRunner};
use crate::config::ScriptConfig;

/// Stderr fragments that identify a missing AI credential rather than an
/// ordinary generation failure.
const CREDENTIAL_MARKERS: [&str; 2] = ["GEMINI_API_KEY", "API key"];

/// Runs the generator and converter scripts through the configured
/// interpreter. Stateless; one subprocess per call.
pub struct PythonScriptEngine {
    config: ScriptConfig,
}

impl PythonScriptEngine {
    pub fn new(config: ScriptConfig) -> Self {
        Self { config }
    }

    /// Invoke one script with the given arguments, bounded by `timeout`.
    ///
    /// Arguments are passed as an array so nothing is ever interpreted by a
    /// shell. Stderr is logged; it only fails the call when it names a
    /// missing credential or the script exits non-zero.
    async fn run_script(
        &self,
        script: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<(), ScriptError> {
        let mut command = Command::new(&self.config.python_bin);
        command
            .arg(script)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        log::debug!("running {} {} {}", self.config.python_bin, script, args.join(" "));

        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(result) => result.map_err(|source| ScriptError::Spawn {
                script: script.to_string(),
                source,
            })?,
            Err(_) => {
                return Err(ScriptError::Timeout {
                    script: script.to_string(),
                    seconds: timeout.as_secs(),
                })
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            log::warn!("{} diagnostics: {}", script, stderr.trim());
        }
        if CREDENTIAL_MARKERS.iter().any(|marker| stderr.contains(marker)) {
            return Err(ScriptError::MissingCredential);
        }
        if !output.status.success() {
            return Err(ScriptError::Exit {
                script: script.to_string(),
                code: output.status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }

    async fn generate_into(
        &self,
        params: &GenerateParams,
        output_path: &Path,
    ) -> Result<Value, ScriptError> {
        let args = vec![
            "--name".to_string(),
            params.name.clone(),
            "--duration".to_string(),
            params.duration.to_string(),
            "--level".to_string(),
            params.level.clone(),
            "--context".to_string(),
            params.context.clone(),
            "--output".to_string(),
            output_path.to_string_lossy().into_owned(),
        ];

        self.run_script(
            &self.config.generator_script,
            &args,
            self.config.generator_timeout,
        )
        .await?;

        let raw = tokio::fs::read_to_string(output_path)
            .await
            .map_err(ScriptError::ReadOutput)?;
        serde_json::from_str(&raw).map_err(ScriptError::ParseOutput)
    }

    async fn convert_into(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<Vec<u8>, ScriptError> {
        let args = vec![
            "--input".to_string(),
            input_path.to_string_lossy().into_owned(),
            "--output".to_string(),
            output_path.to_string_lossy().into_owned(),
        ];

        self.run_script(
            &self.config.converter_script,
            &args,
            self.config.converter_timeout,
        )
        .await?;

        tokio::fs::read(output_path)
            .await
            .map_err(ScriptError::ReadOutput)
    }
}

#[async_trait]
impl ScriptRunner for PythonScriptEngine {
    async fn generate_curriculum(&self, params: &GenerateParams) -> Result<Value, ScriptError> {
        let output_path = temp_path("curriculum", "json");
        let result = self.generate_into(params, &output_path).await;
        remove_temp_file(&output_path).await;
        result
    }

    async fn convert_document(&self, document: &Value) -> Result<Vec<u8>, ScriptError> {
        let input_file = NamedTempFile::new().map_err(ScriptError::StageInput)?;
        serde_json::to_writer_pretty(input_file.as_file(), document)
            .map_err(ScriptError::EncodeInput)?;

        let output_path = temp_path("bootcamp", "docx");
        let result = self.convert_into(input_file.path(), &output_path).await;

        if let Err(e) = input_file.close() {
            log::warn!("failed to remove converter input file: {}", e);
        }
        remove_temp_file(&output_path).await;
        result
    }
}

/// Unique path in the system temp directory for a script output file.
fn temp_path(prefix: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}-{}.{}", prefix, Uuid::new_v4(), ext))
}

/// Best-effort temp file removal. Failures are logged, never surfaced.
async fn remove_temp_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("failed to remove temp file {}: {}", path.display(), e),
    }
}
