//! Deployment configuration for the external script collaborators.
//!
//! The interpreter path, script locations and timeout bounds are deployment
//! concerns, so they are read from the environment with working defaults.

use std::env;
use std::time::Duration;

/// Configuration for invoking the generator and converter scripts.
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    /// Interpreter used to run both scripts.
    pub python_bin: String,
    /// Path to the curriculum generator script.
    pub generator_script: String,
    /// Path to the DOCX converter script.
    pub converter_script: String,
    /// Upper bound on generator execution time.
    pub generator_timeout: Duration,
    /// Upper bound on converter execution time.
    pub converter_timeout: Duration,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            python_bin: "python3".to_string(),
            generator_script: "scripts/generate_curriculum.py".to_string(),
            converter_script: "scripts/convert_to_docx.py".to_string(),
            generator_timeout: Duration::from_secs(300),
            converter_timeout: Duration::from_secs(60),
        }
    }
}

impl ScriptConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            python_bin: env::var("PYTHON_BIN").unwrap_or(default.python_bin),
            generator_script: env::var("GENERATOR_SCRIPT").unwrap_or(default.generator_script),
            converter_script: env::var("CONVERTER_SCRIPT").unwrap_or(default.converter_script),
            generator_timeout: env::var("GENERATOR_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default.generator_timeout),
            converter_timeout: env::var("CONVERTER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default.converter_timeout),
        }
    }
}
