//! Patch target compilation.

use std::path::PathBuf;

use regex::Regex;

use crate::config::PatchTargetConfig;
use crate::error::PatchError;

use super::AppId;

/// A target with its pattern compiled and the id substituted into the
/// replacement text.
#[derive(Debug)]
pub struct CompiledTarget {
    /// Path relative to the project directory
    pub path: PathBuf,
    /// Pattern matched against the file contents
    pub regex: Regex,
    /// Replacement text with the id already inserted
    pub replacement: String,
    /// Whether a missing file fails the run
    pub required: bool,
}

impl CompiledTarget {
    /// Compile a configured target for a specific id.
    pub fn compile(config: &PatchTargetConfig, id: &AppId) -> Result<Self, PatchError> {
        if !config.replacement.contains("{app_id}") {
            return Err(PatchError::BadReplacement {
                path: config.path.clone(),
            });
        }
        let regex = Regex::new(&config.pattern).map_err(|source| PatchError::BadPattern {
            pattern: config.pattern.clone(),
            source,
        })?;
        Ok(Self {
            path: PathBuf::from(&config.path),
            regex,
            replacement: config.replacement.replace("{app_id}", id.as_str()),
            required: config.required,
        })
    }
}
