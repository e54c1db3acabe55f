//! Applying the identifier to project files.

use std::fs;
use std::path::Path;

use regex::NoExpand;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::SetupConfig;
use crate::error::PatchError;

use super::{AppId, CompiledTarget};

/// Outcome of one patch target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOutcome {
    /// File patched (or already carried the id)
    Updated,
    /// Optional file missing or unwritable; not a failure
    Skipped(String),
    /// Required file missing or unwritable
    Failed(String),
}

/// Report entry for one target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub path: String,
    pub required: bool,
    pub outcome: TargetOutcome,
}

/// Outcome of the environment file step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvFileOutcome {
    /// File written with the three fixed entries
    Created,
    /// An existing file is never overwritten
    AlreadyExists,
    /// Write failed; reported but not a run failure
    Failed(String),
}

/// Result of a full setup run.
#[derive(Debug, Serialize)]
pub struct PatchReport {
    pub app_id: String,
    pub targets: Vec<TargetReport>,
    pub env_file: EnvFileOutcome,
}

impl PatchReport {
    /// True iff every required target was updated.
    pub fn succeeded(&self) -> bool {
        self.targets
            .iter()
            .filter(|t| t.required)
            .all(|t| t.outcome == TargetOutcome::Updated)
    }

    /// Paths the operator should check manually after a partial failure.
    pub fn files_to_check(&self) -> Vec<&str> {
        self.targets
            .iter()
            .filter(|t| matches!(t.outcome, TargetOutcome::Failed(_)))
            .map(|t| t.path.as_str())
            .collect()
    }
}

/// Apply every configured target in order, then the environment file.
///
/// Per-target failures are captured in the report and the remaining steps
/// still run; only target compilation errors propagate.
pub fn run_setup(setup: &SetupConfig, id: &AppId) -> Result<PatchReport, PatchError> {
    let project_dir = setup.project_dir();

    let mut targets = Vec::with_capacity(setup.targets.len());
    for target_config in &setup.targets {
        let compiled = CompiledTarget::compile(target_config, id)?;
        targets.push(apply_target(&project_dir, &compiled));
    }

    let env_path = project_dir.join(&setup.env_file);
    let env_file = write_env_file(&env_path, id, &setup.dev_endpoint_url, &setup.prod_endpoint_url);

    Ok(PatchReport {
        app_id: id.to_string(),
        targets,
        env_file,
    })
}

/// Apply one target, converting every failure into the report entry.
fn apply_target(project_dir: &Path, target: &CompiledTarget) -> TargetReport {
    let path = project_dir.join(&target.path);
    let display_path = target.path.display().to_string();

    let outcome = if !path.exists() {
        if target.required {
            warn!(path = %display_path, "Required file not found");
            TargetOutcome::Failed("file not found".to_string())
        } else {
            debug!(path = %display_path, "Optional file not found, skipping");
            TargetOutcome::Skipped("file not found".to_string())
        }
    } else {
        match patch_file(&path, target) {
            Ok(()) => {
                debug!(path = %display_path, "Patched");
                TargetOutcome::Updated
            }
            Err(e) if target.required => {
                warn!(path = %display_path, "Patch failed: {e}");
                TargetOutcome::Failed(e.to_string())
            }
            Err(e) => {
                warn!(path = %display_path, "Patch failed on optional file, skipping: {e}");
                TargetOutcome::Skipped(e.to_string())
            }
        }
    };

    TargetReport {
        path: display_path,
        required: target.required,
        outcome,
    }
}

/// Literal substitution: the replacement text is inserted verbatim, with no
/// capture-group expansion.
fn patch_file(path: &Path, target: &CompiledTarget) -> std::io::Result<()> {
    let content = fs::read_to_string(path)?;
    let new_content = target
        .regex
        .replace_all(&content, NoExpand(&target.replacement));
    if new_content != content {
        fs::write(path, new_content.as_ref())?;
    }
    Ok(())
}

/// Write the environment file with its three fixed entries.
///
/// Created only if absent; an existing file is never overwritten.
pub fn write_env_file(path: &Path, id: &AppId, dev_url: &str, prod_url: &str) -> EnvFileOutcome {
    if path.exists() {
        debug!(path = %path.display(), "Environment file already exists, leaving it alone");
        return EnvFileOutcome::AlreadyExists;
    }

    let content = format!("APP_ID={id}\nDEV_ENDPOINT_URL={dev_url}\nPROD_ENDPOINT_URL={prod_url}\n");
    match fs::write(path, content) {
        Ok(()) => EnvFileOutcome::Created,
        Err(e) => {
            warn!(path = %path.display(), "Failed to write environment file: {e}");
            EnvFileOutcome::Failed(e.to_string())
        }
    }
}
