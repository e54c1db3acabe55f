//! Identifier substitution across project files.
//!
//! Patches a platform-issued app id into a fixed set of project files using
//! literal-pattern replacement, and writes the environment file on first run.

mod app_id;
mod apply;
mod targets;

pub use app_id::AppId;
pub use apply::{
    run_setup, write_env_file, EnvFileOutcome, PatchReport, TargetOutcome, TargetReport,
};
pub use targets::CompiledTarget;
