//! Output formatting for CLI commands.
//!
//! This module handles formatting output as either JSON or human-readable text.

use kiln::config::TlsConfig;
use kiln::patch::{EnvFileOutcome, PatchReport, TargetOutcome};

/// Print the setup report.
pub fn print_patch_report(report: &PatchReport, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(report).unwrap());
        return;
    }

    println!("App id: {}", report.app_id);
    println!();

    for target in &report.targets {
        let kind = if target.required { "required" } else { "optional" };
        let label = match &target.outcome {
            TargetOutcome::Updated => "updated".to_string(),
            TargetOutcome::Skipped(reason) => format!("skipped ({reason})"),
            TargetOutcome::Failed(reason) => format!("FAILED ({reason})"),
        };
        println!("  {:<24} {:<10} {}", target.path, kind, label);
    }

    let env_label = match &report.env_file {
        EnvFileOutcome::Created => "created".to_string(),
        EnvFileOutcome::AlreadyExists => "already exists, left alone".to_string(),
        EnvFileOutcome::Failed(reason) => format!("FAILED ({reason})"),
    };
    println!("  {:<24} {:<10} {}", "environment file", "", env_label);
    println!();

    if report.succeeded() {
        println!("Setup complete.");
    } else {
        println!("Some steps failed. Check these files manually:");
        for path in report.files_to_check() {
            println!("  - {path}");
        }
    }
}

/// Print certificate material status.
pub fn print_cert_status(tls: &TlsConfig, reused: bool, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "cert_path": tls.cert_path(),
                "key_path": tls.key_path(),
                "reused": reused,
            }))
            .unwrap()
        );
        return;
    }

    if reused {
        println!("Reusing existing certificate material.");
    } else {
        println!("Generated new certificate material.");
    }
    println!("  Certificate: {}", tls.cert_path().display());
    println!("  Private key: {}", tls.key_path().display());
}
