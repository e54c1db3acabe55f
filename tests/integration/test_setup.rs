//! End-to-end setup pipeline tests.

use std::fs;

use tempfile::TempDir;

use kiln::config::Config;
use kiln::patch::{run_setup, AppId, EnvFileOutcome, TargetOutcome};

const APP_ID: &str = "2008275057-VqJkXjxy";

/// Helper to create a test configuration rooted in a temp dir.
fn create_test_config(project_dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.setup.project_dir = project_dir.display().to_string();
    config
}

/// Lay out a project with every default target present.
fn create_full_project(dir: &TempDir) {
    fs::write(
        dir.path().join("index.html"),
        r#"<!DOCTYPE html>
<html>
<body>
<script>
    platform.init({ appId: 'YOUR-APP-ID' }).then(main);
</script>
</body>
</html>
"#,
    )
    .unwrap();

    fs::create_dir_all(dir.path().join("js")).unwrap();
    fs::write(
        dir.path().join("js/app-init.js"),
        r#"const APP_ID = "YOUR-APP-ID";

export function appId() {
    return APP_ID;
}
"#,
    )
    .unwrap();

    fs::write(
        dir.path().join("preview.html"),
        "<script>platform.init({ appId: 'YOUR-APP-ID' });</script>",
    )
    .unwrap();
}

#[test]
fn test_full_project_setup() {
    let dir = TempDir::new().unwrap();
    create_full_project(&dir);
    let config = create_test_config(dir.path());
    let id = AppId::parse(APP_ID).unwrap();

    let report = run_setup(&config.setup, &id).unwrap();

    assert!(report.succeeded());
    assert!(report
        .targets
        .iter()
        .all(|t| t.outcome == TargetOutcome::Updated));
    assert_eq!(report.env_file, EnvFileOutcome::Created);

    let html = fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains("appId: '2008275057-VqJkXjxy'"));
    assert!(!html.contains("YOUR-APP-ID"));

    let preview = fs::read_to_string(dir.path().join("preview.html")).unwrap();
    assert!(preview.contains("appId: '2008275057-VqJkXjxy'"));

    let env = fs::read_to_string(dir.path().join(".env")).unwrap();
    assert!(env.starts_with("APP_ID=2008275057-VqJkXjxy\n"));
    assert!(env.contains("DEV_ENDPOINT_URL="));
    assert!(env.contains("PROD_ENDPOINT_URL="));
}

#[test]
fn test_setup_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    create_full_project(&dir);
    let config = create_test_config(dir.path());
    let id = AppId::parse(APP_ID).unwrap();

    run_setup(&config.setup, &id).unwrap();
    let snapshot: Vec<String> = ["index.html", "js/app-init.js", "preview.html", ".env"]
        .iter()
        .map(|p| fs::read_to_string(dir.path().join(p)).unwrap())
        .collect();

    let report = run_setup(&config.setup, &id).unwrap();
    assert!(report.succeeded());

    for (path, before) in ["index.html", "js/app-init.js", "preview.html", ".env"]
        .iter()
        .zip(&snapshot)
    {
        let after = fs::read_to_string(dir.path().join(path)).unwrap();
        assert_eq!(&after, before, "{path} changed on second run");
    }
}

#[test]
fn test_optional_target_absent_still_succeeds() {
    let dir = TempDir::new().unwrap();
    create_full_project(&dir);
    fs::remove_file(dir.path().join("preview.html")).unwrap();

    let config = create_test_config(dir.path());
    let id = AppId::parse(APP_ID).unwrap();

    let report = run_setup(&config.setup, &id).unwrap();
    assert!(report.succeeded());
    assert!(report.files_to_check().is_empty());
}

#[test]
fn test_required_target_absent_reports_failure() {
    let dir = TempDir::new().unwrap();
    create_full_project(&dir);
    fs::remove_file(dir.path().join("index.html")).unwrap();

    let config = create_test_config(dir.path());
    let id = AppId::parse(APP_ID).unwrap();

    let report = run_setup(&config.setup, &id).unwrap();
    assert!(!report.succeeded());
    assert_eq!(report.files_to_check(), vec!["index.html"]);

    // Other steps still ran
    let js = fs::read_to_string(dir.path().join("js/app-init.js")).unwrap();
    assert!(js.contains(APP_ID));
    assert!(dir.path().join(".env").exists());
}

#[test]
fn test_custom_targets_from_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.xml"), r#"<appId value="old"/>"#).unwrap();

    let toml = format!(
        r#"
        [setup]
        project_dir = "{}"

        [[setup.targets]]
        path = "settings.xml"
        pattern = 'appId value="[^"]*"'
        replacement = 'appId value="{{app_id}}"'
        required = true
        "#,
        dir.path().display()
    );
    let config = Config::from_str(&toml).unwrap();
    let id = AppId::parse(APP_ID).unwrap();

    let report = run_setup(&config.setup, &id).unwrap();
    assert!(report.succeeded());

    let xml = fs::read_to_string(dir.path().join("settings.xml")).unwrap();
    assert_eq!(xml, r#"<appId value="2008275057-VqJkXjxy"/>"#);
}
