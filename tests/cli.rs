//! End-to-end tests for the `cabinetkit` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

fn cabinetkit_bin() -> &'static str {
    env!("CARGO_BIN_EXE_cabinetkit")
}

/// Writes a config file into `dir` so the user's own config never leaks in.
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("cabinetkit.toml");
    std::fs::write(
        &path,
        r#"
        [cabinet]
        color = "Dark Blue"
        shelf_count = 3

        [export]
        file_stem = "kitchen"
        "#,
    )
    .unwrap();
    path
}

fn run(config: &Path, args: &[&str]) -> Output {
    Command::new(cabinetkit_bin())
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute cabinetkit")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_new_then_info_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let design = dir.path().join("first.json");
    let design_arg = design.to_str().unwrap();

    let printed = stdout_of(&run(&config, &["new", "--output", design_arg]));
    assert_eq!(printed.trim(), design_arg);
    assert!(design.exists());

    let text = stdout_of(&run(&config, &["info", design_arg]));
    assert!(text.contains("Design: first.json"), "{}", text);
    assert!(text.contains("Cabinets: 1"), "{}", text);
    assert!(text.contains("Dark Blue"), "{}", text);
    assert!(text.contains("3 shelves"), "{}", text);
    assert!(text.contains("24\" x 36\" x 12\""), "{}", text);

    let json: Value = serde_json::from_str(&stdout_of(&run(
        &config,
        &["info", design_arg, "--format", "json"],
    )))
    .unwrap();
    let cabinets = json["cabinets"].as_array().unwrap();
    assert_eq!(cabinets.len(), 1);
    assert_eq!(cabinets[0]["color"], "Dark Blue");
    assert_eq!(cabinets[0]["shelfCount"], 3);
    assert_eq!(cabinets[0]["widthIn"], 24.0);
}

#[test]
fn test_new_into_directory_uses_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let printed = stdout_of(&run(
        &config,
        &["new", "--output", dir.path().to_str().unwrap()],
    ));
    let path = PathBuf::from(printed.trim());
    assert!(path.exists());
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("kitchen-"), "{}", name);
    assert!(name.ends_with(".json"), "{}", name);
}

#[test]
fn test_cost_json_follows_policy() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let design = dir.path().join("priced.json");
    let design_arg = design.to_str().unwrap();
    stdout_of(&run(&config, &["new", "--output", design_arg]));

    let frame: Value = serde_json::from_str(&stdout_of(&run(
        &config,
        &["cost", design_arg, "--format", "json"],
    )))
    .unwrap();
    assert_eq!(frame["shelves"], 45.0);
    assert_eq!(frame["finish"], 0.0);
    assert!(frame["total"].as_f64().unwrap() > frame["shelves"].as_f64().unwrap());

    let volumetric: Value = serde_json::from_str(&stdout_of(&run(
        &config,
        &["cost", design_arg, "--policy", "volumetric", "--format", "json"],
    )))
    .unwrap();
    assert_eq!(volumetric["shelves"], 0.0);
    assert!(volumetric["total"].as_f64().unwrap() > 0.0);

    let text = stdout_of(&run(&config, &["cost", design_arg]));
    assert!(text.contains("Policy: aluminum-frame"), "{}", text);
    assert!(text.contains("Shelf Cost: $45.00"), "{}", text);
}

#[test]
fn test_info_rejects_oversized_shelf_count() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let design = dir.path().join("huge.json");
    std::fs::write(
        &design,
        r#"{"version":"1.0","cabinets":[
            {"position":[0,1.5,0],"rotation":[0,0,0],"widthIn":24,"heightIn":36,
             "depthIn":12,"color":"Gray","shelfCount":4294967295,"type":"base"}
        ]}"#,
    )
    .unwrap();

    let output = run(&config, &["info", design.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load design"), "{}", stderr);
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[room]\nceiling_height_ft = -1.0\n").unwrap();

    let output = run(&config, &["new", "--output", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load config"), "{}", stderr);
}
