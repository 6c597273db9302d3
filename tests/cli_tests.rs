// Integration tests for the playbook binary
//
// Each test gets its own storage directory so drafts never leak between tests.

use std::path::Path;
use std::process::{Command, Output};

fn playbook(storage: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_playbook"))
        .arg("--storage-dir")
        .arg(storage)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("Should be able to run the playbook binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_templates_lists_catalogue() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = playbook(dir.path(), &["templates"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("email-triage"));
    assert!(text.contains("code-review"));
}

#[test]
fn test_edits_persist_between_invocations() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = playbook(dir.path(), &["study", "set", "useCaseName", "Email", "triage"]);
    assert!(output.status.success(), "{output:?}");
    assert!(dir.path().join("feasibility-study-draft.json").exists());

    let output = playbook(dir.path(), &["study", "kpi", "add", "First response time"]);
    assert!(output.status.success(), "{output:?}");

    let output = playbook(dir.path(), &["study", "render"]);
    let text = stdout(&output);
    assert!(text.contains("| Task/process | Email triage |"));
    assert!(text.contains("- First response time"));
}

#[test]
fn test_step_navigation_is_gated() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = playbook(dir.path(), &["study", "step", "4"]);
    assert!(!output.status.success());

    assert!(playbook(dir.path(), &["study", "next"]).status.success());
    let output = playbook(dir.path(), &["study", "status"]);
    assert!(stdout(&output).contains("Step 2/9: Use Case Summary"));
}

#[test]
fn test_default_risk_removal_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = playbook(dir.path(), &["study", "risk", "remove", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot be removed"));
}

#[test]
fn test_export_and_discard() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("exports");

    assert!(playbook(dir.path(), &["study", "template", "meeting-summaries"]).status.success());
    let output = playbook(
        dir.path(),
        &["study", "export", "--out", out.to_str().expect("utf-8 path")],
    );
    assert!(output.status.success(), "{output:?}");
    let exported = out.join("feasibility-study-meeting-summaries.md");
    let content = std::fs::read_to_string(exported).expect("exported file");
    assert!(content.contains("# AI Feasibility Study: Meeting summaries"));

    assert!(playbook(dir.path(), &["study", "discard"]).status.success());
    assert!(!dir.path().join("feasibility-study-draft.json").exists());
}

#[test]
fn test_roi_json_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = playbook(
        dir.path(),
        &["roi", "--hours-per-week", "10", "--people", "2", "--json"],
    );
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    // 10h * 2 people * 30%
    assert_eq!(json["weeklyHoursSaved"].as_f64(), Some(6.0));
}

#[test]
fn test_invalid_roi_input_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = playbook(dir.path(), &["roi", "--time-saved-percent", "150"]);
    assert!(!output.status.success());
}
