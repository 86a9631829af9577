//! Integration tests for cluster group deployment commands

use crate::integration::test_utils::{
    execute, input, run_context, Answer, ApiCall, FakePipelineApi, ScriptedPrompter,
};
use pipectl::api::DeploymentInfo;
use pipectl::error::CliError;
use serde_json::json;
use tempfile::TempDir;

fn web_deployment() -> DeploymentInfo {
    DeploymentInfo {
        release_name: "web".to_string(),
        chart: "stable/nginx".to_string(),
        chart_version: "1.2.3".to_string(),
        namespace: "apps".to_string(),
        values: json!({"replicaCount": 2}).as_object().cloned().unwrap(),
        updated_at: "2026-10-01T12:00:00Z".to_string(),
        ..DeploymentInfo::default()
    }
}

#[test]
fn test_create_from_file() {
    let api = FakePipelineApi::new();
    let prompter = ScriptedPrompter::default();
    let context = run_context(&api, &prompter, true);
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("deployment.json");
    std::fs::write(
        &file,
        r#"{"releaseName":"web","name":"stable/nginx","values":{"replicaCount":1}}"#,
    )
    .unwrap();

    let output = execute(
        &context,
        &[
            "clustergroup",
            "deployment",
            "create",
            "--cluster-group-id",
            "4",
            "-f",
            file.to_str().unwrap(),
        ],
        "",
    )
    .unwrap();

    assert_eq!(output, "deployment \"web\" created");
    assert!(prompter.asked().is_empty());
    match &api.submissions()[..] {
        [ApiCall::CreateDeployment { group, deployment }] => {
            assert_eq!(*group, 4);
            assert_eq!(deployment["releaseName"], json!("web"));
            assert_eq!(deployment["values"]["replicaCount"], json!(1));
        }
        other => panic!("unexpected submissions: {:?}", other),
    }
}

#[test]
fn test_interactive_create_gates_edited_deployment() {
    let api = FakePipelineApi::new();
    let prompter = ScriptedPrompter::new(vec![
        input("web"),
        input("stable/nginx"),
        input(""),
        input(""),
        input(""),
        Answer::Confirm(false),
        Answer::Confirm(false),
        Answer::Confirm(true),
        Answer::Edit(Some(r#"{"releaseName":"web","name":"","timeout":-1}"#.to_string())),
        Answer::Edit(Some(r#"{"releaseName":"web","name":"stable/nginx"}"#.to_string())),
    ]);
    let context = run_context(&api, &prompter, true);

    let output = execute(
        &context,
        &["clustergroup", "deployment", "create", "--cluster-group-id", "4"],
        "",
    )
    .unwrap();

    assert_eq!(output, "deployment \"web\" created");
    let sessions = prompter.editor_sessions();
    assert_eq!(sessions.len(), 2);
    assert_eq!(
        sessions[1].1.as_deref(),
        Some("name: chart reference must not be empty")
    );
    assert_eq!(api.submissions().len(), 1);
}

#[test]
fn test_interactive_update_is_seeded_from_current_deployment() {
    let api = FakePipelineApi::new().with_deployment(web_deployment());
    let prompter = ScriptedPrompter::new(vec![
        input(""),
        input("1.3.0"),
        input("apps"),
        input(""),
        Answer::Confirm(true),
        Answer::Confirm(false),
        Answer::Confirm(false),
        Answer::Confirm(false),
    ]);
    let context = run_context(&api, &prompter, true);

    let output = execute(
        &context,
        &["clustergroup", "deployment", "update", "web", "--cluster-group-id", "4"],
        "",
    )
    .unwrap();

    assert_eq!(output, "deployment \"web\" updated");
    assert_eq!(prompter.remaining(), 0);
    let calls = api.calls();
    assert_eq!(
        calls[0],
        ApiCall::GetDeployment {
            name: "web".to_string()
        }
    );
    match &calls[1] {
        ApiCall::UpdateDeployment { name, deployment } => {
            assert_eq!(name, "web");
            assert_eq!(deployment["name"], json!("stable/nginx"));
            assert_eq!(deployment["version"], json!("1.3.0"));
            assert_eq!(deployment["namespace"], json!("apps"));
            assert_eq!(deployment["values"]["replicaCount"], json!(2));
            assert_eq!(deployment["reUseValues"], json!(true));
        }
        other => panic!("unexpected call: {:?}", other),
    }
}

#[test]
fn test_delete_requires_confirmation_when_not_interactive() {
    let api = FakePipelineApi::new().with_deployment(web_deployment());
    let context = run_context(&api, &ScriptedPrompter::default(), false);

    let err = execute(
        &context,
        &["clustergroup", "deployment", "delete", "web", "--cluster-group-id", "4"],
        "",
    )
    .unwrap_err();
    assert!(matches!(err, CliError::Usage(_)));
    assert!(api.submissions().is_empty());

    let output = execute(
        &context,
        &[
            "clustergroup",
            "deployment",
            "delete",
            "web",
            "--cluster-group-id",
            "4",
            "--yes",
            "--force-delete",
        ],
        "",
    )
    .unwrap();
    assert!(output.starts_with("deployment \"web\" deleted"));
    assert!(output.contains("DELETED"));
    assert_eq!(
        api.submissions(),
        vec![ApiCall::DeleteDeployment {
            name: "web".to_string(),
            force: true
        }]
    );
}

#[test]
fn test_delete_declined_keeps_deployment() {
    let api = FakePipelineApi::new().with_deployment(web_deployment());
    let prompter = ScriptedPrompter::new(vec![Answer::Confirm(false)]);
    let context = run_context(&api, &prompter, true);

    let output = execute(
        &context,
        &["clustergroup", "deployment", "rm", "web", "--cluster-group-id", "4"],
        "",
    )
    .unwrap();
    assert_eq!(output, "deployment \"web\" kept");
    assert!(api.submissions().is_empty());
}

#[test]
fn test_sync_reports_member_statuses() {
    let api = FakePipelineApi::new().with_deployment(web_deployment());
    let context = run_context(&api, &ScriptedPrompter::default(), false);

    let output = execute(
        &context,
        &["clustergroup", "deployment", "sync", "web", "--cluster-group-id", "4"],
        "",
    )
    .unwrap();
    assert!(output.starts_with("deployment \"web\" synchronized"));
    assert!(output.contains("SUCCEEDED"));
}

#[test]
fn test_get_and_list() {
    let api = FakePipelineApi::new().with_deployment(web_deployment());
    let context = run_context(&api, &ScriptedPrompter::default(), false);

    let output = execute(
        &context,
        &["clustergroup", "deployment", "get", "web", "--cluster-group-id", "4"],
        "",
    )
    .unwrap();
    assert!(output.starts_with("Release:   web"));

    let output = execute(
        &context,
        &["clustergroup", "deployment", "list", "--cluster-group-id", "4", "--format", "json"],
        "",
    )
    .unwrap();
    let listed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(listed[0]["releaseName"], json!("web"));
    assert_eq!(listed[0]["chartName"], json!("stable/nginx"));

    let err = execute(
        &context,
        &["clustergroup", "deployment", "get", "api", "--cluster-group-id", "4"],
        "",
    )
    .unwrap_err();
    assert!(matches!(err, CliError::Remote { status: 404, .. }));
}
