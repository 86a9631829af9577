//! Integration tests for the cluster service request lifecycle
//!
//! Drives activate and update through `ServiceCommands` with a minimal service kind whose
//! builder always proposes three replicas and whose rules reject negative counts.

use crate::integration::test_utils::{edit, Answer, ApiCall, FakePipelineApi, ScriptedPrompter};
use pipectl::api::{ActivateIntegratedServiceRequest, UpdateIntegratedServiceRequest};
use pipectl::error::CliError;
use pipectl::lifecycle::{RequestSource, SpecError};
use pipectl::prompt::Prompter;
use pipectl::services::{ServiceCommands, ServiceKind};
use pipectl::target::ClusterContext;
use serde_json::{json, Value};
use std::io::Cursor;
use tempfile::TempDir;

struct ReplicasService;

impl ServiceKind for ReplicasService {
    fn readable_name(&self) -> &'static str {
        "Replicas"
    }

    fn service_name(&self) -> &'static str {
        "replicas"
    }

    fn validate_spec(&self, spec: &Value) -> Result<(), SpecError> {
        match spec.get("replicas").and_then(Value::as_i64) {
            Some(n) if n >= 0 => Ok(()),
            Some(_) => Err(SpecError::new("replicas must be ≥ 0")),
            None => Err(SpecError::new("replicas is required")),
        }
    }

    fn build_activate_request(
        &self,
        _prompter: &dyn Prompter,
    ) -> Result<ActivateIntegratedServiceRequest, CliError> {
        Ok(ActivateIntegratedServiceRequest {
            spec: json!({"replicas": 3}).as_object().cloned().unwrap_or_default(),
        })
    }

    fn build_update_request(
        &self,
        _prompter: &dyn Prompter,
        request: &mut UpdateIntegratedServiceRequest,
    ) -> Result<(), CliError> {
        request.spec.insert("replicas".to_string(), json!(5));
        Ok(())
    }
}

static REPLICAS: ReplicasService = ReplicasService;

const TARGET: ClusterContext = ClusterContext {
    organization_id: 1,
    cluster_id: 7,
};

fn write_document(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("request.json");
    std::fs::write(&path, body).unwrap();
    path
}

fn no_stdin() -> Cursor<Vec<u8>> {
    Cursor::new(Vec::new())
}

#[tokio::test]
async fn test_disabled_service_stops_before_reading_the_document() {
    let api = FakePipelineApi::new().with_enabled(&["monitoring"]);
    let prompter = ScriptedPrompter::default();
    let dir = TempDir::new().unwrap();
    let file = write_document(&dir, r#"{"spec":{"replicas":1}}"#);

    let err = ServiceCommands::new(&api, &REPLICAS, TARGET)
        .activate(&RequestSource::new(Some(file), false), &prompter, &mut no_stdin())
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::ServiceNotEnabled(ref name) if name == "replicas"));
    assert_eq!(api.calls(), vec![ApiCall::ListCapabilities]);
}

#[tokio::test]
async fn test_declined_edit_submits_built_request() {
    let api = FakePipelineApi::new().with_enabled(&["replicas"]);
    let prompter = ScriptedPrompter::new(vec![Answer::Confirm(false)]);

    let report = ServiceCommands::new(&api, &REPLICAS, TARGET)
        .activate(&RequestSource::new(None, true), &prompter, &mut no_stdin())
        .await
        .unwrap();

    assert_eq!(report, "service \"Replicas\" started to activate");
    assert!(prompter.editor_sessions().is_empty());
    assert_eq!(
        api.submissions(),
        vec![ApiCall::Activate {
            org: 1,
            cluster: 7,
            service: "replicas".to_string(),
            spec: json!({"replicas": 3}),
        }]
    );
}

#[tokio::test]
async fn test_rejected_edit_reopens_editor_until_valid() {
    let api = FakePipelineApi::new().with_enabled(&["replicas"]);
    let invalid = r#"{"spec":{"replicas":-1}}"#;
    let prompter = ScriptedPrompter::new(vec![
        Answer::Confirm(true),
        edit(invalid),
        edit(r#"{"spec":{"replicas":1}}"#),
    ]);

    ServiceCommands::new(&api, &REPLICAS, TARGET)
        .activate(&RequestSource::new(None, true), &prompter, &mut no_stdin())
        .await
        .unwrap();

    let sessions = prompter.editor_sessions();
    assert_eq!(sessions.len(), 2);
    assert!(sessions[0].0.contains("\"replicas\": 3"));
    assert_eq!(sessions[0].1, None);
    assert_eq!(sessions[1].0, invalid);
    assert_eq!(sessions[1].1.as_deref(), Some("replicas must be ≥ 0"));

    let submissions = api.submissions();
    assert_eq!(submissions.len(), 1);
    assert!(matches!(
        &submissions[0],
        ApiCall::Activate { spec, .. } if *spec == json!({"replicas": 1})
    ));
    assert_eq!(prompter.remaining(), 0);
}

#[tokio::test]
async fn test_remote_rejection_is_reported_once() {
    let api = FakePipelineApi::new()
        .with_enabled(&["replicas"])
        .rejecting(409, "409 Conflict", r#"{"message":"already active"}"#);
    let prompter = ScriptedPrompter::new(vec![Answer::Confirm(false)]);

    let err = ServiceCommands::new(&api, &REPLICAS, TARGET)
        .activate(&RequestSource::new(None, true), &prompter, &mut no_stdin())
        .await
        .unwrap_err();

    match err {
        CliError::Remote { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(
                message,
                "could not activate Replicas cluster service: already active"
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(api.submissions().len(), 1);
}

#[tokio::test]
async fn test_file_document_is_submitted_without_local_validation() {
    let api = FakePipelineApi::new().with_enabled(&["replicas"]);
    let prompter = ScriptedPrompter::default();
    let dir = TempDir::new().unwrap();
    let file = write_document(&dir, r#"{"spec":{"replicas":-4}}"#);

    ServiceCommands::new(&api, &REPLICAS, TARGET)
        .activate(&RequestSource::new(Some(file), true), &prompter, &mut no_stdin())
        .await
        .unwrap();

    assert!(prompter.asked().is_empty());
    assert!(matches!(
        &api.submissions()[0],
        ApiCall::Activate { spec, .. } if *spec == json!({"replicas": -4})
    ));
}

#[tokio::test]
async fn test_standard_input_document_when_not_interactive() {
    let api = FakePipelineApi::new().with_enabled(&["replicas"]);
    let prompter = ScriptedPrompter::default();
    let mut stdin = Cursor::new(br#"{"spec":{"replicas":2}}"#.to_vec());

    ServiceCommands::new(&api, &REPLICAS, TARGET)
        .activate(&RequestSource::new(None, false), &prompter, &mut stdin)
        .await
        .unwrap();

    assert!(matches!(
        &api.submissions()[0],
        ApiCall::Activate { spec, .. } if *spec == json!({"replicas": 2})
    ));
}

#[tokio::test]
async fn test_malformed_file_is_a_structural_error() {
    let api = FakePipelineApi::new().with_enabled(&["replicas"]);
    let dir = TempDir::new().unwrap();
    let file = write_document(&dir, "{\"spec\":");

    let err = ServiceCommands::new(&api, &REPLICAS, TARGET)
        .activate(
            &RequestSource::new(Some(file), false),
            &ScriptedPrompter::default(),
            &mut no_stdin(),
        )
        .await
        .unwrap_err();

    match err {
        CliError::Structural(message) => assert!(
            message.starts_with("failed to read Replicas cluster service specification"),
            "{}",
            message
        ),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(api.submissions().is_empty());
}

#[tokio::test]
async fn test_interactive_update_is_seeded_from_current_spec() {
    let api = FakePipelineApi::new()
        .with_enabled(&["replicas"])
        .with_service("replicas", json!({"replicas": 2, "zone": "eu-1"}), "ACTIVE");
    let prompter = ScriptedPrompter::new(vec![Answer::Confirm(false)]);

    let report = ServiceCommands::new(&api, &REPLICAS, TARGET)
        .update(&RequestSource::new(None, true), &prompter, &mut no_stdin())
        .await
        .unwrap();

    assert_eq!(report, "service \"Replicas\" started to update");
    assert_eq!(
        api.calls(),
        vec![
            ApiCall::ListCapabilities,
            ApiCall::ServiceDetails {
                service: "replicas".to_string()
            },
            ApiCall::Update {
                service: "replicas".to_string(),
                spec: json!({"replicas": 5, "zone": "eu-1"}),
            },
        ]
    );
}

#[tokio::test]
async fn test_file_update_does_not_fetch_current_spec() {
    let api = FakePipelineApi::new().with_enabled(&["replicas"]);
    let dir = TempDir::new().unwrap();
    let file = write_document(&dir, r#"{"spec":{"replicas":9}}"#);

    ServiceCommands::new(&api, &REPLICAS, TARGET)
        .update(
            &RequestSource::new(Some(file), true),
            &ScriptedPrompter::default(),
            &mut no_stdin(),
        )
        .await
        .unwrap();

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::ListCapabilities,
            ApiCall::Update {
                service: "replicas".to_string(),
                spec: json!({"replicas": 9}),
            },
        ]
    );
}

#[tokio::test]
async fn test_missing_service_details_abort_update() {
    let api = FakePipelineApi::new().with_enabled(&["replicas"]);

    let err = ServiceCommands::new(&api, &REPLICAS, TARGET)
        .update(
            &RequestSource::new(None, true),
            &ScriptedPrompter::default(),
            &mut no_stdin(),
        )
        .await
        .unwrap_err();

    match err {
        CliError::Remote { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "failed to get service details: not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(api.submissions().is_empty());
}

#[tokio::test]
async fn test_deactivate_declined_leaves_service_active() {
    let api = FakePipelineApi::new().with_enabled(&["replicas"]);
    let prompter = ScriptedPrompter::new(vec![Answer::Confirm(false)]);

    let report = ServiceCommands::new(&api, &REPLICAS, TARGET)
        .deactivate(false, true, &prompter)
        .await
        .unwrap();

    assert_eq!(report, "service \"Replicas\" left active");
    assert!(api.submissions().is_empty());
}
