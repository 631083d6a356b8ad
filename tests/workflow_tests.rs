//! Integration tests for the compile workflow against a mock service.
//!
//! These drive the real `WorkflowController` and `SessionStore` over HTTP,
//! with wiremock standing in for the compile service.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use minic_lib::compile::CompileClient;
use minic_lib::runtime::{MinicRuntime, RuntimeError, RuntimeEvent};
use minic_lib::session::{store, CompileStatus, SessionEvent, SessionStore, WorkflowController};

/// Captures emitted events on a channel for assertions.
struct ChannelRuntime {
    tx: mpsc::UnboundedSender<RuntimeEvent>,
}

#[async_trait]
impl MinicRuntime for ChannelRuntime {
    fn emit(&self, event: RuntimeEvent) -> Result<(), RuntimeError> {
        self.tx.send(event).map_err(|_| RuntimeError::ReceiverClosed)
    }

    fn is_interactive(&self) -> bool {
        false
    }

    async fn shutdown(&self) -> Result<(), RuntimeError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn controller_for(
    endpoint: &str,
) -> (
    Arc<WorkflowController>,
    mpsc::UnboundedReceiver<RuntimeEvent>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let store = Arc::new(SessionStore::new());
    let client = CompileClient::new(endpoint).expect("valid endpoint");
    let runtime: Arc<dyn MinicRuntime> = Arc::new(ChannelRuntime { tx });
    (
        Arc::new(WorkflowController::new(store, client, runtime)),
        rx,
    )
}

/// Drain session events received so far.
fn session_events(rx: &mut mpsc::UnboundedReceiver<RuntimeEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let RuntimeEvent::Session(event) = event {
            events.push(*event);
        }
    }
    events
}

#[tokio::test]
async fn test_run_cycle_offers_correction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compile"))
        .and(body_partial_json(json!({ "source_code": "int main(){}" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "compiler_output": "error: missing return value",
            "llm_feedback": "main should return an int",
            "corrected_code": "int main(){ return 0; }",
            "status": "semantic"
        })))
        .mount(&server)
        .await;

    let (controller, mut rx) = controller_for(&server.uri());
    controller.store().set_source("int main(){}".to_string()).await;
    controller.run().await;

    let snap = controller.store().snapshot().await;
    assert!(!snap.running);
    assert_eq!(snap.status, CompileStatus::SemanticError);
    assert_eq!(snap.status_label, "Semantic Error");
    assert_eq!(snap.compiler_output, "error: missing return value");
    // Absent program output degrades to its placeholder.
    assert_eq!(snap.program_output, store::NO_PROGRAM_OUTPUT);
    assert_eq!(snap.critique, "main should return an int");
    assert!(snap.correction_offered);
    assert_eq!(snap.corrected_code, "int main(){ return 0; }");
    assert!(snap.correction_diff.is_some());
    assert!(snap.last_run_at.is_some());

    let events = session_events(&mut rx);
    assert!(matches!(events[0], SessionEvent::RunStarted { .. }));
    assert!(events.iter().any(|e| matches!(
        e,
        SessionEvent::RunCompleted {
            status: CompileStatus::SemanticError,
            ..
        }
    )));
}

#[tokio::test]
async fn test_missing_fields_fall_back_to_placeholders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (controller, _rx) = controller_for(&server.uri());
    controller.run().await;

    let snap = controller.store().snapshot().await;
    assert_eq!(snap.compiler_output, store::NO_COMPILER_OUTPUT);
    assert_eq!(snap.program_output, store::NO_PROGRAM_OUTPUT);
    assert_eq!(snap.critique, store::NO_FEEDBACK);
    assert_eq!(snap.corrected_code, store::NO_CORRECTION_AVAILABLE);
    assert!(!snap.correction_offered);
    assert_eq!(snap.status, CompileStatus::Unknown);
    assert_eq!(snap.status_label, "Ready");
}

#[tokio::test]
async fn test_unrecognized_status_degrades_to_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "program_output": "42\n",
            "status": "partial-success"
        })))
        .mount(&server)
        .await;

    let (controller, _rx) = controller_for(&server.uri());
    controller.run().await;

    let snap = controller.store().snapshot().await;
    assert_eq!(snap.status, CompileStatus::Unknown);
    assert_eq!(snap.program_output, "42\n");
}

#[tokio::test]
async fn test_identical_suggestion_shows_affirmation_not_offer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "compiler_output": "ok",
            "program_output": "Hello\n",
            "corrected_code": "int main(){ return 0; }\n",
            "status": "success"
        })))
        .mount(&server)
        .await;

    let (controller, _rx) = controller_for(&server.uri());
    controller
        .store()
        .set_source("int main(){ return 0; }".to_string())
        .await;
    controller.run().await;

    // Suggestion differs only by trailing whitespace, so nothing is offered.
    let snap = controller.store().snapshot().await;
    assert!(!snap.correction_offered);
    assert_eq!(snap.corrected_code, store::NO_CORRECTION_NEEDED);
    assert!(snap.correction_diff.is_none());
    assert_eq!(snap.status, CompileStatus::Success);

    // And accepting with nothing on offer leaves the buffer alone.
    assert!(!controller.accept_correction().await);
    assert_eq!(
        controller.store().source().await,
        "int main(){ return 0; }"
    );
}

#[tokio::test]
async fn test_http_error_becomes_session_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compile"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (controller, mut rx) = controller_for(&server.uri());
    controller.run().await;

    let snap = controller.store().snapshot().await;
    assert!(!snap.running);
    assert_eq!(snap.status, CompileStatus::Error);
    assert!(snap.compiler_output.contains("Connection error"));
    assert!(snap.compiler_output.contains(&server.uri()));
    assert_eq!(snap.critique, store::SERVICE_UNREACHABLE);
    assert!(!snap.correction_offered);

    let events = session_events(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::RunFailed { .. })));

    // The session is still usable; a follow-up run goes through.
    assert!(!controller.store().is_running().await);
}

#[tokio::test]
async fn test_connection_refused_becomes_session_state() {
    // Nothing listens here; reqwest fails at connect time.
    let (controller, _rx) = controller_for("http://127.0.0.1:59999");
    controller.run().await;

    let snap = controller.store().snapshot().await;
    assert!(!snap.running);
    assert_eq!(snap.status, CompileStatus::Error);
    assert!(snap.compiler_output.contains("Connection error"));
}

#[tokio::test]
async fn test_second_run_is_refused_while_first_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success" }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (controller, _rx) = controller_for(&server.uri());

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.run().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Second submission while the first is in flight is a silent no-op.
    controller.run().await;
    assert!(controller.store().is_running().await);

    first.await.unwrap();
    assert!(!controller.store().is_running().await);
    assert_eq!(
        controller.store().snapshot().await.status,
        CompileStatus::Success
    );
    // The mock's expect(1) verifies only one request went out.
}

#[tokio::test]
async fn test_teardown_discards_in_flight_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "program_output": "late\n" }))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let (controller, mut rx) = controller_for(&server.uri());

    let run = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.run().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    controller.teardown().await;
    run.await.unwrap();

    // The late result never landed.
    let snap = controller.store().snapshot().await;
    assert_eq!(snap.compiler_output, store::COMPILING);
    assert_eq!(snap.status, CompileStatus::Unknown);

    // No completion event was emitted after teardown.
    let events = session_events(&mut rx);
    assert!(!events
        .iter()
        .any(|e| matches!(e, SessionEvent::RunCompleted { .. })));
}

#[tokio::test]
async fn test_accept_correction_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "compiler_output": "error: expected ';'",
            "llm_feedback": "missing semicolon after printf",
            "corrected_code": "#include <stdio.h>\nint main(){ printf(\"hi\"); return 0; }",
            "status": "syntax"
        })))
        .mount(&server)
        .await;

    let (controller, mut rx) = controller_for(&server.uri());
    controller
        .store()
        .set_source("#include <stdio.h>\nint main(){ printf(\"hi\") return 0; }".to_string())
        .await;
    controller.run().await;

    assert!(controller.accept_correction().await);
    let snap = controller.store().snapshot().await;
    assert_eq!(
        snap.source,
        "#include <stdio.h>\nint main(){ printf(\"hi\"); return 0; }"
    );
    assert!(!snap.correction_offered);
    assert_eq!(snap.critique, store::CORRECTION_APPLIED);
    assert_eq!(snap.status, CompileStatus::Unknown);

    let events = session_events(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::CorrectionApplied)));

    // Accepting again with nothing on offer is refused.
    assert!(!controller.accept_correction().await);
}
