//! Tests for the `teardown` application service.
//!
//! Verifies presence-based skipping, the confirmation gate and that one
//! failing uninstall does not stop the others.

#![allow(clippy::expect_used)]

use qd2_cli::application::services::teardown::{
    FailedRelease, TeardownOptions, TeardownOutcome, UNRUNNABLE_CODE, teardown,
};
use qd2_cli::domain::SpecError;
use qd2_cli::domain::spec::parse_document;
use qd2_common::QudittoDeploySpec;

use crate::mocks::{Call, FixedConfirmer, RecordingGateway, RecordingReporter};

// ── Helpers ───────────────────────────────────────────────────────────────────

const NODES_ONLY: &str = r"
charts: {repo: https://charts.quditto.io}
qudittoSetup:
  qnodes:
    - {name: n1, nodek8s: k1, chart: node}
    - {name: n2, nodek8s: k2, chart: node}
";

const FULL_SETUP: &str = r"
charts: {repo: https://charts.quditto.io}
qudittoSetup:
  qcontroller: {nodek8s: k1, chart: ctrl}
  qorchestrator: {nodek8s: k1, chart: orch}
  qnodes:
    - {name: n1, nodek8s: k2, chart: node}
";

fn spec(doc: &str) -> QudittoDeploySpec {
    parse_document(doc).expect("valid document")
}

fn opts() -> TeardownOptions<'static> {
    TeardownOptions {
        namespace: "quditto",
        assume_yes: true,
        dry_run: false,
        keep_history: false,
    }
}

// ── Nothing to do ────────────────────────────────────────────────────────────

#[tokio::test]
async fn teardown_empty_setup_is_nothing_to_do_without_calls() {
    let doc = "charts: {repo: https://x}\nqudittoSetup: {}\n";
    let gateway = RecordingGateway::new();
    let reporter = RecordingReporter::default();
    let confirmer = FixedConfirmer::yes();

    let outcome = teardown(&gateway, &reporter, &confirmer, &spec(doc), opts())
        .await
        .expect("teardown runs");

    assert_eq!(outcome, TeardownOutcome::NothingToDo);
    assert_eq!(outcome.result_code(), 0);
    assert!(gateway.calls().is_empty());
    assert_eq!(confirmer.asked(), 0);
    assert!(reporter.contains("Nothing to do"));
}

// ── Fail-forward ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn teardown_continues_after_failed_uninstall() {
    let gateway = RecordingGateway::new()
        .with_installed(&["n1", "n2"])
        .failing_uninstall("n1", 1);

    let outcome = teardown(
        &gateway,
        &RecordingReporter::default(),
        &FixedConfirmer::yes(),
        &spec(NODES_ONLY),
        opts(),
    )
    .await
    .expect("teardown runs");

    assert_eq!(
        gateway.labels(),
        vec!["list:quditto", "uninstall:n1", "uninstall:n2"]
    );
    assert_eq!(
        outcome,
        TeardownOutcome::Completed {
            removed: vec!["n2".to_string()],
            skipped: Vec::new(),
            failed: vec![FailedRelease {
                release: "n1".to_string(),
                code: 1,
            }],
        }
    );
    assert_eq!(outcome.result_code(), 1);
}

#[tokio::test]
async fn teardown_continues_when_uninstall_cannot_run() {
    let gateway = RecordingGateway::new()
        .with_installed(&["qcontroller", "qorchestrator", "n1"])
        .erroring_uninstall("qcontroller");
    let reporter = RecordingReporter::default();

    let outcome = teardown(
        &gateway,
        &reporter,
        &FixedConfirmer::yes(),
        &spec(FULL_SETUP),
        opts(),
    )
    .await
    .expect("teardown runs");

    assert_eq!(
        gateway.labels(),
        vec![
            "list:quditto",
            "uninstall:qcontroller",
            "uninstall:qorchestrator",
            "uninstall:n1"
        ]
    );
    assert_eq!(
        outcome,
        TeardownOutcome::Completed {
            removed: vec!["qorchestrator".to_string(), "n1".to_string()],
            skipped: Vec::new(),
            failed: vec![FailedRelease {
                release: "qcontroller".to_string(),
                code: UNRUNNABLE_CODE,
            }],
        }
    );
    assert_eq!(outcome.result_code(), 1);
    assert!(reporter.contains("qcontroller could not run: failed to spawn helm"));
}

#[tokio::test]
async fn teardown_reports_highest_failure_code() {
    let gateway = RecordingGateway::new()
        .with_installed(&["n1", "n2"])
        .failing_uninstall("n1", 2)
        .failing_uninstall("n2", 5);

    let outcome = teardown(
        &gateway,
        &RecordingReporter::default(),
        &FixedConfirmer::yes(),
        &spec(NODES_ONLY),
        opts(),
    )
    .await
    .expect("teardown runs");

    assert_eq!(outcome.result_code(), 5);
}

// ── Presence and order ───────────────────────────────────────────────────────

#[tokio::test]
async fn teardown_skips_releases_that_are_not_installed() {
    let gateway = RecordingGateway::new().with_installed(&["qcontroller", "n1"]);
    let reporter = RecordingReporter::default();

    let outcome = teardown(
        &gateway,
        &reporter,
        &FixedConfirmer::yes(),
        &spec(FULL_SETUP),
        opts(),
    )
    .await
    .expect("teardown runs");

    assert_eq!(
        gateway.labels(),
        vec!["list:quditto", "uninstall:qcontroller", "uninstall:n1"]
    );
    let TeardownOutcome::Completed { skipped, .. } = outcome else {
        panic!("expected completed teardown");
    };
    assert_eq!(skipped, vec!["qorchestrator"]);
    assert!(reporter.contains("warn: qorchestrator is not installed, skipping"));
    assert!(
        reporter
            .lines()
            .iter()
            .any(|l| l.contains("qorchestrator") && l.ends_with(" not installed"))
    );
}

#[tokio::test]
async fn teardown_dry_run_reports_every_target() {
    let gateway = RecordingGateway::new();
    let options = TeardownOptions {
        dry_run: true,
        keep_history: true,
        ..opts()
    };

    let outcome = teardown(
        &gateway,
        &RecordingReporter::default(),
        &FixedConfirmer::yes(),
        &spec(NODES_ONLY),
        options,
    )
    .await
    .expect("teardown runs");

    assert_eq!(outcome.result_code(), 0);
    let uninstalls: Vec<Call> = gateway
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Uninstall { .. }))
        .collect();
    assert_eq!(
        uninstalls,
        vec![
            Call::Uninstall {
                release: "n1".to_string(),
                namespace: "quditto".to_string(),
                wait: true,
                keep_history: true,
                dry_run: true,
            },
            Call::Uninstall {
                release: "n2".to_string(),
                namespace: "quditto".to_string(),
                wait: true,
                keep_history: true,
                dry_run: true,
            },
        ]
    );
}

// ── Confirmation ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn teardown_declined_prompt_uninstalls_nothing() {
    let gateway = RecordingGateway::new().with_installed(&["n1", "n2"]);
    let confirmer = FixedConfirmer::no();
    let options = TeardownOptions {
        assume_yes: false,
        ..opts()
    };

    let outcome = teardown(
        &gateway,
        &RecordingReporter::default(),
        &confirmer,
        &spec(NODES_ONLY),
        options,
    )
    .await
    .expect("teardown runs");

    assert_eq!(outcome, TeardownOutcome::Declined);
    assert_eq!(outcome.result_code(), 0);
    assert_eq!(confirmer.asked(), 1);
    assert_eq!(gateway.labels(), vec!["list:quditto"]);
}

#[tokio::test]
async fn teardown_assume_yes_skips_prompt() {
    let gateway = RecordingGateway::new().with_installed(&["n1", "n2"]);
    let confirmer = FixedConfirmer::no();

    teardown(
        &gateway,
        &RecordingReporter::default(),
        &confirmer,
        &spec(NODES_ONLY),
        opts(),
    )
    .await
    .expect("teardown runs");

    assert_eq!(confirmer.asked(), 0);
    assert_eq!(gateway.labels().len(), 3);
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn teardown_list_failure_is_an_error() {
    let gateway = RecordingGateway::new().failing_list();

    let err = teardown(
        &gateway,
        &RecordingReporter::default(),
        &FixedConfirmer::yes(),
        &spec(NODES_ONLY),
        opts(),
    )
    .await
    .expect_err("list fails");

    assert!(err.to_string().contains("cannot list releases"), "got: {err}");
    assert_eq!(gateway.labels(), vec!["list:quditto"]);
}

#[tokio::test]
async fn teardown_invalid_spec_makes_no_gateway_calls() {
    let doc = "charts: {repo: https://x}\nqudittoSetup:\n  qnodes:\n    - {name: 'bad name', nodek8s: k1, chart: node}\n";
    let gateway = RecordingGateway::new();

    let err = teardown(
        &gateway,
        &RecordingReporter::default(),
        &FixedConfirmer::yes(),
        &spec(doc),
        opts(),
    )
    .await
    .expect_err("invalid name");

    assert!(err.downcast_ref::<SpecError>().is_some());
    assert!(gateway.calls().is_empty());
}
