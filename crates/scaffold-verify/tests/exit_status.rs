#![cfg(unix)]

use pretty_assertions::assert_eq;
use scaffold_verify::{Bootstrap, VerificationRunner, Verifier, VerifyCommand, VerifyError};

fn sh(script: &str) -> VerifyCommand {
    VerifyCommand::new("sh", ["-c", script])
}

#[tokio::test]
async fn zero_exit_passes_with_output() {
    let dir = tempfile::tempdir().unwrap();
    let report = VerificationRunner::new(sh("echo built; echo warn >&2"))
        .verify(dir.path())
        .await
        .unwrap();

    assert_eq!(report.stdout, "built\n");
    assert_eq!(report.stderr, "warn\n");
    assert!(!report.bootstrapped);
    assert!(!report.skipped);
}

#[tokio::test]
async fn non_zero_exit_is_build_failure() {
    let dir = tempfile::tempdir().unwrap();
    let err = VerificationRunner::new(sh("echo compiling; echo 'error: boom' >&2; exit 3"))
        .verify(dir.path())
        .await
        .unwrap_err();

    match err {
        VerifyError::BuildFailure {
            stdout,
            stderr,
            exit_code,
            ..
        } => {
            assert_eq!(exit_code, Some(3));
            assert_eq!(stdout, "compiling\n");
            assert_eq!(stderr, "error: boom\n");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn stderr_noise_does_not_fail_a_passing_build() {
    let dir = tempfile::tempdir().unwrap();
    let result = VerificationRunner::new(sh("echo 'deprecated' >&2; exit 0"))
        .verify(dir.path())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn signal_death_has_no_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let err = VerificationRunner::new(sh("kill -9 $$"))
        .verify(dir.path())
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), None);
    assert!(matches!(err, VerifyError::BuildFailure { .. }));
}

#[tokio::test]
async fn missing_program_is_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = VerificationRunner::new(VerifyCommand::new("definitely-not-a-build-tool", ["build"]))
        .verify(dir.path())
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::Spawn { .. }));
}

#[tokio::test]
async fn runs_in_project_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("build.marker"), "").unwrap();
    let result = VerificationRunner::new(sh("test -f build.marker"))
        .verify(dir.path())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn bootstrap_runs_only_when_marker_missing() {
    let dir = tempfile::tempdir().unwrap();
    let runner = VerificationRunner::new(sh("test -f wrapper")).with_bootstrap(Bootstrap {
        marker: "wrapper".to_string(),
        command: sh("echo once >> bootstrap.log; touch wrapper"),
    });

    let first = runner.verify(dir.path()).await.unwrap();
    let second = runner.verify(dir.path()).await.unwrap();

    assert!(first.bootstrapped);
    assert!(!second.bootstrapped);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("bootstrap.log")).unwrap(),
        "once\n"
    );
}

#[tokio::test]
async fn bootstrap_failure_is_build_failure() {
    let dir = tempfile::tempdir().unwrap();
    let runner = VerificationRunner::new(sh("exit 0")).with_bootstrap(Bootstrap {
        marker: "wrapper".to_string(),
        command: sh("exit 7"),
    });

    let err = runner.verify(dir.path()).await.unwrap_err();
    assert_eq!(err.exit_code(), Some(7));
}
