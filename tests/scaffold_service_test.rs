//! Tests for ScaffoldService: project creation and toolchain invocation

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use tmpl::application::services::ScaffoldService;
use tmpl::application::ApplicationError;
use tmpl::config::Settings;
use tmpl::domain::{AccountHandle, ProjectName};
use tmpl::infrastructure::traits::RealFileSystem;
use tmpl::infrastructure::TemplateStore;
use tmpl::util::testing::{self, RecordingCommandRunner};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn scaffold(runner: Arc<RecordingCommandRunner>, settings: Settings) -> ScaffoldService {
    ScaffoldService::new(
        Arc::new(RealFileSystem),
        runner,
        TemplateStore::embedded(),
        Arc::new(settings),
    )
}

fn widget() -> ProjectName {
    ProjectName::parse("widget").unwrap()
}

// ============================================================
// init_project() tests
// ============================================================

#[test]
fn given_fresh_base_dir_when_init_project_then_runs_toolchain_in_project_root() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let runner = Arc::new(RecordingCommandRunner::new());
    let service = scaffold(runner.clone(), Settings::default());

    // Act
    let root = service
        .init_project(temp.path(), &AccountHandle::new("acme"), &widget())
        .unwrap();

    // Assert
    assert_eq!(root, temp.path().join("widget"));
    assert!(root.is_dir());

    let calls = runner.calls();
    let lines: Vec<_> = calls.iter().map(|c| c.args_line()).collect();
    assert_eq!(
        lines,
        vec![
            "mod init acme/widget",
            "get -u github.com/labstack/echo/v4",
            "get -u go.uber.org/zap",
            "get -u github.com/joho/godotenv",
        ]
    );
    assert!(calls.iter().all(|c| c.program == "go" && c.dir == root));

    let main = fs::read_to_string(root.join("main.go")).unwrap();
    let expected = TemplateStore::embedded().get("templates/main.txt").unwrap();
    assert_eq!(main, expected);
}

#[test]
fn given_existing_project_dir_when_init_project_then_directory_exists_and_no_commands() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("widget")).unwrap();
    let runner = Arc::new(RecordingCommandRunner::new());
    let service = scaffold(runner.clone(), Settings::default());

    // Act
    let result = service.init_project(temp.path(), &AccountHandle::new("acme"), &widget());

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::DirectoryExists(ref p)) if p == &temp.path().join("widget")
    ));
    assert!(runner.calls().is_empty());
    assert_eq!(fs::read_dir(temp.path().join("widget")).unwrap().count(), 0);
}

#[test]
fn given_failing_dependency_fetch_when_init_project_then_stops_before_entry_point() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let runner = Arc::new(RecordingCommandRunner::failing_on("go.uber.org/zap"));
    let service = scaffold(runner.clone(), Settings::default());

    // Act
    let result = service.init_project(temp.path(), &AccountHandle::new("acme"), &widget());

    // Assert
    match result {
        Err(ApplicationError::CommandFailed {
            command,
            exit_code,
            stderr,
        }) => {
            assert_eq!(command, "go get -u go.uber.org/zap");
            assert_eq!(exit_code, Some(1));
            assert_eq!(stderr, "simulated failure");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert_eq!(runner.calls().len(), 3);
    assert!(temp.path().join("widget").is_dir());
    assert!(!temp.path().join("widget").join("main.go").exists());
}

#[test]
fn given_failing_module_init_when_init_project_then_no_dependencies_fetched() {
    let temp = TempDir::new().unwrap();
    let runner = Arc::new(RecordingCommandRunner::failing_on("mod init"));
    let service = scaffold(runner.clone(), Settings::default());

    let result = service.init_project(temp.path(), &AccountHandle::new("acme"), &widget());

    assert!(matches!(result, Err(ApplicationError::CommandFailed { .. })));
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn given_unstartable_toolchain_when_init_project_then_spawn_error_keeps_cause() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let runner = Arc::new(RecordingCommandRunner::failing_to_spawn(""));
    let service = scaffold(runner.clone(), Settings::default());

    // Act
    let result = service.init_project(temp.path(), &AccountHandle::new("acme"), &widget());

    // Assert
    let err = result.unwrap_err();
    assert!(matches!(err, ApplicationError::CommandSpawn { ref program, .. } if program == "go"));
    assert_eq!(err.to_string(), "failed to run go: No such file or directory");
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn given_custom_settings_when_init_project_then_uses_configured_toolchain_and_entry_point() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let runner = Arc::new(RecordingCommandRunner::new());
    let settings = Settings {
        toolchain: "/opt/go/bin/go".into(),
        dependencies: Vec::new(),
        entry_point: "server.go".into(),
        ..Settings::default()
    };
    let service = scaffold(runner.clone(), settings);

    // Act
    let root = service
        .init_project(temp.path(), &AccountHandle::new("github.com/acme/"), &widget())
        .unwrap();

    // Assert
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "/opt/go/bin/go");
    assert_eq!(calls[0].args_line(), "mod init github.com/acme/widget");
    assert!(root.join("server.go").exists());
    assert!(!root.join("main.go").exists());
}
