//! Tests for DescriptorService: reading the project name from go.mod

use std::fs;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use tmpl::application::services::DescriptorService;
use tmpl::application::ApplicationError;
use tmpl::config::Settings;
use tmpl::domain::DomainError;
use tmpl::infrastructure::traits::RealFileSystem;

fn service() -> DescriptorService {
    DescriptorService::new(Arc::new(RealFileSystem), Arc::new(Settings::default()))
}

#[rstest]
#[case("module github.com/acme/widget\n\ngo 1.22\n", "widget")]
#[case("module example.org/billing-api\r\ngo 1.21\r\n", "billing-api")]
#[case("module svc_42", "svc_42")]
fn given_descriptor_when_project_name_then_reads_first_line(
    #[case] content: &str,
    #[case] expected: &str,
) {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("go.mod"), content).unwrap();

    // Act
    let name = service().project_name(temp.path()).unwrap();

    // Assert
    assert_eq!(name.as_str(), expected);
}

#[test]
fn given_no_descriptor_when_project_name_then_descriptor_missing() {
    let temp = TempDir::new().unwrap();

    let result = service().project_name(temp.path());

    assert!(matches!(
        result,
        Err(ApplicationError::DescriptorMissing(ref p)) if p == &temp.path().join("go.mod")
    ));
}

#[test]
fn given_empty_descriptor_when_project_name_then_descriptor_empty() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("go.mod"), "").unwrap();

    let result = service().project_name(temp.path());

    assert!(matches!(result, Err(ApplicationError::DescriptorEmpty(_))));
}

#[test]
fn given_module_keyword_only_when_project_name_then_invalid_module_line() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("go.mod"), "module\ngo 1.22\n").unwrap();

    let result = service().project_name(temp.path());

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidModuleLine { .. }))
    ));
}

#[test]
fn given_custom_descriptor_name_when_project_name_then_reads_that_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("project.mod"), "module acme/gadget\n").unwrap();
    let settings = Settings {
        module_descriptor: "project.mod".into(),
        ..Settings::default()
    };
    let service = DescriptorService::new(Arc::new(RealFileSystem), Arc::new(settings));

    // Act
    let name = service.project_name(temp.path()).unwrap();

    // Assert
    assert_eq!(name.as_str(), "gadget");
}
