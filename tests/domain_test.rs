//! Tests for domain values: project names, account handles, module paths

use rstest::rstest;

use tmpl::domain::{clean_path, AccountHandle, DomainError, Environment, ModulePath, ProjectName};

// ============================================================
// ProjectName::parse() tests
// ============================================================

#[rstest]
#[case("widget")]
#[case("billing-api")]
#[case("svc_42")]
#[case("my.service")]
fn given_plain_name_when_parse_then_accepts(#[case] raw: &str) {
    let name = ProjectName::parse(raw).expect("valid name");
    assert_eq!(name.as_str(), raw);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case(" widget ")]
#[case("widget ")]
#[case("\u{a0}widget")]
#[case(".")]
#[case("..")]
#[case("a/b")]
#[case("../evil")]
#[case("a\\b")]
#[case("bad\nname")]
#[case("nul\0byte")]
fn given_unsafe_name_when_parse_then_rejects(#[case] raw: &str) {
    let result = ProjectName::parse(raw);
    assert!(
        matches!(result, Err(DomainError::InvalidProjectName { .. })),
        "{raw:?} should be rejected, got {result:?}"
    );
}

// ============================================================
// ProjectName::from_module_line() tests
// ============================================================

#[rstest]
#[case("module github.com/acme/widget", "widget")]
#[case("module   github.com/acme/widget   ", "widget")]
#[case("module widget", "widget")]
#[case("module github.com/acme/widget/", "widget")]
#[case("module example.org/team/billing-api // trailing comment", "billing-api")]
fn given_module_line_when_parse_then_returns_last_segment(
    #[case] line: &str,
    #[case] expected: &str,
) {
    let name = ProjectName::from_module_line(line).expect("valid module line");
    assert_eq!(name.as_str(), expected);
}

#[test]
fn given_module_line_without_path_when_parse_then_invalid_line() {
    let result = ProjectName::from_module_line("module");
    assert_eq!(
        result,
        Err(DomainError::InvalidModuleLine {
            line: "module".into()
        })
    );
}

#[test]
fn given_module_path_ending_in_dotdot_when_parse_then_invalid_name() {
    let result = ProjectName::from_module_line("module github.com/acme/..");
    assert!(matches!(result, Err(DomainError::InvalidProjectName { .. })));
}

// ============================================================
// clean_path() / AccountHandle / ModulePath tests
// ============================================================

#[rstest]
#[case("acme", "acme")]
#[case("acme/", "acme")]
#[case("./acme", "acme")]
#[case("acme//team", "acme/team")]
#[case("acme/team/..", "acme")]
#[case("acme/./team/../", "acme")]
#[case("../acme", "../acme")]
#[case("a/../..", "..")]
#[case("/../acme", "/acme")]
#[case("/", "/")]
#[case("", ".")]
fn given_path_when_clean_then_lexically_normalized(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(clean_path(raw), expected);
}

#[test]
fn given_messy_account_when_building_module_path_then_account_is_cleaned() {
    // Arrange
    let account = AccountHandle::new("./github.com//acme/team/../");
    let project = ProjectName::parse("widget").unwrap();

    // Act
    let module = ModulePath::new(&account, &project);

    // Assert
    assert_eq!(account.as_str(), "github.com/acme");
    assert_eq!(module.as_str(), "github.com/acme/widget");
    assert_eq!(module.to_string(), "github.com/acme/widget");
}

#[test]
fn given_environments_then_render_lowercase_in_generation_order() {
    let names: Vec<_> = Environment::ALL.iter().map(|e| e.to_string()).collect();
    assert_eq!(names, vec!["dev", "prod"]);
}
