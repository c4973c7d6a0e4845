//! Tests for CatalogService loading and merging command sources

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use cmdeck::application::services::CatalogService;
use cmdeck::application::ApplicationError;
use cmdeck::domain::CommandType;
use cmdeck::infrastructure::traits::RealFileSystem;

fn create_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write source file");
    path
}

fn service() -> CatalogService {
    CatalogService::new(Arc::new(RealFileSystem))
}

const PRIMARY: &str = r#"
Network Stuff:
  - name: x
    cmd: echo x
Misc:
  - name: hello
    cmd: echo hello
    desc: Say hello
"#;

#[test]
fn given_secondary_with_new_category_when_loading_then_category_appended() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let primary = create_source(&temp, "commands.yaml", PRIMARY);
    let custom = create_source(
        &temp,
        "custom.yaml",
        "Personal:\n  - name: myserver\n    cmd: ssh me@myserver\n",
    );

    // Act
    let catalog = service().load(&primary, Some(&custom)).unwrap();

    // Assert
    let names: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Network Stuff", "Misc", "Personal"]);
    let personal = catalog.category("Personal").unwrap();
    assert_eq!(personal.commands.len(), 1);
    assert_eq!(personal.commands[0].name, "myserver");
}

#[test]
fn given_shared_category_when_loading_then_commands_concatenated() {
    let temp = TempDir::new().unwrap();
    let primary = create_source(&temp, "commands.yaml", PRIMARY);
    let custom = create_source(
        &temp,
        "custom.yaml",
        "Network Stuff:\n  - name: ping_home\n    cmd: ping 192.168.1.1\n    type: function\n",
    );

    let catalog = service().load(&primary, Some(&custom)).unwrap();

    let net = catalog.category("Network Stuff").unwrap();
    let names: Vec<&str> = net.commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["x", "ping_home"]);
    assert_eq!(net.commands[1].kind, CommandType::Function);
}

#[test]
fn given_secondary_override_when_loading_then_replaces_definition() {
    let temp = TempDir::new().unwrap();
    let primary = create_source(&temp, "commands.yaml", PRIMARY);
    let custom = create_source(
        &temp,
        "custom.yaml",
        "Misc:\n  - name: hello\n    cmd: echo hi there\n",
    );

    let catalog = service().load(&primary, Some(&custom)).unwrap();

    let misc = catalog.category("Misc").unwrap();
    assert_eq!(misc.commands.len(), 1);
    assert_eq!(misc.commands[0].cmd, "echo hi there");
}

#[test]
fn given_missing_secondary_when_loading_then_primary_only() {
    let temp = TempDir::new().unwrap();
    let primary = create_source(&temp, "commands.yaml", PRIMARY);
    let missing = temp.path().join("custom.yaml");

    let catalog = service().load(&primary, Some(&missing)).unwrap();

    assert_eq!(catalog.categories().len(), 2);
}

#[test]
fn given_missing_primary_when_loading_then_configuration_error() {
    let temp = TempDir::new().unwrap();

    let err = service()
        .load(&temp.path().join("commands.yaml"), None)
        .unwrap_err();

    assert!(err.is_configuration());
}

#[test]
fn given_malformed_yaml_when_loading_then_parse_error_names_file() {
    let temp = TempDir::new().unwrap();
    let primary = create_source(&temp, "commands.yaml", "Misc: [unclosed\n");

    let err = service().load(&primary, None).unwrap_err();

    assert!(matches!(err, ApplicationError::Parse { ref path, .. } if *path == primary));
    assert!(err.is_configuration());
}

#[test]
fn given_placeholder_beyond_args_in_secondary_when_loading_then_error_names_secondary() {
    let temp = TempDir::new().unwrap();
    let primary = create_source(&temp, "commands.yaml", PRIMARY);
    let custom = create_source(
        &temp,
        "custom.yaml",
        "Misc:\n  - name: bad\n    cmd: echo $2\n    args:\n      - name: One\n",
    );

    let err = service().load(&primary, Some(&custom)).unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidSource { ref path, .. } if *path == custom));
    assert!(err.is_configuration());
    assert!(err.to_string().contains("custom.yaml"), "{err}");
}

#[test]
fn given_empty_primary_when_loading_then_empty_catalog() {
    let temp = TempDir::new().unwrap();
    let primary = create_source(&temp, "commands.yaml", "");

    let catalog = service().load(&primary, None).unwrap();

    assert!(catalog.is_empty());
}
