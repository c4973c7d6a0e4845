//! Tests for layered settings loading

use std::path::PathBuf;

use tempfile::TempDir;

use cmdeck::config::Settings;

#[test]
fn given_global_config_when_loading_then_overrides_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cmdeck.toml");
    std::fs::write(
        &path,
        r#"
commands_file = "/srv/team/commands.yaml"
shell = "bash"
continuous = true
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(Some(&path)).unwrap();

    // Assert
    assert_eq!(settings.commands_file, PathBuf::from("/srv/team/commands.yaml"));
    assert_eq!(settings.shell, "bash");
    assert!(settings.continuous);
    assert_eq!(settings.aliases_file, "bash_aliases");
    assert_eq!(settings.custom_file, Some(PathBuf::from("custom.yaml")));
}

#[test]
fn given_missing_global_config_when_loading_then_defaults() {
    let temp = TempDir::new().unwrap();

    let settings = Settings::load_from(Some(&temp.path().join("absent.toml"))).unwrap();

    assert_eq!(settings.completion_file, "cmdeck_completion");
    assert_eq!(settings.output_dir, PathBuf::from("."));
}

#[test]
fn given_malformed_global_config_when_loading_then_configuration_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cmdeck.toml");
    std::fs::write(&path, "shell = [not toml").unwrap();

    let err = Settings::load_from(Some(&path)).unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("cmdeck.toml"), "{err}");
}

#[test]
fn given_template_when_parsed_then_is_valid_toml() {
    let template = Settings::template();

    let parsed: Result<toml::Table, _> = toml::from_str(&template);

    assert!(parsed.is_ok());
    assert!(template.contains("commands_file"));
}
