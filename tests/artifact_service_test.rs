//! Tests for ArtifactService writing generated shell files

use std::sync::Arc;

use tempfile::TempDir;

use cmdeck::application::services::{ArtifactService, CompletionShell, GENERATED_HEADER};
use cmdeck::domain::{Catalog, RawSource};
use cmdeck::infrastructure::traits::RealFileSystem;

fn catalog() -> Catalog {
    let raw = RawSource::parse(
        r#"
Git:
  - name: gs
    cmd: git status
    desc: Short status
  - name: gcm
    cmd: git commit -m "$1"
    type: function
    args:
      - name: Message
"#,
    )
    .unwrap();
    Catalog::merge(&raw, None).unwrap()
}

#[test]
fn given_nested_output_path_when_writing_aliases_then_creates_parents() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("generated/shell/bash_aliases");
    let service = ArtifactService::new(Arc::new(RealFileSystem));

    // Act
    service
        .write_aliases(&catalog(), &path, "commands.yaml")
        .unwrap();

    // Assert
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        format!(
            "{GENERATED_HEADER}\n# Edit commands.yaml instead.\n\n\n#* Git\n# Short status\nalias gs='git status'\ngcm() {{ git commit -m \"$1\"; }}\n"
        )
    );
}

#[test]
fn given_existing_file_when_writing_completion_then_overwrites() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cmdeck_completion");
    std::fs::write(&path, "stale").unwrap();
    let service = ArtifactService::new(Arc::new(RealFileSystem));

    service
        .write_completion(&catalog(), &path, "cmdeck", CompletionShell::Bash)
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("stale"));
    assert!(text.contains(r#"compgen -W "gs gcm""#));
    assert!(text.contains("complete -F _cmdeck_complete cmdeck"));
}

#[cfg(unix)]
#[test]
fn given_unwritable_location_when_writing_then_operation_failed() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("file");
    std::fs::write(&blocker, "").unwrap();
    let service = ArtifactService::new(Arc::new(RealFileSystem));

    let err = service
        .write_aliases(&catalog(), &blocker.join("bash_aliases"), "commands.yaml")
        .unwrap_err();

    assert!(matches!(
        err,
        cmdeck::application::ApplicationError::OperationFailed { .. }
    ));
}
