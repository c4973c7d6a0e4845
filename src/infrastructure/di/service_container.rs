//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{
    ArgumentPrompter, ArtifactService, CatalogService, InvocationService, ToolService,
};
use crate::config::Settings;
use crate::infrastructure::terminal::ErasingTextInput;
use crate::infrastructure::traits::{
    CommandRunner, FileSystem, RealFileSystem, Selector, ShellCommandRunner, SkimSelector,
    StdinTextInput, TextInput,
};

/// Container holding settings and I/O capabilities; hands out services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// List picker
    pub selector: Arc<dyn Selector>,

    /// Line input
    pub input: Arc<dyn TextInput>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(ShellCommandRunner),
            Arc::new(SkimSelector),
            Arc::new(ErasingTextInput::new(StdinTextInput)),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        selector: Arc<dyn Selector>,
        input: Arc<dyn TextInput>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            cmd,
            selector,
            input,
        }
    }

    pub fn catalog_service(&self) -> CatalogService {
        CatalogService::new(self.fs.clone())
    }

    pub fn artifact_service(&self) -> ArtifactService {
        ArtifactService::new(self.fs.clone())
    }

    pub fn tool_service(&self) -> ToolService {
        ToolService::new(self.fs.clone())
    }

    pub fn invocation_service(&self) -> InvocationService {
        InvocationService::new(
            ArgumentPrompter::new(self.selector.clone(), self.input.clone()),
            self.cmd.clone(),
            self.settings.shell.clone(),
        )
    }
}
