//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner, etc.)
//! but are themselves concrete structs, not traits.

mod artifacts;
mod catalog;
mod invocation;
mod prompter;
pub mod tools;

pub use artifacts::{
    render_aliases, render_completion, ArtifactService, CompletionShell, GENERATED_HEADER,
};
pub use catalog::CatalogService;
pub use invocation::InvocationService;
pub use prompter::ArgumentPrompter;
pub use tools::ToolService;
