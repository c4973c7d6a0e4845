//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod catalog;
pub mod entities;
pub mod error;
pub mod resolver;
pub mod source;
pub mod template;

pub use catalog::Catalog;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use resolver::{resolve, resolve_command, Resolution};
pub use source::RawSource;
pub use template::{highest_placeholder, substitute};
