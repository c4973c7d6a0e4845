//! cmdeck: a YAML-declared command catalog with an interactive terminal menu
//! and generators for shell aliases and completion scripts.
//!
//! Layers:
//! - [`domain`]: catalog merge and validation, resolution, placeholder substitution
//! - [`application`]: services for loading, prompting, invoking and generating
//! - [`infrastructure`]: filesystem, process and terminal capabilities, DI container
//! - [`cli`]: argument parsing, menu navigation and dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
