//! Core of the project manager: the list of known projects, folder templates
//! used to scaffold new projects, project marker files and scene discovery.
//!
//! Everything here is synchronous and talks to the local disk directly. The
//! `projman` binary is one front end over these services; nothing in this
//! crate assumes a terminal.

pub mod config;
pub mod error;
pub mod marker;
pub mod project;
pub mod registry;
pub mod scene;
pub mod template;

pub use config::{Config, LoadedConfig, Paths};
pub use error::{Error, Result};
pub use marker::MarkerState;
pub use registry::{ProjectEntry, ProjectRegistry};
pub use scene::{Scene, SceneFileType};
pub use template::{FolderNode, Template, TemplateStore};

/// Version string written into `config.json`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
