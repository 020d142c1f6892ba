//! Configuration model of a Kube Composer project.
//!
//! Records mirror what the editor stores, the [`Workspace`] keeps them
//! consistent when they are added, duplicated, renamed or removed.

mod collection;
mod container;
mod error;
mod labels;
mod project;
mod resources;
mod snapshot;
mod validate;
mod workload;
mod workspace;

pub use collection::{Collection, Id};
pub use container::*;
pub use error::{Result, WorkspaceError};
pub use labels::*;
pub use project::*;
pub use resources::*;
pub use snapshot::Snapshot;
pub use validate::{resource_count, validate, Issue};
pub use workload::*;
pub use workspace::{Resource, Workspace};

/// Namespace resources fall back to.
pub const DEFAULT_NAMESPACE: &str = "default";
