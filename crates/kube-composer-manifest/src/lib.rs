//! Kubernetes manifests generated from a Kube Composer working set.
//!
//! Records are turned into typed object graphs by [`builders`], converted to
//! [`serde_json::Value`]s and written by the order-preserving [`YamlFormat`]
//! emitter. [`compose_bundle`] assembles every object into a single
//! multi-document bundle.

pub mod banner;
pub mod builders;
mod bundle;
mod containers;
mod error;
pub mod objects;
mod ports;
mod yaml;

pub use bundle::*;
pub use containers::{
	build_container, build_containers, DEFAULT_CPU_REQUEST, DEFAULT_MEMORY_REQUEST,
	FALLBACK_CONTAINER_NAME, LEGACY_DEFAULT_IMAGE,
};
pub use error::{ManifestError, Result};
pub use ports::{service_ports, PRIMARY_PORT_NAME};
pub use yaml::{to_yaml, ScalarStyle, YamlFormat};
