//! Loading and saving project files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use kube_composer_model::{Snapshot, Workspace};
use tracing::debug;

pub fn load(path: &Path) -> Result<Workspace> {
	let text = fs::read_to_string(path)
		.with_context(|| format!("failed to read project file: {}", path.display()))?;
	let snapshot = Snapshot::from_json(&text)
		.with_context(|| format!("failed to parse project file: {}", path.display()))?;
	debug!(path = %path.display(), "loaded project");
	Ok(Workspace::from_snapshot(snapshot))
}

pub fn save(path: &Path, workspace: &Workspace) -> Result<()> {
	let text = workspace
		.to_snapshot()
		.to_json()
		.context("failed to serialize project")?;
	fs::write(path, text)
		.with_context(|| format!("failed to write project file: {}", path.display()))?;
	debug!(path = %path.display(), "saved project");
	Ok(())
}
