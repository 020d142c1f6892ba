//! Init command handler.

use std::{io::Write, path::PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use kube_composer_model::{ProjectSettings, Workspace};
use tracing::info;

use crate::{config::KubeComposerConfig, project};

#[derive(Args)]
pub struct InitArgs {
	/// Project file to create
	pub project: PathBuf,

	/// Project name, defaults to the config file's defaultProjectName
	#[arg(long)]
	pub name: Option<String>,

	/// Overwrite an existing project file
	#[arg(short = 'f', long)]
	pub force: bool,
}

/// Run the init command.
pub fn run<W: Write>(args: InitArgs, mut writer: W) -> Result<()> {
	if args.project.exists() && !args.force {
		bail!(
			"{} already exists, use --force to overwrite it",
			args.project.display()
		);
	}
	let config = KubeComposerConfig::for_project(&args.project)?;
	let name = args
		.name
		.unwrap_or_else(|| config.project_name().to_owned());

	let workspace = Workspace::new(ProjectSettings::new(name));
	project::save(&args.project, &workspace)?;
	info!(project = %workspace.settings().name, "project created");

	writeln!(
		writer,
		"Initialized project {} in {}",
		workspace.settings().name,
		args.project.display()
	)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::fs;

	use assert_matches::assert_matches;
	use tempfile::TempDir;

	use super::*;
	use crate::config::CONFIG_FILE_NAME;

	fn init(path: PathBuf, name: Option<&str>, force: bool) -> Result<()> {
		run(
			InitArgs {
				project: path,
				name: name.map(ToOwned::to_owned),
				force,
			},
			Vec::new(),
		)
	}

	#[test]
	fn creates_project_with_default_namespace() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("project.json");
		init(path.clone(), Some("shop"), false).unwrap();

		let workspace = project::load(&path).unwrap();
		assert_eq!(workspace.settings().name, "shop");
		assert_eq!(workspace.namespaces().as_slice()[0].name, "default");
	}

	#[test]
	fn name_from_config() {
		let temp = TempDir::new().unwrap();
		fs::write(temp.path().join(CONFIG_FILE_NAME), "defaultProjectName: platform\n").unwrap();
		let path = temp.path().join("project.json");
		init(path.clone(), None, false).unwrap();
		assert_eq!(project::load(&path).unwrap().settings().name, "platform");
	}

	#[test]
	fn refuses_to_overwrite() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("project.json");
		fs::write(&path, "{}").unwrap();
		assert_matches!(init(path.clone(), None, false), Err(_));
		init(path.clone(), Some("fresh"), true).unwrap();
		assert_eq!(project::load(&path).unwrap().settings().name, "fresh");
	}
}
