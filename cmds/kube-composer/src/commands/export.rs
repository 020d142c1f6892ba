//! Export command handler.

use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use kube_composer_manifest::{compose_bundle, download_file_name, BundleInput};
use tracing::{info, warn};

use crate::{
	config::{KubeComposerConfig, Scalars},
	project,
};

#[derive(Args)]
pub struct ExportArgs {
	/// Project file
	pub project: PathBuf,

	/// Directory the bundle is written to, created if missing
	pub dir: PathBuf,

	/// How string values are written, overrides the config file
	#[arg(long, value_enum)]
	pub scalars: Option<Scalars>,
}

/// Run the export command.
///
/// Prints the path of the written file.
pub fn run<W: Write>(args: ExportArgs, mut writer: W) -> Result<()> {
	let config = KubeComposerConfig::for_project(&args.project)?;
	let workspace = project::load(&args.project)?;

	let Some(file_name) =
		download_file_name(workspace.deployments().as_slice(), workspace.settings())
	else {
		warn!("no deployment has a name yet, nothing to export");
		return Ok(());
	};

	let bundle = compose_bundle(&BundleInput::from(&workspace), config.yaml_format(args.scalars))
		.context("failed to generate bundle")?;
	fs::create_dir_all(&args.dir)
		.with_context(|| format!("failed to create directory: {}", args.dir.display()))?;
	let path = args.dir.join(file_name);
	fs::write(&path, bundle)
		.with_context(|| format!("failed to write bundle: {}", path.display()))?;
	info!(path = %path.display(), "bundle exported");

	writeln!(writer, "{}", path.display())?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::{output, TempProject, SHOP_PROJECT};

	fn export(project: &TempProject) -> (PathBuf, String) {
		let dir = project.dir.path().join("out");
		let mut buf = Vec::new();
		run(
			ExportArgs {
				project: project.path.clone(),
				dir: dir.clone(),
				scalars: None,
			},
			&mut buf,
		)
		.unwrap();
		(dir, output(buf))
	}

	#[test]
	fn single_deployment_file_name() {
		let project = TempProject::new(SHOP_PROJECT);
		let (dir, out) = export(&project);
		let expected = dir.join("shop-web-deployment.yaml");
		assert_eq!(out, format!("{}\n", expected.display()));
		let bundle = fs::read_to_string(expected).unwrap();
		assert!(bundle.starts_with("# Kubernetes Configuration\n"));
	}

	#[test]
	fn many_deployments_file_name() {
		let project = TempProject::new(
			r#"{ "projectSettings": { "name": "shop" }, "deployments": [{ "appName": "web" }, { "appName": "api" }] }"#,
		);
		let (dir, _) = export(&project);
		assert!(dir.join("shop-kubernetes-deployments-2.yaml").exists());
	}

	#[test]
	fn nothing_to_export() {
		let project = TempProject::new(r#"{ "deployments": [{ "appName": "" }] }"#);
		let (dir, out) = export(&project);
		assert!(out.is_empty());
		assert!(!dir.exists());
	}
}
