//! Generate command handler.

use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use kube_composer_manifest::{compose_bundle, BundleInput};
use tracing::info;

use super::util::write_text;
use crate::{
	config::{KubeComposerConfig, Scalars},
	project,
};

#[derive(Args)]
pub struct GenerateArgs {
	/// Project file
	pub project: PathBuf,

	/// Write the bundle to this file instead of stdout
	#[arg(short, long)]
	pub output: Option<PathBuf>,

	/// How string values are written, overrides the config file
	#[arg(long, value_enum)]
	pub scalars: Option<Scalars>,
}

/// Run the generate command.
pub fn run<W: Write>(args: GenerateArgs, mut writer: W) -> Result<()> {
	let config = KubeComposerConfig::for_project(&args.project)?;
	let workspace = project::load(&args.project)?;
	let bundle = compose_bundle(&BundleInput::from(&workspace), config.yaml_format(args.scalars))
		.context("failed to generate bundle")?;

	match args.output {
		Some(path) => {
			fs::write(&path, &bundle)
				.with_context(|| format!("failed to write bundle: {}", path.display()))?;
			info!(path = %path.display(), "bundle written");
		}
		None => write_text(&mut writer, &bundle)?,
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;
	use crate::{
		commands::util::BrokenPipeGuard,
		test_utils::{output, BrokenPipeWriter, TempProject, SHOP_PROJECT},
	};

	fn args(project: &TempProject) -> GenerateArgs {
		GenerateArgs {
			project: project.path.clone(),
			output: None,
			scalars: None,
		}
	}

	#[test]
	fn writes_bundle_to_stdout() {
		let project = TempProject::new(SHOP_PROJECT);
		let mut buf = Vec::new();
		run(args(&project), &mut buf).unwrap();
		let out = output(buf);

		assert!(out.starts_with("# Kubernetes Configuration\n# Generated by Kube Composer\n# Project: shop\n"));
		assert!(out.contains("# === DEPLOYMENTS ===\n"));
		assert_eq!(out.matches("kind: Deployment\n").count(), 1);
		assert!(out.contains("  password: aHVudGVyMg==\n"));
	}

	#[test]
	fn writes_bundle_to_file() {
		let project = TempProject::new(SHOP_PROJECT);
		let target = project.dir.path().join("bundle.yaml");
		let mut buf = Vec::new();
		run(
			GenerateArgs {
				output: Some(target.clone()),
				..args(&project)
			},
			&mut buf,
		)
		.unwrap();
		assert!(buf.is_empty());
		assert!(fs::read_to_string(target).unwrap().contains("kind: Service\n"));
	}

	#[test]
	fn empty_project_shows_welcome() {
		let project = TempProject::new("{}");
		let mut buf = Vec::new();
		run(args(&project), &mut buf).unwrap();
		let out = output(buf);
		assert!(out.starts_with("# Welcome to Kube Composer!\n"));
		assert!(out.ends_with("kube-composer\"\n"));
	}

	#[test]
	fn config_file_selects_quoting() {
		let project = TempProject::new(SHOP_PROJECT);
		fs::write(
			project.dir.path().join(crate::config::CONFIG_FILE_NAME),
			"outputFormat:\n  scalars: quoted\n",
		)
		.unwrap();
		let mut buf = Vec::new();
		run(args(&project), &mut buf).unwrap();
		assert!(output(buf).contains("  mode: fast\n"));

		let mut buf = Vec::new();
		fs::write(
			&project.path,
			r#"{ "configMaps": [{ "name": "ports", "data": { "http": "8080" } }] }"#,
		)
		.unwrap();
		run(args(&project), &mut buf).unwrap();
		assert!(output(buf).contains("  http: \"8080\"\n"));
	}

	#[test]
	fn missing_project_is_an_error() {
		let project = TempProject::new("{}");
		let result = run(
			GenerateArgs {
				project: project.dir.path().join("missing.json"),
				..args(&project)
			},
			Vec::new(),
		);
		assert_matches!(result, Err(e) if e.to_string().starts_with("failed to read project file"));
	}

	#[test]
	fn exits_cleanly_on_broken_pipe() {
		let project = TempProject::new(SHOP_PROJECT);
		let writer = BrokenPipeGuard::new(BrokenPipeWriter);
		assert_matches!(run(args(&project), writer), Ok(()));
	}
}
