//! Show command handler.

use std::{io::Write, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use kube_composer_manifest::{
	render_config_maps, render_daemon_set, render_deployment, render_namespaces, render_secrets,
};
use kube_composer_model::{DaemonSetConfig, DeploymentConfig, Resource, Workspace};

use super::util::write_text;
use crate::{
	config::{KubeComposerConfig, Scalars},
	project,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
	Namespaces,
	ConfigMaps,
	Secrets,
	Deployment,
	DaemonSet,
}

#[derive(Args)]
pub struct ShowArgs {
	/// Project file
	pub project: PathBuf,

	/// What to render
	#[arg(value_enum)]
	pub view: View,

	/// Application name, for single workload views
	#[arg(long)]
	pub name: Option<String>,

	/// How string values are written, overrides the config file
	#[arg(long, value_enum)]
	pub scalars: Option<Scalars>,
}

/// Workload picked by name, or the only one there is.
fn pick<'w, T: Resource>(workspace: &'w Workspace, name: Option<&str>) -> Result<&'w T> {
	let id = match name {
		Some(name) => workspace.find_required::<T>(name)?,
		None => {
			let mut ids = workspace.iter::<T>().map(|(id, _)| id);
			match (ids.next(), ids.next()) {
				(Some(id), None) => id,
				(None, _) => bail!("project has no {}", T::NOUN),
				(Some(_), Some(_)) => bail!("project has several of kind {}, pick one with --name", T::NOUN),
			}
		}
	};
	workspace
		.get(id)
		.with_context(|| format!("{} disappeared while rendering", T::NOUN))
}

/// Run the show command.
pub fn run<W: Write>(args: ShowArgs, mut writer: W) -> Result<()> {
	let config = KubeComposerConfig::for_project(&args.project)?;
	let format = config.yaml_format(args.scalars);
	let workspace = project::load(&args.project)?;
	let settings = Some(workspace.settings());
	let name = args.name.as_deref();

	let text = match args.view {
		View::Namespaces => render_namespaces(workspace.namespaces().as_slice(), settings, format),
		View::ConfigMaps => render_config_maps(workspace.config_maps().as_slice(), settings, format),
		View::Secrets => render_secrets(workspace.secrets().as_slice(), settings, format),
		View::Deployment => {
			render_deployment(pick::<DeploymentConfig>(&workspace, name)?, settings, format)
		}
		View::DaemonSet => {
			render_daemon_set(pick::<DaemonSetConfig>(&workspace, name)?, settings, format)
		}
	}
	.context("failed to render view")?;

	write_text(&mut writer, &text)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use rstest::rstest;

	use super::*;
	use crate::test_utils::{output, TempProject, SHOP_PROJECT};

	fn show(project: &TempProject, view: View, name: Option<&str>) -> Result<String> {
		let mut buf = Vec::new();
		run(
			ShowArgs {
				project: project.path.clone(),
				view,
				name: name.map(ToOwned::to_owned),
				scalars: None,
			},
			&mut buf,
		)?;
		Ok(output(buf))
	}

	#[rstest]
	#[case::namespaces(View::Namespaces, "# Custom Kubernetes Namespaces\n")]
	#[case::config_maps(View::ConfigMaps, "# Kubernetes ConfigMaps\n")]
	#[case::secrets(View::Secrets, "# Kubernetes Secrets\n")]
	fn kind_views(#[case] view: View, #[case] prefix: &str) {
		let project = TempProject::new(SHOP_PROJECT);
		let out = show(&project, view, None).unwrap();
		assert!(out.starts_with(prefix));
		assert!(out.contains("# Project: shop\n"));
	}

	#[test]
	fn deployment_by_name() {
		let project = TempProject::new(SHOP_PROJECT);
		let out = show(&project, View::Deployment, Some("web")).unwrap();
		assert!(out.starts_with("apiVersion: apps/v1\nkind: Deployment\n"));
		assert!(out.contains("\n---\napiVersion: v1\nkind: Service\n"));
	}

	#[test]
	fn ambiguous_deployment() {
		let project = TempProject::new(SHOP_PROJECT);
		let err = show(&project, View::Deployment, None).unwrap_err();
		assert!(err.to_string().contains("pick one with --name"));
	}

	#[test]
	fn unknown_deployment() {
		let project = TempProject::new(SHOP_PROJECT);
		assert_matches!(show(&project, View::Deployment, Some("api")), Err(_));
	}

	#[test]
	fn single_daemon_set_is_picked() {
		let project = TempProject::new(r#"{ "daemonSets": [{ "appName": "" }] }"#);
		let out = show(&project, View::DaemonSet, None).unwrap();
		assert_eq!(out, "# Please configure your daemonset first\n");
	}
}
