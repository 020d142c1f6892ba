//! Remove command handler.

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use kube_composer_model::{
	ConfigMap, CronJobConfig, DaemonSetConfig, DeploymentConfig, JobConfig, Namespace, Resource,
	Secret, Workspace,
};
use tracing::info;

use crate::project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
	Namespace,
	ConfigMap,
	Secret,
	Deployment,
	DaemonSet,
	Job,
	CronJob,
}

#[derive(Args)]
pub struct RemoveArgs {
	/// Project file
	pub project: PathBuf,

	#[arg(value_enum)]
	pub kind: Kind,

	/// Name of the record, application name for workloads
	pub name: String,
}

fn remove<T: Resource>(workspace: &mut Workspace, name: &str) -> Result<&'static str> {
	let id = workspace.find_required::<T>(name)?;
	workspace.remove(id)?;
	Ok(T::NOUN)
}

/// Run the remove command.
///
/// References to the removed record are cleaned up, resources of a removed
/// namespace move to `default`.
pub fn run<W: Write>(args: RemoveArgs, mut writer: W) -> Result<()> {
	let mut workspace = project::load(&args.project)?;
	let name = args.name.as_str();
	let noun = match args.kind {
		Kind::Namespace => remove::<Namespace>(&mut workspace, name),
		Kind::ConfigMap => remove::<ConfigMap>(&mut workspace, name),
		Kind::Secret => remove::<Secret>(&mut workspace, name),
		Kind::Deployment => remove::<DeploymentConfig>(&mut workspace, name),
		Kind::DaemonSet => remove::<DaemonSetConfig>(&mut workspace, name),
		Kind::Job => remove::<JobConfig>(&mut workspace, name),
		Kind::CronJob => remove::<CronJobConfig>(&mut workspace, name),
	}?;
	project::save(&args.project, &workspace)?;
	info!(kind = noun, name, "removed");

	writeln!(writer, "Removed {noun} {name}")?;
	Ok(())
}
