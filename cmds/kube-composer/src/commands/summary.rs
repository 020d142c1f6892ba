//! Summary command handler.

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::Args;
use kube_composer_model::{resource_count, Workload};

use crate::project;

#[derive(Args)]
pub struct SummaryArgs {
	/// Project file
	pub project: PathBuf,
}

/// Run the summary command.
pub fn run<W: Write>(args: SummaryArgs, mut writer: W) -> Result<()> {
	let workspace = project::load(&args.project)?;
	let settings = workspace.settings();

	writeln!(writer, "Project: {}", settings.name)?;
	if let Some(description) = settings.description() {
		writeln!(writer, "Description: {description}")?;
	}
	if !settings.global_labels.is_empty() {
		let labels = settings
			.global_labels
			.iter()
			.map(|(k, v)| format!("{k}={v}"))
			.collect::<Vec<_>>();
		writeln!(writer, "Global labels: {}", labels.join(", "))?;
	}

	let named = |total: usize, named: usize| {
		if named == total {
			total.to_string()
		} else {
			format!("{total} ({named} named)")
		}
	};
	let deployments = workspace.deployments().as_slice();
	let daemon_sets = workspace.daemon_sets().as_slice();
	writeln!(writer, "Namespaces: {}", workspace.namespaces().len())?;
	writeln!(writer, "ConfigMaps: {}", workspace.config_maps().len())?;
	writeln!(writer, "Secrets: {}", workspace.secrets().len())?;
	writeln!(
		writer,
		"Deployments: {}",
		named(deployments.len(), deployments.iter().filter(|d| d.is_named()).count())
	)?;
	writeln!(
		writer,
		"DaemonSets: {}",
		named(daemon_sets.len(), daemon_sets.iter().filter(|d| d.is_named()).count())
	)?;
	writeln!(writer, "Jobs: {}", workspace.jobs().len())?;
	writeln!(writer, "CronJobs: {}", workspace.cron_jobs().len())?;
	writeln!(writer, "Total resources: {}", resource_count(&workspace))?;
	Ok(())
}
