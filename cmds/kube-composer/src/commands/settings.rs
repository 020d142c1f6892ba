//! Settings command handler.

use std::{io::Write, path::PathBuf};

use anyhow::{anyhow, Result};
use clap::Args;
use tracing::{info, warn};

use crate::project;

#[derive(Args)]
pub struct SettingsArgs {
	/// Project file
	pub project: PathBuf,

	/// New project name
	#[arg(long)]
	pub name: Option<String>,

	/// New project description, empty to clear it
	#[arg(long)]
	pub description: Option<String>,

	/// Global label to set, as key=value
	#[arg(long = "label", value_parser = parse_label)]
	pub labels: Vec<(String, String)>,

	/// Drop every global label before applying --label
	#[arg(long)]
	pub clear_labels: bool,
}

fn parse_label(s: &str) -> Result<(String, String)> {
	let (key, value) = s
		.split_once('=')
		.ok_or_else(|| anyhow!("expected key=value, got {s:?}"))?;
	if key.is_empty() {
		return Err(anyhow!("label key can't be empty"));
	}
	Ok((key.to_owned(), value.to_owned()))
}

impl SettingsArgs {
	fn is_noop(&self) -> bool {
		self.name.is_none() && self.description.is_none() && self.labels.is_empty() && !self.clear_labels
	}
}

/// Run the settings command.
///
/// Every resource is relabelled against the new global labels, labels
/// inherited from the previous set are dropped.
pub fn run<W: Write>(args: SettingsArgs, mut writer: W) -> Result<()> {
	let mut workspace = project::load(&args.project)?;
	if args.is_noop() {
		warn!("no setting given, nothing to change");
		return Ok(());
	}

	let mut settings = workspace.settings().clone();
	if let Some(name) = args.name {
		settings.name = name;
	}
	if let Some(description) = args.description {
		settings.description = (!description.is_empty()).then_some(description);
	}
	if args.clear_labels {
		settings.global_labels.clear();
	}
	settings.global_labels.extend(args.labels);

	workspace.update_settings(settings);
	project::save(&args.project, &workspace)?;
	info!(project = %workspace.settings().name, "settings updated");

	writeln!(writer, "Updated settings of {}", workspace.settings().name)?;
	Ok(())
}
