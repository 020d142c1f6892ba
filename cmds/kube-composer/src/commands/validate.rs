//! Validate command handler.

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::Args;
use kube_composer_model::validate;
use tracing::warn;

use crate::project;

#[derive(Args)]
pub struct ValidateArgs {
	/// Project file
	pub project: PathBuf,
}

/// Run the validate command.
///
/// Issues are advisory, the command succeeds whatever it finds.
pub fn run<W: Write>(args: ValidateArgs, mut writer: W) -> Result<()> {
	let workspace = project::load(&args.project)?;
	let issues = validate(&workspace);
	if issues.is_empty() {
		writeln!(writer, "No issues found")?;
		return Ok(());
	}
	warn!(count = issues.len(), "project has incomplete records");
	for issue in issues {
		writeln!(writer, "{issue}")?;
	}
	Ok(())
}
