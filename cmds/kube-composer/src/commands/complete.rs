//! Complete command handler.

use std::io::Write;

use anyhow::Result;
use clap::{Args, Command};
use clap_complete::Shell;

#[derive(Args)]
pub struct CompleteArgs {
	/// Shell to generate completions for
	#[arg(value_enum)]
	pub shell: Shell,
}

/// Run the complete command.
pub fn run<W: Write>(args: CompleteArgs, mut cmd: Command, mut writer: W) -> Result<()> {
	let name = cmd.get_name().to_owned();
	clap_complete::generate(args.shell, &mut cmd, name, &mut writer);
	Ok(())
}
