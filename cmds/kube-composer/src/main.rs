use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::util::BrokenPipeGuard;
use tracing::Level;

mod commands;
mod config;
mod project;
mod telemetry;
#[cfg(test)]
pub mod test_utils;

#[cfg(all(
	target_os = "linux",
	feature = "mimalloc",
	not(feature = "system-alloc")
))]
#[global_allocator]
static GLOBAL: mimallocator::Mimalloc = mimallocator::Mimalloc;

#[derive(Parser)]
#[command(name = "kube-composer")]
#[command(about = "Generate Kubernetes YAML from a Kube Composer project", long_about = None)]
#[command(version = env!("KUBE_COMPOSER_VERSION"))]
struct Cli {
	/// Log level, overrides RUST_LOG (trace, debug, info, warn, error)
	#[arg(long, global = true)]
	log_level: Option<Level>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Render the whole project as one multi-document bundle
	Generate(commands::generate::GenerateArgs),

	/// Render a single kind, or a single workload
	Show(commands::show::ShowArgs),

	/// Write the bundle under its download file name
	Export(commands::export::ExportArgs),

	/// Report incomplete records
	Validate(commands::validate::ValidateArgs),

	/// Count the records and generated objects of a project
	Summary(commands::summary::SummaryArgs),

	/// Create an empty project file
	Init(commands::init::InitArgs),

	/// Change project settings, relabelling every resource
	Settings(commands::settings::SettingsArgs),

	/// Remove a record, cleaning references to it
	Remove(commands::remove::RemoveArgs),

	/// Print shell completions
	Complete(commands::complete::CompleteArgs),
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	telemetry::init(cli.log_level)?;

	let stdout = BrokenPipeGuard::new(std::io::stdout());

	match cli.command {
		Commands::Generate(args) => commands::generate::run(args, stdout),
		Commands::Show(args) => commands::show::run(args, stdout),
		Commands::Export(args) => commands::export::run(args, stdout),
		Commands::Validate(args) => commands::validate::run(args, stdout),
		Commands::Summary(args) => commands::summary::run(args, stdout),
		Commands::Init(args) => commands::init::run(args, stdout),
		Commands::Settings(args) => commands::settings::run(args, stdout),
		Commands::Remove(args) => commands::remove::run(args, stdout),
		Commands::Complete(args) => commands::complete::run(args, Cli::command(), stdout),
	}
}
