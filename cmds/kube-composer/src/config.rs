//! Configuration file support.
//!
//! A `.kube-composer.yaml` file may be placed anywhere above a project file,
//! it is searched from the project directory upward to the filesystem root.

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use kube_composer_manifest::{ScalarStyle, YamlFormat};
use kube_composer_model::DEFAULT_PROJECT_NAME;
use serde::Deserialize;

/// The name of the config file looked for
pub const CONFIG_FILE_NAME: &str = ".kube-composer.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubeComposerConfig {
	#[serde(default)]
	pub output_format: OutputFormatConfig,

	/// Project name given to projects created by `init`
	#[serde(default)]
	pub default_project_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFormatConfig {
	/// How string values are written.
	///
	/// - "plain" (default): values are written verbatim, never quoted
	/// - "quoted": values that would not read back verbatim are double-quoted
	#[serde(default)]
	pub scalars: Option<Scalars>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scalars {
	#[default]
	Plain,
	Quoted,
}

impl From<Scalars> for YamlFormat {
	fn from(scalars: Scalars) -> Self {
		Self {
			scalars: match scalars {
				Scalars::Plain => ScalarStyle::Plain,
				Scalars::Quoted => ScalarStyle::Quoted,
			},
		}
	}
}

impl KubeComposerConfig {
	/// Load the config applying to a project file, or defaults if there is none.
	pub fn for_project(project: &Path) -> Result<Self> {
		let mut config = Self::default();
		if let Some(file) = Self::load_from_directory(&project_dir(project))? {
			config.merge_from(&file);
		}
		Ok(config)
	}

	/// Load config by searching from the given directory upward
	pub fn load_from_directory(start_dir: &Path) -> Result<Option<Self>> {
		find_config_file(start_dir)
			.map(|path| Self::load_from_file(&path))
			.transpose()
	}

	/// Load config from a specific file path
	pub fn load_from_file(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path)
			.with_context(|| format!("failed to read config file: {}", path.display()))?;
		let config: Self = serde_yaml_with_quirks::from_str(&content)
			.with_context(|| format!("failed to parse config file: {}", path.display()))?;
		Ok(config)
	}

	/// Merge another config over this one, values set there win
	pub fn merge_from(&mut self, other: &Self) {
		if other.output_format.scalars.is_some() {
			self.output_format.scalars = other.output_format.scalars;
		}
		if other.default_project_name.is_some() {
			self.default_project_name.clone_from(&other.default_project_name);
		}
	}

	/// Output format, with the command line choice taking precedence.
	pub fn yaml_format(&self, cli: Option<Scalars>) -> YamlFormat {
		cli.or(self.output_format.scalars)
			.unwrap_or_default()
			.into()
	}

	pub fn project_name(&self) -> &str {
		self.default_project_name
			.as_deref()
			.unwrap_or(DEFAULT_PROJECT_NAME)
	}
}

/// Directory a project file lives in, `.` for bare file names.
fn project_dir(project: &Path) -> PathBuf {
	match project.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
		_ => PathBuf::from("."),
	}
}

/// Search for a config file starting from `start_dir` and walking up to the filesystem root
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
	let start = start_dir
		.canonicalize()
		.unwrap_or_else(|_| start_dir.to_path_buf());
	start
		.ancestors()
		.map(|dir| dir.join(CONFIG_FILE_NAME))
		.find(|path| path.exists())
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn find_config_in_current_dir() {
		let temp = TempDir::new().unwrap();
		let config_path = temp.path().join(CONFIG_FILE_NAME);
		fs::write(&config_path, "outputFormat:\n  scalars: quoted").unwrap();

		let found = find_config_file(temp.path());
		// Compare file names only to avoid canonicalization issues on macOS
		assert_eq!(found.unwrap().file_name(), config_path.file_name());
	}

	#[test]
	fn find_config_in_parent_dir() {
		let temp = TempDir::new().unwrap();
		fs::write(temp.path().join(CONFIG_FILE_NAME), "defaultProjectName: shop").unwrap();
		let subdir = temp.path().join("projects").join("web");
		fs::create_dir_all(&subdir).unwrap();

		let config = KubeComposerConfig::for_project(&subdir.join("project.json")).unwrap();
		assert_eq!(config.project_name(), "shop");
	}

	#[test]
	fn no_config_found() {
		let temp = TempDir::new().unwrap();
		let config = KubeComposerConfig::for_project(&temp.path().join("project.json")).unwrap();
		assert!(config.default_project_name.is_none());
		assert_eq!(config.project_name(), DEFAULT_PROJECT_NAME);
		assert_eq!(config.yaml_format(None), YamlFormat::PLAIN);
	}

	#[test]
	fn invalid_config_is_an_error() {
		let temp = TempDir::new().unwrap();
		let config_path = temp.path().join(CONFIG_FILE_NAME);
		fs::write(&config_path, "outputFormat:\n  scalars: fancy").unwrap();

		let err = KubeComposerConfig::load_from_file(&config_path).unwrap_err();
		assert!(err.to_string().starts_with("failed to parse config file"));
	}

	#[rstest]
	#[case::default(None, None, YamlFormat::PLAIN)]
	#[case::file(Some(Scalars::Quoted), None, YamlFormat::QUOTED)]
	#[case::cli_wins(Some(Scalars::Quoted), Some(Scalars::Plain), YamlFormat::PLAIN)]
	#[case::cli_only(None, Some(Scalars::Quoted), YamlFormat::QUOTED)]
	fn format_precedence(
		#[case] file: Option<Scalars>,
		#[case] cli: Option<Scalars>,
		#[case] expected: YamlFormat,
	) {
		let config = KubeComposerConfig {
			output_format: OutputFormatConfig { scalars: file },
			..KubeComposerConfig::default()
		};
		assert_eq!(config.yaml_format(cli), expected);
	}

	#[test]
	fn merge_keeps_unset_values() {
		let mut base = KubeComposerConfig {
			output_format: OutputFormatConfig {
				scalars: Some(Scalars::Quoted),
			},
			default_project_name: Some("base".into()),
		};
		base.merge_from(&KubeComposerConfig {
			default_project_name: Some("override".into()),
			..KubeComposerConfig::default()
		});
		assert_eq!(base.output_format.scalars, Some(Scalars::Quoted));
		assert_eq!(base.project_name(), "override");
	}
}
