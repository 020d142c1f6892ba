use serde::{Deserialize, Serialize};

use crate::{
	ConfigMap, CronJobConfig, DaemonSetConfig, DeploymentConfig, JobConfig, Namespace,
	ProjectSettings, Secret,
};

/// Persisted form of a whole working set.
///
/// Missing collections read as empty, so that files written before a kind
/// was supported still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
	#[serde(default)]
	pub project_settings: ProjectSettings,
	#[serde(default)]
	pub namespaces: Vec<Namespace>,
	#[serde(default)]
	pub config_maps: Vec<ConfigMap>,
	#[serde(default)]
	pub secrets: Vec<Secret>,
	#[serde(default)]
	pub deployments: Vec<DeploymentConfig>,
	#[serde(default)]
	pub daemon_sets: Vec<DaemonSetConfig>,
	#[serde(default)]
	pub jobs: Vec<JobConfig>,
	#[serde(default, rename = "cronjobs")]
	pub cron_jobs: Vec<CronJobConfig>,
}

impl Snapshot {
	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		let mut out = serde_json::to_string_pretty(self)?;
		out.push('\n');
		Ok(out)
	}
}
