//! Standalone resources: namespaces, configuration objects and batch workloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Container, Labels, DEFAULT_NAMESPACE};

/// Namespaces managed by the cluster itself.
///
/// These are never generated explicitly, cannot be removed, and are never the
/// source of a namespace reassignment.
pub const SYSTEM_NAMESPACES: [&str; 4] = [
	DEFAULT_NAMESPACE,
	"kube-system",
	"kube-public",
	"kube-node-lease",
];

pub fn is_system_namespace(name: &str) -> bool {
	SYSTEM_NAMESPACES.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
	pub name: String,
	#[serde(default)]
	pub labels: Labels,
	#[serde(default)]
	pub annotations: Labels,
	#[serde(default = "Utc::now")]
	pub created_at: DateTime<Utc>,
}

impl Namespace {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			labels: Labels::new(),
			annotations: Labels::new(),
			created_at: Utc::now(),
		}
	}

	pub fn is_system(&self) -> bool {
		is_system_namespace(&self.name)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
	pub name: String,
	#[serde(default = "default_namespace")]
	pub namespace: String,
	#[serde(default)]
	pub labels: Labels,
	#[serde(default)]
	pub annotations: Labels,
	#[serde(default)]
	pub data: Labels,
	#[serde(default = "Utc::now")]
	pub created_at: DateTime<Utc>,
}

impl ConfigMap {
	pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			namespace: namespace.into(),
			labels: Labels::new(),
			annotations: Labels::new(),
			data: Labels::new(),
			created_at: Utc::now(),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecretType {
	#[default]
	Opaque,
	#[serde(rename = "kubernetes.io/tls")]
	Tls,
	#[serde(rename = "kubernetes.io/dockerconfigjson")]
	DockerConfigJson,
}

impl SecretType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Opaque => "Opaque",
			Self::Tls => "kubernetes.io/tls",
			Self::DockerConfigJson => "kubernetes.io/dockerconfigjson",
		}
	}
}

/// Secret with its data kept in clear text.
///
/// Values are base64-encoded by the manifest builders only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
	pub name: String,
	#[serde(default = "default_namespace")]
	pub namespace: String,
	#[serde(default)]
	pub labels: Labels,
	#[serde(default)]
	pub annotations: Labels,
	#[serde(rename = "type", default)]
	pub kind: SecretType,
	#[serde(default)]
	pub data: Labels,
	#[serde(default = "Utc::now")]
	pub created_at: DateTime<Utc>,
}

impl Secret {
	pub fn new(name: impl Into<String>, namespace: impl Into<String>, kind: SecretType) -> Self {
		Self {
			name: name.into(),
			namespace: namespace.into(),
			labels: Labels::new(),
			annotations: Labels::new(),
			kind,
			data: Labels::new(),
			created_at: Utc::now(),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartPolicy {
	#[default]
	Never,
	OnFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcurrencyPolicy {
	Allow,
	Forbid,
	Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfig {
	pub name: String,
	#[serde(default = "default_namespace")]
	pub namespace: String,
	#[serde(default)]
	pub labels: Labels,
	#[serde(default)]
	pub annotations: Labels,
	/// Embedded in the Pod template as stored
	#[serde(default)]
	pub containers: Vec<Container>,
	#[serde(default)]
	pub restart_policy: RestartPolicy,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub completions: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parallelism: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub backoff_limit: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub active_deadline_seconds: Option<i64>,
	#[serde(default = "Utc::now")]
	pub created_at: DateTime<Utc>,
}

impl JobConfig {
	pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			namespace: namespace.into(),
			labels: Labels::new(),
			annotations: Labels::new(),
			containers: Vec::new(),
			restart_policy: RestartPolicy::Never,
			completions: None,
			parallelism: None,
			backoff_limit: None,
			active_deadline_seconds: None,
			created_at: Utc::now(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobConfig {
	pub name: String,
	#[serde(default = "default_namespace")]
	pub namespace: String,
	#[serde(default)]
	pub labels: Labels,
	#[serde(default)]
	pub annotations: Labels,
	pub schedule: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub concurrency_policy: Option<ConcurrencyPolicy>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub starting_deadline_seconds: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub successful_jobs_history_limit: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub failed_jobs_history_limit: Option<i32>,
	/// Full job record, only its spec-level fields are rendered
	pub job_template: JobConfig,
	#[serde(default = "Utc::now")]
	pub created_at: DateTime<Utc>,
}

impl CronJobConfig {
	pub fn new(
		name: impl Into<String>,
		namespace: impl Into<String>,
		schedule: impl Into<String>,
	) -> Self {
		let name = name.into();
		let namespace = namespace.into();
		Self {
			job_template: JobConfig::new(name.clone(), namespace.clone()),
			name,
			namespace,
			labels: Labels::new(),
			annotations: Labels::new(),
			schedule: schedule.into(),
			concurrency_policy: None,
			starting_deadline_seconds: None,
			successful_jobs_history_limit: None,
			failed_jobs_history_limit: None,
			created_at: Utc::now(),
		}
	}
}

fn default_namespace() -> String {
	DEFAULT_NAMESPACE.to_owned()
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use serde_json::json;

	use super::*;

	#[rstest]
	#[case::default("default", true)]
	#[case::kube_system("kube-system", true)]
	#[case::kube_public("kube-public", true)]
	#[case::node_lease("kube-node-lease", true)]
	#[case::custom("production", false)]
	#[case::prefix_only("kube", false)]
	fn system_namespaces(#[case] name: &str, #[case] system: bool) {
		assert_eq!(is_system_namespace(name), system);
		assert_eq!(Namespace::new(name).is_system(), system);
	}

	#[rstest]
	#[case::opaque(SecretType::Opaque, "Opaque")]
	#[case::tls(SecretType::Tls, "kubernetes.io/tls")]
	#[case::docker(SecretType::DockerConfigJson, "kubernetes.io/dockerconfigjson")]
	fn secret_type_names(#[case] kind: SecretType, #[case] name: &str) {
		assert_eq!(kind.as_str(), name);
		assert_eq!(serde_json::to_value(kind).unwrap(), json!(name));
	}

	#[test]
	fn cron_job_reads_nested_job() {
		let cron: CronJobConfig = serde_json::from_value(json!({
			"name": "nightly",
			"namespace": "batch",
			"schedule": "0 3 * * *",
			"concurrencyPolicy": "Forbid",
			"jobTemplate": {
				"name": "nightly",
				"restartPolicy": "OnFailure",
				"backoffLimit": 2,
				"containers": [{ "name": "run", "image": "busybox" }],
			},
		}))
		.unwrap();
		assert_eq!(cron.concurrency_policy, Some(ConcurrencyPolicy::Forbid));
		assert_eq!(cron.job_template.restart_policy, RestartPolicy::OnFailure);
		assert_eq!(cron.job_template.backoff_limit, Some(2));
		assert_eq!(cron.job_template.namespace, "default");
		assert!(cron.job_template.completions.is_none());
	}
}
