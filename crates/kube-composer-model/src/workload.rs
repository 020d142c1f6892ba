//! Workload records: Deployments and DaemonSets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Container, LegacyContainer, LegacyEnvVar, LegacyResources, Labels};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
	#[default]
	ClusterIP,
	NodePort,
	LoadBalancer,
}

impl ServiceType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::ClusterIP => "ClusterIP",
			Self::NodePort => "NodePort",
			Self::LoadBalancer => "LoadBalancer",
		}
	}
}

impl fmt::Display for ServiceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Containers of a workload pod.
///
/// Records saved before multi-container support carried a single image with
/// its env and resources directly on the workload. Such records resolve to
/// [`PodContainers::Legacy`] once, when they are read, so that builders never
/// have to inspect the deprecated fields themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PodContainersRecord", into = "PodContainersRecord")]
pub enum PodContainers {
	Multi(Vec<Container>),
	Legacy(LegacyContainer),
}

impl PodContainers {
	/// Containers of the multi-container form, empty for legacy records.
	pub fn as_slice(&self) -> &[Container] {
		match self {
			Self::Multi(containers) => containers,
			Self::Legacy(_) => &[],
		}
	}

	pub fn as_mut_slice(&mut self) -> &mut [Container] {
		match self {
			Self::Multi(containers) => containers,
			Self::Legacy(_) => &mut [],
		}
	}

	/// Number of containers the pod will run.
	///
	/// Legacy records, and multi-container records without any container,
	/// render a single synthetic container.
	pub fn count(&self) -> usize {
		self.as_slice().len().max(1)
	}
}

impl Default for PodContainers {
	fn default() -> Self {
		Self::Multi(vec![Container::seeded()])
	}
}

/// On-disk shape of [`PodContainers`], flattened into the workload record.
#[derive(Serialize, Deserialize)]
struct PodContainersRecord {
	#[serde(default)]
	containers: Vec<Container>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	image: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	env: Option<Vec<LegacyEnvVar>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	resources: Option<LegacyResources>,
}

impl From<PodContainersRecord> for PodContainers {
	fn from(record: PodContainersRecord) -> Self {
		if record.containers.is_empty() {
			Self::Legacy(LegacyContainer {
				image: record.image,
				env: record.env,
				resources: record.resources,
			})
		} else {
			Self::Multi(record.containers)
		}
	}
}

impl From<PodContainers> for PodContainersRecord {
	fn from(containers: PodContainers) -> Self {
		match containers {
			PodContainers::Multi(containers) => Self {
				containers,
				image: None,
				env: None,
				resources: None,
			},
			PodContainers::Legacy(legacy) => Self {
				containers: Vec::new(),
				image: legacy.image,
				env: legacy.env,
				resources: legacy.resources,
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
	pub name: String,
	#[serde(default)]
	pub mount_path: String,
	#[serde(flatten)]
	pub source: VolumeSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum VolumeSource {
	EmptyDir,
	ConfigMap {
		#[serde(
			rename = "configMapName",
			default,
			skip_serializing_if = "Option::is_none"
		)]
		config_map_name: Option<String>,
	},
	Secret {
		#[serde(rename = "secretName", default, skip_serializing_if = "Option::is_none")]
		secret_name: Option<String>,
	},
}

impl Volume {
	/// Name of the referenced ConfigMap, defaulting to the volume name.
	pub fn config_map_name(&self) -> Option<&str> {
		match &self.source {
			VolumeSource::ConfigMap { config_map_name } => Some(non_blank_or(
				config_map_name.as_deref(),
				&self.name,
			)),
			_ => None,
		}
	}

	/// Name of the referenced Secret, defaulting to the volume name.
	pub fn secret_name(&self) -> Option<&str> {
		match &self.source {
			VolumeSource::Secret { secret_name } => {
				Some(non_blank_or(secret_name.as_deref(), &self.name))
			}
			_ => None,
		}
	}
}

fn non_blank_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
	match value {
		Some(v) if !v.is_empty() => v,
		_ => fallback,
	}
}

/// ConfigMap embedded directly in a workload by old saved configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyConfigMap {
	pub name: String,
	#[serde(default)]
	pub data: Labels,
}

/// Secret embedded directly in a workload by old saved configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySecret {
	pub name: String,
	#[serde(default)]
	pub data: Labels,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathType {
	#[default]
	Prefix,
	Exact,
	ImplementationSpecific,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressConfig {
	#[serde(default)]
	pub enabled: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub class_name: Option<String>,
	#[serde(default)]
	pub annotations: Labels,
	#[serde(default)]
	pub tls: Vec<IngressTls>,
	#[serde(default)]
	pub rules: Vec<IngressRule>,
}

impl IngressConfig {
	/// Whether an Ingress object should be generated at all.
	pub fn is_rendered(&self) -> bool {
		self.enabled && !self.rules.is_empty()
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressTls {
	pub secret_name: String,
	#[serde(default)]
	pub hosts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
	#[serde(default)]
	pub host: String,
	pub path: String,
	#[serde(default)]
	pub path_type: PathType,
	pub service_name: String,
	pub service_port: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentConfig {
	/// Blank names exclude the deployment from every generated output
	pub app_name: String,
	#[serde(flatten)]
	pub containers: PodContainers,
	pub replicas: i32,
	pub port: i32,
	pub target_port: i32,
	pub service_type: ServiceType,
	pub namespace: String,
	pub labels: Labels,
	pub annotations: Labels,
	pub volumes: Vec<Volume>,
	pub config_maps: Vec<LegacyConfigMap>,
	pub secrets: Vec<LegacySecret>,
	pub selected_config_maps: Vec<String>,
	pub selected_secrets: Vec<String>,
	pub ingress: IngressConfig,
}

impl Default for DeploymentConfig {
	fn default() -> Self {
		Self {
			app_name: String::new(),
			containers: PodContainers::default(),
			replicas: 1,
			port: 80,
			target_port: 8080,
			service_type: ServiceType::ClusterIP,
			namespace: crate::DEFAULT_NAMESPACE.to_owned(),
			labels: Labels::new(),
			annotations: Labels::new(),
			volumes: Vec::new(),
			config_maps: Vec::new(),
			secrets: Vec::new(),
			selected_config_maps: Vec::new(),
			selected_secrets: Vec::new(),
			ingress: IngressConfig::default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DaemonSetConfig {
	pub app_name: String,
	#[serde(flatten)]
	pub containers: PodContainers,
	pub port: i32,
	pub target_port: i32,
	pub service_type: ServiceType,
	/// A Service is only generated when enabled
	pub service_enabled: bool,
	pub namespace: String,
	pub labels: Labels,
	pub annotations: Labels,
	pub volumes: Vec<Volume>,
	pub config_maps: Vec<LegacyConfigMap>,
	pub secrets: Vec<LegacySecret>,
	pub selected_config_maps: Vec<String>,
	pub selected_secrets: Vec<String>,
	pub node_selector: Labels,
}

impl Default for DaemonSetConfig {
	fn default() -> Self {
		Self {
			app_name: String::new(),
			containers: PodContainers::default(),
			port: 80,
			target_port: 8080,
			service_type: ServiceType::ClusterIP,
			service_enabled: false,
			namespace: crate::DEFAULT_NAMESPACE.to_owned(),
			labels: Labels::new(),
			annotations: Labels::new(),
			volumes: Vec::new(),
			config_maps: Vec::new(),
			secrets: Vec::new(),
			selected_config_maps: Vec::new(),
			selected_secrets: Vec::new(),
			node_selector: Labels::new(),
		}
	}
}

/// Mutable view on the cross-references a workload holds.
pub struct WorkloadRefs<'a> {
	pub namespace: &'a mut String,
	pub containers: &'a mut PodContainers,
	pub volumes: &'a mut Vec<Volume>,
	pub selected_config_maps: &'a mut Vec<String>,
	pub selected_secrets: &'a mut Vec<String>,
	pub ingress_tls: Option<&'a mut Vec<IngressTls>>,
}

/// Fields shared by Deployments and DaemonSets.
pub trait Workload {
	/// Kind name, as used in messages
	const KIND: &'static str;

	fn app_name(&self) -> &str;
	fn namespace(&self) -> &str;
	fn labels(&self) -> &Labels;
	fn annotations(&self) -> &Labels;
	fn containers(&self) -> &PodContainers;
	fn port(&self) -> i32;
	fn target_port(&self) -> i32;
	fn service_type(&self) -> ServiceType;
	fn volumes(&self) -> &[Volume];
	fn legacy_config_maps(&self) -> &[LegacyConfigMap];
	fn legacy_secrets(&self) -> &[LegacySecret];
	fn refs_mut(&mut self) -> WorkloadRefs<'_>;

	/// Workloads without a name are kept in the working set but never rendered.
	fn is_named(&self) -> bool {
		!self.app_name().is_empty()
	}
}

macro_rules! impl_workload_fields {
	() => {
		fn app_name(&self) -> &str {
			&self.app_name
		}
		fn namespace(&self) -> &str {
			&self.namespace
		}
		fn labels(&self) -> &Labels {
			&self.labels
		}
		fn annotations(&self) -> &Labels {
			&self.annotations
		}
		fn containers(&self) -> &PodContainers {
			&self.containers
		}
		fn port(&self) -> i32 {
			self.port
		}
		fn target_port(&self) -> i32 {
			self.target_port
		}
		fn service_type(&self) -> ServiceType {
			self.service_type
		}
		fn volumes(&self) -> &[Volume] {
			&self.volumes
		}
		fn legacy_config_maps(&self) -> &[LegacyConfigMap] {
			&self.config_maps
		}
		fn legacy_secrets(&self) -> &[LegacySecret] {
			&self.secrets
		}
	};
}

impl Workload for DeploymentConfig {
	const KIND: &'static str = "Deployment";

	impl_workload_fields!();

	fn refs_mut(&mut self) -> WorkloadRefs<'_> {
		WorkloadRefs {
			namespace: &mut self.namespace,
			containers: &mut self.containers,
			volumes: &mut self.volumes,
			selected_config_maps: &mut self.selected_config_maps,
			selected_secrets: &mut self.selected_secrets,
			ingress_tls: Some(&mut self.ingress.tls),
		}
	}
}

impl Workload for DaemonSetConfig {
	const KIND: &'static str = "DaemonSet";

	impl_workload_fields!();

	fn refs_mut(&mut self) -> WorkloadRefs<'_> {
		WorkloadRefs {
			namespace: &mut self.namespace,
			containers: &mut self.containers,
			volumes: &mut self.volumes,
			selected_config_maps: &mut self.selected_config_maps,
			selected_secrets: &mut self.selected_secrets,
			ingress_tls: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use serde_json::json;

	use super::*;

	#[test]
	fn record_without_containers_resolves_to_legacy() {
		let deployment: DeploymentConfig = serde_json::from_value(json!({
			"appName": "old",
			"image": "httpd:2",
			"env": [{ "name": "MODE", "value": "x" }],
			"port": 80,
			"targetPort": 80,
		}))
		.unwrap();
		assert_matches!(
			&deployment.containers,
			PodContainers::Legacy(LegacyContainer { image: Some(image), env: Some(env), resources: None })
				if image == "httpd:2" && env.len() == 1
		);
		assert_eq!(deployment.containers.count(), 1);
		// Missing fields come from the seeded defaults
		assert_eq!(deployment.replicas, 1);
		assert_eq!(deployment.namespace, "default");
	}

	#[test]
	fn record_with_containers_is_multi() {
		let deployment: DeploymentConfig = serde_json::from_value(json!({
			"appName": "web",
			"image": "ignored:1",
			"containers": [
				{ "name": "a", "image": "a:1" },
				{ "name": "b", "image": "b:1", "port": 9090 },
			],
		}))
		.unwrap();
		assert_matches!(&deployment.containers, PodContainers::Multi(c) if c.len() == 2);
		assert_eq!(deployment.containers.as_slice()[1].port(), Some(9090));
	}

	#[test]
	fn legacy_record_survives_roundtrip() {
		let deployment = DeploymentConfig {
			app_name: "old".into(),
			containers: PodContainers::Legacy(LegacyContainer {
				image: Some("nginx:1".into()),
				..LegacyContainer::default()
			}),
			..DeploymentConfig::default()
		};
		let value = serde_json::to_value(&deployment).unwrap();
		assert_eq!(value["image"], json!("nginx:1"));
		assert_eq!(value["containers"], json!([]));
		let back: DeploymentConfig = serde_json::from_value(value).unwrap();
		assert_eq!(back, deployment);
	}

	#[test]
	fn volume_sources_are_tagged() {
		let volumes: Vec<Volume> = serde_json::from_value(json!([
			{ "name": "cache", "mountPath": "/cache", "type": "emptyDir" },
			{ "name": "cfg", "mountPath": "/etc/app", "type": "configMap", "configMapName": "app-config" },
			{ "name": "tls", "mountPath": "/tls", "type": "secret", "secretName": "" },
		]))
		.unwrap();
		assert_eq!(volumes[0].source, VolumeSource::EmptyDir);
		assert_eq!(volumes[1].config_map_name(), Some("app-config"));
		assert_eq!(volumes[1].secret_name(), None);
		// Blank reference falls back to the volume name
		assert_eq!(volumes[2].secret_name(), Some("tls"));
	}

	#[test]
	fn ingress_needs_rules_and_flag() {
		let mut ingress = IngressConfig {
			enabled: true,
			..IngressConfig::default()
		};
		assert!(!ingress.is_rendered());
		ingress.rules.push(IngressRule {
			path: "/".into(),
			service_name: "web-service".into(),
			service_port: 80,
			..IngressRule::default()
		});
		assert!(ingress.is_rendered());
		ingress.enabled = false;
		assert!(!ingress.is_rendered());
	}
}
