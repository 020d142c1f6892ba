//! Serializable shapes of the generated Kubernetes objects.
//!
//! Field order is output order. Optional parts are `Option`s skipped when
//! absent, so that the emitted documents only carry what was configured.

use kube_composer_model::{Labels, PathType, ServiceType, VolumeMount};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Object<B> {
	pub api_version: &'static str,
	pub kind: &'static str,
	pub metadata: ObjectMeta,
	#[serde(flatten)]
	pub body: B,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectMeta {
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub namespace: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub labels: Option<Labels>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub annotations: Option<Labels>,
}

/// Objects without anything besides metadata, like namespaces.
#[derive(Debug, Clone, Serialize)]
pub struct Empty {}

#[derive(Debug, Clone, Serialize)]
pub struct Spec<S> {
	pub spec: S,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigMapBody {
	pub data: Labels,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecretBody {
	#[serde(rename = "type")]
	pub kind: &'static str,
	/// Base64-encoded values
	pub data: Labels,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSpec {
	/// Absent for DaemonSets
	#[serde(skip_serializing_if = "Option::is_none")]
	pub replicas: Option<i32>,
	pub selector: LabelSelector,
	pub template: PodTemplate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
	pub match_labels: Labels,
}

#[derive(Debug, Clone, Serialize)]
pub struct PodTemplate {
	pub metadata: TemplateMeta,
	pub spec: PodSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateMeta {
	pub labels: Labels,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
	pub containers: Vec<ContainerSpec>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub volumes: Option<Vec<VolumeSpec>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_selector: Option<Labels>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
	pub name: String,
	pub image: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ports: Option<Vec<ContainerPort>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub env: Option<Vec<EnvVarSpec>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub volume_mounts: Option<Vec<VolumeMount>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub command: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub args: Option<Vec<String>>,
	pub resources: ResourcesSpec,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
	pub container_port: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSpec {
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value_from: Option<EnvVarSource>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvVarSource {
	ConfigMapKeyRef(KeyRef),
	SecretKeyRef(KeyRef),
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyRef {
	pub name: String,
	pub key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourcesSpec {
	pub requests: Quantities,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub limits: Option<Limits>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Quantities {
	pub cpu: String,
	pub memory: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Limits {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cpu: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub memory: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VolumeSpec {
	pub name: String,
	#[serde(flatten)]
	pub source: VolumeSourceSpec,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeSourceSpec {
	EmptyDir(Empty),
	ConfigMap { name: String },
	Secret {
		#[serde(rename = "secretName")]
		secret_name: String,
	},
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceSpec {
	pub selector: Labels,
	pub ports: Vec<ServicePort>,
	#[serde(rename = "type")]
	pub kind: ServiceType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
	pub port: i32,
	pub target_port: i32,
	pub protocol: &'static str,
	/// Absent for the single port of legacy workloads
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ingress_class_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tls: Option<Vec<IngressTlsSpec>>,
	pub rules: Vec<IngressRuleSpec>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressTlsSpec {
	pub secret_name: String,
	pub hosts: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngressRuleSpec {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub host: Option<String>,
	pub http: HttpRule,
}

#[derive(Debug, Clone, Serialize)]
pub struct HttpRule {
	pub paths: Vec<HttpPath>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpPath {
	pub path: String,
	pub path_type: PathType,
	pub backend: Backend,
}

#[derive(Debug, Clone, Serialize)]
pub struct Backend {
	pub service: BackendService,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackendService {
	pub name: String,
	pub port: BackendPort,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackendPort {
	pub number: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub completions: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub parallelism: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub backoff_limit: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub active_deadline_seconds: Option<i64>,
	pub template: JobTemplate<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobTemplate<'a> {
	pub spec: JobPodSpec<'a>,
}

/// Pod spec of batch workloads, containers are embedded in their record form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPodSpec<'a> {
	pub restart_policy: kube_composer_model::RestartPolicy,
	pub containers: &'a [kube_composer_model::Container],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobSpec<'a> {
	pub schedule: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub concurrency_policy: Option<kube_composer_model::ConcurrencyPolicy>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub starting_deadline_seconds: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub successful_jobs_history_limit: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub failed_jobs_history_limit: Option<i32>,
	pub job_template: Spec<JobSpec<'a>>,
}
