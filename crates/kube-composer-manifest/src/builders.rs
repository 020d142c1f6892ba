//! One builder per generated object kind.
//!
//! Builders are pure: they take a record and the optional project settings,
//! and return the object graph ready to be emitted. Workloads carry the full
//! effective label set on their metadata and pod template, but only the
//! reduced [`selector_labels`] in selectors, which must stay stable once
//! applied to a cluster.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use kube_composer_model::{
	effective_labels, selector_labels, ConfigMap, CronJobConfig, DaemonSetConfig,
	DeploymentConfig, IngressConfig, JobConfig, Labels, LegacyConfigMap, LegacySecret, Namespace,
	ProjectSettings, Secret, SecretType, Volume, VolumeSource, Workload, APP_NAME_LABEL,
};
use serde::Serialize;
use serde_json::Value;

use crate::{
	containers::build_containers,
	error::Result,
	objects::*,
	ports::service_ports,
};

fn non_empty(labels: &Labels) -> Option<Labels> {
	(!labels.is_empty()).then(|| labels.clone())
}

/// Labels of every object generated for a workload.
fn workload_labels<W: Workload>(workload: &W, settings: Option<&ProjectSettings>) -> Labels {
	let mut labels = Labels::new();
	labels.insert(APP_NAME_LABEL.to_owned(), workload.app_name().to_owned());
	labels.extend(effective_labels(workload.labels(), settings));
	labels
}

fn workload_meta<W: Workload>(
	workload: &W,
	name: String,
	labels: &Labels,
	annotations: Option<&Labels>,
) -> ObjectMeta {
	ObjectMeta {
		name,
		namespace: Some(workload.namespace().to_owned()),
		labels: Some(labels.clone()),
		annotations: annotations.and_then(non_empty),
	}
}

/// Metadata of standalone resources, whose labels are only kept when any.
fn standalone_meta(
	name: &str,
	namespace: Option<&str>,
	labels: &Labels,
	annotations: &Labels,
	settings: Option<&ProjectSettings>,
) -> ObjectMeta {
	ObjectMeta {
		name: name.to_owned(),
		namespace: namespace.map(ToOwned::to_owned),
		labels: non_empty(&effective_labels(labels, settings)),
		annotations: non_empty(annotations),
	}
}

fn encode_data(data: &Labels) -> Labels {
	data.iter()
		.map(|(k, v)| (k.clone(), STANDARD.encode(v.as_bytes())))
		.collect()
}

fn volumes(volumes: &[Volume]) -> Option<Vec<VolumeSpec>> {
	if volumes.is_empty() {
		return None;
	}
	Some(
		volumes
			.iter()
			.map(|v| VolumeSpec {
				name: v.name.clone(),
				source: match &v.source {
					VolumeSource::EmptyDir => VolumeSourceSpec::EmptyDir(Empty {}),
					VolumeSource::ConfigMap { .. } => VolumeSourceSpec::ConfigMap {
						name: v.config_map_name().unwrap_or(&v.name).to_owned(),
					},
					VolumeSource::Secret { .. } => VolumeSourceSpec::Secret {
						secret_name: v.secret_name().unwrap_or(&v.name).to_owned(),
					},
				},
			})
			.collect(),
	)
}

fn workload_object<W: Workload>(
	workload: &W,
	replicas: Option<i32>,
	node_selector: Option<Labels>,
	settings: Option<&ProjectSettings>,
) -> Object<Spec<WorkloadSpec>> {
	let labels = workload_labels(workload, settings);
	Object {
		api_version: "apps/v1",
		kind: W::KIND,
		metadata: workload_meta(
			workload,
			workload.app_name().to_owned(),
			&labels,
			Some(workload.annotations()),
		),
		body: Spec {
			spec: WorkloadSpec {
				replicas,
				selector: LabelSelector {
					match_labels: selector_labels(workload.app_name(), settings),
				},
				template: PodTemplate {
					metadata: TemplateMeta { labels },
					spec: PodSpec {
						containers: build_containers(workload.containers(), workload.target_port()),
						volumes: volumes(workload.volumes()),
						node_selector,
					},
				},
			},
		},
	}
}

pub fn deployment(
	deployment: &DeploymentConfig,
	settings: Option<&ProjectSettings>,
) -> Object<Spec<WorkloadSpec>> {
	workload_object(deployment, Some(deployment.replicas), None, settings)
}

pub fn daemon_set(
	daemon_set: &DaemonSetConfig,
	settings: Option<&ProjectSettings>,
) -> Object<Spec<WorkloadSpec>> {
	workload_object(
		daemon_set,
		None,
		non_empty(&daemon_set.node_selector),
		settings,
	)
}

/// Service exposing a workload, selecting exactly what the workload selects.
pub fn service<W: Workload>(
	workload: &W,
	settings: Option<&ProjectSettings>,
) -> Object<Spec<ServiceSpec>> {
	let labels = workload_labels(workload, settings);
	Object {
		api_version: "v1",
		kind: "Service",
		metadata: workload_meta(
			workload,
			format!("{}-service", workload.app_name()),
			&labels,
			None,
		),
		body: Spec {
			spec: ServiceSpec {
				selector: selector_labels(workload.app_name(), settings),
				ports: service_ports(workload),
				kind: workload.service_type(),
			},
		},
	}
}

/// Ingress of a deployment, if it is enabled and has any rule.
pub fn ingress(
	deployment: &DeploymentConfig,
	settings: Option<&ProjectSettings>,
) -> Option<Object<Spec<IngressSpec>>> {
	let config: &IngressConfig = &deployment.ingress;
	if !config.is_rendered() {
		return None;
	}
	let labels = workload_labels(deployment, settings);
	let tls = (!config.tls.is_empty()).then(|| {
		config
			.tls
			.iter()
			.map(|tls| IngressTlsSpec {
				secret_name: tls.secret_name.clone(),
				hosts: tls
					.hosts
					.iter()
					.filter(|h| !h.trim().is_empty())
					.cloned()
					.collect(),
			})
			.filter(|tls| !tls.hosts.is_empty())
			.collect()
	});
	let rules = config
		.rules
		.iter()
		.map(|rule| IngressRuleSpec {
			host: (!rule.host.is_empty()).then(|| rule.host.clone()),
			http: HttpRule {
				paths: vec![HttpPath {
					path: rule.path.clone(),
					path_type: rule.path_type,
					backend: Backend {
						service: BackendService {
							name: rule.service_name.clone(),
							port: BackendPort {
								number: rule.service_port,
							},
						},
					},
				}],
			},
		})
		.collect();

	Some(Object {
		api_version: "networking.k8s.io/v1",
		kind: "Ingress",
		metadata: workload_meta(
			deployment,
			format!("{}-ingress", deployment.app_name),
			&labels,
			Some(&config.annotations),
		),
		body: Spec {
			spec: IngressSpec {
				ingress_class_name: config.class_name.as_ref().filter(|c| !c.is_empty()).cloned(),
				tls,
				rules,
			},
		},
	})
}

/// ConfigMap embedded in a workload by an older configuration.
pub fn legacy_config_map<W: Workload>(
	workload: &W,
	config_map: &LegacyConfigMap,
	settings: Option<&ProjectSettings>,
) -> Object<ConfigMapBody> {
	Object {
		api_version: "v1",
		kind: "ConfigMap",
		metadata: workload_meta(
			workload,
			config_map.name.clone(),
			&workload_labels(workload, settings),
			None,
		),
		body: ConfigMapBody {
			data: config_map.data.clone(),
		},
	}
}

/// Secret embedded in a workload by an older configuration, always `Opaque`.
pub fn legacy_secret<W: Workload>(
	workload: &W,
	secret: &LegacySecret,
	settings: Option<&ProjectSettings>,
) -> Object<SecretBody> {
	Object {
		api_version: "v1",
		kind: "Secret",
		metadata: workload_meta(
			workload,
			secret.name.clone(),
			&workload_labels(workload, settings),
			None,
		),
		body: SecretBody {
			kind: SecretType::Opaque.as_str(),
			data: encode_data(&secret.data),
		},
	}
}

pub fn namespace(namespace: &Namespace, settings: Option<&ProjectSettings>) -> Object<Empty> {
	Object {
		api_version: "v1",
		kind: "Namespace",
		metadata: standalone_meta(
			&namespace.name,
			None,
			&namespace.labels,
			&namespace.annotations,
			settings,
		),
		body: Empty {},
	}
}

pub fn config_map(config_map: &ConfigMap, settings: Option<&ProjectSettings>) -> Object<ConfigMapBody> {
	Object {
		api_version: "v1",
		kind: "ConfigMap",
		metadata: standalone_meta(
			&config_map.name,
			Some(&config_map.namespace),
			&config_map.labels,
			&config_map.annotations,
			settings,
		),
		body: ConfigMapBody {
			data: config_map.data.clone(),
		},
	}
}

/// Secret with its values base64-encoded, the stored type is kept as is.
pub fn secret(secret: &Secret, settings: Option<&ProjectSettings>) -> Object<SecretBody> {
	Object {
		api_version: "v1",
		kind: "Secret",
		metadata: standalone_meta(
			&secret.name,
			Some(&secret.namespace),
			&secret.labels,
			&secret.annotations,
			settings,
		),
		body: SecretBody {
			kind: secret.kind.as_str(),
			data: encode_data(&secret.data),
		},
	}
}

fn job_spec(job: &JobConfig) -> JobSpec<'_> {
	JobSpec {
		completions: job.completions,
		parallelism: job.parallelism,
		backoff_limit: job.backoff_limit,
		active_deadline_seconds: job.active_deadline_seconds,
		template: JobTemplate {
			spec: JobPodSpec {
				restart_policy: job.restart_policy,
				containers: &job.containers,
			},
		},
	}
}

pub fn job<'a>(job: &'a JobConfig, settings: Option<&ProjectSettings>) -> Object<Spec<JobSpec<'a>>> {
	Object {
		api_version: "batch/v1",
		kind: "Job",
		metadata: standalone_meta(
			&job.name,
			Some(&job.namespace),
			&job.labels,
			&job.annotations,
			settings,
		),
		body: Spec { spec: job_spec(job) },
	}
}

pub fn cron_job<'a>(
	cron_job: &'a CronJobConfig,
	settings: Option<&ProjectSettings>,
) -> Object<Spec<CronJobSpec<'a>>> {
	Object {
		api_version: "batch/v1",
		kind: "CronJob",
		metadata: standalone_meta(
			&cron_job.name,
			Some(&cron_job.namespace),
			&cron_job.labels,
			&cron_job.annotations,
			settings,
		),
		body: Spec {
			spec: CronJobSpec {
				schedule: cron_job.schedule.clone(),
				concurrency_policy: cron_job.concurrency_policy,
				starting_deadline_seconds: cron_job.starting_deadline_seconds,
				successful_jobs_history_limit: cron_job.successful_jobs_history_limit,
				failed_jobs_history_limit: cron_job.failed_jobs_history_limit,
				job_template: Spec {
					spec: job_spec(&cron_job.job_template),
				},
			},
		},
	}
}

pub fn to_document(object: &impl Serialize) -> Result<Value> {
	Ok(serde_json::to_value(object)?)
}

/// Documents of a deployment, in output order: the Deployment, its Service,
/// its Ingress if any, then embedded ConfigMaps and Secrets.
pub fn deployment_documents(
	config: &DeploymentConfig,
	settings: Option<&ProjectSettings>,
) -> Result<Vec<Value>> {
	let mut out = vec![
		to_document(&deployment(config, settings))?,
		to_document(&service(config, settings))?,
	];
	if let Some(ingress) = ingress(config, settings) {
		out.push(to_document(&ingress)?);
	}
	legacy_documents(config, settings, &mut out)?;
	Ok(out)
}

/// Documents of a daemon set, the Service only when enabled.
pub fn daemon_set_documents(
	config: &DaemonSetConfig,
	settings: Option<&ProjectSettings>,
) -> Result<Vec<Value>> {
	let mut out = vec![to_document(&daemon_set(config, settings))?];
	if config.service_enabled {
		out.push(to_document(&service(config, settings))?);
	}
	legacy_documents(config, settings, &mut out)?;
	Ok(out)
}

fn legacy_documents<W: Workload>(
	workload: &W,
	settings: Option<&ProjectSettings>,
	out: &mut Vec<Value>,
) -> Result<()> {
	for config_map in workload.legacy_config_maps() {
		out.push(to_document(&legacy_config_map(workload, config_map, settings))?);
	}
	for secret in workload.legacy_secrets() {
		out.push(to_document(&legacy_secret(workload, secret, settings))?);
	}
	Ok(())
}
