use kube_composer_model::{Container, EnvSourceKind, EnvVar, LegacyContainer, PodContainers};

use crate::objects::{
	ContainerPort, ContainerSpec, EnvVarSource, EnvVarSpec, KeyRef, Limits, Quantities,
	ResourcesSpec,
};

/// Request applied when a container leaves its CPU request blank.
pub const DEFAULT_CPU_REQUEST: &str = "100m";
/// Request applied when a container leaves its memory request blank.
pub const DEFAULT_MEMORY_REQUEST: &str = "128Mi";
/// Image of the synthetic container of legacy workloads without one.
pub const LEGACY_DEFAULT_IMAGE: &str = "nginx:latest";
/// Name given to containers rendered without one.
pub const FALLBACK_CONTAINER_NAME: &str = "app";

fn or_default(value: &str, default: &str) -> String {
	let value = if value.is_empty() { default } else { value };
	value.to_owned()
}

fn non_blank(value: &str) -> Option<String> {
	(!value.is_empty()).then(|| value.to_owned())
}

/// Pod template containers of a workload.
///
/// A workload without containers yields one synthetic container built from
/// its legacy single-container fields, listening on `target_port`.
pub fn build_containers(containers: &PodContainers, target_port: i32) -> Vec<ContainerSpec> {
	match containers {
		PodContainers::Multi(list) if !list.is_empty() => list.iter().map(build_container).collect(),
		PodContainers::Multi(_) => vec![build_legacy(&LegacyContainer::default(), target_port)],
		PodContainers::Legacy(legacy) => vec![build_legacy(legacy, target_port)],
	}
}

pub fn build_container(container: &Container) -> ContainerSpec {
	let requests = &container.resources.requests;
	let limits = &container.resources.limits;
	let limits = Limits {
		cpu: non_blank(&limits.cpu),
		memory: non_blank(&limits.memory),
	};
	ContainerSpec {
		name: or_default(&container.name, FALLBACK_CONTAINER_NAME),
		image: container.image.clone(),
		ports: container.port().map(|port| {
			vec![ContainerPort {
				container_port: port,
			}]
		}),
		env: (!container.env.is_empty()).then(|| container.env.iter().map(build_env).collect()),
		volume_mounts: (!container.volume_mounts.is_empty())
			.then(|| container.volume_mounts.clone()),
		command: container.command.as_deref().and_then(non_blank).map(|c| vec![c]),
		args: container.args.as_deref().and_then(non_blank).map(|a| vec![a]),
		resources: ResourcesSpec {
			requests: Quantities {
				cpu: or_default(&requests.cpu, DEFAULT_CPU_REQUEST),
				memory: or_default(&requests.memory, DEFAULT_MEMORY_REQUEST),
			},
			limits: (limits.cpu.is_some() || limits.memory.is_some()).then_some(limits),
		},
	}
}

fn build_env(env: &EnvVar) -> EnvVarSpec {
	match &env.value_from {
		Some(source) => {
			let key_ref = KeyRef {
				name: source.name.clone(),
				key: source.key.clone(),
			};
			EnvVarSpec {
				name: env.name.clone(),
				value: None,
				value_from: Some(match source.kind {
					EnvSourceKind::ConfigMap => EnvVarSource::ConfigMapKeyRef(key_ref),
					EnvSourceKind::Secret => EnvVarSource::SecretKeyRef(key_ref),
				}),
			}
		}
		None => EnvVarSpec {
			name: env.name.clone(),
			value: env.value.clone(),
			value_from: None,
		},
	}
}

fn build_legacy(legacy: &LegacyContainer, target_port: i32) -> ContainerSpec {
	let requests = legacy
		.resources
		.as_ref()
		.map(|r| &r.requests)
		.cloned()
		.unwrap_or_default();
	ContainerSpec {
		name: FALLBACK_CONTAINER_NAME.to_owned(),
		image: or_default(
			legacy.image.as_deref().unwrap_or_default(),
			LEGACY_DEFAULT_IMAGE,
		),
		ports: Some(vec![ContainerPort {
			container_port: target_port,
		}]),
		// Always present, even when empty
		env: Some(
			legacy
				.env
				.iter()
				.flatten()
				.map(|e| EnvVarSpec {
					name: e.name.clone(),
					value: Some(e.value.clone()),
					value_from: None,
				})
				.collect(),
		),
		volume_mounts: None,
		command: None,
		args: None,
		resources: ResourcesSpec {
			requests: Quantities {
				cpu: or_default(&requests.cpu, DEFAULT_CPU_REQUEST),
				memory: or_default(&requests.memory, DEFAULT_MEMORY_REQUEST),
			},
			limits: None,
		},
	}
}
