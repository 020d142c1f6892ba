use serde::{Deserialize, Serialize};

/// Generic container description, as edited in a workload or job form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
	/// Falls back to `app` at render time when blank
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub image: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub port: Option<i32>,
	#[serde(default)]
	pub env: Vec<EnvVar>,
	#[serde(default)]
	pub resources: ResourceRequirements,
	#[serde(default)]
	pub volume_mounts: Vec<VolumeMount>,
	/// Single command word, wrapped into a one-element list when rendered
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub command: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub args: Option<String>,
}

impl Container {
	/// Blank container as seeded by a fresh workload, listening on 8080.
	pub fn seeded() -> Self {
		Self {
			port: Some(8080),
			..Self::default()
		}
	}

	/// Port, if set to something usable.
	///
	/// Zero counts as unset.
	pub fn port(&self) -> Option<i32> {
		self.port.filter(|p| *p != 0)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	/// Takes precedence over `value` when present
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value_from: Option<EnvSource>,
}

impl EnvVar {
	pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: Some(value.into()),
			value_from: None,
		}
	}

	pub fn from_source(
		name: impl Into<String>,
		kind: EnvSourceKind,
		source: impl Into<String>,
		key: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			value: None,
			value_from: Some(EnvSource {
				kind,
				name: source.into(),
				key: key.into(),
			}),
		}
	}
}

/// Reference to a key of a ConfigMap or Secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSource {
	#[serde(rename = "type")]
	pub kind: EnvSourceKind,
	pub name: String,
	pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvSourceKind {
	ConfigMap,
	Secret,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirements {
	#[serde(default)]
	pub requests: ResourceList,
	#[serde(default)]
	pub limits: ResourceList,
}

/// CPU and memory quantities, blank strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceList {
	#[serde(default)]
	pub cpu: String,
	#[serde(default)]
	pub memory: String,
}

impl ResourceList {
	pub fn new(cpu: impl Into<String>, memory: impl Into<String>) -> Self {
		Self {
			cpu: cpu.into(),
			memory: memory.into(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
	pub name: String,
	pub mount_path: String,
}

/// Single-container description stored directly on workloads saved before
/// multi-container support existed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyContainer {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub env: Option<Vec<LegacyEnvVar>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub resources: Option<LegacyResources>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyEnvVar {
	pub name: String,
	pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyResources {
	#[serde(default)]
	pub requests: ResourceList,
	#[serde(default)]
	pub limits: ResourceList,
}
