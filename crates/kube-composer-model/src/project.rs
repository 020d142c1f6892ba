use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Labels;

/// Name used when a project has not been configured yet.
pub const DEFAULT_PROJECT_NAME: &str = "my-project";

/// Project-wide settings, shared by every resource of the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Applied to every resource, resource labels take precedence
	#[serde(default)]
	pub global_labels: Labels,
	#[serde(default = "Utc::now")]
	pub created_at: DateTime<Utc>,
	#[serde(default = "Utc::now")]
	pub updated_at: DateTime<Utc>,
}

impl ProjectSettings {
	pub fn new(name: impl Into<String>) -> Self {
		let now = Utc::now();
		Self {
			name: name.into(),
			description: None,
			global_labels: Labels::new(),
			created_at: now,
			updated_at: now,
		}
	}

	/// Description, treating a blank one as absent.
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref().filter(|d| !d.is_empty())
	}
}

impl Default for ProjectSettings {
	fn default() -> Self {
		Self::new(DEFAULT_PROJECT_NAME)
	}
}
