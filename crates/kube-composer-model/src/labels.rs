//! Label merging between project-wide global labels and resource labels.
//!
//! Precedence, from lowest to highest:
//! 1. project global labels
//! 2. resource-specific labels
//! 3. the reserved `project` label, always set to the project name

use indexmap::IndexMap;

use crate::ProjectSettings;

/// Ordered string map, used for labels, annotations, selectors and data.
///
/// Insertion order is the output order, re-inserting an existing key keeps
/// its original position.
pub type Labels = IndexMap<String, String>;

/// Reserved label key carrying the project name.
pub const PROJECT_LABEL: &str = "project";

/// Label key identifying the workload a resource belongs to.
pub const APP_NAME_LABEL: &str = "app.kubernetes.io/name";

/// Clean stale global labels out of `resource` and re-apply the current ones.
///
/// Every key of `old_global` is removed from the resource labels, as well as
/// any `project` key, before the result is assembled as
/// `new_global + cleaned resource labels + project`.
pub fn merge_labels(
	resource: &Labels,
	old_global: &Labels,
	new_global: &Labels,
	project_name: &str,
) -> Labels {
	let mut cleaned = resource.clone();
	for key in old_global.keys() {
		cleaned.shift_remove(key);
	}
	cleaned.shift_remove(PROJECT_LABEL);

	let mut out = new_global.clone();
	out.extend(cleaned);
	out.insert(PROJECT_LABEL.to_owned(), project_name.to_owned());
	out
}

/// Labels a resource carries in generated output.
///
/// Unlike [`merge_labels`] nothing is removed: without project settings the
/// resource labels are used verbatim.
pub fn effective_labels(resource: &Labels, settings: Option<&ProjectSettings>) -> Labels {
	match settings {
		Some(settings) => {
			let mut out = settings.global_labels.clone();
			out.extend(resource.iter().map(|(k, v)| (k.clone(), v.clone())));
			out.insert(PROJECT_LABEL.to_owned(), settings.name.clone());
			out
		}
		None => resource.clone(),
	}
}

/// Reduced label set used by workload selectors.
///
/// Selectors are immutable once applied to a cluster, so they deliberately
/// ignore global and resource labels.
pub fn selector_labels(app_name: &str, settings: Option<&ProjectSettings>) -> Labels {
	let mut out = Labels::new();
	out.insert(APP_NAME_LABEL.to_owned(), app_name.to_owned());
	if let Some(settings) = settings {
		out.insert(PROJECT_LABEL.to_owned(), settings.name.clone());
	}
	out
}

/// Build a [`Labels`] map from pairs, mostly useful in tests and CLI parsing.
pub fn labels<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Labels
where
	K: Into<String>,
	V: Into<String>,
{
	pairs
		.into_iter()
		.map(|(k, v)| (k.into(), v.into()))
		.collect()
}
