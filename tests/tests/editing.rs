//! Editing a workspace and regenerating the bundle from it.

use kube_composer_manifest::{compose_bundle, BundleInput, YamlFormat};
use kube_composer_model::{ConfigMap, DeploymentConfig, Namespace, ProjectSettings, Workspace};

fn bundle(workspace: &Workspace) -> String {
	compose_bundle(&BundleInput::from(workspace), YamlFormat::PLAIN).unwrap()
}

fn shop() -> Workspace {
	let mut workspace = Workspace::new(ProjectSettings::new("shop"));
	workspace.add(Namespace::new("shop"));
	workspace.add(ConfigMap::new("app-config", "shop"));
	workspace.add(DeploymentConfig {
		app_name: "web".into(),
		namespace: "shop".into(),
		selected_config_maps: vec!["app-config".into()],
		..DeploymentConfig::default()
	});
	workspace
}

#[test]
fn renamed_config_map_follows_into_bundle() {
	let mut workspace = shop();
	let id = workspace.find::<ConfigMap>("app-config").unwrap();
	let mut renamed = workspace.get(id).unwrap().clone();
	renamed.name = "settings".into();
	workspace.update(id, renamed).unwrap();

	let web = workspace.find::<DeploymentConfig>("web").unwrap();
	assert_eq!(workspace.get(web).unwrap().selected_config_maps, ["settings"]);

	let out = bundle(&workspace);
	assert!(!out.contains("app-config"));
	assert!(out.contains("name: settings\n"));
}

#[test]
fn removed_namespace_moves_workloads_to_default() {
	let mut workspace = shop();
	let id = workspace.find::<Namespace>("shop").unwrap();
	workspace.remove(id).unwrap();

	let out = bundle(&workspace);
	assert!(!out.contains("# === NAMESPACES ==="));
	assert!(!out.contains("namespace: shop\n"));
	assert!(out.contains("  namespace: default\n"));
}

#[test]
fn global_labels_reach_every_document() {
	let mut workspace = shop();
	let mut settings = workspace.settings().clone();
	settings.global_labels.insert("env".into(), "prod".into());
	workspace.update_settings(settings);

	let out = bundle(&workspace);
	assert!(out.contains("# Global Labels: 1 defined\n"));
	let documents = out.matches("\nkind: ").count();
	assert!(out.matches("    env: prod\n").count() >= documents);
}

#[test]
fn snapshot_round_trip_renders_the_same() {
	let workspace = shop();
	let text = workspace.to_snapshot().to_json().unwrap();
	let reloaded =
		Workspace::from_snapshot(kube_composer_model::Snapshot::from_json(&text).unwrap());
	assert_eq!(bundle(&reloaded), bundle(&workspace));
}
