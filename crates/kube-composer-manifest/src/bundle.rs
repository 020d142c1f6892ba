//! Multi-document bundle composition and standalone per-kind views.

use kube_composer_model::{
	ConfigMap, CronJobConfig, DaemonSetConfig, DeploymentConfig, JobConfig, Namespace,
	ProjectSettings, Secret, Workload, Workspace,
};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
	banner, builders,
	error::Result,
	yaml::YamlFormat,
};

/// Separator between two documents of the same section.
const DOCUMENT_SEPARATOR: &str = "---";

/// Everything a bundle is rendered from.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleInput<'a> {
	pub deployments: &'a [DeploymentConfig],
	pub namespaces: &'a [Namespace],
	pub config_maps: &'a [ConfigMap],
	pub secrets: &'a [Secret],
	pub settings: Option<&'a ProjectSettings>,
	pub jobs: &'a [JobConfig],
	pub cron_jobs: &'a [CronJobConfig],
	pub daemon_sets: &'a [DaemonSetConfig],
}

impl<'a> From<&'a Workspace> for BundleInput<'a> {
	fn from(workspace: &'a Workspace) -> Self {
		Self {
			deployments: workspace.deployments().as_slice(),
			namespaces: workspace.namespaces().as_slice(),
			config_maps: workspace.config_maps().as_slice(),
			secrets: workspace.secrets().as_slice(),
			settings: Some(workspace.settings()),
			jobs: workspace.jobs().as_slice(),
			cron_jobs: workspace.cron_jobs().as_slice(),
			daemon_sets: workspace.daemon_sets().as_slice(),
		}
	}
}

impl<'a> BundleInput<'a> {
	/// Nothing was configured besides the default namespace.
	fn is_first_run(&self) -> bool {
		self.deployments.is_empty()
			&& self.namespaces.len() <= 1
			&& self.config_maps.is_empty()
			&& self.secrets.is_empty()
			&& self.jobs.is_empty()
			&& self.cron_jobs.is_empty()
			&& self.daemon_sets.is_empty()
	}

	fn custom_namespaces(&self) -> impl Iterator<Item = &'a Namespace> + 'a {
		self.namespaces.iter().filter(|ns| !ns.is_system())
	}
}

fn render_all(format: YamlFormat, documents: &[Value]) -> Result<Vec<String>> {
	documents.iter().map(|d| format.render(d)).collect()
}

/// Documents of one workload, joined the way a standalone view shows them.
fn join_documents(format: YamlFormat, documents: &[Value]) -> Result<String> {
	Ok(render_all(format, documents)?.join("\n---\n"))
}

/// Lines of one bundle section, documents separated by `---`.
#[derive(Default)]
struct Section {
	lines: Vec<String>,
}

impl Section {
	fn titled(title: &str) -> Self {
		Self {
			lines: vec![format!("# === {title} ===")],
		}
	}

	fn push(&mut self, line: impl Into<String>) {
		self.lines.push(line.into());
	}

	fn documents(&mut self, rendered: impl IntoIterator<Item = String>) {
		for (i, doc) in rendered.into_iter().enumerate() {
			if i > 0 {
				self.push(DOCUMENT_SEPARATOR);
			}
			self.push(doc);
		}
	}
}

fn header(input: &BundleInput<'_>, named_deployments: usize, named_daemon_sets: usize) -> Vec<String> {
	let mut lines = vec![
		"# Kubernetes Configuration".to_owned(),
		"# Generated by Kube Composer".to_owned(),
	];
	if let Some(settings) = input.settings {
		lines.push(format!("# Project: {}", settings.name));
		if let Some(description) = settings.description() {
			lines.push(format!("# Description: {description}"));
		}
		if !settings.global_labels.is_empty() {
			lines.push(format!(
				"# Global Labels: {} defined",
				settings.global_labels.len()
			));
		}
	}
	let custom_namespaces = input.custom_namespaces().count();
	if custom_namespaces > 0 {
		lines.push(format!("# Custom Namespaces: {custom_namespaces}"));
	}
	if !input.config_maps.is_empty() {
		lines.push(format!("# ConfigMaps: {}", input.config_maps.len()));
	}
	if !input.secrets.is_empty() {
		lines.push(format!("# Secrets: {}", input.secrets.len()));
	}
	if !input.deployments.is_empty() {
		lines.push(format!("# Deployments: {named_deployments}"));
		let containers: usize = input.deployments.iter().map(|d| d.containers.count()).sum();
		lines.push(format!("# Total Containers: {containers}"));
		let ingresses = input.deployments.iter().filter(|d| d.ingress.enabled).count();
		if ingresses > 0 {
			lines.push(format!("# Ingress Resources: {ingresses}"));
		}
	}
	if !input.daemon_sets.is_empty() {
		lines.push(format!("# DaemonSets: {named_daemon_sets}"));
		let containers: usize = input.daemon_sets.iter().map(|d| d.containers.count()).sum();
		lines.push(format!("# Total DaemonSet Containers: {containers}"));
	}
	if !input.jobs.is_empty() {
		lines.push(format!("# Jobs: {}", input.jobs.len()));
	}
	if !input.cron_jobs.is_empty() {
		lines.push(format!("# CronJobs: {}", input.cron_jobs.len()));
	}
	lines.push(String::new());
	lines
}

fn named<'a, W: Workload>(workloads: &'a [W]) -> Vec<&'a W> {
	let named = workloads.iter().filter(|w| w.is_named()).collect::<Vec<_>>();
	let dropped = workloads.len() - named.len();
	if dropped > 0 {
		debug!(kind = W::KIND, dropped, "skipping workloads without a name");
	}
	named
}

/// Render the whole working set as one multi-document YAML bundle.
///
/// Sections come in a fixed order: namespaces, configmaps, secrets,
/// daemonsets, deployments, jobs, cronjobs. Two non-empty sections are
/// separated by a single `---`.
#[instrument(skip_all)]
pub fn compose_bundle(input: &BundleInput<'_>, format: YamlFormat) -> Result<String> {
	if input.is_first_run() {
		return Ok(banner::welcome(input.settings));
	}
	let settings = input.settings;
	let deployments = named(input.deployments);
	let daemon_sets = named(input.daemon_sets);

	let mut sections = Vec::new();

	let namespaces = input
		.custom_namespaces()
		.map(|ns| format.render(&builders::to_document(&builders::namespace(ns, settings))?))
		.collect::<Result<Vec<_>>>()?;
	if !namespaces.is_empty() {
		let mut section = Section::titled("NAMESPACES");
		section.documents(namespaces);
		sections.push(section);
	}

	if !input.config_maps.is_empty() {
		let mut section = Section::titled("CONFIGMAPS");
		section.documents(
			input
				.config_maps
				.iter()
				.map(|cm| format.render(&builders::to_document(&builders::config_map(cm, settings))?))
				.collect::<Result<Vec<_>>>()?,
		);
		sections.push(section);
	}

	if !input.secrets.is_empty() {
		let mut section = Section::titled("SECRETS");
		section.documents(
			input
				.secrets
				.iter()
				.map(|s| format.render(&builders::to_document(&builders::secret(s, settings))?))
				.collect::<Result<Vec<_>>>()?,
		);
		sections.push(section);
	}

	if !daemon_sets.is_empty() {
		let mut section = Section::titled("DAEMONSETS");
		section.documents(
			daemon_sets
				.iter()
				.map(|ds| join_documents(format, &builders::daemon_set_documents(ds, settings)?))
				.collect::<Result<Vec<_>>>()?,
		);
		sections.push(section);
	}

	if deployments.is_empty() {
		let nothing_else = sections.is_empty() && input.jobs.is_empty() && input.cron_jobs.is_empty();
		if !input.deployments.is_empty() && nothing_else {
			return Ok(banner::needs_configuration(input.deployments.len()));
		}
	} else {
		let mut section = if sections.is_empty() {
			Section::default()
		} else {
			Section::titled("DEPLOYMENTS")
		};
		for (i, deployment) in deployments.iter().enumerate() {
			if i > 0 {
				section.push(DOCUMENT_SEPARATOR);
				section.push("");
			}
			if deployments.len() > 1 {
				section.push(format!(
					"# === {} DEPLOYMENT ===",
					deployment.app_name.to_uppercase()
				));
				section.push(format!("# Containers: {}", deployment.containers.count()));
				if deployment.ingress.enabled {
					section.push("# Ingress: Enabled");
				}
			}
			section.push(join_documents(
				format,
				&builders::deployment_documents(deployment, settings)?,
			)?);
		}
		sections.push(section);
	}

	if !input.jobs.is_empty() {
		let mut section = Section::titled("JOBS");
		for (i, job) in input.jobs.iter().enumerate() {
			if i > 0 {
				section.push(DOCUMENT_SEPARATOR);
				section.push("");
			}
			section.push(format.render(&builders::to_document(&builders::job(job, settings))?)?);
		}
		sections.push(section);
	}

	if !input.cron_jobs.is_empty() {
		let mut section = Section::titled("CRONJOBS");
		for (i, cron_job) in input.cron_jobs.iter().enumerate() {
			if i > 0 {
				section.push(DOCUMENT_SEPARATOR);
				section.push("");
			}
			section.push(
				format.render(&builders::to_document(&builders::cron_job(cron_job, settings))?)?,
			);
		}
		sections.push(section);
	}

	if sections.is_empty() {
		if !input.daemon_sets.is_empty() {
			return Ok(banner::daemon_sets_need_configuration(input.daemon_sets.len()));
		}
		// Only cluster-managed namespaces
		return Ok(String::new());
	}

	let mut lines = header(input, deployments.len(), daemon_sets.len());
	for (i, section) in sections.into_iter().enumerate() {
		if i > 0 {
			lines.push(DOCUMENT_SEPARATOR.to_owned());
			lines.push(String::new());
		}
		lines.extend(section.lines);
	}
	Ok(lines.join("\n"))
}

fn view_header(title: &str, total: &str, count: usize, settings: Option<&ProjectSettings>) -> Vec<String> {
	let mut lines = vec![
		format!("# {title}"),
		"# Generated by Kube Composer".to_owned(),
	];
	if let Some(settings) = settings {
		lines.push(format!("# Project: {}", settings.name));
	}
	lines.push(format!("# Total {total}: {count}"));
	lines.push(String::new());
	lines
}

/// Custom namespaces, each as its own document.
pub fn render_namespaces(
	namespaces: &[Namespace],
	settings: Option<&ProjectSettings>,
	format: YamlFormat,
) -> Result<String> {
	if namespaces.is_empty() {
		return Ok(banner::NO_NAMESPACES.to_owned());
	}
	let custom = namespaces.iter().filter(|ns| !ns.is_system()).collect::<Vec<_>>();
	if custom.is_empty() {
		return Ok(banner::only_system_namespaces(
			namespaces.iter().map(|ns| ns.name.as_str()),
			settings,
		));
	}
	let mut section = Section {
		lines: view_header("Custom Kubernetes Namespaces", "namespaces", custom.len(), settings),
	};
	section.documents(
		custom
			.into_iter()
			.map(|ns| format.render(&builders::to_document(&builders::namespace(ns, settings))?))
			.collect::<Result<Vec<_>>>()?,
	);
	Ok(section.lines.join("\n"))
}

pub fn render_config_maps(
	config_maps: &[ConfigMap],
	settings: Option<&ProjectSettings>,
	format: YamlFormat,
) -> Result<String> {
	if config_maps.is_empty() {
		return Ok(banner::NO_CONFIG_MAPS.to_owned());
	}
	let mut section = Section {
		lines: view_header("Kubernetes ConfigMaps", "ConfigMaps", config_maps.len(), settings),
	};
	section.documents(
		config_maps
			.iter()
			.map(|cm| format.render(&builders::to_document(&builders::config_map(cm, settings))?))
			.collect::<Result<Vec<_>>>()?,
	);
	Ok(section.lines.join("\n"))
}

pub fn render_secrets(
	secrets: &[Secret],
	settings: Option<&ProjectSettings>,
	format: YamlFormat,
) -> Result<String> {
	if secrets.is_empty() {
		return Ok(banner::NO_SECRETS.to_owned());
	}
	let mut section = Section {
		lines: view_header("Kubernetes Secrets", "Secrets", secrets.len(), settings),
	};
	section.documents(
		secrets
			.iter()
			.map(|s| format.render(&builders::to_document(&builders::secret(s, settings))?))
			.collect::<Result<Vec<_>>>()?,
	);
	Ok(section.lines.join("\n"))
}

/// Documents of a single deployment.
pub fn render_deployment(
	deployment: &DeploymentConfig,
	settings: Option<&ProjectSettings>,
	format: YamlFormat,
) -> Result<String> {
	if !deployment.is_named() {
		return Ok(banner::UNCONFIGURED_DEPLOYMENT.to_owned());
	}
	join_documents(format, &builders::deployment_documents(deployment, settings)?)
}

/// Documents of a single daemon set.
pub fn render_daemon_set(
	daemon_set: &DaemonSetConfig,
	settings: Option<&ProjectSettings>,
	format: YamlFormat,
) -> Result<String> {
	if !daemon_set.is_named() {
		return Ok(banner::UNCONFIGURED_DAEMON_SET.to_owned());
	}
	join_documents(format, &builders::daemon_set_documents(daemon_set, settings)?)
}

/// File name a bundle is downloaded under, if any deployment is named.
pub fn download_file_name(
	deployments: &[DeploymentConfig],
	settings: &ProjectSettings,
) -> Option<String> {
	let named = deployments.iter().filter(|d| d.is_named()).collect::<Vec<_>>();
	match named.as_slice() {
		[] => None,
		[only] => Some(format!("{}-{}-deployment.yaml", settings.name, only.app_name)),
		many => Some(format!(
			"{}-kubernetes-deployments-{}.yaml",
			settings.name,
			many.len()
		)),
	}
}

#[cfg(test)]
mod tests {
	use indoc::indoc;
	use kube_composer_model::{labels, Container, PodContainers, SecretType};
	use rstest::rstest;

	use super::*;

	fn settings() -> ProjectSettings {
		ProjectSettings::new("shop")
	}

	fn deployment(name: &str) -> DeploymentConfig {
		DeploymentConfig {
			app_name: name.to_owned(),
			containers: PodContainers::Multi(vec![Container {
				name: name.to_owned(),
				image: format!("{name}:1"),
				port: Some(8080),
				..Container::default()
			}]),
			..DeploymentConfig::default()
		}
	}

	fn compose(input: &BundleInput<'_>) -> String {
		compose_bundle(input, YamlFormat::PLAIN).unwrap()
	}

	#[test]
	fn first_run_shows_welcome() {
		let namespaces = [Namespace::new("default")];
		let settings = settings();
		let out = compose(&BundleInput {
			namespaces: &namespaces,
			settings: Some(&settings),
			..BundleInput::default()
		});
		assert_eq!(out, banner::welcome(Some(&settings)));
		assert!(out.contains("name: getting-started"));
	}

	#[test]
	fn unnamed_deployments_need_configuration() {
		let deployments = [DeploymentConfig::default(), DeploymentConfig::default()];
		let out = compose(&BundleInput {
			deployments: &deployments,
			..BundleInput::default()
		});
		assert_eq!(out, banner::needs_configuration(2));
	}

	#[test]
	fn unnamed_deployments_are_dropped() {
		let deployments = [
			DeploymentConfig::default(),
			deployment("web"),
			DeploymentConfig::default(),
		];
		let out = compose(&BundleInput {
			deployments: &deployments,
			..BundleInput::default()
		});
		assert_eq!(out.matches("kind: Deployment").count(), 1);
		assert!(out.contains("# Deployments: 1\n# Total Containers: 3\n"));
		// A single deployment gets no banner of its own
		assert!(!out.contains("# === WEB DEPLOYMENT ==="));
	}

	#[test]
	fn single_deployment_bundle() {
		let deployments = [deployment("web")];
		let settings = settings();
		let out = compose(&BundleInput {
			deployments: &deployments,
			settings: Some(&settings),
			..BundleInput::default()
		});
		assert_eq!(
			out,
			indoc! {"
				# Kubernetes Configuration
				# Generated by Kube Composer
				# Project: shop
				# Deployments: 1
				# Total Containers: 1

				apiVersion: apps/v1
				kind: Deployment
				metadata:
				  name: web
				  namespace: default
				  labels:
				    app.kubernetes.io/name: web
				    project: shop
				spec:
				  replicas: 1
				  selector:
				    matchLabels:
				      app.kubernetes.io/name: web
				      project: shop
				  template:
				    metadata:
				      labels:
				        app.kubernetes.io/name: web
				        project: shop
				    spec:
				      containers:
				        -
				          name: web
				          image: web:1
				          ports:
				            -
				              containerPort: 8080
				          resources:
				            requests:
				              cpu: 100m
				              memory: 128Mi

				---
				apiVersion: v1
				kind: Service
				metadata:
				  name: web-service
				  namespace: default
				  labels:
				    app.kubernetes.io/name: web
				    project: shop
				spec:
				  selector:
				    app.kubernetes.io/name: web
				    project: shop
				  ports:
				    -
				      port: 80
				      targetPort: 8080
				      protocol: TCP
				      name: http
				  type: ClusterIP
			"}
		);
	}

	#[test]
	fn sections_are_ordered_and_separated() {
		let namespaces = [Namespace::new("default"), Namespace::new("shop")];
		let config_maps = [ConfigMap::new("app-config", "shop")];
		let mut secret = Secret::new("db", "shop", SecretType::Opaque);
		secret.data = labels([("password", "hunter2")]);
		let secrets = [secret];
		let daemon_sets = [DaemonSetConfig {
			app_name: "agent".into(),
			..DaemonSetConfig::default()
		}];
		let deployments = [deployment("web"), deployment("api")];
		let jobs = [JobConfig::new("migrate", "shop")];
		let cron_jobs = [CronJobConfig::new("backup", "shop", "0 3 * * *")];
		let out = compose(&BundleInput {
			deployments: &deployments,
			namespaces: &namespaces,
			config_maps: &config_maps,
			secrets: &secrets,
			settings: None,
			jobs: &jobs,
			cron_jobs: &cron_jobs,
			daemon_sets: &daemon_sets,
		});

		let titles = out
			.lines()
			.filter(|l| l.starts_with("# === "))
			.collect::<Vec<_>>();
		assert_eq!(
			titles,
			[
				"# === NAMESPACES ===",
				"# === CONFIGMAPS ===",
				"# === SECRETS ===",
				"# === DAEMONSETS ===",
				"# === DEPLOYMENTS ===",
				"# === WEB DEPLOYMENT ===",
				"# === API DEPLOYMENT ===",
				"# === JOBS ===",
				"# === CRONJOBS ===",
			]
		);
		// Section boundaries
		assert!(out.contains("---\n\n# === CONFIGMAPS ===\n"));
		assert!(out.contains("---\n\n# === CRONJOBS ===\n"));
		// No empty documents
		assert!(!out.contains("---\n---"));
		assert!(!out.contains("---\n\n---"));
		assert!(out.contains("password: aHVudGVyMg==\n"));
		assert!(out.starts_with(indoc! {"
			# Kubernetes Configuration
			# Generated by Kube Composer
			# Custom Namespaces: 1
			# ConfigMaps: 1
			# Secrets: 1
			# Deployments: 2
			# Total Containers: 2
			# DaemonSets: 1
			# Total DaemonSet Containers: 1
			# Jobs: 1
			# CronJobs: 1

			# === NAMESPACES ===
			apiVersion: v1
			kind: Namespace
		"}));
	}

	#[test]
	fn regeneration_is_idempotent() {
		let deployments = [deployment("web"), deployment("api")];
		let config_maps = [ConfigMap::new("app-config", "default")];
		let settings = settings();
		let input = BundleInput {
			deployments: &deployments,
			config_maps: &config_maps,
			settings: Some(&settings),
			..BundleInput::default()
		};
		assert_eq!(compose(&input), compose(&input));
	}

	#[rstest]
	#[case::alone(&[], 2)]
	#[case::with_system_namespaces(&["default", "kube-system"], 1)]
	fn unnamed_daemon_sets_need_configuration(#[case] namespaces: &[&str], #[case] count: usize) {
		let namespaces = namespaces.iter().map(|n| Namespace::new(*n)).collect::<Vec<_>>();
		let daemon_sets = vec![DaemonSetConfig::default(); count];
		let out = compose(&BundleInput {
			namespaces: &namespaces,
			daemon_sets: &daemon_sets,
			..BundleInput::default()
		});
		assert_eq!(out, banner::daemon_sets_need_configuration(count));
	}

	#[test]
	fn unnamed_deployments_win_over_unnamed_daemon_sets() {
		let deployments = [DeploymentConfig::default()];
		let daemon_sets = [DaemonSetConfig::default()];
		let out = compose(&BundleInput {
			deployments: &deployments,
			daemon_sets: &daemon_sets,
			..BundleInput::default()
		});
		assert_eq!(out, banner::needs_configuration(1));
	}

	#[test]
	fn only_system_namespaces_render_nothing() {
		let namespaces = [Namespace::new("default"), Namespace::new("kube-system")];
		let out = compose(&BundleInput {
			namespaces: &namespaces,
			..BundleInput::default()
		});
		assert_eq!(out, "");
	}

	#[test]
	fn workspace_input() {
		let mut workspace = Workspace::new(settings());
		let id = workspace.new_deployment();
		let mut d = workspace.get(id).unwrap().clone();
		d.app_name = "web".into();
		workspace.update(id, d).unwrap();
		let out = compose_bundle(&BundleInput::from(&workspace), YamlFormat::PLAIN).unwrap();
		assert!(out.contains("# Project: shop\n"));
		assert!(out.contains("kind: Service\n"));
	}

	#[rstest]
	#[case::empty(&[], None)]
	#[case::one(&["web"], Some("shop-web-deployment.yaml"))]
	#[case::unnamed_ignored(&["web", ""], Some("shop-web-deployment.yaml"))]
	#[case::many(&["web", "api", "worker"], Some("shop-kubernetes-deployments-3.yaml"))]
	fn download_names(#[case] names: &[&str], #[case] expected: Option<&str>) {
		let deployments = names.iter().map(|n| deployment(n)).collect::<Vec<_>>();
		assert_eq!(
			download_file_name(&deployments, &settings()).as_deref(),
			expected
		);
	}

	#[test]
	fn namespace_view() {
		let namespaces = [Namespace::new("default"), Namespace::new("staging")];
		let settings = settings();
		let out = render_namespaces(&namespaces, Some(&settings), YamlFormat::PLAIN).unwrap();
		assert_eq!(
			out,
			indoc! {"
				# Custom Kubernetes Namespaces
				# Generated by Kube Composer
				# Project: shop
				# Total namespaces: 1

				apiVersion: v1
				kind: Namespace
				metadata:
				  name: staging
				  labels:
				    project: shop
			"}
		);
	}

	#[rstest]
	#[case::no_namespaces(&[], banner::NO_NAMESPACES)]
	#[case::system_only(&["default"], "# Only system namespaces available")]
	fn namespace_view_fallbacks(#[case] names: &[&str], #[case] prefix: &str) {
		let namespaces = names.iter().map(|n| Namespace::new(*n)).collect::<Vec<_>>();
		let out = render_namespaces(&namespaces, None, YamlFormat::PLAIN).unwrap();
		assert!(out.starts_with(prefix));
	}

	#[test]
	fn config_map_view_separates_documents() {
		let config_maps = [
			ConfigMap::new("a", "default"),
			ConfigMap::new("b", "default"),
		];
		let out = render_config_maps(&config_maps, None, YamlFormat::PLAIN).unwrap();
		assert!(out.starts_with("# Kubernetes ConfigMaps\n# Generated by Kube Composer\n# Total ConfigMaps: 2\n\n"));
		assert_eq!(out.matches("\n---\n").count(), 1);
		assert_eq!(
			render_config_maps(&[], None, YamlFormat::PLAIN).unwrap(),
			banner::NO_CONFIG_MAPS
		);
	}

	#[test]
	fn secret_view_encodes() {
		let mut secret = Secret::new("db", "default", SecretType::Opaque);
		secret.data = labels([("k", "v")]);
		let out = render_secrets(&[secret], None, YamlFormat::PLAIN).unwrap();
		assert!(out.contains("# Total Secrets: 1\n"));
		assert!(out.contains("  k: dg==\n"));
	}

	#[test]
	fn single_workload_views() {
		assert_eq!(
			render_deployment(&DeploymentConfig::default(), None, YamlFormat::PLAIN).unwrap(),
			banner::UNCONFIGURED_DEPLOYMENT
		);
		assert_eq!(
			render_daemon_set(&DaemonSetConfig::default(), None, YamlFormat::PLAIN).unwrap(),
			banner::UNCONFIGURED_DAEMON_SET
		);
		let out = render_deployment(&deployment("web"), None, YamlFormat::PLAIN).unwrap();
		assert_eq!(out.matches("\n---\n").count(), 1);
	}

	#[test]
	fn quoted_format_is_threaded_through() {
		let mut cm = ConfigMap::new("app-config", "default");
		cm.data = labels([("port", "8080")]);
		let out = render_config_maps(&[cm], None, YamlFormat::QUOTED).unwrap();
		assert!(out.contains("  port: \"8080\"\n"));
	}
}
