//! Advisory checks over a working set.
//!
//! Nothing here gates generation: unnamed workloads are simply skipped by the
//! manifest composer, these messages only tell the user why.

use std::fmt;

use crate::{Container, PodContainers, Workload, Workspace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
	/// Location, like `Deployment 1, Container 2`
	pub subject: String,
	pub message: &'static str,
}

impl fmt::Display for Issue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.subject, self.message)
	}
}

struct Issues(Vec<Issue>);

impl Issues {
	fn push(&mut self, subject: impl Into<String>, message: &'static str) {
		self.0.push(Issue {
			subject: subject.into(),
			message,
		});
	}

	fn containers(&mut self, subject: &str, containers: &[Container]) {
		if containers.is_empty() {
			self.push(subject, "At least one container is required");
			return;
		}
		for (i, container) in containers.iter().enumerate() {
			let subject = format!("{subject}, Container {}", i + 1);
			if container.name.is_empty() {
				self.push(subject.clone(), "Name is required");
			}
			if container.image.is_empty() {
				self.push(subject, "Image is required");
			}
		}
	}

	fn workload<W: Workload>(&mut self, kind: &str, index: usize, workload: &W) {
		let subject = format!("{kind} {}", index + 1);
		if !workload.is_named() {
			self.push(subject.clone(), "Application name is required");
		}
		match workload.containers() {
			PodContainers::Multi(containers) => self.containers(&subject, containers),
			PodContainers::Legacy(_) => self.containers(&subject, &[]),
		}
	}
}

pub fn validate(workspace: &Workspace) -> Vec<Issue> {
	let mut issues = Issues(Vec::new());

	for (i, deployment) in workspace.deployments().as_slice().iter().enumerate() {
		issues.workload("Deployment", i, deployment);
		let subject = format!("Deployment {}", i + 1);
		if deployment.port <= 0 {
			issues.push(subject.clone(), "Service port must be greater than 0");
		}
		if deployment.target_port <= 0 {
			issues.push(subject.clone(), "Target port must be greater than 0");
		}
		if deployment.replicas <= 0 {
			issues.push(subject, "Replicas must be greater than 0");
		}
	}
	for (i, daemon_set) in workspace.daemon_sets().as_slice().iter().enumerate() {
		issues.workload("DaemonSet", i, daemon_set);
	}

	let jobs = workspace
		.jobs()
		.as_slice()
		.iter()
		.map(|j| (j.name.as_str(), j.namespace.as_str(), j.containers.as_slice()))
		.chain(workspace.cron_jobs().as_slice().iter().map(|c| {
			(
				c.name.as_str(),
				c.namespace.as_str(),
				c.job_template.containers.as_slice(),
			)
		}));
	for (i, (name, namespace, containers)) in jobs.enumerate() {
		let subject = format!("Job {}", i + 1);
		if name.is_empty() {
			issues.push(subject.clone(), "Name is required");
		}
		if namespace.is_empty() {
			issues.push(subject.clone(), "Namespace is required");
		}
		issues.containers(&subject, containers);
	}

	issues.0
}

/// Number of Kubernetes objects the working set stands for.
pub fn resource_count(workspace: &Workspace) -> usize {
	let deployments: usize = workspace
		.deployments()
		.as_slice()
		.iter()
		.filter(|d| d.is_named())
		.map(|d| if d.ingress.enabled { 3 } else { 2 })
		.sum();
	let daemon_sets: usize = workspace
		.daemon_sets()
		.as_slice()
		.iter()
		.filter(|d| d.is_named())
		.map(|d| if d.service_enabled { 2 } else { 1 })
		.sum();
	deployments
		+ daemon_sets
		+ workspace.config_maps().len()
		+ workspace.secrets().len()
		+ workspace.namespaces().len()
		+ workspace.jobs().len()
		+ workspace.cron_jobs().len()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{ConfigMap, CronJobConfig, DeploymentConfig, JobConfig};

	fn messages(workspace: &Workspace) -> Vec<String> {
		validate(workspace).iter().map(ToString::to_string).collect()
	}

	#[test]
	fn fresh_deployment_needs_name_and_container_fields() {
		let mut ws = Workspace::default();
		ws.new_deployment();
		assert_eq!(
			messages(&ws),
			[
				"Deployment 1: Application name is required",
				"Deployment 1, Container 1: Name is required",
				"Deployment 1, Container 1: Image is required",
			]
		);
	}

	#[test]
	fn port_checks() {
		let mut ws = Workspace::default();
		let mut d = DeploymentConfig {
			app_name: "web".into(),
			port: 0,
			replicas: 0,
			..DeploymentConfig::default()
		};
		d.containers.as_mut_slice()[0].name = "web".into();
		d.containers.as_mut_slice()[0].image = "nginx".into();
		ws.add(d);
		assert_eq!(
			messages(&ws),
			[
				"Deployment 1: Service port must be greater than 0",
				"Deployment 1: Replicas must be greater than 0",
			]
		);
	}

	#[test]
	fn jobs_and_cron_jobs_share_numbering() {
		let mut ws = Workspace::default();
		ws.add(JobConfig::new("migrate", "default"));
		ws.add(CronJobConfig::new("", "", "* * * * *"));
		assert_eq!(
			messages(&ws),
			[
				"Job 1: At least one container is required",
				"Job 2: Name is required",
				"Job 2: Namespace is required",
				"Job 2: At least one container is required",
			]
		);
	}

	#[test]
	fn counts() {
		let mut ws = Workspace::default();
		ws.new_deployment();
		ws.add(DeploymentConfig {
			app_name: "web".into(),
			..DeploymentConfig::default()
		});
		let mut with_ingress = DeploymentConfig {
			app_name: "api".into(),
			..DeploymentConfig::default()
		};
		with_ingress.ingress.enabled = true;
		ws.add(with_ingress);
		ws.add(ConfigMap::new("cfg", "default"));
		// default namespace + 1 configmap + 2 + 3
		assert_eq!(resource_count(&ws), 7);
	}
}
