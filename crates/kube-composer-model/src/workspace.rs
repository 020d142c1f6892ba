//! In-memory working set of a project.
//!
//! All mutations go through [`Workspace`], which keeps labels normalized
//! against the project settings and cascades removals and renames into the
//! records referencing the touched resource.

use chrono::Utc;
use tracing::debug;

use crate::{
	collection::{Collection, Id},
	error::{Result, WorkspaceError},
	is_system_namespace, merge_labels, ConfigMap, Container, CronJobConfig, DaemonSetConfig,
	DeploymentConfig, EnvSourceKind, JobConfig, Labels, Namespace, PodContainers, ProjectSettings,
	Secret, Snapshot, VolumeSource, Workload, WorkloadRefs, DEFAULT_NAMESPACE,
};

/// Suffix appended to names of duplicated resources.
const COPY_SUFFIX: &str = "-copy";

#[derive(Debug, Clone)]
pub struct Workspace {
	settings: ProjectSettings,
	namespaces: Collection<Namespace>,
	config_maps: Collection<ConfigMap>,
	secrets: Collection<Secret>,
	deployments: Collection<DeploymentConfig>,
	daemon_sets: Collection<DaemonSetConfig>,
	jobs: Collection<JobConfig>,
	cron_jobs: Collection<CronJobConfig>,
}

/// A labelled record stored in a [`Workspace`].
pub trait Resource: Clone + Sized {
	/// Lowercase kind name, used in messages
	const NOUN: &'static str;

	fn name(&self) -> &str;
	fn labels_mut(&mut self) -> &mut Labels;

	fn collection(workspace: &Workspace) -> &Collection<Self>;
	fn collection_mut(workspace: &mut Workspace) -> &mut Collection<Self>;

	/// Independent copy meant to live right after the original.
	fn duplicated(&self) -> Self;

	/// Refuse removal before anything is touched.
	fn check_remove(&self) -> Result<()> {
		Ok(())
	}
	/// Refuse an update before anything is touched.
	fn check_update(&self, _new: &Self) -> Result<()> {
		Ok(())
	}
	/// Clean references to a removed record.
	fn removed(_workspace: &mut Workspace, _removed: &Self) {}
	/// Point references at the new name of a record.
	fn renamed(_workspace: &mut Workspace, _old: &str, _new: &str) {}
}

fn copy_name(name: &str) -> String {
	format!("{name}{COPY_SUFFIX}")
}

impl Workspace {
	/// Empty working set, with only the `default` namespace.
	pub fn new(settings: ProjectSettings) -> Self {
		let mut namespaces = Collection::new();
		namespaces.push(Namespace::new(DEFAULT_NAMESPACE));
		Self {
			settings,
			namespaces,
			config_maps: Collection::new(),
			secrets: Collection::new(),
			deployments: Collection::new(),
			daemon_sets: Collection::new(),
			jobs: Collection::new(),
			cron_jobs: Collection::new(),
		}
	}

	pub fn from_snapshot(snapshot: Snapshot) -> Self {
		Self {
			settings: snapshot.project_settings,
			namespaces: snapshot.namespaces.into_iter().collect(),
			config_maps: snapshot.config_maps.into_iter().collect(),
			secrets: snapshot.secrets.into_iter().collect(),
			deployments: snapshot.deployments.into_iter().collect(),
			daemon_sets: snapshot.daemon_sets.into_iter().collect(),
			jobs: snapshot.jobs.into_iter().collect(),
			cron_jobs: snapshot.cron_jobs.into_iter().collect(),
		}
	}

	pub fn to_snapshot(&self) -> Snapshot {
		Snapshot {
			project_settings: self.settings.clone(),
			namespaces: self.namespaces.as_slice().to_vec(),
			config_maps: self.config_maps.as_slice().to_vec(),
			secrets: self.secrets.as_slice().to_vec(),
			deployments: self.deployments.as_slice().to_vec(),
			daemon_sets: self.daemon_sets.as_slice().to_vec(),
			jobs: self.jobs.as_slice().to_vec(),
			cron_jobs: self.cron_jobs.as_slice().to_vec(),
		}
	}

	pub fn settings(&self) -> &ProjectSettings {
		&self.settings
	}
	pub fn namespaces(&self) -> &Collection<Namespace> {
		&self.namespaces
	}
	pub fn config_maps(&self) -> &Collection<ConfigMap> {
		&self.config_maps
	}
	pub fn secrets(&self) -> &Collection<Secret> {
		&self.secrets
	}
	pub fn deployments(&self) -> &Collection<DeploymentConfig> {
		&self.deployments
	}
	pub fn daemon_sets(&self) -> &Collection<DaemonSetConfig> {
		&self.daemon_sets
	}
	pub fn jobs(&self) -> &Collection<JobConfig> {
		&self.jobs
	}
	pub fn cron_jobs(&self) -> &Collection<CronJobConfig> {
		&self.cron_jobs
	}

	pub fn get<T: Resource>(&self, id: Id<T>) -> Option<&T> {
		T::collection(self).get(id)
	}

	pub fn iter<'a, T: Resource + 'a>(&'a self) -> impl Iterator<Item = (Id<T>, &'a T)> {
		T::collection(self).iter()
	}

	/// First record of its kind carrying `name`.
	pub fn find<T: Resource>(&self, name: &str) -> Option<Id<T>> {
		T::collection(self).find(|r| r.name() == name)
	}

	pub fn find_required<T: Resource>(&self, name: &str) -> Result<Id<T>> {
		self.find(name).ok_or_else(|| WorkspaceError::UnknownName {
			kind: T::NOUN,
			name: name.to_owned(),
		})
	}

	fn with_current_labels<T: Resource>(&self, mut item: T) -> T {
		let labels = merge_labels(
			item.labels_mut(),
			&Labels::new(),
			&self.settings.global_labels,
			&self.settings.name,
		);
		*item.labels_mut() = labels;
		item
	}

	pub fn add<T: Resource>(&mut self, item: T) -> Id<T> {
		let item = self.with_current_labels(item);
		T::collection_mut(self).push(item)
	}

	/// Add a blank deployment, seeded with one container on port 8080.
	pub fn new_deployment(&mut self) -> Id<DeploymentConfig> {
		self.add(DeploymentConfig::default())
	}

	pub fn new_daemon_set(&mut self) -> Id<DaemonSetConfig> {
		self.add(DaemonSetConfig::default())
	}

	/// Replace a record as a whole.
	///
	/// A changed name is propagated to every record referencing the old one.
	pub fn update<T: Resource>(&mut self, id: Id<T>, item: T) -> Result<()> {
		let old = self.lookup(id)?.clone();
		old.check_update(&item)?;
		let item = self.with_current_labels(item);
		let renamed = (old.name() != item.name()).then(|| item.name().to_owned());
		T::collection_mut(self).replace(id, item);
		if let Some(new) = renamed {
			debug!(kind = T::NOUN, old = old.name(), %new, "propagating rename");
			T::renamed(self, old.name(), &new);
		}
		Ok(())
	}

	pub fn duplicate<T: Resource>(&mut self, id: Id<T>) -> Result<Id<T>> {
		let copy = self.with_current_labels(self.lookup(id)?.duplicated());
		T::collection_mut(self)
			.insert_after(id, copy)
			.ok_or_else(|| unknown_id::<T>(id))
	}

	pub fn remove<T: Resource>(&mut self, id: Id<T>) -> Result<T> {
		self.lookup(id)?.check_remove()?;
		let removed = T::collection_mut(self)
			.remove(id)
			.ok_or_else(|| unknown_id::<T>(id))?;
		T::removed(self, &removed);
		Ok(removed)
	}

	/// Store new project settings, relabelling every resource.
	///
	/// Labels inherited from the previous global set are removed, even when
	/// the new set renames or drops their keys.
	pub fn update_settings(&mut self, mut settings: ProjectSettings) {
		let old_global = std::mem::take(&mut self.settings.global_labels);
		settings.updated_at = Utc::now();
		debug!(project = %settings.name, "relabelling all resources");

		fn relabel<T: Resource>(
			collection: &Collection<T>,
			old_global: &Labels,
			settings: &ProjectSettings,
		) -> Collection<T> {
			collection.map(|item| {
				let mut item = item.clone();
				let labels = merge_labels(
					item.labels_mut(),
					old_global,
					&settings.global_labels,
					&settings.name,
				);
				*item.labels_mut() = labels;
				item
			})
		}

		let namespaces = relabel(&self.namespaces, &old_global, &settings);
		let config_maps = relabel(&self.config_maps, &old_global, &settings);
		let secrets = relabel(&self.secrets, &old_global, &settings);
		let deployments = relabel(&self.deployments, &old_global, &settings);
		let daemon_sets = relabel(&self.daemon_sets, &old_global, &settings);
		let jobs = relabel(&self.jobs, &old_global, &settings);
		let cron_jobs = relabel(&self.cron_jobs, &old_global, &settings);

		self.namespaces = namespaces;
		self.config_maps = config_maps;
		self.secrets = secrets;
		self.deployments = deployments;
		self.daemon_sets = daemon_sets;
		self.jobs = jobs;
		self.cron_jobs = cron_jobs;
		self.settings = settings;
	}

	fn lookup<T: Resource>(&self, id: Id<T>) -> Result<&T> {
		T::collection(self).get(id).ok_or_else(|| unknown_id::<T>(id))
	}

	fn rewrite_workloads(&mut self, f: impl Fn(WorkloadRefs<'_>)) {
		let deployments = self.deployments.map(|d| {
			let mut d = d.clone();
			f(d.refs_mut());
			d
		});
		let daemon_sets = self.daemon_sets.map(|d| {
			let mut d = d.clone();
			f(d.refs_mut());
			d
		});
		self.deployments = deployments;
		self.daemon_sets = daemon_sets;
	}

	/// Rewrite every container, including those of jobs and cron jobs.
	fn rewrite_containers(&mut self, f: impl Fn(&mut Container)) {
		self.rewrite_workloads(|refs| {
			refs.containers.as_mut_slice().iter_mut().for_each(&f);
		});
		let jobs = self.jobs.map(|j| {
			let mut j = j.clone();
			j.containers.iter_mut().for_each(&f);
			j
		});
		let cron_jobs = self.cron_jobs.map(|c| {
			let mut c = c.clone();
			c.job_template.containers.iter_mut().for_each(&f);
			c
		});
		self.jobs = jobs;
		self.cron_jobs = cron_jobs;
	}

	/// Move everything living in namespace `from` to namespace `to`.
	fn move_namespace(&mut self, from: &str, to: &str) {
		fn moved<T: Clone>(
			collection: &Collection<T>,
			namespace: impl Fn(&mut T) -> &mut String,
			from: &str,
			to: &str,
		) -> Collection<T> {
			collection.map(|item| {
				let mut item = item.clone();
				let ns = namespace(&mut item);
				if *ns == from {
					to.clone_into(ns);
				}
				item
			})
		}

		self.rewrite_workloads(|refs| {
			if *refs.namespace == from {
				to.clone_into(refs.namespace);
			}
		});
		let config_maps = moved(&self.config_maps, |c| &mut c.namespace, from, to);
		let secrets = moved(&self.secrets, |s| &mut s.namespace, from, to);
		let jobs = moved(&self.jobs, |j| &mut j.namespace, from, to);
		let cron_jobs = moved(&self.cron_jobs, |c| &mut c.namespace, from, to);
		self.config_maps = config_maps;
		self.secrets = secrets;
		self.jobs = jobs;
		self.cron_jobs = cron_jobs;
	}
}

impl Default for Workspace {
	fn default() -> Self {
		Self::new(ProjectSettings::default())
	}
}

fn unknown_id<T: Resource>(id: Id<T>) -> WorkspaceError {
	WorkspaceError::UnknownId {
		kind: T::NOUN,
		id: format!("{id:?}"),
	}
}

impl Resource for Namespace {
	const NOUN: &'static str = "namespace";

	fn name(&self) -> &str {
		&self.name
	}
	fn labels_mut(&mut self) -> &mut Labels {
		&mut self.labels
	}
	fn collection(workspace: &Workspace) -> &Collection<Self> {
		&workspace.namespaces
	}
	fn collection_mut(workspace: &mut Workspace) -> &mut Collection<Self> {
		&mut workspace.namespaces
	}

	fn duplicated(&self) -> Self {
		Self {
			name: copy_name(&self.name),
			created_at: Utc::now(),
			..self.clone()
		}
	}

	fn check_remove(&self) -> Result<()> {
		if self.is_system() {
			return Err(WorkspaceError::ProtectedNamespace(self.name.clone()));
		}
		Ok(())
	}

	fn check_update(&self, new: &Self) -> Result<()> {
		if self.is_system() && self.name != new.name {
			return Err(WorkspaceError::ProtectedNamespace(self.name.clone()));
		}
		Ok(())
	}

	fn removed(workspace: &mut Workspace, removed: &Self) {
		debug!(namespace = %removed.name, "moving resources to default namespace");
		workspace.move_namespace(&removed.name, DEFAULT_NAMESPACE);
	}

	fn renamed(workspace: &mut Workspace, old: &str, new: &str) {
		if !is_system_namespace(old) {
			workspace.move_namespace(old, new);
		}
	}
}

impl Resource for ConfigMap {
	const NOUN: &'static str = "configmap";

	fn name(&self) -> &str {
		&self.name
	}
	fn labels_mut(&mut self) -> &mut Labels {
		&mut self.labels
	}
	fn collection(workspace: &Workspace) -> &Collection<Self> {
		&workspace.config_maps
	}
	fn collection_mut(workspace: &mut Workspace) -> &mut Collection<Self> {
		&mut workspace.config_maps
	}

	fn duplicated(&self) -> Self {
		Self {
			name: copy_name(&self.name),
			created_at: Utc::now(),
			..self.clone()
		}
	}

	fn removed(workspace: &mut Workspace, removed: &Self) {
		let name = removed.name.as_str();
		debug!(configmap = name, "dropping references");
		workspace.rewrite_workloads(|refs| {
			refs.selected_config_maps.retain(|n| n != name);
			refs.volumes.retain(|v| v.config_map_name() != Some(name));
		});
	}

	fn renamed(workspace: &mut Workspace, old: &str, new: &str) {
		workspace.rewrite_workloads(|refs| {
			for selected in refs.selected_config_maps.iter_mut() {
				if *selected == old {
					new.clone_into(selected);
				}
			}
			for volume in refs.volumes.iter_mut() {
				if volume.config_map_name() == Some(old) {
					volume.source = VolumeSource::ConfigMap {
						config_map_name: Some(new.to_owned()),
					};
				}
			}
		});
		workspace.rewrite_containers(|c| rename_env_source(c, EnvSourceKind::ConfigMap, old, new));
	}
}

impl Resource for Secret {
	const NOUN: &'static str = "secret";

	fn name(&self) -> &str {
		&self.name
	}
	fn labels_mut(&mut self) -> &mut Labels {
		&mut self.labels
	}
	fn collection(workspace: &Workspace) -> &Collection<Self> {
		&workspace.secrets
	}
	fn collection_mut(workspace: &mut Workspace) -> &mut Collection<Self> {
		&mut workspace.secrets
	}

	fn duplicated(&self) -> Self {
		Self {
			name: copy_name(&self.name),
			created_at: Utc::now(),
			..self.clone()
		}
	}

	fn removed(workspace: &mut Workspace, removed: &Self) {
		let name = removed.name.as_str();
		debug!(secret = name, "dropping references");
		workspace.rewrite_workloads(|refs| {
			refs.selected_secrets.retain(|n| n != name);
			refs.volumes.retain(|v| v.secret_name() != Some(name));
			if let Some(tls) = refs.ingress_tls {
				tls.retain(|t| t.secret_name != name);
			}
		});
	}

	fn renamed(workspace: &mut Workspace, old: &str, new: &str) {
		workspace.rewrite_workloads(|refs| {
			for selected in refs.selected_secrets.iter_mut() {
				if *selected == old {
					new.clone_into(selected);
				}
			}
			for volume in refs.volumes.iter_mut() {
				if volume.secret_name() == Some(old) {
					volume.source = VolumeSource::Secret {
						secret_name: Some(new.to_owned()),
					};
				}
			}
			if let Some(tls) = refs.ingress_tls {
				for entry in tls.iter_mut().filter(|t| t.secret_name == old) {
					new.clone_into(&mut entry.secret_name);
				}
			}
		});
		workspace.rewrite_containers(|c| rename_env_source(c, EnvSourceKind::Secret, old, new));
	}
}

fn rename_env_source(container: &mut Container, kind: EnvSourceKind, old: &str, new: &str) {
	for source in container.env.iter_mut().filter_map(|e| e.value_from.as_mut()) {
		if source.kind == kind && source.name == old {
			new.clone_into(&mut source.name);
		}
	}
}

fn duplicated_containers(containers: &PodContainers) -> PodContainers {
	match containers {
		PodContainers::Multi(containers) => PodContainers::Multi(
			containers
				.iter()
				.map(|c| Container {
					name: if c.name.is_empty() {
						String::new()
					} else {
						copy_name(&c.name)
					},
					..c.clone()
				})
				.collect(),
		),
		PodContainers::Legacy(legacy) => PodContainers::Legacy(legacy.clone()),
	}
}

impl Resource for DeploymentConfig {
	const NOUN: &'static str = "deployment";

	fn name(&self) -> &str {
		&self.app_name
	}
	fn labels_mut(&mut self) -> &mut Labels {
		&mut self.labels
	}
	fn collection(workspace: &Workspace) -> &Collection<Self> {
		&workspace.deployments
	}
	fn collection_mut(workspace: &mut Workspace) -> &mut Collection<Self> {
		&mut workspace.deployments
	}

	fn duplicated(&self) -> Self {
		let service_name = format!("{}-service", copy_name(&self.app_name));
		let mut ingress = self.ingress.clone();
		for rule in &mut ingress.rules {
			rule.service_name.clone_from(&service_name);
		}
		Self {
			app_name: copy_name(&self.app_name),
			containers: duplicated_containers(&self.containers),
			ingress,
			..self.clone()
		}
	}
}

impl Resource for DaemonSetConfig {
	const NOUN: &'static str = "daemonset";

	fn name(&self) -> &str {
		&self.app_name
	}
	fn labels_mut(&mut self) -> &mut Labels {
		&mut self.labels
	}
	fn collection(workspace: &Workspace) -> &Collection<Self> {
		&workspace.daemon_sets
	}
	fn collection_mut(workspace: &mut Workspace) -> &mut Collection<Self> {
		&mut workspace.daemon_sets
	}

	fn duplicated(&self) -> Self {
		Self {
			app_name: copy_name(&self.app_name),
			containers: duplicated_containers(&self.containers),
			..self.clone()
		}
	}
}

impl Resource for JobConfig {
	const NOUN: &'static str = "job";

	fn name(&self) -> &str {
		&self.name
	}
	fn labels_mut(&mut self) -> &mut Labels {
		&mut self.labels
	}
	fn collection(workspace: &Workspace) -> &Collection<Self> {
		&workspace.jobs
	}
	fn collection_mut(workspace: &mut Workspace) -> &mut Collection<Self> {
		&mut workspace.jobs
	}

	fn duplicated(&self) -> Self {
		Self {
			name: copy_name(&self.name),
			created_at: Utc::now(),
			..self.clone()
		}
	}
}

impl Resource for CronJobConfig {
	const NOUN: &'static str = "cronjob";

	fn name(&self) -> &str {
		&self.name
	}
	fn labels_mut(&mut self) -> &mut Labels {
		&mut self.labels
	}
	fn collection(workspace: &Workspace) -> &Collection<Self> {
		&workspace.cron_jobs
	}
	fn collection_mut(workspace: &mut Workspace) -> &mut Collection<Self> {
		&mut workspace.cron_jobs
	}

	fn duplicated(&self) -> Self {
		Self {
			name: copy_name(&self.name),
			created_at: Utc::now(),
			..self.clone()
		}
	}
}
