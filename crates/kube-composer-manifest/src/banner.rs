//! Fixed texts shown in place of a bundle when there is nothing to render.

use kube_composer_model::{ProjectSettings, DEFAULT_PROJECT_NAME};

const WELCOME_HEADER: &str = "\
# Welcome to Kube Composer!
#\x20
# This is a free Kubernetes YAML generator that helps you create
# production-ready deployment configurations without writing YAML manually.
#
# To get started:
# 1. Click \"Project Settings\" to configure your project name and global labels
# 2. Click \"Add Deployment\" to create your first deployment
# 3. Configure your application settings in the form
# 4. Watch as your YAML is generated in real-time
# 5. Download the complete YAML file when ready
#
# Features:
# - Project-wide settings and global labels
# - Visual deployment editor
# - Multi-container support
# - Multi-deployment support\x20\x20
# - Real-time YAML generation
# - Architecture visualization
# - Resource validation
# - Production-ready output
# - ConfigMap and Secret management
# - DaemonSet support
#
# No registration required - start building now!
";

const WELCOME_DATA: &str = "\
    created-by: kube-composer
data:
  welcome: |
    Welcome to Kube Composer!
    Create your first deployment to see generated YAML here.
  docs: \"Visit https://kubernetes.io/docs/ for Kubernetes documentation\"
  repository: \"https://github.com/same7ammar/kube-composer\"";

/// First-run text, with a single illustrative ConfigMap named `getting-started`.
pub fn welcome(settings: Option<&ProjectSettings>) -> String {
	let project = settings.map_or(DEFAULT_PROJECT_NAME, |s| s.name.as_str());
	format!(
		"{WELCOME_HEADER}
apiVersion: v1
kind: ConfigMap
metadata:
  name: getting-started
  namespace: default
  labels:
    app.kubernetes.io/name: getting-started
    project: {project}
{WELCOME_DATA}"
	)
}

/// Guidance shown when deployments exist but none of them has a name yet.
pub fn needs_configuration(deployments: usize) -> String {
	configuration_needed("Deployment", "deployment", deployments)
}

/// Guidance shown when the only workloads are daemon sets without a name.
pub fn daemon_sets_need_configuration(daemon_sets: usize) -> String {
	configuration_needed("DaemonSet", "daemonset", daemon_sets)
}

fn configuration_needed(title: &str, noun: &str, count: usize) -> String {
	let plural = if count == 1 { "" } else { "s" };
	format!(
		"# {title} Configuration Needed
#
# You have {count} {noun}{plural} but none have been properly configured yet.
#\x20
# To generate YAML:
# 1. Select a {noun} from the sidebar
# 2. Click the edit button (⚙️) to configure it
# 3. Add at least an application name and container image
# 4. Your YAML will appear here automatically"
	)
}

/// Example namespace shown when only cluster-managed namespaces exist.
pub fn only_system_namespaces<'a>(
	names: impl IntoIterator<Item = &'a str>,
	settings: Option<&ProjectSettings>,
) -> String {
	let listed = names
		.into_iter()
		.map(|name| format!("# - {name}"))
		.collect::<Vec<_>>()
		.join("\n");
	let project = settings.map_or_else(String::new, |s| format!("project: {}", s.name));
	format!(
		"# Only system namespaces available
# Create custom namespaces to see their YAML configuration here

# Available system namespaces:
{listed}

# Example custom namespace:
apiVersion: v1
kind: Namespace
metadata:
  name: my-custom-namespace
  labels:
    environment: development
    team: backend
    {project}
  annotations:
    description: \"Custom namespace for development environment\"
    created-by: \"kube-composer\""
	)
}

pub const NO_NAMESPACES: &str = "# No namespaces configured";
pub const NO_CONFIG_MAPS: &str = "# No ConfigMaps configured";
pub const NO_SECRETS: &str = "# No Secrets configured";
pub const UNCONFIGURED_DEPLOYMENT: &str = "# Please configure your deployment first";
pub const UNCONFIGURED_DAEMON_SET: &str = "# Please configure your daemonset first";
