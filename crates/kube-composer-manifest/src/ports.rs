use kube_composer_model::{PodContainers, Workload};

use crate::objects::ServicePort;

const PROTOCOL: &str = "TCP";
/// Name of the primary Service port.
pub const PRIMARY_PORT_NAME: &str = "http";

/// Service ports exposing a workload.
///
/// The primary `port -> targetPort` mapping always comes first. Every
/// container listening on some other port gets its own named entry, ports
/// equal to the target port are not repeated.
pub fn service_ports<W: Workload>(workload: &W) -> Vec<ServicePort> {
	let containers = match workload.containers() {
		PodContainers::Multi(containers) if !containers.is_empty() => containers,
		_ => {
			return vec![ServicePort {
				port: workload.port(),
				target_port: workload.target_port(),
				protocol: PROTOCOL,
				name: None,
			}];
		}
	};

	let mut ports = vec![ServicePort {
		port: workload.port(),
		target_port: workload.target_port(),
		protocol: PROTOCOL,
		name: Some(PRIMARY_PORT_NAME.to_owned()),
	}];
	for (i, container) in containers.iter().enumerate() {
		let Some(port) = container.port() else {
			continue;
		};
		if port == workload.target_port() {
			continue;
		}
		let name = if container.name.is_empty() {
			format!("container-{i}")
		} else {
			container.name.clone()
		};
		ports.push(ServicePort {
			port,
			target_port: port,
			protocol: PROTOCOL,
			name: Some(format!("{name}-port")),
		});
	}
	ports
}
