//! Common test utilities.

use std::{
	fs,
	io::{self, ErrorKind, Write},
	path::PathBuf,
};

use tempfile::TempDir;

/// A writer that simulates a broken pipe (SIGPIPE scenario).
///
/// This writer immediately returns `ErrorKind::BrokenPipe` on any write attempt,
/// simulating what happens when stdout is connected to a process that has exited.
pub struct BrokenPipeWriter;

impl Write for BrokenPipeWriter {
	fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
		Err(io::Error::new(ErrorKind::BrokenPipe, "broken pipe"))
	}

	fn flush(&mut self) -> io::Result<()> {
		Err(io::Error::new(ErrorKind::BrokenPipe, "broken pipe"))
	}
}

/// A project file in its own temporary directory.
pub struct TempProject {
	// Keeps the directory alive
	pub dir: TempDir,
	pub path: PathBuf,
}

impl TempProject {
	pub fn new(json: &str) -> Self {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("project.json");
		fs::write(&path, json).unwrap();
		Self { dir, path }
	}

	pub fn read(&self) -> String {
		fs::read_to_string(&self.path).unwrap()
	}
}

pub const SHOP_PROJECT: &str = r#"{
	"projectSettings": {
		"name": "shop",
		"globalLabels": { "env": "prod" }
	},
	"namespaces": [{ "name": "default" }, { "name": "shop" }],
	"configMaps": [{ "name": "app-config", "namespace": "shop", "data": { "mode": "fast" } }],
	"secrets": [{ "name": "db", "namespace": "shop", "type": "Opaque", "data": { "password": "hunter2" } }],
	"deployments": [
		{
			"appName": "web",
			"namespace": "shop",
			"containers": [{ "name": "web", "image": "nginx:1.27", "port": 8080 }],
			"selectedConfigMaps": ["app-config"],
			"selectedSecrets": ["db"]
		},
		{ "appName": "" }
	]
}"#;

pub fn output(buf: Vec<u8>) -> String {
	String::from_utf8(buf).unwrap()
}
