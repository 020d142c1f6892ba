use std::{
	fs, io,
	path::{Path, PathBuf},
};

use kube_composer_manifest::{compose_bundle, BundleInput, YamlFormat};
use kube_composer_model::{Snapshot, Workspace};

fn run(file: &Path) -> String {
	let text = match fs::read_to_string(file) {
		Ok(text) => text,
		Err(e) => return format!("read error: {e}"),
	};
	let snapshot = match Snapshot::from_json(&text) {
		Ok(snapshot) => snapshot,
		Err(e) => return format!("parse error: {e}"),
	};
	let workspace = Workspace::from_snapshot(snapshot);
	match compose_bundle(&BundleInput::from(&workspace), YamlFormat::PLAIN) {
		Ok(bundle) => bundle,
		Err(e) => format!("generation error: {e}"),
	}
}

#[test]
fn test() -> io::Result<()> {
	let mut root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	root.push("golden");

	for entry in fs::read_dir(&root)? {
		let entry = entry?;
		if entry.path().extension().is_none_or(|e| e != "json") {
			continue;
		}

		let result = run(&entry.path());

		let mut golden_path = entry.path();
		golden_path.set_extension("json.golden");

		if golden_path.exists() {
			let golden = fs::read_to_string(golden_path)?;

			assert_eq!(
				result,
				golden,
				"golden didn't match for {}",
				entry.path().display()
			);
		} else {
			fs::write(golden_path, &result)?;
		}
	}

	Ok(())
}
