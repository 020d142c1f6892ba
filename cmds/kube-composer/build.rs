use std::process::Command;

fn main() {
	// Re-run if git HEAD changes
	println!("cargo:rerun-if-changed=.git/HEAD");
	println!("cargo:rerun-if-changed=.git/refs/");

	let version = get_version();
	println!("cargo:rustc-env=KUBE_COMPOSER_VERSION={version}");
}

fn get_version() -> String {
	let cargo_version = env!("CARGO_PKG_VERSION");

	// Released builds carry their tag
	if let Some(tag) = git(&["describe", "--tags", "--exact-match", "HEAD"]) {
		return tag.strip_prefix('v').unwrap_or(&tag).to_owned();
	}

	// Dev builds are told apart by their commit
	if let Some(commit) = git(&["rev-parse", "--short", "HEAD"]) {
		return format!("{cargo_version}+{commit}");
	}

	cargo_version.to_owned()
}

fn git(args: &[&str]) -> Option<String> {
	let output = Command::new("git").args(args).output().ok()?;
	if !output.status.success() {
		return None;
	}
	let out = String::from_utf8(output.stdout).ok()?;
	Some(out.trim().to_owned())
}
