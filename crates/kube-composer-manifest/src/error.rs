use thiserror::Error;

/// Errors that can occur while turning a working set into YAML.
#[derive(Debug, Error)]
pub enum ManifestError {
	#[error("document root must be a mapping, got {0}")]
	NotAMapping(&'static str),

	#[error("null sequence element at {0}")]
	NullElement(String),

	#[error("building object graph")]
	Graph(#[from] serde_json::Error),
}

pub type Result<T, E = ManifestError> = std::result::Result<T, E>;
