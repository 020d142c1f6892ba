use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
	#[error("namespace {0:?} is managed by the cluster and can't be removed")]
	ProtectedNamespace(String),
	#[error("{kind} {id} does not exist")]
	UnknownId { kind: &'static str, id: String },
	#[error("no {kind} named {name:?}")]
	UnknownName { kind: &'static str, name: String },
}

pub type Result<T, E = WorkspaceError> = std::result::Result<T, E>;
