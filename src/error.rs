//! Typed errors for the parts of a run that can fail in a known way.
//!
//! Prompt and terminal plumbing stays on `anyhow`; these enums cover the
//! cases the workflow has to tell apart (fatal configuration problems versus
//! state-file trouble that only degrades the run).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with the command line that stop the run before any prompt.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot resolve '{}': {source}", path.display())]
    Unresolvable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot determine the current working directory: {0}")]
    WorkingDirectory(#[source] io::Error),
}

/// Failures while loading or saving the persisted selection.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("cannot read state file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("state file '{}' is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize selection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cannot write state file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
