use crate::cli::Cli;
use crate::error::ConfigError;
use crate::paths::absolutize;
use crate::prompt::OutputMode;
use std::env;
use std::path::{Path, PathBuf};

const STATE_DIR_NAME: &str = "batchyank";
const STATE_FILE_NAME: &str = "state.json";
const FALLBACK_STATE_FILE: &str = ".batchyank.json";

/// Everything a run needs, resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Canonical root directory.
    pub root: PathBuf,
    pub state_path: PathBuf,
    /// Working directory, used to resolve relative entries in the state file.
    pub cwd: PathBuf,
    /// `None` asks the user.
    pub mode: Option<OutputMode>,
    pub copy_to_clipboard: bool,
    pub respect_ignore_files: bool,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let cwd = env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        Self::resolve(cli, &cwd)
    }

    fn resolve(cli: &Cli, cwd: &Path) -> Result<Self, ConfigError> {
        let root = resolve_root(cli.root.as_deref(), cwd)?;
        let state_path = match &cli.state_file {
            Some(path) => absolutize(path, cwd),
            None => default_state_path(cwd),
        };
        Ok(RunConfig {
            root,
            state_path,
            cwd: cwd.to_path_buf(),
            mode: cli.mode,
            copy_to_clipboard: !cli.no_copy,
            respect_ignore_files: cli.gitignore,
        })
    }
}

/// The directory to explore: the argument if given, else `cwd`. Must exist
/// and be a directory.
pub fn resolve_root(arg: Option<&Path>, cwd: &Path) -> Result<PathBuf, ConfigError> {
    let candidate = match arg {
        Some(path) => absolutize(path, cwd),
        None => cwd.to_path_buf(),
    };
    if !candidate.is_dir() {
        return Err(ConfigError::NotADirectory(candidate));
    }
    candidate
        .canonicalize()
        .map_err(|source| ConfigError::Unresolvable {
            path: candidate.clone(),
            source,
        })
}

/// `<data-local-dir>/batchyank/state.json`, or a dotfile in `cwd` on systems
/// without a data directory.
pub fn default_state_path(cwd: &Path) -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(STATE_DIR_NAME).join(STATE_FILE_NAME))
        .unwrap_or_else(|| cwd.join(FALLBACK_STATE_FILE))
}
