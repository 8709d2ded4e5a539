use crate::paths::{absolutize, sorted_as_strings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// The directories and files currently marked for inclusion, by absolute path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub dirs: BTreeSet<PathBuf>,
    pub files: BTreeSet<PathBuf>,
}

impl Selection {
    pub fn from_paths(
        dirs: impl IntoIterator<Item = PathBuf>,
        files: impl IntoIterator<Item = PathBuf>,
    ) -> Self {
        Selection {
            dirs: dirs.into_iter().collect(),
            files: files.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }

    /// Rebuild a selection from its on-disk form. Relative entries (a state
    /// file written by hand, or from another working directory) are resolved
    /// against `base`.
    pub fn from_persisted(state: PersistedState, base: &Path) -> Self {
        Selection::from_paths(
            state.directories.iter().map(|p| absolutize(p, base)),
            state.files.iter().map(|p| absolutize(p, base)),
        )
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            directories: sorted_as_strings(&self.dirs)
                .into_iter()
                .map(Path::to_path_buf)
                .collect(),
            files: sorted_as_strings(&self.files)
                .into_iter()
                .map(Path::to_path_buf)
                .collect(),
        }
    }
}

/// JSON shape of the state file. Either list may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub directories: Vec<PathBuf>,
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_lists_are_sorted_and_absolute() {
        let selection = Selection::from_paths(
            [PathBuf::from("/r/b"), PathBuf::from("/r/a")],
            [PathBuf::from("/r/a/x.py")],
        );
        let json = serde_json::to_string(&selection.to_persisted()).unwrap();
        assert_eq!(
            json,
            r#"{"directories":["/r/a","/r/b"],"files":["/r/a/x.py"]}"#
        );
    }

    #[test]
    fn persisted_lists_follow_string_order() {
        let selection = Selection::from_paths(
            [PathBuf::from("/r/a"), PathBuf::from("/r/a-b")],
            [PathBuf::from("/r/a/x.py"), PathBuf::from("/r/a-b/y")],
        );
        let state = selection.to_persisted();
        assert_eq!(state.files, [PathBuf::from("/r/a-b/y"), PathBuf::from("/r/a/x.py")]);
        assert_eq!(state.directories, [PathBuf::from("/r/a"), PathBuf::from("/r/a-b")]);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let state: PersistedState = serde_json::from_str(r#"{"files": ["/r/f"]}"#).unwrap();
        assert!(state.directories.is_empty());
        assert_eq!(state.files, vec![PathBuf::from("/r/f")]);
    }

    #[test]
    fn relative_entries_resolve_against_base() {
        let state = PersistedState {
            directories: vec![PathBuf::from("src"), PathBuf::from("./docs/../lib")],
            files: vec![PathBuf::from("/abs/file.rs")],
        };
        let selection = Selection::from_persisted(state, Path::new("/work"));
        assert!(selection.dirs.contains(Path::new("/work/src")));
        assert!(selection.dirs.contains(Path::new("/work/lib")));
        assert!(selection.files.contains(Path::new("/abs/file.rs")));
    }
}
