use crate::selection::Selection;
use std::path::{Component, Path, PathBuf};

/// Lexically clean `path`: drop `.` components and fold `..` into the
/// preceding component. Never touches the filesystem, so symlinks are kept
/// as spelled.
pub fn normalize(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `pop` is a no-op on `/` and `C:\`, so `..` never escapes the root
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Absolute, normalized form of `path`, resolving relative paths against
/// `base` (normally the working directory of the run).
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// True if `child` is `parent` or lives somewhere below it.
///
/// Comparison is component-wise on normalized paths. Relative inputs and
/// paths on unrelated roots (different drives, say) answer `false`.
pub fn is_descendant_or_equal(child: &Path, parent: &Path) -> bool {
    if !child.is_absolute() || !parent.is_absolute() {
        return false;
    }
    normalize(child).starts_with(normalize(parent))
}

/// True if `path` sits directly inside `dir` (not deeper, not equal).
pub fn is_direct_child(path: &Path, dir: &Path) -> bool {
    path.parent() == Some(dir)
}

/// Order paths by their string form. `a-b/y` lands before `a/x.py`, which
/// component-wise `Path` ordering would put the other way round.
pub fn sorted_as_strings<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) -> Vec<&'a Path> {
    let mut sorted: Vec<&Path> = paths.into_iter().map(PathBuf::as_path).collect();
    sorted.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    sorted
}

/// Drop `root` and everything selected below it, directories and files alike.
///
/// This is the only way a directory leaves the selection, so dropping a
/// parent never leaves nested entries behind.
pub fn remove_subtree(root: &Path, selection: &mut Selection) {
    selection.dirs.remove(root);
    selection
        .dirs
        .retain(|dir| !is_descendant_or_equal(dir, root));
    selection
        .files
        .retain(|file| !is_descendant_or_equal(file, root));
}
