//! Final pass over a selection before anything is rendered.
//!
//! A walk that was cancelled halfway, or a state file left over from an
//! older tree (or another root), can leave entries whose parents are not
//! selected. `repair` drops them so that every selected path hangs off the
//! root through selected directories only.

use crate::paths::{is_descendant_or_equal, remove_subtree};
use crate::selection::Selection;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Drop entries that vanished from disk, then every entry whose chain back
/// to `root` is broken. Running it again changes nothing.
pub fn repair(root: &Path, selection: &mut Selection) {
    prune_missing(root, selection);
    repair_chains(root, selection);
}

/// Remove selected directories that are no longer directories (with their
/// subtrees) and selected files that no longer exist or turned into
/// directories.
pub fn prune_missing(root: &Path, selection: &mut Selection) {
    let missing: Vec<PathBuf> = selection
        .dirs
        .iter()
        .filter(|d| d.as_path() != root && !d.is_dir())
        .cloned()
        .collect();
    for dir in &missing {
        debug!(dir = %dir.display(), "selected directory is gone");
        remove_subtree(dir, selection);
    }

    selection.files.retain(|file| {
        let present = fs::metadata(file).is_ok_and(|m| !m.is_dir());
        if !present {
            debug!(file = %file.display(), "selected file is gone");
        }
        present
    });
}

/// Remove every directory whose ancestors up to `root` are not all selected,
/// and every file sitting in such a directory. Pure path logic, no I/O.
pub fn repair_chains(root: &Path, selection: &mut Selection) {
    let broken: Vec<PathBuf> = selection
        .dirs
        .iter()
        .filter(|d| d.as_path() != root && !is_chain_selected(d, root, &selection.dirs))
        .cloned()
        .collect();

    for dir in &broken {
        if is_descendant_or_equal(root, dir) {
            // An ancestor of the root: cascading would take the root's own
            // subtree with it.
            selection.dirs.remove(dir);
        } else {
            debug!(dir = %dir.display(), "broken chain, removing subtree");
            remove_subtree(dir, selection);
        }
    }

    selection.files.retain(|file| {
        let valid = file
            .parent()
            .is_some_and(|parent| is_chain_selected(parent, root, &selection.dirs));
        if !valid {
            debug!(file = %file.display(), "broken chain, dropping file");
        }
        valid
    });
}

/// Climb from `path` towards the filesystem root. Succeeds on reaching
/// `root` with every step before it selected.
fn is_chain_selected(path: &Path, root: &Path, dirs: &BTreeSet<PathBuf>) -> bool {
    let mut current = path;
    loop {
        if current == root {
            return true;
        }
        if !dirs.contains(current) {
            return false;
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}
