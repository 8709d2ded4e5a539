use crate::file_scanner::{DirectoryListing, scan_directory};
use crate::paths::{is_direct_child, remove_subtree};
use crate::prompt::{DirectoryAnswer, DirectoryPrompt, EntryKind, PromptEntry, Prompter};
use crate::selection::Selection;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Walks a tree one directory at a time, asking the prompter which children
/// to keep and folding each answer into the selection.
pub struct SelectionWalker<'a, P: Prompter + ?Sized> {
    root: PathBuf,
    prompter: &'a mut P,
    respect_ignore_files: bool,
}

impl<'a, P: Prompter + ?Sized> SelectionWalker<'a, P> {
    pub fn new(root: &Path, prompter: &'a mut P) -> Self {
        SelectionWalker {
            root: root.to_path_buf(),
            prompter,
            respect_ignore_files: false,
        }
    }

    pub fn respect_ignore_files(mut self, respect: bool) -> Self {
        self.respect_ignore_files = respect;
        self
    }

    /// Explore `start` and every directory the user keeps below it,
    /// depth-first, children in sorted order.
    ///
    /// Errors only come from the prompter itself (a broken terminal); listing
    /// failures and cancelled prompts just end that branch.
    pub fn explore(&mut self, start: &Path, selection: &mut Selection) -> Result<()> {
        let mut pending = vec![start.to_path_buf()];
        while let Some(dir) = pending.pop() {
            let descend_into = self.visit(&dir, selection)?;
            // Reversed so the first child is popped next.
            pending.extend(descend_into.into_iter().rev());
        }
        Ok(())
    }

    /// Prompt for one directory. Returns the subdirectories to explore next.
    fn visit(&mut self, dir: &Path, selection: &mut Selection) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "not a directory, skipping");
            return Ok(Vec::new());
        }

        let listing = match scan_directory(dir, self.respect_ignore_files) {
            Ok(listing) => listing,
            Err(e) => {
                warn!(dir = %dir.display(), "cannot list directory: {e}");
                self.prompter.report_listing_error(dir, &e);
                return Ok(Vec::new());
            }
        };

        let prompt = self.build_prompt(dir, &listing, selection);
        // Confirming with nothing checked counts as backing out. Clearing a
        // level takes the done marker alone.
        let answer = match self.prompter.choose_entries(&prompt)? {
            Some(answer) if !answer.is_empty() => answer,
            _ => {
                debug!(dir = %dir.display(), "no answer, keeping subtree as is");
                return Ok(Vec::new());
            }
        };

        let kept_dirs = reconcile(dir, &answer, selection);
        if answer.done {
            debug!(dir = %dir.display(), "done chosen, not descending");
            return Ok(Vec::new());
        }
        Ok(kept_dirs)
    }

    fn build_prompt(
        &self,
        dir: &Path,
        listing: &DirectoryListing,
        selection: &Selection,
    ) -> DirectoryPrompt {
        let dirs = listing.dirs.iter().map(|(name, path)| PromptEntry {
            kind: EntryKind::Directory,
            name: name.clone(),
            path: path.clone(),
            checked: selection.dirs.contains(path),
        });
        let files = listing.files.iter().map(|(name, path)| PromptEntry {
            kind: EntryKind::File,
            name: name.clone(),
            path: path.clone(),
            checked: selection.files.contains(path),
        });

        DirectoryPrompt {
            dir: dir.to_path_buf(),
            label: relative_label(dir, &self.root),
            entries: dirs.chain(files).collect(),
        }
    }
}

/// `.` for the root, `./sub/dir` below it, the full path otherwise.
pub fn relative_label(dir: &Path, root: &Path) -> String {
    match dir.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => format!("./{}", rel.display()),
        Err(_) => dir.display().to_string(),
    }
}

/// Fold one directory's answer into the selection.
///
/// Only entries directly inside `dir` are considered: a subdirectory that was
/// selected and is now missing from the answer loses its whole subtree, files
/// are added or dropped one by one. Returns the kept subdirectories, sorted.
pub fn reconcile(dir: &Path, answer: &DirectoryAnswer, selection: &mut Selection) -> Vec<PathBuf> {
    let kept_dirs: Vec<PathBuf> = answer
        .dirs
        .iter()
        .filter(|d| is_direct_child(d, dir))
        .cloned()
        .collect();

    let dropped_dirs: Vec<PathBuf> = selection
        .dirs
        .iter()
        .filter(|d| is_direct_child(d, dir) && !answer.dirs.contains(*d))
        .cloned()
        .collect();
    for dropped in &dropped_dirs {
        debug!(dir = %dropped.display(), "deselected, removing subtree");
        remove_subtree(dropped, selection);
    }
    selection.dirs.extend(kept_dirs.iter().cloned());

    selection
        .files
        .retain(|f| !is_direct_child(f, dir) || answer.files.contains(f));
    selection.files.extend(
        answer
            .files
            .iter()
            .filter(|f| is_direct_child(f, dir))
            .cloned(),
    );

    kept_dirs
}
