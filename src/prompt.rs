use anyhow::Result;
use clap::ValueEnum;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

/// What the run should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Tree followed by the code blocks
    Both,
    /// Only the tree
    Tree,
    /// Only the code blocks
    Code,
}

impl OutputMode {
    /// Menu order for the initial prompt.
    pub const ALL: [OutputMode; 3] = [OutputMode::Both, OutputMode::Tree, OutputMode::Code];

    pub fn label(self) -> &'static str {
        match self {
            OutputMode::Both => "Tree & code",
            OutputMode::Tree => "Project tree",
            OutputMode::Code => "Code",
        }
    }

    pub fn includes_tree(self) -> bool {
        matches!(self, OutputMode::Both | OutputMode::Tree)
    }

    pub fn includes_code(self) -> bool {
        matches!(self, OutputMode::Both | OutputMode::Code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One immediate child of the directory being shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEntry {
    pub kind: EntryKind,
    pub name: String,
    pub path: PathBuf,
    /// Pre-checked because the path is already selected.
    pub checked: bool,
}

/// Everything needed to ask about one directory level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPrompt {
    pub dir: PathBuf,
    /// `./<path relative to the root>`, or `.` for the root itself.
    pub label: String,
    /// Subdirectories first, then files, each group in display order.
    pub entries: Vec<PromptEntry>,
}

/// The user's revised choice for one directory level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryAnswer {
    pub dirs: BTreeSet<PathBuf>,
    pub files: BTreeSet<PathBuf>,
    /// The "done / continue" marker was checked: stop descending here.
    pub done: bool,
}

impl DirectoryAnswer {
    /// Build an answer from the subset of `prompt.entries` the user kept.
    pub fn from_checked<'a>(
        checked: impl IntoIterator<Item = &'a PromptEntry>,
        done: bool,
    ) -> Self {
        let mut answer = DirectoryAnswer {
            done,
            ..Default::default()
        };
        for entry in checked {
            match entry.kind {
                EntryKind::Directory => answer.dirs.insert(entry.path.clone()),
                EntryKind::File => answer.files.insert(entry.path.clone()),
            };
        }
        answer
    }

    /// Nothing checked, not even the done marker.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty() && !self.done
    }
}

/// The interactive side of a run. Every method that asks something returns
/// `Ok(None)` when the user backs out.
pub trait Prompter {
    fn choose_output_mode(&mut self) -> Result<Option<OutputMode>>;

    fn choose_entries(&mut self, prompt: &DirectoryPrompt) -> Result<Option<DirectoryAnswer>>;

    /// A directory could not be listed; exploration skips it and carries on.
    fn report_listing_error(&mut self, dir: &Path, error: &io::Error);
}
