use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::code_blocks::format_code_blocks;
use crate::paths::sorted_as_strings;
use crate::config::RunConfig;
use crate::prompt::{OutputMode, Prompter};
use crate::repair::repair;
use crate::selection::Selection;
use crate::state::{JsonStateFile, StateStore};
use crate::tree_builder::render_tree;
use crate::tui::TerminalPrompter;
use crate::walker::SelectionWalker;
use anyhow::Result;
use tracing::{debug, info, warn};

/// What one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub mode: OutputMode,
    pub tree: String,
    /// Empty when no files are selected.
    pub code: String,
    pub file_count: usize,
}

impl Report {
    fn build(config: &RunConfig, mode: OutputMode, selection: &Selection) -> Self {
        let tree = render_tree(&config.root, selection);
        let code = if selection.files.is_empty() {
            String::new()
        } else {
            format_code_blocks(sorted_as_strings(&selection.files), &config.root)
        };
        Report {
            mode,
            tree,
            code,
            file_count: selection.files.len(),
        }
    }

    /// Text that goes to the clipboard, if the mode has anything to copy.
    pub fn clipboard_text(&self) -> Option<String> {
        match self.mode {
            OutputMode::Both if self.file_count > 0 => Some(format!("{}\n\n{}", self.tree, self.code)),
            OutputMode::Both | OutputMode::Tree => Some(self.tree.clone()),
            OutputMode::Code if self.file_count > 0 => Some(self.code.clone()),
            OutputMode::Code => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Backed out of the output prompt; nothing was touched.
    Cancelled,
    Completed(Report),
}

/// Rough estimate: GPT-style token ≈ 4 chars
fn approx_tokens(s: &str) -> usize {
    s.chars().count() / 4
}

/// One full run against injected collaborators: ask for the output mode,
/// walk, repair, print, copy, then save the selection.
pub fn run_session(
    config: &RunConfig,
    prompter: &mut dyn Prompter,
    store: &dyn StateStore,
    clipboard: &mut dyn ClipboardSink,
) -> Result<SessionOutcome> {
    let mode = match config.mode {
        Some(mode) => mode,
        None => match prompter.choose_output_mode()? {
            Some(mode) => mode,
            None => return Ok(SessionOutcome::Cancelled),
        },
    };

    let mut selection = store.load();
    SelectionWalker::new(&config.root, prompter)
        .respect_ignore_files(config.respect_ignore_files)
        .explore(&config.root, &mut selection)?;
    repair(&config.root, &mut selection);
    info!(
        dirs = selection.dirs.len(),
        files = selection.files.len(),
        "selection settled"
    );

    let report = Report::build(config, mode, &selection);
    print_report(&report);

    if config.copy_to_clipboard {
        if let Some(text) = report.clipboard_text() {
            match clipboard.copy_text(&text) {
                Ok(()) => println!(
                    "\n✅ Copied {} (≈ {} tokens) to the clipboard.",
                    copied_what(&report),
                    approx_tokens(&text)
                ),
                Err(e) => {
                    warn!("clipboard copy failed: {e:#}");
                    eprintln!("\n⚠️  Could not copy to the clipboard: {e:#}");
                }
            }
        }
    }

    debug!(empty = selection.is_empty(), "saving selection");
    if let Err(e) = store.save(&selection) {
        warn!("{e}");
        eprintln!("⚠️  Selection not saved: {e}");
    }

    Ok(SessionOutcome::Completed(report))
}

fn copied_what(report: &Report) -> String {
    match (report.mode, report.file_count) {
        (OutputMode::Tree, _) | (OutputMode::Both, 0) => "the tree".to_string(),
        (OutputMode::Both, n) => format!("the tree and {n} file(s)"),
        (OutputMode::Code, n) => format!("{n} file(s)"),
    }
}

fn print_report(report: &Report) {
    if report.mode.includes_tree() {
        println!("\n--- MINIMAL TREE OF THE SELECTION ---\n");
        println!("{}", report.tree);
    }
    if report.mode.includes_code() {
        if report.file_count == 0 {
            println!("\nNo files selected.");
        } else {
            println!("\n--- SELECTED FILES AND CONTENTS ---\n");
            println!("{}", report.code);
        }
    }
}

/// Entry point for the binary: real terminal, state file and clipboard.
pub fn run_batchyank(config: &RunConfig) -> Result<()> {
    println!("Root: {}", config.root.display());
    let store = JsonStateFile::new(&config.state_path, &config.cwd);
    debug!(state = %store.path().display(), "using state file");
    match run_session(config, &mut TerminalPrompter, &store, &mut SystemClipboard)? {
        SessionOutcome::Cancelled => println!("Cancelled."),
        SessionOutcome::Completed(_) => {}
    }
    Ok(())
}
