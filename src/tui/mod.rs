//! Terminal prompts: a checklist per directory level and a one-off menu for
//! the output mode. Each prompt owns the screen only while it is open.

mod app_logic;
mod app_state;
mod ui_renderer;

use app_logic::PromptApp;
use app_state::{ItemKind, PromptItem, PromptStyle};

use crate::prompt::{DirectoryAnswer, DirectoryPrompt, EntryKind, OutputMode, Prompter};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;
use ui_renderer::ui_frame;

const TITLE: &str = "batchyank";
const DONE_LABEL: &str = "(Done / continue)";

/// `Prompter` backed by the real terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn choose_output_mode(&mut self) -> Result<Option<OutputMode>> {
        let items = OutputMode::ALL
            .iter()
            .map(|mode| PromptItem::new(mode.label(), ItemKind::Choice, false))
            .collect();
        let app = PromptApp::new(TITLE, "Choose output", PromptStyle::Menu, items);
        let picked = run_prompt(app)?;
        Ok(picked
            .and_then(|indices| indices.first().copied())
            .and_then(|idx| OutputMode::ALL.get(idx).copied()))
    }

    fn choose_entries(&mut self, prompt: &DirectoryPrompt) -> Result<Option<DirectoryAnswer>> {
        let heading = format!("Directory: {}", prompt.label);
        let app = PromptApp::new(TITLE, heading, PromptStyle::Checklist, checklist_items(prompt));
        Ok(run_prompt(app)?.map(|checked| answer_from_checked(prompt, &checked)))
    }

    fn report_listing_error(&mut self, dir: &Path, error: &io::Error) {
        eprintln!("⚠️  Could not read {}: {}", dir.display(), error);
    }
}

/// One row per entry, then the done marker last.
fn checklist_items(prompt: &DirectoryPrompt) -> Vec<PromptItem> {
    let mut items: Vec<PromptItem> = prompt
        .entries
        .iter()
        .map(|entry| match entry.kind {
            EntryKind::Directory => PromptItem::new(
                format!("[DIR] {}/", entry.name),
                ItemKind::Directory,
                entry.checked,
            ),
            EntryKind::File => PromptItem::new(&entry.name, ItemKind::File, entry.checked),
        })
        .collect();
    items.push(PromptItem::new(DONE_LABEL, ItemKind::Done, false));
    items
}

/// Map checked row indices from `checklist_items` back onto the prompt.
fn answer_from_checked(prompt: &DirectoryPrompt, checked: &[usize]) -> DirectoryAnswer {
    let done = checked.contains(&prompt.entries.len());
    let kept = checked.iter().filter_map(|&idx| prompt.entries.get(idx));
    DirectoryAnswer::from_checked(kept, done)
}

/// Show `app` until it is confirmed or cancelled. The terminal is restored
/// before any drawing error is passed on.
fn run_prompt(mut app: PromptApp) -> Result<Option<Vec<usize>>> {
    let mut terminal = init_terminal()?;

    let looped: Result<()> = (|| {
        while !app.is_finished() {
            terminal.draw(|frame| ui_frame(frame, &mut app))?;
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = event::read()? {
                    app.handle_key(key_event);
                }
            }
        }
        Ok(())
    })();

    restore_terminal(terminal)?;
    looped?;
    Ok(app.outcome())
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor().map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptEntry;
    use std::path::PathBuf;

    fn prompt() -> DirectoryPrompt {
        DirectoryPrompt {
            dir: PathBuf::from("/r"),
            label: ".".into(),
            entries: vec![
                PromptEntry {
                    kind: EntryKind::Directory,
                    name: "src".into(),
                    path: PathBuf::from("/r/src"),
                    checked: true,
                },
                PromptEntry {
                    kind: EntryKind::File,
                    name: "README.md".into(),
                    path: PathBuf::from("/r/README.md"),
                    checked: false,
                },
            ],
        }
    }

    #[test]
    fn checklist_rows_mirror_entries_plus_done() {
        let items = checklist_items(&prompt());
        assert_eq!(
            items,
            vec![
                PromptItem::new("[DIR] src/", ItemKind::Directory, true),
                PromptItem::new("README.md", ItemKind::File, false),
                PromptItem::new(DONE_LABEL, ItemKind::Done, false),
            ]
        );
    }

    #[test]
    fn checked_rows_become_an_answer() {
        let answer = answer_from_checked(&prompt(), &[1, 2]);
        assert!(answer.dirs.is_empty());
        assert!(answer.files.contains(&PathBuf::from("/r/README.md")));
        assert!(answer.done);

        let answer = answer_from_checked(&prompt(), &[0]);
        assert!(answer.dirs.contains(&PathBuf::from("/r/src")));
        assert!(!answer.done);
    }
}
