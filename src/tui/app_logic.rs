use super::app_state::{AppMode, ItemKind, PromptItem, PromptStyle};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// State of one prompt on screen: a checklist for a directory level or a
/// single-choice menu.
pub struct PromptApp {
    pub(super) title: String,
    pub(super) heading: String,
    pub(super) style: PromptStyle,
    pub(super) items: Vec<PromptItem>,
    pub(super) current_selection_idx: usize,
    pub(super) scroll_offset: usize,
    pub(super) quit: bool,
    pub(super) confirmed: bool,
    pub(super) mode: AppMode,
    pub(super) filter_input: String,
    /// In chars, not bytes.
    pub(super) filter_cursor_pos: usize,
    pub(super) list_viewport_height: usize,
}

impl PromptApp {
    pub fn new(
        title: impl Into<String>,
        heading: impl Into<String>,
        style: PromptStyle,
        items: Vec<PromptItem>,
    ) -> Self {
        PromptApp {
            title: title.into(),
            heading: heading.into(),
            style,
            items,
            current_selection_idx: 0,
            scroll_offset: 0,
            quit: false,
            confirmed: false,
            mode: AppMode::Normal,
            filter_input: String::new(),
            filter_cursor_pos: 0,
            list_viewport_height: 0, // set by the renderer
        }
    }

    pub fn is_finished(&self) -> bool {
        self.quit
    }

    /// Indices of the chosen items, or `None` if the user backed out.
    /// A menu yields exactly the highlighted item.
    pub fn outcome(&self) -> Option<Vec<usize>> {
        if !self.confirmed {
            return None;
        }
        match self.style {
            PromptStyle::Menu => Some(vec![self.current_selection_idx]),
            PromptStyle::Checklist => Some(
                self.items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| item.checked)
                    .map(|(idx, _)| idx)
                    .collect(),
            ),
        }
    }

    pub(super) fn select_next_visible_item(&mut self) {
        self.move_selection_in_visible_list(1);
    }

    pub(super) fn select_previous_visible_item(&mut self) {
        self.move_selection_in_visible_list(-1);
    }

    fn move_selection_in_visible_list(&mut self, delta: i32) {
        let visible_indices = self.get_visible_item_indices();
        if visible_indices.is_empty() {
            return;
        }
        let new_pos = match visible_indices
            .iter()
            .position(|&idx| idx == self.current_selection_idx)
        {
            Some(pos) => (pos as i32 + delta).rem_euclid(visible_indices.len() as i32) as usize,
            None if delta > 0 => 0,
            None => visible_indices.len() - 1,
        };
        self.current_selection_idx = visible_indices[new_pos];
        self.ensure_selection_is_visible_in_viewport();
    }

    pub(super) fn toggle_current_item(&mut self) {
        if let Some(item) = self.items.get_mut(self.current_selection_idx) {
            item.checked = !item.checked;
        }
    }

    pub(super) fn select_all_visible_items(&mut self) {
        self.set_visible_entries(true);
    }

    pub(super) fn deselect_all_visible_items(&mut self) {
        self.set_visible_entries(false);
    }

    fn set_visible_entries(&mut self, checked: bool) {
        for idx in self.get_visible_item_indices() {
            if self.items[idx].is_entry() {
                self.items[idx].checked = checked;
            }
        }
    }

    /// Items matching the filter. The done marker never hides.
    pub(super) fn get_visible_item_indices(&self) -> Vec<usize> {
        let lower_filter = self.filter_input.to_lowercase();
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                lower_filter.is_empty()
                    || item.kind == ItemKind::Done
                    || item.label.to_lowercase().contains(&lower_filter)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    pub(super) fn ensure_selection_is_valid_after_filter(&mut self) {
        let visible_indices = self.get_visible_item_indices();
        if let Some(&first) = visible_indices.first() {
            if !visible_indices.contains(&self.current_selection_idx) {
                self.current_selection_idx = first;
            }
        }
        self.ensure_selection_is_visible_in_viewport();
    }

    pub(super) fn ensure_selection_is_visible_in_viewport(&mut self) {
        if self.list_viewport_height == 0 {
            return;
        }
        let visible_indices = self.get_visible_item_indices();
        let list_height = self.list_viewport_height;

        if let Some(pos) = visible_indices
            .iter()
            .position(|&idx| idx == self.current_selection_idx)
        {
            if pos < self.scroll_offset {
                self.scroll_offset = pos;
            } else if pos >= self.scroll_offset + list_height {
                self.scroll_offset = pos + 1 - list_height;
            }
        } else {
            self.scroll_offset = 0;
        }

        let num_visible_items = visible_indices.len();
        if num_visible_items <= list_height {
            self.scroll_offset = 0;
        } else {
            self.scroll_offset = self.scroll_offset.min(num_visible_items - list_height);
        }
    }

    fn filter_byte_index(&self) -> usize {
        self.filter_input
            .char_indices()
            .nth(self.filter_cursor_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.filter_input.len())
    }

    fn cancel(&mut self) {
        self.confirmed = false;
        self.quit = true;
    }

    fn confirm(&mut self) {
        self.confirmed = true;
        self.quit = true;
    }

    /// Route a key press to the handler for the current mode. Releases and
    /// repeats reported by some terminals are dropped.
    pub(super) fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }
        match self.mode {
            AppMode::Normal => self.handle_normal_mode_input(key_event),
            AppMode::Filtering => self.handle_filtering_mode_input(key_event),
        }
    }

    fn handle_normal_mode_input(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.cancel();
            return;
        }
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.cancel(),
            KeyCode::Enter => self.confirm(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_visible_item(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_visible_item(),
            _ if self.style == PromptStyle::Menu => {}
            KeyCode::Char(' ') => self.toggle_current_item(),
            KeyCode::Char('a') => self.select_all_visible_items(),
            KeyCode::Char('d') => self.deselect_all_visible_items(),
            KeyCode::Char('/') => self.mode = AppMode::Filtering,
            _ => {}
        }
    }

    fn handle_filtering_mode_input(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.cancel();
            return;
        }
        match key_event.code {
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                self.ensure_selection_is_valid_after_filter();
            }
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.filter_input.clear();
                self.filter_cursor_pos = 0;
                self.ensure_selection_is_valid_after_filter();
            }
            KeyCode::Char(c) => {
                let at = self.filter_byte_index();
                self.filter_input.insert(at, c);
                self.filter_cursor_pos += 1;
                self.ensure_selection_is_valid_after_filter();
            }
            KeyCode::Backspace => {
                if self.filter_cursor_pos > 0 {
                    self.filter_cursor_pos -= 1;
                    let at = self.filter_byte_index();
                    self.filter_input.remove(at);
                    self.ensure_selection_is_valid_after_filter();
                }
            }
            KeyCode::Left => {
                self.filter_cursor_pos = self.filter_cursor_pos.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.filter_cursor_pos < self.filter_input.chars().count() {
                    self.filter_cursor_pos += 1;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn checklist() -> PromptApp {
        PromptApp::new(
            "batchyank",
            "Directory: .",
            PromptStyle::Checklist,
            vec![
                PromptItem::new("[DIR] src/", ItemKind::Directory, true),
                PromptItem::new("[DIR] tests/", ItemKind::Directory, false),
                PromptItem::new("Cargo.toml", ItemKind::File, false),
                PromptItem::new("(Done / continue)", ItemKind::Done, false),
            ],
        )
    }

    fn press(app: &mut PromptApp, codes: &[KeyCode]) {
        for &code in codes {
            app.handle_key(key(code));
        }
    }

    #[test]
    fn enter_confirms_checked_items() {
        let mut app = checklist();
        press(
            &mut app,
            &[KeyCode::Down, KeyCode::Down, KeyCode::Char(' '), KeyCode::Enter],
        );
        assert!(app.is_finished());
        assert_eq!(app.outcome(), Some(vec![0, 2]));
    }

    #[test]
    fn space_unchecks_prechecked_item() {
        let mut app = checklist();
        press(&mut app, &[KeyCode::Char(' '), KeyCode::Enter]);
        assert_eq!(app.outcome(), Some(vec![]));
    }

    #[test]
    fn escape_and_ctrl_c_cancel() {
        let mut app = checklist();
        press(&mut app, &[KeyCode::Char(' '), KeyCode::Esc]);
        assert!(app.is_finished());
        assert_eq!(app.outcome(), None);

        let mut app = checklist();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(app.outcome(), None);
    }

    #[test]
    fn navigation_wraps() {
        let mut app = checklist();
        press(&mut app, &[KeyCode::Up]);
        assert_eq!(app.current_selection_idx, 3);
        press(&mut app, &[KeyCode::Char('j')]);
        assert_eq!(app.current_selection_idx, 0);
    }

    #[test]
    fn bulk_selection_skips_done_marker() {
        let mut app = checklist();
        press(&mut app, &[KeyCode::Char('a')]);
        assert_eq!(
            app.items.iter().map(|i| i.checked).collect::<Vec<_>>(),
            [true, true, true, false]
        );
        press(&mut app, &[KeyCode::Char('d')]);
        assert!(app.items.iter().all(|i| !i.checked));
    }

    #[test]
    fn filter_narrows_visible_items_but_keeps_done() {
        let mut app = checklist();
        press(
            &mut app,
            &[
                KeyCode::Char('/'),
                KeyCode::Char('T'),
                KeyCode::Char('e'),
                KeyCode::Char('s'),
                KeyCode::Enter,
            ],
        );
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.get_visible_item_indices(), vec![1, 3]);
        assert_eq!(app.current_selection_idx, 1);

        // bulk select only reaches what the filter shows
        press(&mut app, &[KeyCode::Char('a')]);
        assert_eq!(
            app.items.iter().map(|i| i.checked).collect::<Vec<_>>(),
            [true, true, false, false]
        );
    }

    #[test]
    fn filter_editing_handles_multibyte_input() {
        let mut app = checklist();
        press(
            &mut app,
            &[
                KeyCode::Char('/'),
                KeyCode::Char('é'),
                KeyCode::Char('x'),
                KeyCode::Left,
                KeyCode::Backspace,
            ],
        );
        assert_eq!(app.filter_input, "x");
        press(&mut app, &[KeyCode::Esc]);
        assert!(app.filter_input.is_empty());
        assert_eq!(app.get_visible_item_indices().len(), 4);
    }

    #[test]
    fn menu_picks_highlighted_item() {
        let mut app = PromptApp::new(
            "batchyank",
            "Output",
            PromptStyle::Menu,
            vec![
                PromptItem::new("Tree & code", ItemKind::Choice, false),
                PromptItem::new("Project tree", ItemKind::Choice, false),
            ],
        );
        press(&mut app, &[KeyCode::Char(' '), KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.outcome(), Some(vec![1]));
        assert!(app.items.iter().all(|i| !i.checked));
    }

    #[test]
    fn viewport_follows_selection() {
        let items = (0..10)
            .map(|i| PromptItem::new(format!("f{i}"), ItemKind::File, false))
            .collect();
        let mut app = PromptApp::new("t", "h", PromptStyle::Checklist, items);
        app.list_viewport_height = 3;
        for _ in 0..5 {
            app.select_next_visible_item();
        }
        assert_eq!(app.current_selection_idx, 5);
        assert_eq!(app.scroll_offset, 3);
        app.select_previous_visible_item();
        app.select_previous_visible_item();
        app.select_previous_visible_item();
        assert_eq!(app.scroll_offset, 2);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut app = checklist();
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        app.handle_key(release);
        assert!(!app.is_finished());
    }
}
