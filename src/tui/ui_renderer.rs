use super::app_logic::PromptApp;
use super::app_state::{AppMode, PromptStyle};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

const CHECKLIST_HELP: [&str; 2] = [
    "Arrows/jk: Nav | Space: (De)select | Enter: Confirm | q/Esc: Cancel",
    "a: Sel All Vis | d: Desel All Vis | /: Filter",
];
const MENU_HELP: [&str; 2] = ["Arrows/jk: Nav | Enter: Choose | q/Esc: Cancel", ""];

fn draw_help_block(f: &mut Frame, app: &PromptApp, area: Rect) {
    let help = match app.style {
        PromptStyle::Checklist => CHECKLIST_HELP,
        PromptStyle::Menu => MENU_HELP,
    };
    let mut lines = vec![Line::from(app.heading.clone()).bold()];
    lines.extend(help.iter().map(|l| Line::from(*l)));
    let help_paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(app.title.clone()),
    );
    f.render_widget(help_paragraph, area);
}

fn draw_filter_input_block(f: &mut Frame, app: &PromptApp, area: Rect) {
    let input_text = format!("/{}", app.filter_input);
    let filter_paragraph = Paragraph::new(input_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter (Esc to clear, Enter to apply)"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(filter_paragraph, area);
    f.set_cursor_position((area.x + 1 + app.filter_cursor_pos as u16 + 1, area.y + 1));
}

fn draw_main_list_block(f: &mut Frame, app: &mut PromptApp, area: Rect) {
    app.list_viewport_height = area.height.saturating_sub(2) as usize;
    app.ensure_selection_is_visible_in_viewport();

    let visible_item_indices = app.get_visible_item_indices();
    let end = (app.scroll_offset + app.list_viewport_height).min(visible_item_indices.len());
    let list_items: Vec<ListItem> = visible_item_indices
        .get(app.scroll_offset..end)
        .unwrap_or(&[])
        .iter()
        .map(|&idx| {
            let item = &app.items[idx];
            let check = match (app.style, item.checked) {
                (PromptStyle::Menu, _) => "",
                (PromptStyle::Checklist, true) => "[x] ",
                (PromptStyle::Checklist, false) => "[ ] ",
            };
            ListItem::new(format!("{}{}", check, item.label))
        })
        .collect();

    let list_title = if !app.filter_input.is_empty() && app.mode == AppMode::Normal {
        format!("Entries (Filter: '{}')", app.filter_input)
    } else {
        match app.style {
            PromptStyle::Checklist => "Select entries".to_string(),
            PromptStyle::Menu => "Choose one".to_string(),
        }
    };

    let list_widget = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state_for_view = ratatui::widgets::ListState::default();
    if let Some(pos) = visible_item_indices
        .iter()
        .position(|&idx| idx == app.current_selection_idx)
    {
        if pos >= app.scroll_offset && pos < end {
            list_state_for_view.select(Some(pos - app.scroll_offset));
        }
    }
    f.render_stateful_widget(list_widget, area, &mut list_state_for_view);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut PromptApp) {
    // heading + two help lines + borders
    let help_height = 3 + 2;
    let filter_input_height = if app.mode == AppMode::Filtering { 3 } else { 0 };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(help_height),
            Constraint::Length(filter_input_height),
            Constraint::Min(0),
        ])
        .split(frame.area());

    draw_help_block(frame, app, main_chunks[0]);
    if app.mode == AppMode::Filtering {
        draw_filter_input_block(frame, app, main_chunks[1]);
    }
    draw_main_list_block(frame, app, main_chunks[2]);
}
