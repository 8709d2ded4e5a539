#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Directory,
    File,
    /// "Done / continue" marker at the end of a checklist
    Done,
    /// A plain menu option
    Choice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptItem {
    pub label: String,
    pub kind: ItemKind,
    pub checked: bool,
}

impl PromptItem {
    pub fn new(label: impl Into<String>, kind: ItemKind, checked: bool) -> Self {
        PromptItem {
            label: label.into(),
            kind,
            checked,
        }
    }

    /// Directory and file rows; the ones bulk select/deselect act on.
    pub(super) fn is_entry(&self) -> bool {
        matches!(self.kind, ItemKind::Directory | ItemKind::File)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Many items may be checked, Enter confirms the set
    Checklist,
    /// Exactly one item, Enter picks the highlighted one
    Menu,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum AppMode {
    Normal,
    Filtering,
}
