use crate::selection::Selection;
use std::collections::BTreeMap;
use std::path::{Component, Path};
use tracing::debug;

/// One segment of the minimal tree. Built fresh for every render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeNode {
    pub name: String,
    pub is_dir: bool,
    pub children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    fn insert(&mut self, root: &Path, segments: &[String], leaf_is_selected_dir: bool) {
        let mut node = self;
        let mut full = root.to_path_buf();
        for (depth, segment) in segments.iter().enumerate() {
            full.push(segment);
            let is_leaf = depth + 1 == segments.len();
            let child = node
                .children
                .entry(segment.clone())
                .or_insert_with(|| TreeNode {
                    name: segment.clone(),
                    // Intermediate segments that were never selected themselves
                    // still need their kind; ask the filesystem.
                    is_dir: full.is_dir(),
                    children: BTreeMap::new(),
                });
            if !is_leaf || leaf_is_selected_dir {
                child.is_dir = true;
            }
            node = child;
        }
    }
}

/// Nest every selected path (relative to `root`) into a tree. The root
/// itself is the returned node and never appears as a child.
pub fn build_tree(root: &Path, selection: &Selection) -> TreeNode {
    let mut tree = TreeNode {
        name: root_label(root),
        is_dir: true,
        children: BTreeMap::new(),
    };

    let dirs = selection.dirs.iter().map(|p| (p, true));
    let files = selection.files.iter().map(|p| (p, false));
    for (path, is_selected_dir) in dirs.chain(files) {
        let Ok(rel) = path.strip_prefix(root) else {
            debug!(path = %path.display(), "outside the root, left out of the tree");
            continue;
        };
        let segments: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if segments.is_empty() {
            continue;
        }
        tree.insert(root, &segments, is_selected_dir);
    }
    tree
}

/// Render the selection as an indented box-drawing tree, directories before
/// files at every level. No trailing newline.
pub fn render_tree(root: &Path, selection: &Selection) -> String {
    let tree = build_tree(root, selection);
    let mut lines = vec![format!("{}/", tree.name)];
    render_children(&tree, "", &mut lines);
    lines.join("\n")
}

fn render_children(node: &TreeNode, prefix: &str, lines: &mut Vec<String>) {
    // BTreeMap already yields names in order; the stable sort only lifts
    // directories to the front.
    let mut children: Vec<&TreeNode> = node.children.values().collect();
    children.sort_by_key(|child| !child.is_dir);

    let count = children.len();
    for (idx, child) in children.into_iter().enumerate() {
        let is_last = idx + 1 == count;
        let (branch, continuation) = if is_last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let marker = if child.is_dir { "/" } else { "" };
        lines.push(format!("{prefix}{branch}{}{marker}", child.name));

        if !child.children.is_empty() {
            render_children(child, &format!("{prefix}{continuation}"), lines);
        }
    }
}

fn root_label(root: &Path) -> String {
    match root.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        // `/` or a bare drive: no basename, show it trimmed of its separator
        None => root
            .to_string_lossy()
            .trim_end_matches(['/', '\\'])
            .to_string(),
    }
}
