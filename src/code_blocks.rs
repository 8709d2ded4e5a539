use std::fs;
use std::path::Path;
use tracing::warn;

/// Fence tag for a file, from its extension (or a few well-known names).
/// Empty when unknown, which yields an untagged fence.
pub fn language_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension() else {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        return match name.as_str() {
            "dockerfile" | ".env" | ".gitignore" | ".dockerignore" => "text",
            _ => "",
        };
    };
    match ext.to_string_lossy().to_lowercase().as_str() {
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "yml" => "yml",
        "yaml" => "yaml",
        "csv" => "csv",
        "txt" => "text",
        "c" => "c",
        "cpp" => "cpp",
        "java" => "java",
        "go" => "go",
        "rs" => "rust",
        "rb" => "ruby",
        "php" => "php",
        "pl" => "perl",
        "py" => "python",
        "json" => "json",
        "html" => "html",
        "css" => "css",
        _ => "",
    }
}

/// One `## ./path` heading plus fenced block per file, in the order given.
/// A file that cannot be read gets the error in place of its content.
pub fn format_code_blocks<'a>(files: impl IntoIterator<Item = &'a Path>, root: &Path) -> String {
    let mut lines: Vec<String> = Vec::new();
    for file in files {
        let rel = file.strip_prefix(root).unwrap_or(file);
        lines.push(format!("## ./{}", rel.display()));
        lines.push(format!("```{}", language_for(file)));
        match fs::read_to_string(file) {
            Ok(contents) => lines.push(contents),
            Err(e) => {
                warn!(file = %file.display(), "cannot read file: {e}");
                lines.push(format!("Error reading ./{}: {}", rel.display(), e));
            }
        }
        lines.push("```".to_string());
    }
    lines.join("\n")
}
