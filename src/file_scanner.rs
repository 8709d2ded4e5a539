use ignore::WalkBuilder;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// The immediate children of one directory, split by kind and sorted
/// case-insensitively by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub dirs: Vec<(String, PathBuf)>,
    pub files: Vec<(String, PathBuf)>,
}

impl DirectoryListing {
    fn push(&mut self, path: PathBuf) {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return;
        };
        // Follows symlinks, so a link to a directory is offered as a directory.
        if path.is_dir() {
            self.dirs.push((name, path));
        } else {
            self.files.push((name, path));
        }
    }

    fn sort(&mut self) {
        self.dirs.sort_by(|a, b| by_name_ignoring_case(&a.0, &b.0));
        self.files.sort_by(|a, b| by_name_ignoring_case(&a.0, &b.0));
    }
}

fn by_name_ignoring_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// List `dir` one level deep.
///
/// Fails only when `dir` itself cannot be read; entries that vanish or error
/// mid-listing are logged and skipped. With `respect_ignore_files`, entries
/// matched by `.gitignore`/`.ignore` rules are left out.
pub fn scan_directory(dir: &Path, respect_ignore_files: bool) -> io::Result<DirectoryListing> {
    let mut listing = DirectoryListing::default();

    // Both walkers fold an unreadable root into their error streams; probe
    // first so the caller sees the real io::Error.
    fs::read_dir(dir)?;

    if respect_ignore_files {
        let walker = WalkBuilder::new(dir)
            .max_depth(Some(1))
            .hidden(false)
            .require_git(false)
            .build();
        for result in walker {
            match result {
                Ok(entry) if entry.depth() == 0 => {}
                Ok(entry) => listing.push(entry.into_path()),
                Err(e) => warn!("skipping entry in {}: {}", dir.display(), e),
            }
        }
    } else {
        for result in WalkDir::new(dir).min_depth(1).max_depth(1) {
            match result {
                Ok(entry) => listing.push(entry.into_path()),
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => warn!("skipping entry in {}: {}", dir.display(), e),
            }
        }
    }

    listing.sort();
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn names(entries: &[(String, PathBuf)]) -> Vec<&str> {
        entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[test]
    fn splits_and_sorts_case_insensitively() {
        let dir = tempdir().unwrap();
        for d in ["beta", "Alpha", "gamma"] {
            fs::create_dir(dir.path().join(d)).unwrap();
        }
        for f in ["b.txt", "A.md", "c.rs"] {
            File::create(dir.path().join(f)).unwrap();
        }
        fs::create_dir(dir.path().join("beta/nested")).unwrap();

        let listing = scan_directory(dir.path(), false).unwrap();

        assert_eq!(names(&listing.dirs), ["Alpha", "beta", "gamma"]);
        assert_eq!(names(&listing.files), ["A.md", "b.txt", "c.rs"]);
        assert_eq!(listing.dirs[1].1, dir.path().join("beta"));
    }

    #[test]
    fn hidden_entries_are_listed() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join(".env")).unwrap();
        for respect in [false, true] {
            let listing = scan_directory(dir.path(), respect).unwrap();
            assert_eq!(names(&listing.files), [".env"]);
        }
    }

    #[test]
    fn ignore_rules_apply_only_when_asked() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "target/\n*.log\n").unwrap();
        fs::create_dir(dir.path().join("target")).unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        File::create(dir.path().join("debug.log")).unwrap();

        let all = scan_directory(dir.path(), false).unwrap();
        assert_eq!(names(&all.dirs), ["src", "target"]);
        assert_eq!(names(&all.files), [".gitignore", "debug.log"]);

        let filtered = scan_directory(dir.path(), true).unwrap();
        assert_eq!(names(&filtered.dirs), ["src"]);
        assert_eq!(names(&filtered.files), [".gitignore"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("gone");
        assert!(scan_directory(&gone, false).is_err());
        assert!(scan_directory(&gone, true).is_err());
    }
}
