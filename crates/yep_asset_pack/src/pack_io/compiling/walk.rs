use crate::pack_io::format::{MAX_NAME_LEN, NAME_WIDTH};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// One file scheduled for packing: its archive-facing name and the source
/// path its bytes come from.
///
/// Worklists live for a single pack invocation and are dropped with it.
#[derive(Debug)]
pub(crate) struct WorklistEntry {
    pub name: String,
    pub source: PathBuf,
}

/// Recursively collects every packable regular file under `root`.
///
/// Symlinks are resolved through the platform's stat semantics; there is
/// no cycle protection. Problems with individual entries or subtrees are
/// logged and skipped, never failing the walk.
///
/// Entries come back most-recently-discovered first (discovery order,
/// reversed), which keeps archive layout reproducible for a given tree.
pub(crate) fn build_worklist(root: &Path) -> Vec<WorklistEntry> {
    let mut worklist = Vec::new();
    walk_into(root, root, &mut worklist);
    worklist.reverse();
    worklist
}

fn walk_into(root: &Path, dir: &Path, worklist: &mut Vec<WorklistEntry>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to read directory {}: {e}", dir.display());
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                error!("Failed to read an entry of {}: {e}", dir.display());
                continue;
            }
        };

        let path = entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                error!("Failed to stat {}: {e}", path.display());
                continue;
            }
        };

        if metadata.is_dir() {
            walk_into(root, &path, worklist);
        } else if metadata.is_file() {
            if let Some(name) = relative_name(root, &path) {
                worklist.push(WorklistEntry { name, source: path });
            }
        }
    }
}

/// Computes the archive-facing name of `path`: the path with the `root`
/// prefix stripped, forward-slash separated on every platform.
///
/// Returns `None` (with a warning) for names that are not UTF-8 or that
/// would overflow the fixed name field with its terminator.
fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path
        .strip_prefix(root)
        // This holds for every path produced by walking under `root`.
        .expect("walked paths should start with the walk root");

    let Some(name) = relative.to_str() else {
        warn!("Skipped {}: name is not valid UTF-8", path.display());
        return None;
    };

    // On windows replace backslash with forward slash so names match ones
    // packed on unix systems. \ is a legal name byte on unix, so only
    // windows rewrites it.
    #[cfg(target_os = "windows")]
    let name = name.replace('\\', "/");
    #[cfg(not(target_os = "windows"))]
    let name = name.to_owned();

    if name.len() > MAX_NAME_LEN {
        warn!(
            "Skipped {}: relative path does not fit the {NAME_WIDTH} byte name field",
            path.display()
        );
        return None;
    }

    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn names_are_relative_to_the_root() {
        let name = relative_name(Path::new("/assets"), Path::new("/assets/sub/file.txt"));
        assert_eq!(name.as_deref(), Some("sub/file.txt"));
    }

    #[test]
    #[traced_test]
    fn over_long_names_are_rejected_with_a_warning() {
        let long = format!("/assets/{}.txt", "f".repeat(MAX_NAME_LEN));
        let name = relative_name(Path::new("/assets"), Path::new(&long));

        assert_eq!(name, None);
        assert!(logs_contain("does not fit"));
    }

    #[test]
    fn names_at_the_field_limit_are_kept() {
        let exact = format!("/assets/{}", "f".repeat(MAX_NAME_LEN));
        let name = relative_name(Path::new("/assets"), Path::new(&exact));

        assert_eq!(name.unwrap().len(), MAX_NAME_LEN);
    }

    #[test]
    fn nested_files_are_all_collected() {
        let dir = tempfile::tempdir().unwrap();
        for rel in ["a.txt", "sub/b.txt", "sub/deep/c.txt"] {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"x").unwrap();
        }

        let mut names: Vec<_> = build_worklist(dir.path())
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        names.sort();

        assert_eq!(names, ["a.txt", "sub/b.txt", "sub/deep/c.txt"]);
    }
}
