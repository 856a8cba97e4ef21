//! Markdown document discovery.

use std::path::{Path, PathBuf};

use relink_core::{
    application::ApplicationError,
    error::{Context, RelinkResult},
};
use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Collect the documents to render under `path`.
///
/// A file is returned as-is, whatever its extension. A directory is walked
/// for Markdown files, skipping hidden entries, in file-name order.
#[instrument(fields(path = %path.display()))]
pub fn collect(path: &Path) -> RelinkResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(ApplicationError::DocumentNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let mut documents = Vec::new();
    let walker = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    for entry in walker {
        let entry = entry.context("walking document directory")?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    debug!(count = documents.len(), "Documents collected");
    Ok(documents)
}

/// Where the HTML for `document` goes: its path under `root`, moved to
/// `out_dir` with an `.html` extension.
pub fn html_path(root: &Path, document: &Path, out_dir: &Path) -> PathBuf {
    let relative = document
        .strip_prefix(root)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| document.file_name().map(Path::new))
        .unwrap_or(document);
    out_dir.join(relative).with_extension("html")
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| MARKDOWN_EXTENSIONS.iter().any(|m| e.eq_ignore_ascii_case(m)))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use relink_core::error::RelinkError;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn collects_markdown_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("guide")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("a.markdown"), "a").unwrap();
        fs::write(dir.path().join("notes.txt"), "n").unwrap();
        fs::write(dir.path().join("guide/intro.MD"), "i").unwrap();
        fs::write(dir.path().join(".git/HEAD.md"), "h").unwrap();

        let docs = collect(dir.path()).unwrap();
        let names: Vec<_> = docs
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.markdown"),
                PathBuf::from("b.md"),
                PathBuf::from("guide/intro.MD"),
            ]
        );
    }

    #[test]
    fn single_file_is_returned_as_is() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("README.txt");
        fs::write(&file, "x").unwrap();
        assert_eq!(collect(&file).unwrap(), vec![file]);
    }

    #[test]
    fn missing_path_is_not_found() {
        let err = collect(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(
            err,
            RelinkError::Application(ApplicationError::DocumentNotFound { .. })
        ));
    }

    #[test]
    fn html_paths_mirror_the_tree() {
        let root = Path::new("docs");
        assert_eq!(
            html_path(root, Path::new("docs/guide/intro.md"), Path::new("site")),
            PathBuf::from("site/guide/intro.html")
        );
        // Single-file input: root is the file itself.
        assert_eq!(
            html_path(Path::new("README.md"), Path::new("README.md"), Path::new("out")),
            PathBuf::from("out/README.html")
        );
    }
}
