use crate::app::models::{ExcludedNames, WalkEntry};
use ignore::{DirEntry, Walk, WalkBuilder};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by the traversal for a single node.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The node exists but could not be read. The walk continues past it.
    #[error("{}: {}", .path.display(), .source)]
    AccessDenied { path: PathBuf, source: io::Error },
    /// Anything else. The walk stops here.
    #[error(transparent)]
    Other(#[from] ignore::Error),
}

impl WalkError {
    fn classify(err: ignore::Error, fallback: &Path) -> Self {
        let denied = err
            .io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::PermissionDenied);
        if !denied {
            return WalkError::Other(err);
        }

        // The wrapped io::Error message already repeats the path.
        WalkError::AccessDenied {
            path: error_path(&err).unwrap_or(fallback).to_path_buf(),
            source: io::ErrorKind::PermissionDenied.into(),
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, WalkError::AccessDenied { .. })
    }

    /// An unreadable directory the user asked to skip anyway.
    fn is_excluded_dir(&self, excluded: &ExcludedNames) -> bool {
        match self {
            WalkError::AccessDenied { path, .. } => is_excluded(path, excluded),
            WalkError::Other(_) => false,
        }
    }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

/// Pre-order walk over `root` in file-name order.
///
/// Every node is yielded, including hidden files and anything a `.gitignore`
/// would hide. A directory whose base name is excluded is still yielded
/// itself; none of its children are.
pub struct Scanner {
    root: PathBuf,
    excluded: Arc<ExcludedNames>,
    walk: Walk,
}

impl Scanner {
    pub fn new(root: &Path, excluded: &ExcludedNames) -> Self {
        let excluded = Arc::new(excluded.clone());
        let filter_set = Arc::clone(&excluded);

        let walk = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| !parent_is_excluded(entry, &filter_set))
            .build();

        Self {
            root: root.to_path_buf(),
            excluded,
            walk,
        }
    }

    fn process_entry(&self, entry: DirEntry) -> WalkEntry {
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        if is_dir && is_excluded(entry.path(), &self.excluded) {
            log::debug!("not descending into {}", entry.path().display());
        }

        WalkEntry {
            path: display_path(entry.path(), entry.depth()),
            is_dir,
        }
    }
}

impl Iterator for Scanner {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let err = match self.walk.next()? {
                Ok(entry) => return Some(Ok(self.process_entry(entry))),
                Err(err) => WalkError::classify(err, &self.root),
            };
            // Listing an excluded directory is never asked for, so its failure is not reported.
            if err.is_excluded_dir(&self.excluded) {
                log::debug!("ignoring unreadable excluded directory: {err}");
                continue;
            }
            return Some(Err(err));
        }
    }
}

fn parent_is_excluded(entry: &DirEntry, excluded: &ExcludedNames) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .path()
        .parent()
        .is_some_and(|parent| is_excluded(parent, excluded))
}

fn is_excluded(dir: &Path, excluded: &ExcludedNames) -> bool {
    dir.components()
        .next_back()
        .is_some_and(|name| excluded.contains(&*name.as_os_str().to_string_lossy()))
}

/// The root is reported as given; below it, `.` components are dropped.
fn display_path(path: &Path, depth: usize) -> String {
    if depth == 0 {
        return path.to_string_lossy().into_owned();
    }
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    cleaned.to_string_lossy().into_owned()
}
