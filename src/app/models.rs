use std::collections::BTreeSet;
use std::ops::Range;
use std::path::PathBuf;

/// Directory base names whose subtrees are not descended into.
pub type ExcludedNames = BTreeSet<String>;

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub root: PathBuf,
    pub search: String,
    pub ignore_case: bool,
    pub highlight: bool,
    pub excluded: ExcludedNames,
}

/// A single node produced by the traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path as reported: the root verbatim, descendants without `.` components.
    pub path: String,
    pub is_dir: bool,
}

/// A path that contained the search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub path: String,
    /// Byte range of the match in `path`, set only when highlighting.
    pub highlight: Option<Range<usize>>,
}

/// Counters for one search, reported through debug logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchSummary {
    pub visited: u64,
    pub directories: u64,
    pub matched: u64,
    pub soft_errors: u64,
}
