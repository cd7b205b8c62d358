use crate::app::models::{MatchResult, SearchConfig, WalkEntry};
use crate::app::scanner::WalkError;

/// Substring test applied to every visited path.
///
/// Case-insensitive mode folds ASCII letters only. Folding never changes the
/// byte length, so an offset found in the folded path is valid in the
/// original one. Non-ASCII letters compare as written.
#[derive(Debug, Clone)]
pub struct Matcher {
    needle: String,
    ignore_case: bool,
    highlight: bool,
}

impl Matcher {
    pub fn new(search: &str, ignore_case: bool, highlight: bool) -> Self {
        let needle = if ignore_case {
            search.to_ascii_lowercase()
        } else {
            search.to_string()
        };
        Self {
            needle,
            ignore_case,
            highlight,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(&config.search, config.ignore_case, config.highlight)
    }

    /// Byte offset of the first occurrence of the search text in `path`.
    pub fn find(&self, path: &str) -> Option<usize> {
        if self.ignore_case {
            path.to_ascii_lowercase().find(&self.needle)
        } else {
            path.find(&self.needle)
        }
    }

    pub fn check(&self, entry: WalkEntry) -> Option<MatchResult> {
        let start = self.find(&entry.path)?;
        let highlight = self.highlight.then(|| start..start + self.needle.len());
        Some(MatchResult {
            path: entry.path,
            highlight,
        })
    }
}

/// What the search loop does with one traversal result.
#[derive(Debug)]
pub enum Outcome {
    Matched(MatchResult),
    /// An access failure to report before moving on.
    Skipped(WalkError),
}

/// Lazily turns traversal results into outcomes.
///
/// Entries that do not match are dropped. Access failures become
/// [`Outcome::Skipped`]; any other failure is passed through as `Err`, and the
/// caller is expected to stop there.
pub fn matches<'a, I>(
    entries: I,
    matcher: &'a Matcher,
) -> impl Iterator<Item = Result<Outcome, WalkError>> + 'a
where
    I: IntoIterator<Item = Result<WalkEntry, WalkError>>,
    I::IntoIter: 'a,
{
    entries.into_iter().filter_map(move |entry| match entry {
        Ok(entry) => matcher.check(entry).map(|m| Ok(Outcome::Matched(m))),
        Err(err) if err.is_access_denied() => Some(Ok(Outcome::Skipped(err))),
        Err(err) => Some(Err(err)),
    })
}
