use crate::app::formatter::OutputGenerator;
use crate::app::matcher::{matches, Matcher, Outcome};
use crate::app::models::{SearchConfig, SearchSummary, WalkEntry};
use crate::app::scanner::{Scanner, WalkError};
use anyhow::Result;
use std::cell::Cell;
use std::io::{self, Write};

/// Walks `config.root` and writes one line per matching path to `out`.
///
/// Access failures are written inline and skipped. Any other traversal error
/// stops the walk and is returned as a [`WalkError`] inside the `anyhow::Error`.
pub fn search<W: Write>(config: &SearchConfig, out: &mut W) -> Result<SearchSummary> {
    let matcher = Matcher::from_config(config);
    let entries = Scanner::new(&config.root, &config.excluded);
    write_results(entries, &matcher, out)
}

/// Matches `entries` and writes the results in order.
///
/// A reader that goes away (`BrokenPipe`) ends the output early without error.
pub fn write_results<I, W>(entries: I, matcher: &Matcher, out: &mut W) -> Result<SearchSummary>
where
    I: IntoIterator<Item = Result<WalkEntry, WalkError>>,
    W: Write,
{
    let visited = Cell::new(0);
    let directories = Cell::new(0);
    let entries = entries.into_iter().inspect(|entry| {
        if let Ok(entry) = entry {
            visited.set(visited.get() + 1);
            if entry.is_dir {
                directories.set(directories.get() + 1);
            }
        }
    });

    let mut summary = SearchSummary::default();
    let written = write_outcomes(matches(entries, matcher), out, &mut summary);
    summary.visited = visited.get();
    summary.directories = directories.get();

    match written {
        Err(err) if is_closed_pipe(&err) => {
            log::debug!("output closed by reader, stopping");
            Ok(summary)
        }
        Err(err) => Err(err),
        Ok(()) => Ok(summary),
    }
}

fn write_outcomes<O, W>(outcomes: O, out: &mut W, summary: &mut SearchSummary) -> Result<()>
where
    O: Iterator<Item = Result<Outcome, WalkError>>,
    W: Write,
{
    for outcome in outcomes {
        match outcome? {
            Outcome::Matched(result) => {
                summary.matched += 1;
                writeln!(out, "{}", OutputGenerator::render_match(&result))?;
            }
            Outcome::Skipped(err) => {
                summary.soft_errors += 1;
                log::debug!("continuing past unreadable node: {err}");
                writeln!(out, "{}", OutputGenerator::render_error(&err))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn is_closed_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
}
