use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Print every path under a directory that contains the search text",
    override_usage = "glocate [OPTIONS]... [SEARCH_TEXT]..."
)]
pub struct Cli {
    /// The directory to search in
    #[arg(short = 'f', long = "dir", value_name = "DIR", default_value = ".")]
    pub dir: String,

    /// Directory name to exclude from the search (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Ignore case when matching
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Highlight the matched text
    #[arg(short = 'c', long)]
    pub highlight: bool,

    /// Use a predefined set of options from presets.toml
    #[arg(short = 'p', long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Text to look for in each path; only the first one is used
    #[arg(value_name = "SEARCH_TEXT")]
    pub search: Vec<String>,
}

impl Cli {
    pub fn search_text(&self) -> &str {
        self.search.first().map_or("", String::as_str)
    }

    /// True when there is nothing to search for or nowhere to search.
    pub fn is_incomplete(&self) -> bool {
        self.search_text().is_empty() || self.dir.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("glocate").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let cli = parse(&["needle"]).unwrap();
        assert_eq!(cli.dir, ".");
        assert!(cli.exclude.is_empty());
        assert!(!cli.ignore_case);
        assert!(!cli.highlight);
        assert_eq!(cli.preset, None);
        assert_eq!(cli.search_text(), "needle");
        assert!(!cli.is_incomplete());
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-f", "/tmp", "-e", "target", "-e", ".git", "-i", "-c", "x"]).unwrap();
        assert_eq!(cli.dir, "/tmp");
        assert_eq!(cli.exclude, vec!["target", ".git"]);
        assert!(cli.ignore_case);
        assert!(cli.highlight);
    }

    #[test]
    fn long_flags() {
        let cli = parse(&[
            "--dir",
            "src",
            "--exclude",
            "vendor",
            "--ignore-case",
            "--highlight",
            "--preset",
            "rust",
            "x",
        ])
        .unwrap();
        assert_eq!(cli.dir, "src");
        assert_eq!(cli.exclude, vec!["vendor"]);
        assert!(cli.ignore_case && cli.highlight);
        assert_eq!(cli.preset.as_deref(), Some("rust"));
    }

    #[test]
    fn missing_or_empty_inputs_are_incomplete() {
        assert!(parse(&[]).unwrap().is_incomplete());
        assert!(parse(&[""]).unwrap().is_incomplete());
        assert!(parse(&["-f", "", "x"]).unwrap().is_incomplete());
    }

    #[test]
    fn extra_search_texts_are_ignored() {
        let cli = parse(&["first", "second", "third"]).unwrap();
        assert_eq!(cli.search_text(), "first");
        assert!(!cli.is_incomplete());
        assert!(parse(&["", "second"]).unwrap().is_incomplete());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(parse(&["-z", "x"]).is_err());
    }
}
