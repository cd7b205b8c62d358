use crate::app::cli::Cli;
use crate::app::models::SearchConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

/// One named table from `presets.toml`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetConfig {
    pub exclude: Option<Vec<String>>,
    pub ignore_case: Option<bool>,
    pub highlight: Option<bool>,
}

pub type Presets = HashMap<String, PresetConfig>;

pub fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("glocate").join("presets.toml"))
}

/// Reads the presets file, treating a missing file as "no presets".
pub fn load_presets_file(path: &Path) -> Result<Presets> {
    if !path.exists() {
        log::debug!("no presets file at {}", path.display());
        return Ok(Presets::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read presets at {}", path.display()))?;

    parse_presets(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_presets(content: &str) -> Result<Presets> {
    let parsed: PresetsFile = toml::from_str(content)?;
    Ok(parsed.presets)
}

/// Preset entries first, then CLI entries, without duplicates.
fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Vec<String>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    combined.extend(cli_vec);
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Builds the search configuration from parsed arguments and the preset the
/// user asked for, if any. Call only once [`Cli::is_incomplete`] is false.
pub fn resolve_config(cli: Cli, presets: &Presets) -> SearchConfig {
    let preset = match cli.preset.as_deref() {
        Some(name) => presets.get(name).cloned().unwrap_or_else(|| {
            log::warn!("preset '{name}' not found, using command-line options only");
            PresetConfig::default()
        }),
        None => PresetConfig::default(),
    };

    let search = cli.search_text().to_string();
    SearchConfig {
        root: PathBuf::from(cli.dir),
        search,
        ignore_case: cli.ignore_case || preset.ignore_case.unwrap_or(false),
        highlight: cli.highlight || preset.highlight.unwrap_or(false),
        excluded: merge_vecs(preset.exclude, cli.exclude).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    const PRESETS: &str = r#"
[rust]
exclude = ["target", ".git"]
ignore_case = true

[web]
exclude = ["node_modules"]
highlight = true
"#;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("glocate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_named_tables() {
        let presets = parse_presets(PRESETS).unwrap();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets["rust"].ignore_case, Some(true));
        assert_eq!(presets["rust"].highlight, None);
        assert_eq!(
            presets["web"].exclude,
            Some(vec!["node_modules".to_string()])
        );
    }

    #[test]
    fn rejects_malformed_presets() {
        assert!(parse_presets("[rust\nexclude = ").is_err());
        assert!(parse_presets("[rust]\nexclude = \"target\"").is_err());
    }

    #[test]
    fn missing_file_means_no_presets() {
        let dir = tempdir().unwrap();
        let presets = load_presets_file(&dir.path().join("presets.toml")).unwrap();
        assert!(presets.is_empty());
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("presets.toml");
        fs::write(&path, PRESETS).unwrap();

        let presets = load_presets_file(&path).unwrap();
        assert!(presets.contains_key("web"));
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("presets.toml");
        fs::write(&path, "not = [valid").unwrap();

        let err = load_presets_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("presets.toml"));
    }

    #[test]
    fn cli_only_configuration() {
        let config = resolve_config(
            cli(&["-f", "src", "-e", "a", "-e", "b", "-e", "a", "-c", "needle"]),
            &Presets::new(),
        );
        assert_eq!(config.root, PathBuf::from("src"));
        assert_eq!(config.search, "needle");
        assert!(config.highlight);
        assert!(!config.ignore_case);
        assert_eq!(config.excluded.len(), 2);
    }

    #[test]
    fn preset_values_merge_with_cli() {
        let presets = parse_presets(PRESETS).unwrap();
        let config = resolve_config(cli(&["--preset", "rust", "-e", "vendor", "x"]), &presets);

        assert!(config.ignore_case);
        assert!(!config.highlight);
        for name in ["target", ".git", "vendor"] {
            assert!(config.excluded.contains(name));
        }
    }

    #[test]
    fn unknown_preset_falls_back_to_cli() {
        let presets = parse_presets(PRESETS).unwrap();
        let config = resolve_config(cli(&["--preset", "nope", "x"]), &presets);
        assert!(config.excluded.is_empty());
        assert!(!config.ignore_case);
    }

    #[test]
    fn first_search_text_wins() {
        let config = resolve_config(cli(&["one", "two"]), &Presets::new());
        assert_eq!(config.search, "one");
    }

    #[test]
    fn merge_keeps_first_occurrence() {
        let merged = merge_vecs(
            Some(vec!["a".into(), "b".into()]),
            vec!["b".into(), "c".into()],
        );
        assert_eq!(merged, vec!["a", "b", "c"]);
    }
}
