use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::diff::DEFAULT_CONTEXT_LINES;
use crate::render::{OutputFormat, RenderConfig};
use crate::theme::{apply_overrides, Theme, ThemeOverrides, DEFAULT_THEME};

/// What to do with a first-folder request that has no counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedPolicy {
    #[default]
    Skip,
    Abort,
}

/// What to do when one pair of a folder comparison fails to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairErrorPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone)]
pub struct RdiffConfig {
    pub theme: Theme,
    pub context_lines: usize,
    pub render: RenderConfig,
    pub unmatched: UnmatchedPolicy,
    pub on_pair_error: PairErrorPolicy,
    /// Pairs in flight at once during a folder comparison.
    pub max_concurrent_pairs: usize,
}

impl Default for RdiffConfig {
    fn default() -> Self {
        Self {
            theme: Theme::from_name(DEFAULT_THEME),
            context_lines: DEFAULT_CONTEXT_LINES,
            render: RenderConfig::default(),
            unmatched: UnmatchedPolicy::default(),
            on_pair_error: PairErrorPolicy::default(),
            max_concurrent_pairs: 4,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    colors: Option<ThemeOverrides>,
    #[serde(default)]
    context_lines: Option<usize>,
    #[serde(default)]
    draw_file_list: Option<bool>,
    #[serde(default)]
    output_format: Option<OutputFormat>,
    #[serde(default)]
    unmatched: Option<UnmatchedPolicy>,
    #[serde(default)]
    on_pair_error: Option<PairErrorPolicy>,
    #[serde(default)]
    max_concurrent_pairs: Option<usize>,
}

pub fn config_path() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("rdiff");
    path.push("config.toml");
    path
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load config from `~/.config/rdiff/config.toml`, falling back to defaults.
pub fn load_config() -> RdiffConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> RdiffConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return RdiffConfig::default(),
    };
    parse_config(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), "ignoring malformed config: {e}");
        RdiffConfig::default()
    })
}

pub fn parse_config(contents: &str) -> Result<RdiffConfig, toml::de::Error> {
    let file: ConfigFile = toml::from_str(contents)?;
    let defaults = RdiffConfig::default();

    // Load theme by name, apply color overrides
    let theme_name = file.theme.as_deref().unwrap_or(DEFAULT_THEME);
    let mut theme = Theme::from_name(theme_name);
    if let Some(ref overrides) = file.colors {
        apply_overrides(&mut theme, overrides);
    }

    Ok(RdiffConfig {
        theme,
        context_lines: file.context_lines.unwrap_or(defaults.context_lines),
        render: RenderConfig {
            draw_file_list: file
                .draw_file_list
                .unwrap_or(defaults.render.draw_file_list),
            output_format: file
                .output_format
                .unwrap_or(defaults.render.output_format),
        },
        unmatched: file.unmatched.unwrap_or(defaults.unmatched),
        on_pair_error: file.on_pair_error.unwrap_or(defaults.on_pair_error),
        max_concurrent_pairs: file
            .max_concurrent_pairs
            .unwrap_or(defaults.max_concurrent_pairs)
            .max(1),
    })
}
