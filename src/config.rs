use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::logging::LogFormat;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) data: Option<PathBuf>,
    #[serde(default)]
    pub(crate) from: Option<i32>,
    #[serde(default)]
    pub(crate) to: Option<i32>,
    #[serde(default)]
    pub(crate) journal: Option<String>,
    #[serde(default)]
    pub(crate) no_wordcloud: bool,
    #[serde(default)]
    pub(crate) no_sources: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    /// `true` enables the on-disk record cache
    #[serde(default)]
    pub(crate) cache: bool,
    #[serde(default)]
    pub(crate) log_format: Option<LogFormat>,
    #[serde(default)]
    pub(crate) sample_rows: Option<usize>,
}

/// Outcome of the config search. Reported after logging is up, since the
/// config itself decides how logging looks.
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
    /// Files that exist but failed to read or parse
    pub(crate) problems: Vec<(PathBuf, String)>,
}

impl LoadedConfig {
    pub(crate) fn report(&self) {
        for (path, problem) in &self.problems {
            tracing::warn!(path = %path.display(), error = %problem, "ignoring config file");
        }
        if let Some(path) = &self.path {
            tracing::info!(path = %path.display(), "loaded config");
        }
    }
}

impl Config {
    pub(crate) fn load() -> LoadedConfig {
        Self::load_from(&Self::get_config_paths())
    }

    /// First file that parses wins; later candidates are not read
    fn load_from(paths: &[PathBuf]) -> LoadedConfig {
        let mut loaded = LoadedConfig::default();
        for path in paths {
            if !path.exists() {
                continue;
            }
            let parsed = fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|content| toml::from_str::<Config>(&content).map_err(|e| e.to_string()));
            match parsed {
                Ok(config) => {
                    loaded.config = config;
                    loaded.path = Some(path.clone());
                    return loaded;
                }
                Err(e) => loaded.problems.push((path.clone(), e)),
            }
        }
        loaded
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/cordstats/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("cordstats").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("cordstats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.cordstats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cordstats.toml"));
        }

        paths
    }
}
