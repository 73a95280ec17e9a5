//! Discovery and loading of `krok.toml`

use super::schema::KrokConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file name
pub const CONFIG_FILE: &str = "krok.toml";

/// Subdirectory of the XDG config home searched for a user-wide file
const XDG_SUBDIR: &str = "krokbragd";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid settings in {}:{}", .path.display(), .errors.iter().map(|e| format!("\n  - {}", e)).collect::<String>())]
    Validation { path: PathBuf, errors: Vec<String> },
}

/// Command-line flags that take precedence over `krok.toml`
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub cell_size: Option<u32>,
    /// `Some(false)` turns grid lines off
    pub grid_lines: Option<bool>,
    pub border: Option<u32>,
}

/// A loaded configuration and the file it came from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadedConfig {
    pub config: KrokConfig,
    /// `None` when no config file was found
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Palette document path. A relative `[palettes] path` is taken relative
    /// to the directory holding `krok.toml`.
    pub fn palette_path(&self) -> PathBuf {
        let path = self.config.palette_path();
        match self.path.as_deref().and_then(Path::parent) {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    }
}

/// The nearest `krok.toml` in the working directory or its ancestors,
/// else the user-wide file under the XDG config home.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir()
        .ok()
        .and_then(|cwd| find_config_from(&cwd))
        .or_else(find_xdg_config)
}

/// `$XDG_CONFIG_HOME/krokbragd/krok.toml`, falling back to `~/.config`.
pub fn find_xdg_config() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    let candidate = base.join(XDG_SUBDIR).join(CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// The first `krok.toml` found in `start` or one of its ancestors.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE)).find(|candidate| candidate.is_file())
}

/// Load an explicit config file, or the discovered one. Without either the
/// defaults are used. An explicit path that cannot be read is an error.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let Some(path) = path.map(Path::to_path_buf).or_else(find_config) else {
        return Ok(LoadedConfig::default());
    };

    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io { path: path.clone(), source })?;
    let config: KrokConfig =
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: path.clone(), source })?;

    let errors = config.validate();
    if !errors.is_empty() {
        let errors = errors.iter().map(ToString::to_string).collect();
        return Err(ConfigError::Validation { path, errors });
    }

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(LoadedConfig { config, path: Some(path) })
}

/// Overwrite the settings that have a command-line value.
pub fn merge_cli_overrides(config: &mut KrokConfig, overrides: &CliOverrides) {
    let CliOverrides { width, height, cell_size, grid_lines, border } = overrides;
    config.defaults.width = width.unwrap_or(config.defaults.width);
    config.defaults.height = height.unwrap_or(config.defaults.height);
    config.defaults.cell_size = cell_size.unwrap_or(config.defaults.cell_size);
    config.render.grid_lines = grid_lines.unwrap_or(config.render.grid_lines);
    config.render.border = border.unwrap_or(config.render.border);
}
