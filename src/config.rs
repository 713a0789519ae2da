use anyhow::{Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATASET_PATH: &str = "data/properties.csv";
pub const DATASET_ENV_VAR: &str = "STAYBOT_DATASET";

const CONFIG_DIR_NAME: &str = "staybot";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFileConfig {
    dataset_path: Option<String>,
}

impl AppConfig {
    /// Resolves the config from an explicit file, or from the XDG config
    /// directory when `path` is `None`. An explicit file must exist.
    pub fn load_with_path(path: Option<&Path>) -> Result<Self> {
        let (config_path, config_is_explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (discover_config_path()?, false),
        };

        if config_is_explicit && !config_path.is_file() {
            bail!(
                "Failed to load config {}: file does not exist",
                config_path.display()
            );
        }

        let file_config = load_file_config(&config_path)?;

        dotenvy::dotenv().ok();

        let file_dataset = file_config
            .as_ref()
            .and_then(|cfg| cfg.dataset_path.as_deref())
            .and_then(non_empty)
            .map(|value| resolve_relative_to(&config_path, value));

        let dataset_path = env_non_empty(DATASET_ENV_VAR)
            .map(PathBuf::from)
            .or(file_dataset)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));

        Ok(Self { dataset_path })
    }

    pub fn with_dataset_override(mut self, dataset: Option<PathBuf>) -> Self {
        if let Some(dataset) = dataset {
            self.dataset_path = dataset;
        }
        self
    }
}

fn discover_config_path() -> Result<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let trimmed = xdg.trim();
        if trimmed.is_empty() {
            bail!("Failed to resolve config path: XDG_CONFIG_HOME is set but empty");
        }

        return Ok(PathBuf::from(trimmed)
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME));
    }

    let home = dirs::home_dir().ok_or_else(|| {
        anyhow!("Failed to resolve config path: HOME directory is unavailable")
    })?;

    Ok(home
        .join(".config")
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME))
}

fn load_file_config(config_path: &Path) -> Result<Option<RawFileConfig>> {
    if !config_path.is_file() {
        return Ok(None);
    }

    let config_text = fs::read_to_string(config_path).map_err(|err| {
        anyhow!(
            "Failed to load config {}: unable to read file: {err}",
            config_path.display()
        )
    })?;

    toml::from_str(&config_text).map(Some).map_err(|err| {
        anyhow!(
            "Failed to load config {}: {err}",
            config_path.display()
        )
    })
}

// Relative dataset paths in a config file are anchored at the file's directory.
fn resolve_relative_to(config_path: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        return path;
    }

    match config_path.parent() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| non_empty(&value).map(ToOwned::to_owned))
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
