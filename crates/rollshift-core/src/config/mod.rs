//! Pipeline configuration loading.
//!
//! Configuration is read from a YAML file found by searching, in order:
//! 1. an explicit path (e.g. `--config`)
//! 2. `$ROLLSHIFT_CONFIG`
//! 3. `./config/pipeline.yml`, `./pipeline.yml` (and `.yaml`)
//! 4. `~/rollshift/pipeline.yml` (and `.yaml`)
//!
//! Missing keys fall back to defaults. A candidate that fails to read, parse
//! or validate is skipped with a warning. There is no process-wide config:
//! callers hold the returned [`PipelineConfig`] and pass it down.

#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::models::PipelineConfig;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "ROLLSHIFT_CONFIG";

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["pipeline.yml", "pipeline.yaml"];

/// Directory under the home directory searched last.
const HOME_CONFIG_DIR: &str = "rollshift";

/// Loaded configuration, the file it came from, and anything skipped on the way.
#[derive(Debug, Clone)]
pub struct PipelineConfigHandle {
    pub config: PipelineConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl PipelineConfigHandle {
    fn with_config(config: PipelineConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Search for a config file and load the first one that is valid.
///
/// Never fails: when nothing usable is found the defaults are returned with
/// a warning explaining why.
pub fn load_pipeline_config(custom_path: Option<&Path>) -> PipelineConfigHandle {
    let mut warnings = Vec::new();

    for candidate in config_candidates(custom_path) {
        if !candidate.is_file() {
            if custom_path.is_some_and(|p| p == candidate.as_path()) {
                warnings.push(format!("Config file {} does not exist", candidate.display()));
            }
            continue;
        }

        match read_config_file(&candidate) {
            Ok(config) => {
                let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                debug!(source = %source.display(), "loaded pipeline config");
                return PipelineConfigHandle::with_config(config, Some(source), warnings);
            }
            Err(err) => {
                warn!("{}", err);
                warnings.push(err.to_string());
            }
        }
    }

    warnings.push("No pipeline config found; using built-in defaults.".to_string());
    PipelineConfigHandle::with_config(PipelineConfig::default(), None, warnings)
}

/// Read, parse and validate a single config file.
pub fn read_config_file(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: PipelineConfig =
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

/// The default configuration rendered as YAML.
pub fn default_config_yaml() -> Result<String, ConfigError> {
    config_to_yaml(&PipelineConfig::default())
}

pub fn config_to_yaml(config: &PipelineConfig) -> Result<String, ConfigError> {
    let body = serde_yaml::to_string(config)?;
    Ok(format!(
        "# rollshift pipeline configuration\n# Every key is optional; missing keys use the value shown here.\n{}",
        body
    ))
}

/// Write a config file, creating parent directories as needed.
pub fn save_config(path: &Path, config: &PipelineConfig) -> Result<(), ConfigError> {
    let yaml = config_to_yaml(config)?;
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, yaml).map_err(write_err)
}

/// Config file candidates in search order.
pub fn config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join(HOME_CONFIG_DIR).join(name));
        }
    }

    candidates
}
