use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, LevelFilter};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "cinter.toml";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub console_level: String,
    pub file_level: String,
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            console_level: "warn".to_string(),
            file_level: "debug".to_string(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    pub fn console_level(&self) -> Result<LevelFilter, ConfigError> {
        cinter_logger::parse_level(&self.console_level)
            .ok_or_else(|| ConfigError(format!("Unknown console_level '{}'", self.console_level)))
    }

    pub fn file_level(&self) -> Result<LevelFilter, ConfigError> {
        cinter_logger::parse_level(&self.file_level)
            .ok_or_else(|| ConfigError(format!("Unknown file_level '{}'", self.file_level)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub prelude: bool,
    pub echo_result: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            prelude: true,
            echo_result: true,
        }
    }
}

#[derive(Debug)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    toml::de::from_str(content).map_err(|e| ConfigError(e.to_string()))
}

/// Loads `path` if given (it must exist), else `cinter.toml` when present, else defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(Config::default());
            }
            default
        }
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| ConfigError(format!("Failed to read config file '{}': {}", path.display(), e)))?;
    let config = parse_config(&content)?;
    debug!("Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.logging.console_level().unwrap(), LevelFilter::Warn);
        assert_eq!(config.logging.file_level().unwrap(), LevelFilter::Debug);
        assert!(config.logging.directory.is_none());
        assert!(config.runtime.prelude);
        assert!(config.runtime.echo_result);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
            [logging]
            console_level = "trace"
            directory = "logs"

            [runtime]
            echo_result = false
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.console_level().unwrap(), LevelFilter::Trace);
        assert_eq!(config.logging.directory, Some(PathBuf::from("logs")));
        assert!(config.runtime.prelude);
        assert!(!config.runtime.echo_result);
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(parse_config("[runtime]\nprelude = \"yes\"").is_err());
        let config = parse_config("[logging]\nconsole_level = \"loud\"").unwrap();
        assert!(config.logging.console_level().is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(load_config(Some(Path::new("/definitely/not/here/cinter.toml"))).is_err());
    }
}
