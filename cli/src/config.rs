use crate::file_paths;
use serde::Deserialize;
use std::{fmt, fs, io};

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub prompt: String,
    pub live_output: bool,
    pub max_history_size: usize,
    pub cautious_first_bound: u64,
    pub cautious_growth_factor: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            live_output: true,
            max_history_size: 1000,
            cautious_first_bound: 1000,
            cautious_growth_factor: 10,
        }
    }
}

impl Config {
    /// Builds the evaluation context these settings describe.
    pub fn core_context(&self) -> irrat_core::Context {
        let mut context = irrat_core::Context::new();
        context.set_cautious_first_bound(self.cautious_first_bound);
        context.set_cautious_growth_factor(self.cautious_growth_factor);
        context
    }

    fn check(&self) -> Result<(), String> {
        if self.cautious_first_bound < 2 {
            return Err("`cautious-first-bound` must be at least 2".to_string());
        }
        if self.cautious_growth_factor < 2 {
            return Err("`cautious-growth-factor` must be at least 2".to_string());
        }
        Ok(())
    }
}

pub static DEFAULT_CONFIG_FILE: &str = include_str!("default_config.toml");

enum ConfigError {
    Io(io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Toml(e) => write!(f, "{e}"),
            Self::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err)
    }
}

fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(contents)?;
    config.check().map_err(ConfigError::Invalid)?;
    Ok(config)
}

fn read_config_file() -> Config {
    let Some(path) = file_paths::get_config_file_location() else {
        return Config::default();
    };
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Config::default(),
        Err(e) => {
            eprintln!("Failed to read config file {}: {}", path.display(), ConfigError::from(e));
            return Config::default();
        }
    };
    match parse_config(&contents) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            config
        }
        Err(e) => {
            eprintln!("Invalid config file in {}: {e}", path.display());
            eprintln!("Using default settings instead");
            Config::default()
        }
    }
}

pub fn read() -> Config {
    read_config_file()
}
