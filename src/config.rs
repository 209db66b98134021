use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use std::{
    env,
    fmt::Write,
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub notes_file: PathBuf,
    pub timestamp_format: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_file: PathBuf::from("notes.txt"),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.notes_file.as_os_str().is_empty() {
            return Err("notes_file must not be empty".into());
        }

        if self.timestamp_format.is_empty()
            || StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error))
        {
            return Err(format!("invalid timestamp_format '{}'", self.timestamp_format).into());
        }

        // The timestamp must stay on the first line of a record
        let mut sample = String::new();
        if write!(sample, "{}", chrono::Local::now().format(&self.timestamp_format)).is_err()
            || sample.contains(['\n', '\r'])
        {
            return Err(format!(
                "timestamp_format '{}' must render to a single line",
                self.timestamp_format.escape_debug()
            )
            .into());
        }

        Ok(())
    }
}

fn read_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    // An empty file deserializes to unit, not to a defaulted struct
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(Into::into)
}

fn locate_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = env::var("NOTES_CONFIG").ok();

    // Try env path
    if let Some(path) = &config_path {
        if Path::new(path).exists() {
            return read_config(Path::new(path));
        }
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        if let Some(path) = &config_path {
            tracing::warn!("Config file '{}' not found, falling back to 'config.yaml'", path);
        }
        return read_config(Path::new("config.yaml"));
    }

    if let Some(path) = &config_path {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, using built-in defaults",
            path
        );
    }

    Ok(Config::default())
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = locate_config()?;

    if let Ok(notes_file) = env::var("NOTES_FILE") {
        config.notes_file = PathBuf::from(notes_file);
    }

    config.validate()?;
    Ok(config)
}
