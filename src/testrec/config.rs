use crate::error::{Result, TestrecError};
use crate::store::DEFAULT_MAX_RECORDS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE: &str = "tests.csv";

/// Configuration for testrec, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestrecConfig {
    /// Data file used when `--file` is not given
    #[serde(default = "default_file")]
    pub default_file: PathBuf,

    /// Soft ceiling on the number of records, checked when creating
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_FILE)
}

fn default_max_records() -> usize {
    DEFAULT_MAX_RECORDS
}

impl Default for TestrecConfig {
    fn default() -> Self {
        Self {
            default_file: default_file(),
            max_records: default_max_records(),
        }
    }
}

/// Keys accepted by `config <key> [value]`.
pub const CONFIG_KEYS: &[&str] = &["default-file", "max-records"];

impl TestrecConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TestrecError::Io)?;
        let config: TestrecConfig =
            serde_json::from_str(&content).map_err(TestrecError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TestrecError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TestrecError::Serialization)?;
        fs::write(config_path, content).map_err(TestrecError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-file" => Some(self.default_file.display().to_string()),
            "max-records" => Some(self.max_records.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(TestrecError::validation(key, "must not be empty"));
                }
                self.default_file = PathBuf::from(value);
            }
            "max-records" => {
                self.max_records = value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        TestrecError::validation(key, format!("{:?} is not a positive number", value))
                    })?;
            }
            other => return Err(TestrecError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}
