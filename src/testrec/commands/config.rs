use crate::commands::{CmdMessage, CmdResult, TestrecPaths};
use crate::config::{TestrecConfig, CONFIG_KEYS};
use crate::error::{Result, TestrecError};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &TestrecPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = TestrecConfig::load(&paths.config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {
            for key in CONFIG_KEYS {
                if let Some(value) = config.get(key) {
                    result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
                }
            }
        }
        ConfigAction::ShowKey(key) => {
            let value = config
                .get(&key)
                .ok_or_else(|| TestrecError::Api(format!("Unknown config key: {}", key)))?;
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(&paths.config_dir)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key,
                config.get(&key).unwrap_or_default()
            )));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> TestrecPaths {
        TestrecPaths {
            config_dir: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = TempDir::new().unwrap();
        run(
            &paths(&dir),
            ConfigAction::Set("max-records".into(), "42".into()),
        )
        .unwrap();

        let result = run(&paths(&dir), ConfigAction::ShowKey("max-records".into())).unwrap();
        assert_eq!(result.messages[0].content, "max-records = 42");
        assert_eq!(result.config.unwrap().max_records, 42);
    }

    #[test]
    fn show_all_lists_every_key() {
        let dir = TempDir::new().unwrap();
        let result = run(&paths(&dir), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.messages.len(), CONFIG_KEYS.len());
    }

    #[test]
    fn unknown_key_fails() {
        let dir = TempDir::new().unwrap();
        assert!(run(&paths(&dir), ConfigAction::ShowKey("nope".into())).is_err());
    }
}
