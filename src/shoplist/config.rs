use crate::error::{Result, ShoplistError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for shoplist, stored in `<home>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct ShoplistConfig {
    /// Directory holding the list files. Relative paths resolve against the home dir.
    pub lists_dir: PathBuf,

    /// Delimiter between an item's name and its state code.
    pub separator: char,

    /// Extension of list files (e.g. ".txt").
    pub list_ext: String,

    /// Name of the shared event log, inside `lists_dir`.
    pub events_file: String,

    /// Lists whose name starts with this prefix are shown in multi-line mode.
    pub multi_line_prefix: String,

    /// Allows storing file attachments on items.
    pub file_upload: bool,

    pub max_file_size_mb: f64,
}

impl Default for ShoplistConfig {
    fn default() -> Self {
        Self {
            lists_dir: PathBuf::from("lists"),
            separator: '|',
            list_ext: ".txt".to_string(),
            events_file: "events.csv".to_string(),
            multi_line_prefix: "multiline_".to_string(),
            file_upload: false,
            max_file_size_mb: 10.0,
        }
    }
}

impl ShoplistConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ShoplistConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Absolute lists directory for a given home.
    pub fn lists_dir_in(&self, home: &Path) -> PathBuf {
        if self.lists_dir.is_absolute() {
            self.lists_dir.clone()
        } else {
            home.join(&self.lists_dir)
        }
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        (self.max_file_size_mb * 1024.0 * 1024.0) as u64
    }

    pub fn validate(&self) -> Result<()> {
        if matches!(self.separator, '\r' | '\n') {
            return Err(ShoplistError::Config(
                "separator cannot be a line break".to_string(),
            ));
        }
        if !self.list_ext.starts_with('.') || self.list_ext.len() < 2 {
            return Err(ShoplistError::Config(format!(
                "list-ext must look like \".txt\", got {:?}",
                self.list_ext
            )));
        }
        if self.events_file.ends_with(&self.list_ext) {
            return Err(ShoplistError::Config(format!(
                "events-file {:?} would be listed as a list",
                self.events_file
            )));
        }
        if self.max_file_size_mb.is_nan() || self.max_file_size_mb <= 0.0 {
            return Err(ShoplistError::Config(
                "max-file-size-mb must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[
            "lists-dir",
            "separator",
            "list-ext",
            "events-file",
            "multi-line-prefix",
            "file-upload",
            "max-file-size-mb",
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "lists-dir" => Some(self.lists_dir.display().to_string()),
            "separator" => Some(self.separator.to_string()),
            "list-ext" => Some(self.list_ext.clone()),
            "events-file" => Some(self.events_file.clone()),
            "multi-line-prefix" => Some(self.multi_line_prefix.clone()),
            "file-upload" => Some(self.file_upload.to_string()),
            "max-file-size-mb" => Some(self.max_file_size_mb.to_string()),
            _ => None,
        }
    }

    /// Sets a key from its string form. The config is left untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let mut next = self.clone();
        match key {
            "lists-dir" => next.lists_dir = PathBuf::from(value),
            "separator" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => next.separator = c,
                    _ => return Err("separator must be a single character".to_string()),
                }
            }
            "list-ext" => {
                next.list_ext = if value.starts_with('.') {
                    value.to_string()
                } else {
                    format!(".{}", value)
                }
            }
            "events-file" => next.events_file = value.to_string(),
            "multi-line-prefix" => next.multi_line_prefix = value.to_string(),
            "file-upload" => {
                next.file_upload = value
                    .parse()
                    .map_err(|_| format!("file-upload must be true or false, got {}", value))?
            }
            "max-file-size-mb" => {
                next.max_file_size_mb = value
                    .parse()
                    .map_err(|_| format!("max-file-size-mb must be a number, got {}", value))?
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        next.validate().map_err(|e| e.to_string())?;
        *self = next;
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        Self::keys()
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ShoplistConfig::default();
        assert_eq!(config.separator, '|');
        assert_eq!(config.list_ext, ".txt");
        assert!(!config.file_upload);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = ShoplistConfig::load(dir.path()).unwrap();
        assert_eq!(config, ShoplistConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();

        let mut config = ShoplistConfig::default();
        config.set("separator", ";").unwrap();
        config.set("file-upload", "true").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = ShoplistConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.separator, ';');
        assert!(loaded.file_upload);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"separator": ";"}"#).unwrap();

        let loaded = ShoplistConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.separator, ';');
        assert_eq!(loaded.events_file, "events.csv");
    }

    #[test]
    fn test_set_list_ext_without_dot() {
        let mut config = ShoplistConfig::default();
        config.set("list-ext", "lst").unwrap();
        assert_eq!(config.list_ext, ".lst");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = ShoplistConfig::default();
        assert!(config.set("separator", "ab").is_err());
        assert!(config.set("separator", "\n").is_err());
        assert!(config.set("file-upload", "maybe").is_err());
        assert!(config.set("max-file-size-mb", "0").is_err());
        assert!(config.set("events-file", "events.txt").is_err());
        assert!(config.set("nope", "1").is_err());
        assert_eq!(config, ShoplistConfig::default());
    }

    #[test]
    fn test_get_and_list_all() {
        let config = ShoplistConfig::default();
        assert_eq!(config.get("multi-line-prefix").as_deref(), Some("multiline_"));
        assert_eq!(config.get("unknown"), None);
        assert_eq!(config.list_all().len(), ShoplistConfig::keys().len());
    }

    #[test]
    fn test_lists_dir_resolution() {
        let mut config = ShoplistConfig::default();
        let home = Path::new("/srv/shoplist");
        assert_eq!(config.lists_dir_in(home), home.join("lists"));

        config.lists_dir = PathBuf::from("/data/lists");
        assert_eq!(config.lists_dir_in(home), PathBuf::from("/data/lists"));
    }

    #[test]
    fn test_max_file_size_bytes() {
        let mut config = ShoplistConfig::default();
        config.max_file_size_mb = 0.5;
        assert_eq!(config.max_file_size_bytes(), 512 * 1024);
    }
}
