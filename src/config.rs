use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::inspector::{Endian, Inspector, InspectorKind};
use crate::strings::{DEFAULT_MIN_LENGTH, ScanOptions, StringEncoding};

const APP_NAME: &str = "hexwrench";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true")]
    pub insert_mode: bool,
    #[serde(default = "default_min_length")]
    pub strings_min_length: usize,
    #[serde(default)]
    pub strings_encoding: StringEncoding,
    #[serde(default)]
    pub inspector_endian: Endian,
    #[serde(default = "Inspector::default_kinds")]
    pub inspectors_enabled: Vec<InspectorKind>,
    #[serde(default = "default_false")]
    pub heat_map: bool,
    #[serde(default)]
    pub last_file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_theme() -> String {
    "Solarized Dark".to_string()
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            insert_mode: true,
            strings_min_length: DEFAULT_MIN_LENGTH,
            strings_encoding: StringEncoding::Both,
            inspector_endian: Endian::Big,
            inspectors_enabled: Inspector::default_kinds(),
            heat_map: false,
            last_file: None,
        }
    }
}

impl SystemConfig {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.cache_dir().join("hexwrench.log"))
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path()
            && config_path.exists()
            && let Ok(data) = std::fs::read_to_string(&config_path)
        {
            match serde_json::from_str(&data) {
                Ok(config) => return config,
                Err(e) => log::warn!("Ignoring malformed config {}: {}", config_path.display(), e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(config_path) = Self::config_path() {
            if let Some(config_dir) = config_path.parent() {
                std::fs::create_dir_all(config_dir)?;
            }
            let data = serde_json::to_string_pretty(self)?;
            std::fs::write(&config_path, data)?;
            log::debug!("Saved config to {}", config_path.display());
        }
        Ok(())
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            min_length: self.strings_min_length.max(1),
            encoding: self.strings_encoding,
        }
    }

    pub fn inspector(&self) -> Inspector {
        Inspector::new(self.inspector_endian, &self.inspectors_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: SystemConfig = serde_json::from_str(r#"{"theme": "Solarized Light"}"#).unwrap();
        assert_eq!(config.theme, "Solarized Light");
        assert!(config.insert_mode);
        assert_eq!(config.strings_min_length, 5);
        assert_eq!(config.strings_encoding, StringEncoding::Both);
        assert_eq!(config.inspector_endian, Endian::Big);
        assert!(!config.inspectors_enabled.contains(&InspectorKind::U128));
        assert!(!config.heat_map);
    }

    #[test]
    fn test_round_trip() {
        let config = SystemConfig {
            insert_mode: false,
            strings_min_length: 8,
            strings_encoding: StringEncoding::Unicode,
            inspector_endian: Endian::Little,
            heat_map: true,
            last_file: Some(PathBuf::from("/tmp/x.bin")),
            ..SystemConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.scan_options().min_length, 8);
    }
}
