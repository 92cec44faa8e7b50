use crate::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// `tracing` filter directive, e.g. `"kanban_sync=debug,info"`.
    #[serde(default)]
    pub log_filter: Option<String>,

    #[serde(default)]
    pub sync: SyncConfig,
}

/// Settings for the remote event merge layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    #[serde(default)]
    pub skip: bool,

    /// Board scope for subscriptions; absent means all boards.
    #[serde(default)]
    pub board_id: Option<Uuid>,
}

fn default_event_buffer() -> usize {
    64
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            event_buffer: default_event_buffer(),
            skip: false,
            board_id: None,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/kanban/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("kanban/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("kanban\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load from the platform config path, falling back to defaults.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring config at {}: {}", config_path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> KanbanResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| KanbanError::Config(e.to_string()))
    }

    pub fn effective_log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or("info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.sync.event_buffer, 64);
        assert!(!config.sync.skip);
        assert!(config.sync.board_id.is_none());
        assert_eq!(config.effective_log_filter(), "info");
    }

    #[test]
    fn test_load_from_file() {
        let board_id = Uuid::new_v4();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "log_filter = \"debug\"\n\n[sync]\nevent_buffer = 8\nboard_id = \"{}\"\n",
            board_id
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.effective_log_filter(), "debug");
        assert_eq!(config.sync.event_buffer, 8);
        assert_eq!(config.sync.board_id, Some(board_id));
        assert!(!config.sync.skip);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[sync]\nskip = true\n").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(config.sync.skip);
        assert_eq!(config.sync.event_buffer, 64);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[sync\nskip = ").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, KanbanError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, KanbanError::Io(_)));
    }
}
