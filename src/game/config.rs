use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::fluids::FluidId;
use super::items::ItemId;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub viewer: ViewerSettings,
    #[serde(default)]
    pub graphics: GraphicsConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Items never shown in slots, unless every candidate is hidden.
    #[serde(default)]
    pub hidden_items: Vec<ItemId>,
    #[serde(default)]
    pub hidden_fluids: Vec<FluidId>,
    /// Add "accepts any of <tag>" to tooltips of slots that cycle through a whole tag.
    pub show_tag_equivalents: bool,
    pub recipes_per_page: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphicsConfig {
    pub frame_rate_cap: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log the hovered slot of each recipe layout.
    pub log_hover: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            hidden_items: vec![ItemId::SourceMachine],
            hidden_fluids: Vec::new(),
            show_tag_equivalents: true,
            recipes_per_page: 2,
        }
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self { frame_rate_cap: 60 }
    }
}

fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "octofact")
        .map(|dirs| dirs.config_dir().join("viewer.toml"))
}

impl ViewerConfig {
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            log::warn!("Could not determine config directory. Using defaults.");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Read `path`, falling back to defaults (and writing them when the file is missing).
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to parse config: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                let config = Self::default();
                config.save_to(path);
                config
            }
        }
    }

    pub fn save(&self) {
        let Some(path) = config_path() else {
            log::warn!("Could not determine config directory");
            return;
        };
        self.save_to(&path);
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {e}");
                return;
            }
        }

        match toml::to_string_pretty(self) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(path, contents) {
                    log::warn!("Failed to write config: {e}");
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize config: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.graphics.frame_rate_cap, 60);
        assert_eq!(config.viewer.recipes_per_page, 2);
        assert!(config.viewer.show_tag_equivalents);
        assert_eq!(config.viewer.hidden_items, vec![ItemId::SourceMachine]);
        assert!(!config.debug.log_hover);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("viewer.toml");
        let config = ViewerConfig::load_from(&path);
        assert_eq!(config.viewer.recipes_per_page, 2);
        assert!(path.exists());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        let mut config = ViewerConfig::default();
        config.viewer.hidden_items = vec![ItemId::Cube, ItemId::Belt];
        config.viewer.hidden_fluids = vec![FluidId::Flux];
        config.debug.log_hover = true;
        config.save_to(&path);

        let loaded = ViewerConfig::load_from(&path);
        assert_eq!(loaded.viewer.hidden_items, vec![ItemId::Cube, ItemId::Belt]);
        assert_eq!(loaded.viewer.hidden_fluids, vec![FluidId::Flux]);
        assert!(loaded.debug.log_hover);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        std::fs::write(&path, "[debug]\nlog_hover = true\n").expect("write");
        let loaded = ViewerConfig::load_from(&path);
        assert!(loaded.debug.log_hover);
        assert_eq!(loaded.graphics.frame_rate_cap, 60);
        assert!(loaded.viewer.show_tag_equivalents);
    }

    #[test]
    fn test_unparseable_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        std::fs::write(&path, "viewer = 3").expect("write");
        let loaded = ViewerConfig::load_from(&path);
        assert_eq!(loaded.viewer.recipes_per_page, 2);
    }
}
