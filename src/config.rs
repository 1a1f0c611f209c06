//! Site configuration loaded from `~/.config/portfolio-theme/config.yml`.

use color_eyre::eyre::{eyre, Result, WrapErr};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::layout::{FontSource, Metadata};
use crate::theme::Theme;

const FILE_NAME: &str = "config.yml";
const STORAGE_FILE: &str = "storage.json";
const CONFIG_DIR: &str = ".config";
const APP_CONFIG_DIR: &str = "portfolio-theme";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Theme used until the stored or OS preference is known.
    pub default_theme: Theme,
    /// Consult the OS colour scheme when nothing is stored.
    pub follow_system: bool,
    /// Overrides the durable storage location.
    pub storage_file: Option<PathBuf>,
    pub lang: String,
    pub metadata: Metadata,
    pub fonts: Vec<FontSource>,
    pub analytics_id: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::default(),
            follow_system: true,
            storage_file: None,
            lang: "en".to_string(),
            metadata: Metadata::default(),
            fonts: Vec::new(),
            analytics_id: None,
        }
    }
}

pub struct ConfigPaths {
    pub config_file_path: PathBuf,
    pub storage_path: PathBuf,
}

impl ConfigPaths {
    /// Paths under `~/.config/portfolio-theme`, creating the directory if needed.
    pub fn get_or_build() -> Result<ConfigPaths> {
        match dirs::home_dir() {
            Some(home) => {
                let app_config_dir = Path::new(&home).join(CONFIG_DIR).join(APP_CONFIG_DIR);

                if !app_config_dir.exists() {
                    fs::create_dir_all(&app_config_dir)?;
                    debug!("Created config directory: {}", app_config_dir.display());
                }

                Ok(ConfigPaths {
                    config_file_path: app_config_dir.join(FILE_NAME),
                    storage_path: app_config_dir.join(STORAGE_FILE),
                })
            }
            None => Err(eyre!("No $HOME directory found for site config")),
        }
    }
}

impl SiteConfig {
    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<SiteConfig> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(SiteConfig::default());
        }
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<SiteConfig> {
        if content.trim().is_empty() {
            return Ok(SiteConfig::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        info!("Config saved to {}", path.display());
        Ok(())
    }
}
