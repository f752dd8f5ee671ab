use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::classifier::FALLBACK_CATEGORY;

/// Available run modes for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Rewrite catalog categories
    Categorize,
    /// Compare card image references against the image directory
    Audit,
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode::Categorize
    }
}

/// Mode-specific options for the categorization pass
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategorizeOptions {
    /// Seed used for entries that have no `category` field at all
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default)]
    pub use_multi_threading: bool,
    #[serde(default = "default_thread_count")]
    pub thread_count: usize,
}

impl Default for CategorizeOptions {
    fn default() -> Self {
        CategorizeOptions {
            default_category: default_category(),
            use_multi_threading: false,
            thread_count: default_thread_count(),
        }
    }
}

/// Mode-specific options for the image audit
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuditOptions {
    #[serde(default = "default_html_file")]
    pub html_file: String,
    #[serde(default = "default_images_directory")]
    pub images_directory: String,
}

impl Default for AuditOptions {
    fn default() -> Self {
        AuditOptions {
            html_file: default_html_file(),
            images_directory: default_images_directory(),
        }
    }
}

/// Holds all mode-specific configuration options
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ModeOptions {
    #[serde(default)]
    pub categorize: CategorizeOptions,
    #[serde(default)]
    pub audit: AuditOptions,
}

/// Application configuration structure that matches config.json
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    /// Where the updated catalog is written; the input is rewritten in place when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub run_mode: RunMode,

    #[serde(default)]
    pub mode_options: ModeOptions,
}

fn default_catalog_path() -> String {
    "assets/data/games.json".to_string()
}

fn default_category() -> String {
    FALLBACK_CATEGORY.to_string()
}

fn default_thread_count() -> usize {
    std::thread::available_parallelism().map(|p| p.get()).unwrap_or(2)
}

fn default_html_file() -> String {
    "index.html".to_string()
}

fn default_images_directory() -> String {
    "assets/images".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            output_path: None,
            log_level: default_log_level(),
            run_mode: RunMode::Categorize,
            mode_options: ModeOptions::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn get_catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.catalog_path)
    }

    /// Output catalog path, falling back to the input catalog
    pub fn get_output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => self.get_catalog_path(),
        }
    }

    pub fn get_html_file(&self) -> PathBuf {
        PathBuf::from(&self.mode_options.audit.html_file)
    }

    pub fn get_images_dir(&self) -> PathBuf {
        PathBuf::from(&self.mode_options.audit.images_directory)
    }

    /// Update a single setting by its `config set` key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        match key {
            "catalog_path" => {
                self.catalog_path = value.to_string();
            }
            "output_path" => {
                self.output_path = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "log_level" => {
                self.log_level = value.to_string();
            }
            "default_category" => {
                self.mode_options.categorize.default_category = value.to_string();
            }
            "use_multi_threading" => {
                self.mode_options.categorize.use_multi_threading = value.parse::<bool>()?;
            }
            "thread_count" => {
                let count = value.parse::<usize>()?;
                if count == 0 {
                    return Err("Thread count must be at least 1".into());
                }
                self.mode_options.categorize.thread_count = count;
            }
            "html_file" => {
                self.mode_options.audit.html_file = value.to_string();
            }
            "images_directory" => {
                self.mode_options.audit.images_directory = value.to_string();
            }
            _ => {
                return Err(format!("Unknown configuration key: {}", key).into());
            }
        }
        Ok(())
    }
}

/// Load the configuration, creating a default one if it doesn't exist
pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config_path = "config.json";

    if !Path::new(config_path).exists() {
        let default_config = Config::default();
        default_config.save_to_file(config_path)?;
        log::info!("Created default configuration file: {}", config_path);
    }

    let mut config = Config::from_file(config_path)?;

    if config.log_level.is_empty() {
        config.log_level = default_log_level();
    }

    Ok(config)
}
