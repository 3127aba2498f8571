use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Upstream credential. Left empty in config files, it is filled from
    /// the GEMINI_API_KEY environment variable at load time.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

impl Config {
    /// Loads a config file, JSON or YAML by extension, then fills the
    /// credential from the environment if the file left it empty.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content, path)?;
        config.fill_api_key_from_env();
        Ok(config)
    }

    /// Environment-only configuration, used when no config file is present.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.fill_api_key_from_env();
        config
    }

    fn parse(content: &str, path: &str) -> Result<Self> {
        let path_lower = path.to_lowercase();
        let config = if path_lower.ends_with(".json") {
            serde_json::from_str(content)?
        } else {
            serde_yaml::from_str(content)?
        };
        Ok(config)
    }

    fn fill_api_key_from_env(&mut self) {
        if self.gemini.api_key.is_empty() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                self.gemini.api_key = key;
            }
        }
    }

    /// Fail-fast startup check. The error never echoes the key itself.
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.is_empty() {
            bail!("Gemini API key is not configured (set GEMINI_API_KEY or gemini.api_key)");
        }
        if self.gemini.base_url.is_empty() {
            bail!("Gemini base URL must not be empty");
        }
        Ok(())
    }
}
