use crate::conversation::MAX_CONV_LEN;
use crate::prompts::DEFAULT_SYSTEM_PROMPT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Serialized settings from ~/.clipask/config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    /// Ask the API to retain completions server-side.
    pub store: bool,
    pub timeout_secs: u64,
    pub max_history: usize,
    pub system_prompt: String,
    /// Keep the rolling window across invocations.
    pub persist_history: bool,
    pub scratch_file: PathBuf,
    pub editor: String,
    pub terminal: String,
    pub clipboard_tool: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "chatgpt-4o-latest".to_string(),
            base_url: clipask_provider::OPENAI_BASE_URL.to_string(),
            api_key: None,
            store: true,
            timeout_secs: 10,
            max_history: MAX_CONV_LEN,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            persist_history: false,
            scratch_file: PathBuf::from("/tmp/clipask.md"),
            editor: "nvim".to_string(),
            terminal: "gnome-terminal".to_string(),
            clipboard_tool: "xclip".to_string(),
        }
    }
}

impl Config {
    /// API key from the config file, else from the environment.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
    }
}

/// Helper struct for storing the location to read/write global settings
pub struct ConfigStore {
    dir: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        let mut dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push(".clipask");
        Self { dir }
    }

    /// Use a custom directory (for testing).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config.json")
    }

    /// Where the rolling window is kept when `persist_history` is on.
    pub fn history_path(&self) -> PathBuf {
        self.dir.join("history.json")
    }

    /// Load the user's saved config, or fallback to Default
    pub fn load(&self) -> Config {
        let path = self.config_path();
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    /// Save the user's config back to disk
    pub fn save(&self, config: &Config) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(self.config_path(), content)
    }
}
