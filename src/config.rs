use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub api_base: String,
    pub user_email: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("mail_chat"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

pub fn parse_config(s: &str) -> Result<Config> {
    let mut cfg: Config = toml::from_str(s)?;
    if let Ok(base) = std::env::var("MAIL_CHAT_API_BASE") {
        cfg.api_base = base;
    }
    if cfg.api_base.trim().is_empty() {
        return Err(anyhow::anyhow!("api_base must not be empty"));
    }
    Ok(cfg)
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        // create a template config for users to edit
        let sample = Config {
            api_base: "http://127.0.0.1:8000".to_string(),
            user_email: Some("you@example.com".to_string()),
            request_timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        };
        let tom = toml::to_string_pretty(&sample)?;
        fs::write(&path, tom)?;
        return Err(anyhow::anyhow!(
            "Created template config at {} — edit it and run again",
            path.display()
        ));
    }
    let s = fs::read_to_string(path)?;
    parse_config(&s)
}
