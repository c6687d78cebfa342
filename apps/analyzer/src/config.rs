use anyhow::{bail, Result};

use crate::analysis::Fidelity;

/// Process configuration loaded from environment variables (and `.env` if present).
///
/// The two API keys are read so deployments can provision them, but no analysis
/// stage uses them and they are never sent anywhere.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub huggingface_api_key: Option<String>,
    pub fidelity: Fidelity,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let fidelity = match optional_env("ANALYZER_FIDELITY") {
            Some(raw) => parse_fidelity(&raw)?,
            None => Fidelity::Full,
        };

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            huggingface_api_key: optional_env("HUGGINGFACE_API_KEY"),
            fidelity,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_fidelity(raw: &str) -> Result<Fidelity> {
    match raw.to_ascii_lowercase().as_str() {
        "full" | "advanced" => Ok(Fidelity::Full),
        "fast" | "realtime" => Ok(Fidelity::Fast),
        other => bail!("ANALYZER_FIDELITY must be 'full' or 'fast', got '{other}'"),
    }
}
