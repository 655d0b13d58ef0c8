use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "risk_console.toml";

#[derive(Parser, Debug, Default)]
#[command(name = "risk_console", about = "Desktop console for the message risk classifier")]
pub struct Args {
    /// Base url of the backend, e.g. http://127.0.0.1:8000/backend
    #[arg(long)]
    pub backend_url: Option<String>,
    /// TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub backend_url: String,
    pub label_options: Vec<String>,
    pub visualizations: Vec<String>,
    pub log_sources: Vec<String>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000/backend".to_string(),
            label_options: vec!["suicide".to_string(), "non-suicide".to_string()],
            visualizations: ["CDD", "WC", "WF", "PIPE"].map(String::from).to_vec(),
            log_sources: vec!["frontend".to_string(), "backend".to_string()],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    backend_url: Option<String>,
    label_options: Option<Vec<String>>,
    visualizations: Option<Vec<String>>,
    log_sources: Option<Vec<String>>,
}

/// Defaults, then the settings file, then environment, then CLI flags.
pub fn load_startup_config(args: &Args) -> anyhow::Result<StartupConfig> {
    let mut config = StartupConfig::default();

    if let Some(path) = resolve_config_path(args.config.as_deref()) {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file_config(&mut config, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "loaded settings file");
    }

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    if let Some(url) = &args.backend_url {
        config.backend_url = url.clone();
    }

    config.backend_url = normalize_backend_url(&config.backend_url);
    Ok(config)
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("risk_console").join("config.toml"))
        .filter(|path| path.is_file())
}

fn apply_file_config(config: &mut StartupConfig, raw: &str) -> anyhow::Result<()> {
    let file: FileConfig = toml::from_str(raw)?;
    if let Some(v) = file.backend_url {
        config.backend_url = v;
    }
    if let Some(v) = non_empty(file.label_options) {
        config.label_options = v;
    }
    if let Some(v) = non_empty(file.visualizations) {
        config.visualizations = v;
    }
    if let Some(v) = non_empty(file.log_sources) {
        config.log_sources = v;
    }
    Ok(())
}

fn apply_env_overrides(config: &mut StartupConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("RISK_CONSOLE_BACKEND_URL") {
        config.backend_url = v;
    }
    if let Some(v) = lookup("APP__BACKEND_URL") {
        config.backend_url = v;
    }
}

fn non_empty(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values
        .map(|values| {
            values
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|values| !values.is_empty())
}

fn normalize_backend_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return StartupConfig::default().backend_url;
    }
    trimmed.to_string()
}
