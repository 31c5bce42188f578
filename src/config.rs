use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Prefix of the environment variables read by [`Config::load`]
pub const ENV_PREFIX: &str = "HELLOK8S";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_kubeconfig")]
    pub kubeconfig: Option<PathBuf>,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_label_selector")]
    pub label_selector: String,
}

fn default_kubeconfig() -> Option<PathBuf> {
    None
}

fn default_namespace() -> String {
    crate::manifest::DEFAULT_NAMESPACE.to_string()
}

fn default_label_selector() -> String {
    // The created pod is labelled ok=1, so this matches nothing by default
    "ok=2".to_string()
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from explicit variables instead of the process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn from_environment(env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder().add_source(env).build()?;
        Ok(settings.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kubeconfig: default_kubeconfig(),
            namespace: default_namespace(),
            label_selector: default_label_selector(),
        }
    }
}

/// Location of the per-user kubeconfig, `<home>/.kube/config`.
///
/// The home lookup is injected so callers can simulate a missing home
/// directory; an empty path is returned in that case.
pub fn default_kubeconfig_path<F>(home_lookup: F) -> PathBuf
where
    F: FnOnce() -> Option<PathBuf>,
{
    match home_lookup() {
        Some(home) if !home.as_os_str().is_empty() => home.join(".kube").join("config"),
        _ => PathBuf::new(),
    }
}

/// Pick the kubeconfig to use: command line flag, then `HELLOK8S_KUBECONFIG`,
/// then the per-user default.
pub fn resolve_kubeconfig<F>(flag: Option<&Path>, config: &Config, home_lookup: F) -> PathBuf
where
    F: FnOnce() -> Option<PathBuf>,
{
    flag.or(config.kubeconfig.as_deref())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_kubeconfig_path(home_lookup))
}
