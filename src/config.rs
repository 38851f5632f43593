use crate::error::ConfigError;
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Bundled config for mobile and web builds
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which prediction endpoint the backend exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiFlavor {
    /// `POST /api/predict`, segmented chat responses.
    Chat,
    /// `POST /predict`, a single `{ disease, cure }` object.
    Simple,
}

impl ApiFlavor {
    pub fn predict_path(self) -> &'static str {
        match self {
            ApiFlavor::Chat => "/api/predict",
            ApiFlavor::Simple => "/predict",
        }
    }
}

impl std::str::FromStr for ApiFlavor {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "chat" | "api" => Ok(ApiFlavor::Chat),
            "simple" | "legacy" => Ok(ApiFlavor::Simple),
            _ => Err(ConfigError::Invalid {
                key: "MEDICA_API_FLAVOR",
                value: raw.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    pub flavor: ApiFlavor,
    pub request_timeout: Duration,
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            flavor: ApiFlavor::Chat,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base) = lookup("MEDICA_API_BASE").filter(|v| !v.trim().is_empty()) {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(flavor) = lookup("MEDICA_API_FLAVOR") {
            config.flavor = flavor.parse()?;
        }
        if let Some(raw) = lookup("MEDICA_REQUEST_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: "MEDICA_REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(dir) = lookup("MEDICA_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

static ACTIVE: OnceCell<ClientConfig> = OnceCell::new();

/// Makes `config` the one the UI reads. Later calls are ignored.
pub fn install(config: ClientConfig) {
    if ACTIVE.set(config).is_err() {
        tracing::warn!("client config already installed");
    }
}

pub fn active() -> ClientConfig {
    ACTIVE.get().cloned().unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
pub fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if env::var(key).is_err() {
            // SAFETY: called from main before the UI runtime spawns any threads
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

fn parse_env_lines(source: &str) -> impl Iterator<Item = (&str, &str)> {
    source.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        line.split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
    })
}
