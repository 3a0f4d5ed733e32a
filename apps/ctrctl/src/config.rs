//! # Configuration
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. TOML file: `--config`, else `$CTRCTL_CONFIG`, else
//!    `$HOME/.config/ctrctl/ctrctl.toml` when it exists
//! 3. Environment: `CTRCTL_ADDRESS`, `CTRCTL_NAMESPACE`, `CTRCTL_SNAPSHOTTER`,
//!    `CTRCTL_API_KEY`
//! 4. Command-line flags
//!
//! ```toml
//! address = "http://127.0.0.1:8080"
//! namespace = "k8s.io"
//! snapshotter = "native"
//! debug = false
//! timeout_ms = 5000
//! ```

use ctrctl_core::{
    ClientInfo, CtrError,
    primitives::{DEFAULT_NAMESPACE, DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_SNAPSHOTTER},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::builder::BuildOptions;

/// Daemon address used when none is configured.
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8080";

/// Maximum config file size. Anything larger is not a config file.
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// FILE LAYER
// =============================================================================

/// Keys accepted in the TOML file. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    address: Option<String>,
    namespace: Option<String>,
    snapshotter: Option<String>,
    debug: Option<bool>,
    timeout_ms: Option<u64>,
    api_key: Option<String>,
}

// =============================================================================
// FLAG LAYER
// =============================================================================

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub address: Option<String>,
    pub namespace: Option<String>,
    pub snapshotter: Option<String>,
    pub debug: bool,
    pub timeout_ms: Option<u64>,
}

// =============================================================================
// RESOLVED CONFIG
// =============================================================================

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub address: String,
    pub namespace: String,
    pub snapshotter: String,
    pub debug: bool,
    pub timeout_ms: u64,
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            snapshotter: DEFAULT_SNAPSHOTTER.to_string(),
            debug: false,
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            api_key: None,
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn load(overrides: &Overrides) -> Result<Config, CtrError> {
        Self::load_with(overrides, |key| std::env::var(key).ok())
    }

    /// Load with an explicit environment lookup.
    pub fn load_with(
        overrides: &Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, CtrError> {
        let mut config = Config::default();

        if let Some(path) = config_path(overrides, &env)? {
            tracing::debug!("loading config from {}", path.display());
            config.apply_file(read_file_config(&path)?);
        }

        let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());
        if let Some(address) = non_empty("CTRCTL_ADDRESS") {
            config.address = address;
        }
        if let Some(namespace) = non_empty("CTRCTL_NAMESPACE") {
            config.namespace = namespace;
        }
        if let Some(snapshotter) = non_empty("CTRCTL_SNAPSHOTTER") {
            config.snapshotter = snapshotter;
        }
        if let Some(api_key) = non_empty("CTRCTL_API_KEY") {
            config.api_key = Some(api_key);
        }

        if let Some(ref address) = overrides.address {
            config.address.clone_from(address);
        }
        if let Some(ref namespace) = overrides.namespace {
            config.namespace.clone_from(namespace);
        }
        if let Some(ref snapshotter) = overrides.snapshotter {
            config.snapshotter.clone_from(snapshotter);
        }
        if overrides.debug {
            config.debug = true;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            config.timeout_ms = timeout_ms;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults.
    pub fn from_toml_str(text: &str) -> Result<Config, CtrError> {
        let file: FileConfig =
            toml::from_str(text).map_err(|e| CtrError::ConfigError(e.to_string()))?;
        let mut config = Config::default();
        config.apply_file(file);
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(address) = file.address {
            self.address = address;
        }
        if let Some(namespace) = file.namespace {
            self.namespace = namespace;
        }
        if let Some(snapshotter) = file.snapshotter {
            self.snapshotter = snapshotter;
        }
        if let Some(debug) = file.debug {
            self.debug = debug;
        }
        if let Some(timeout_ms) = file.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if file.api_key.is_some() {
            self.api_key = file.api_key;
        }
    }

    fn validate(&self) -> Result<(), CtrError> {
        if self.timeout_ms == 0 {
            return Err(CtrError::ConfigError(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        if !(self.address.starts_with("http://") || self.address.starts_with("https://")) {
            return Err(CtrError::ConfigError(format!(
                "address must be an http:// or https:// URL, got {:?}",
                self.address
            )));
        }
        if self.namespace.is_empty() {
            return Err(CtrError::ConfigError("namespace must not be empty".to_string()));
        }
        Ok(())
    }

    /// Per-call probe deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The "Client:" section of the report.
    pub fn client_info(&self) -> ClientInfo {
        ClientInfo {
            namespace: self.namespace.clone(),
            debug: self.debug,
        }
    }

    /// Builder settings derived from this config.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            timeout: self.timeout(),
            snapshotter: self.snapshotter.clone(),
        }
    }
}

/// Pick the config file. Explicit paths must exist; the default path is optional.
fn config_path(
    overrides: &Overrides,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<Option<PathBuf>, CtrError> {
    let explicit = overrides
        .config
        .clone()
        .or_else(|| env("CTRCTL_CONFIG").filter(|v| !v.is_empty()).map(PathBuf::from));

    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(CtrError::ConfigError(format!(
                "config file '{}' does not exist",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    Ok(env("HOME")
        .map(|home| Path::new(&home).join(".config/ctrctl/ctrctl.toml"))
        .filter(|path| path.is_file()))
}

fn read_file_config(path: &Path) -> Result<FileConfig, CtrError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CtrError::IoError(format!("Cannot read config metadata: {}", e)))?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(CtrError::ConfigError(format!(
            "config file size {} bytes exceeds maximum {} bytes",
            metadata.len(),
            MAX_CONFIG_FILE_SIZE
        )));
    }

    let text = std::fs::read_to_string(path)
        .map_err(|e| CtrError::IoError(format!("Read config '{}': {}", path.display(), e)))?;
    toml::from_str(&text)
        .map_err(|e| CtrError::ConfigError(format!("{}: {}", path.display(), e)))
}

// =============================================================================
// TESTS
// =============================================================================
