//! The three shell configuration stores (panel, runner, notification).
//!
//! Each store is an independent TOML file that can be re-read at runtime.
//! A missing or unparsable file, or a missing key, is never an error: the
//! documented default is substituted and a warning logged.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::placement::Placement;

/// Session command used when the configured one is empty.
pub const DEFAULT_SESSION_COMMAND: &str = "vasak-session";

/// Options the host passes to the shell at startup, mirroring the plugin's
/// option block. Empty path strings select the default store locations.
#[derive(Debug, Clone, Default)]
pub struct ShellOptions {
    pub start_session: bool,
    pub session_command: String,
    pub panel_config: String,
    pub runner_config: String,
    pub notify_config: String,
}

/// Panel store. Carries no keys yet; the store exists so panel placement
/// can be re-applied on reload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PanelConfig {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub dialog: RunnerDialog,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerDialog {
    /// Pin the runner just below the top workarea edge instead of
    /// centering it vertically.
    #[serde(default)]
    pub show_on_top: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyConfig {
    /// Raw placement string; parsed lazily so an unrecognized value falls
    /// back to the default instead of failing the whole store.
    #[serde(default)]
    placement: Option<String>,
}

impl NotifyConfig {
    pub fn placement(&self) -> Placement {
        self.placement
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// One on-disk store plus its parsed snapshot.
#[derive(Debug)]
pub struct ConfigStore<T> {
    path: PathBuf,
    value: T,
}

impl<T: DeserializeOwned + Default> ConfigStore<T> {
    /// Bind the store to `path` and read the initial snapshot.
    pub fn open(path: PathBuf) -> Self {
        let mut store = Self { path, value: T::default() };
        store.reload();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Re-read the snapshot from disk. Absent or broken files leave the
    /// defaults in place.
    pub fn reload(&mut self) {
        self.value = match read_store(&self.path) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %self.path.display(), "using defaults for config store: {err:#}");
                T::default()
            }
        };
    }

    /// Re-bind to a new path and re-read. Used by reload callbacks when the
    /// configured path itself changed.
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = path;
        self.reload();
    }
}

fn read_store<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Default store location under the per-user config directory.
pub fn default_store_path(file: &str) -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vasak")
        .join(file)
}

/// Path for one store: the configured string if non-empty (after
/// [`resolve_path`]), otherwise the default location.
pub fn store_path(configured: &str, default_file: &str) -> PathBuf {
    if configured.is_empty() {
        default_store_path(default_file)
    } else {
        let resolved = resolve_path(configured);
        debug!(configured = configured, resolved = %resolved, "resolved config store path");
        PathBuf::from(resolved)
    }
}

/// Expand shell-style shortcuts in a configured path: a leading `$VAR`
/// segment becomes the environment variable's value (empty if unset), a
/// leading `~` becomes the home directory, and a relative path is anchored
/// at the current working directory. All other segments pass through.
pub fn resolve_path(path: &str) -> String {
    resolve_path_with(
        path,
        |var| std::env::var(var).ok(),
        dirs::home_dir(),
        std::env::current_dir().ok(),
    )
}

fn resolve_path_with(
    path: &str,
    env: impl Fn(&str) -> Option<String>,
    home: Option<PathBuf>,
    cwd: Option<PathBuf>,
) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut parts: Vec<String> = path.split('/').map(str::to_string).collect();

    if let Some(var) = parts[0].strip_prefix('$') {
        parts[0] = env(var).unwrap_or_default();
    } else if parts[0] == "~" {
        parts[0] = home.map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
    } else if !parts[0].is_empty() {
        // Relative path: anchor it at the working directory
        let cwd = cwd.map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
        parts.insert(0, cwd);
    }

    parts.join("/")
}
