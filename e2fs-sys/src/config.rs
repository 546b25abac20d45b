// SPDX-License-Identifier: GPL-3.0-only

//! Toolchain location settings
//!
//! Sources, highest precedence first:
//! - `E2FS_TOOL_DIR` environment variable
//! - TOML file named by `E2FS_CONFIG` (or passed explicitly)
//! - built-in default (`/sbin`)

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{E2fsError, Result};

pub const TOOL_DIR_ENV: &str = "E2FS_TOOL_DIR";
pub const CONFIG_PATH_ENV: &str = "E2FS_CONFIG";
pub const DEFAULT_TOOL_DIR: &str = "/sbin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Directory holding `tune2fs`, `e2label`, `e2fsck`, `resize2fs`, `mke2fs`
    /// and their `*4*` counterparts.
    pub tool_dir: PathBuf,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            tool_dir: PathBuf::from(DEFAULT_TOOL_DIR),
        }
    }
}

impl ToolchainConfig {
    pub fn with_tool_dir(tool_dir: impl Into<PathBuf>) -> Self {
        Self {
            tool_dir: tool_dir.into(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            E2fsError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the configuration from the environment.
    ///
    /// `explicit` overrides `E2FS_CONFIG`. A named file that cannot be read is
    /// an error; no file at all means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with_env(explicit, |name| std::env::var_os(name))
    }

    /// [`load`](Self::load) with environment lookups going through `env`.
    /// Empty variables count as unset.
    fn load_with_env(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<OsString>,
    ) -> Result<Self> {
        let env = |name: &str| env(name).filter(|v| !v.is_empty());

        let file = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match file {
            Some(path) => {
                debug!("Loading toolchain config from {:?}", path);
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        if let Some(dir) = env(TOOL_DIR_ENV) {
            debug!("{} overrides tool_dir with {:?}", TOOL_DIR_ENV, dir);
            config.tool_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}
