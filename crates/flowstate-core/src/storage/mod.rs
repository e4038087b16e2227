mod config;

pub use config::{Config, HistoryConfig, ScoringConfig, UiConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the FlowState data directory, creating it if needed.
///
/// `FLOWSTATE_DATA_DIR` wins when set. Otherwise this is
/// `~/.config/flowstate[-dev]/`, with `FLOWSTATE_ENV=dev` selecting the
/// development directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FLOWSTATE_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FLOWSTATE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("flowstate-dev")
            } else {
                base_dir.join("flowstate")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
