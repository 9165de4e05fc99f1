//! Config loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::ControllerError;

/// Load configuration from the given path, or the default location.
///
/// A missing file at the default location yields the defaults; a missing
/// file that was asked for explicitly is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ControllerError> {
    if let Some(p) = path.filter(|p| !p.exists()) {
        return Err(ControllerError::Config(format!(
            "config file not found: {}",
            p.display()
        )));
    }
    let config_path = config_path(path);

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| ControllerError::Config(format!("failed to read config: {e}")))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ControllerError::Config(format!("failed to parse config: {e}")))?;
        debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    } else {
        debug!(path = %config_path.display(), "no config file found, using defaults");
        Ok(Config::default())
    }
}

/// Get the default config directory path.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("mousectl")
}

/// The file [`load_config`] reads: `path` if given, else the default location.
pub fn config_path(path: Option<&Path>) -> PathBuf {
    path.map_or_else(|| config_dir().join("config.toml"), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/mousectl.toml"))).unwrap_err();
        assert!(matches!(err, ControllerError::Config(_)));
    }

    #[test]
    fn loads_explicit_file() {
        let path = std::env::temp_dir().join(format!("mousectl-test-{}.toml", std::process::id()));
        std::fs::write(&path, "[click]\nhold_ms = 30\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.click.hold_ms, 30);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let path =
            std::env::temp_dir().join(format!("mousectl-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[drag\nsteps = ").unwrap();
        let result = load_config(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ControllerError::Config(_))));
    }

    #[test]
    fn config_path_prefers_explicit_file() {
        let explicit = Path::new("/etc/mousectl.toml");
        assert_eq!(config_path(Some(explicit)), explicit);
        let default = config_path(None);
        assert!(default.ends_with("mousectl/config.toml"));
        assert!(default.starts_with(config_dir()));
    }

    #[test]
    fn config_dir_ends_with_crate_name() {
        assert!(config_dir().ends_with("mousectl"));
    }
}
