//! XDG-style path utilities for the configuration directory.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns the configuration directory for sentiment.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/sentiment` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/sentiment` otherwise
pub fn config_dir() -> Result<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join("sentiment"));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join("sentiment"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_xdg_config_home<F: FnOnce()>(value: Option<&str>, f: F) {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        // SAFETY: env-mutating tests are serialized with #[serial]
        unsafe {
            match value {
                Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }

        f();

        // SAFETY: see above
        unsafe {
            match original {
                Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_default() {
        with_xdg_config_home(None, || {
            let dir = config_dir().unwrap();
            assert!(dir.ends_with(".config/sentiment"));
        });
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        with_xdg_config_home(Some("/custom/config"), || {
            assert_eq!(
                config_dir().unwrap(),
                PathBuf::from("/custom/config/sentiment")
            );
        });
    }

    #[test]
    #[serial]
    fn test_config_dir_ignores_empty_xdg() {
        with_xdg_config_home(Some(""), || {
            assert!(config_dir().unwrap().ends_with(".config/sentiment"));
        });
    }
}
