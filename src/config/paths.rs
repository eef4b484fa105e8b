//! Path management for SessionBook
//!
//! Provides XDG-compliant path resolution for configuration, data, and the
//! audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `SESSIONBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/sessionbook` or `~/.config/sessionbook`
//! 3. Windows: `%APPDATA%\sessionbook`

use std::path::PathBuf;

use crate::error::SessionBookError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "SESSIONBOOK_DATA_DIR";

/// Manages all paths used by SessionBook
#[derive(Debug, Clone)]
pub struct SessionBookPaths {
    /// Base directory for all SessionBook data
    base_dir: PathBuf,
}

impl SessionBookPaths {
    /// Create a new SessionBookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SessionBookError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SessionBookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/sessionbook/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/sessionbook/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path of a named collection file inside the data directory
    pub fn collection_file(&self, file_name: &str) -> PathBuf {
        self.data_dir().join(file_name)
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SessionBookError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            SessionBookError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            SessionBookError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if SessionBook has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SessionBookError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                SessionBookError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("sessionbook"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SessionBookError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SessionBookError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("sessionbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SessionBookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);

        let paths = SessionBookPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SessionBookPaths::with_base_dir(temp_dir.path().join("fresh"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SessionBookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(
            paths.collection_file("appointments.json"),
            temp_dir.path().join("data").join("appointments.json")
        );
    }
}
