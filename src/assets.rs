//! Embedded default configuration
//!
//! The default `config.yaml` is compiled into the binary:
//!
//! - If no config path is configured: use the embedded config (no filesystem access)
//! - If a path is configured and the file exists: use it
//! - If a path is configured but missing: fall back to the embedded config
//!
//! `redshape init` writes the embedded config to disk for editing.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "defaults/"]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// File name of the embedded config.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Config loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from --config or REDSHAPE_CONFIG)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new loader.
    ///
    /// `config_file` should be `Some` only if the operator named a file.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::debug!(path = %path.display(), "Config file missing, using embedded default");
        }

        Self::embedded_config()
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// The compiled-in default config.
    pub fn embedded_config() -> io::Result<Cow<'static, [u8]>> {
        EmbeddedConfig::get(CONFIG_FILE_NAME)
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Extract the embedded config to the filesystem (init command)
    ///
    /// Uses the configured path, or `./config.yaml` if none is set.
    /// Existing files are left alone unless `force` is true.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("./{CONFIG_FILE_NAME}")));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = Self::embedded_config()?;
        fs::write(&path, &*data)?;
        tracing::info!(path = %path.display(), "Wrote default config");
        report.written.push(path.display().to_string());

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_present() {
        let content = AssetLoader::default().read_config_string().unwrap();
        assert!(content.contains("target_colors"));
        assert!(content.contains("replacement_color"));
    }

    #[test]
    fn test_external_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "color_tolerance: 7\n").unwrap();

        let loader = AssetLoader::new(Some(path));
        assert_eq!(loader.read_config_string().unwrap(), "color_tolerance: 7\n");
    }

    #[test]
    fn test_missing_external_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(Some(dir.path().join("missing.yaml")));
        assert!(loader.read_config_string().unwrap().contains("target_colors"));
    }

    #[test]
    fn test_init_writes_then_skips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let loader = AssetLoader::new(Some(path.clone()));

        let first = loader.init(false).unwrap();
        assert_eq!(first.written.len(), 1);
        assert!(path.exists());

        let second = loader.init(false).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.skipped.len(), 1);

        let forced = loader.init(true).unwrap();
        assert_eq!(forced.written.len(), 1);
    }
}
