//! Generator configuration, read from TOML.
//!
//! ```toml
//! header = "tests/python-ref-header.scm"
//! output = "tests/python-ref-tests.scm"
//! format = "scheme"
//! fail_fast = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::fixture::FixtureFormat;

pub const DEFAULT_OUTPUT: &str = "tests/python-ref-tests.scm";
/// Header picked up by [`GeneratorConfig::resolve_default_header`].
pub const DEFAULT_HEADER: &str = "tests/python-ref-header.scm";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// File copied verbatim to the top of Scheme output.
    pub header: Option<PathBuf>,
    pub output: PathBuf,
    pub format: FixtureFormat,
    /// Stop verifying at the first failing case.
    pub fail_fast: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            header: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: FixtureFormat::default(),
            fail_fast: false,
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Fills an unset `header` with `root/tests/python-ref-header.scm` when
    /// that file exists. An explicit header is left alone.
    pub fn resolve_default_header(&mut self, root: &Path) {
        if self.header.is_some() {
            return;
        }
        let candidate = root.join(DEFAULT_HEADER);
        if candidate.is_file() {
            self.header = Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(GeneratorConfig::from_toml_str("").unwrap(), GeneratorConfig::default());
        assert_eq!(GeneratorConfig::default().output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn all_fields() {
        let cfg = GeneratorConfig::from_toml_str(
            r#"
            header = "h.scm"
            output = "out/fixtures.json"
            format = "json"
            fail_fast = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.header, Some(PathBuf::from("h.scm")));
        assert_eq!(cfg.output, PathBuf::from("out/fixtures.json"));
        assert_eq!(cfg.format, FixtureFormat::Json);
        assert!(cfg.fail_fast);
    }

    #[test]
    fn rejects_unknown_keys_and_formats() {
        assert!(GeneratorConfig::from_toml_str("outptu = \"x\"").is_err());
        assert!(GeneratorConfig::from_toml_str("format = \"yaml\"").is_err());
    }

    #[test]
    fn default_header_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = GeneratorConfig::default();
        cfg.resolve_default_header(dir.path());
        assert_eq!(cfg.header, None);

        std::fs::create_dir_all(dir.path().join("tests")).unwrap();
        std::fs::write(dir.path().join(DEFAULT_HEADER), "(import msgpack)\n").unwrap();
        cfg.resolve_default_header(dir.path());
        assert_eq!(cfg.header, Some(dir.path().join(DEFAULT_HEADER)));

        let mut explicit = GeneratorConfig {
            header: Some(PathBuf::from("mine.scm")),
            ..GeneratorConfig::default()
        };
        explicit.resolve_default_header(dir.path());
        assert_eq!(explicit.header, Some(PathBuf::from("mine.scm")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err =
            GeneratorConfig::load(Path::new("/nonexistent/msgpack-conform.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read config /nonexistent/"));
    }
}
