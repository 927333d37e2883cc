//! Configuration loading
//!
//! `defaults/mtlog.default.toml` is embedded into the binary so that documentation and runtime
//! behavior stay in sync. The CLI layers user files on top of those defaults via [`Loader`]
//! before deserializing into [`MtlogConfig`]:
//!
//!     embedded defaults → ./mtlog.toml (if present) → --config <file> → command line overrides

use crate::template::ast::DiagnosticOptions;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use ::config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../../defaults/mtlog.default.toml");

/// Name of the optional per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = "mtlog.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct MtlogConfig {
    pub output: OutputConfig,
    pub treeviz: TreevizConfig,
    pub diagnostics: DiagnosticOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Format string used when none is given, e.g. `ast-treeviz`
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "ast-treeviz".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreevizConfig {
    pub show_linum: bool,
    pub max_label_chars: usize,
}

impl Default for TreevizConfig {
    fn default() -> Self {
        Self {
            show_linum: false,
            max_label_chars: 30,
        }
    }
}

/// Builds an [`MtlogConfig`] from the embedded defaults plus any layers added on top.
///
/// Later layers win key by key, so a file only needs the keys it changes.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        log::debug!(
            "config: layering {} ({})",
            path.display(),
            if required { "required" } else { "optional" }
        );
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    /// `path` must exist when [`build`](Self::build) runs.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Skipped silently when `path` does not exist, e.g. `./mtlog.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Sets a dotted key such as `treeviz.show_linum` above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Reads every layer and deserializes the merged result.
    pub fn build(self) -> Result<MtlogConfig, ConfigError> {
        let config: MtlogConfig = self.builder.build()?.try_deserialize()?;
        log::debug!("config: {:?}", config);
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<MtlogConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, MtlogConfig::default());
        assert_eq!(config.output.format, "ast-treeviz");
        assert_eq!(config.treeviz.max_label_chars, 30);
        assert!(config.diagnostics.mixed_positional);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("treeviz.show_linum", true)
            .expect("override to apply")
            .set_override("diagnostics.empty_format", false)
            .expect("override to apply")
            .build()
            .expect("config to build");

        assert!(config.treeviz.show_linum);
        assert!(!config.diagnostics.empty_format);
        assert!(config.diagnostics.empty_placeholder);
    }

    #[test]
    fn layers_files_over_defaults() {
        let path = std::env::temp_dir().join(format!("mtlog-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("temp file");
        writeln!(file, "[output]\nformat = \"ast-sexp\"").expect("write temp file");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.output.format, "ast-sexp");
        assert_eq!(config.treeviz.max_label_chars, 30);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new()
            .with_file("/definitely/not/here/mtlog.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn overrides_win_over_files() {
        let path = std::env::temp_dir().join(format!("mtlog-override-{}.toml", std::process::id()));
        std::fs::write(&path, "[treeviz]\nshow_linum = false\nmax_label_chars = 8\n")
            .expect("write temp file");

        let config = Loader::new()
            .set_override("treeviz.show_linum", true)
            .expect("override to apply")
            .with_file(&path)
            .build()
            .expect("config to build");
        std::fs::remove_file(&path).ok();

        assert!(config.treeviz.show_linum);
        assert_eq!(config.treeviz.max_label_chars, 8);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/mtlog.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, MtlogConfig::default());
    }
}
