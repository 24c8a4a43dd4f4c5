//! Layered configuration for the pagedown binary.
//!
//! `defaults/pagedown.default.toml` is embedded into the binary. A
//! `pagedown.toml` in the working directory, an explicit `--config` file and
//! command-line flags are layered on top via [`Loader`] before deserializing
//! into [`Settings`].

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use pagedown::ConversionOptions;
use serde::Deserialize;

use crate::args::ConvertArgs;

const DEFAULT_TOML: &str = include_str!("../defaults/pagedown.default.toml");

/// Name of the optional per-directory configuration file
pub const LOCAL_CONFIG: &str = "pagedown.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub conversion: ConversionSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionSettings {
    pub include_translations: bool,
    pub keep_links: bool,
    pub css_selector: String,
}

impl ConversionSettings {
    /// The selector to convert, if one is set
    pub fn selector(&self) -> Option<&str> {
        Some(self.css_selector.trim()).filter(|s| !s.is_empty())
    }
}

impl From<&ConversionSettings> for ConversionOptions {
    fn from(settings: &ConversionSettings) -> Self {
        ConversionOptions {
            remove_translations: !settings.include_translations,
            keep_links: settings.keep_links,
            include_translations: settings.include_translations,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub save_path: PathBuf,
}

/// Builds [`Settings`] from `pagedown.default.toml` plus whatever the run adds on top.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only the bundled `pagedown.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file given with `--config`. `build` fails if it does not exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Add a TOML file that may be missing, such as `pagedown.toml` in the working directory.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `output.save_path`. Wins over every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Apply the flags given on the command line.
    pub fn with_args(self, args: &ConvertArgs) -> Result<Self, ConfigError> {
        let mut loader = match &args.config {
            Some(path) => self.with_file(path),
            None => self,
        };
        if args.include_translations {
            loader = loader.set_override("conversion.include_translations", true)?;
        }
        if args.no_links {
            loader = loader.set_override("conversion.keep_links", false)?;
        }
        if let Some(selector) = &args.selector {
            loader = loader.set_override("conversion.css_selector", selector.as_str())?;
        }
        if let Some(out) = &args.out {
            loader = loader.set_override("output.save_path", out.to_string_lossy().into_owned())?;
        }
        Ok(loader)
    }

    /// Merge the layers into [`Settings`].
    pub fn build(self) -> Result<Settings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for a run: defaults, then `pagedown.toml` in the working
/// directory, then the command-line flags.
pub fn load(args: &ConvertArgs) -> Result<Settings, ConfigError> {
    Loader::new()
        .with_optional_file(LOCAL_CONFIG)
        .with_args(args)?
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let settings = Loader::new().build().expect("defaults to deserialize");
        assert!(!settings.conversion.include_translations);
        assert!(settings.conversion.keep_links);
        assert_eq!(settings.conversion.selector(), None);
        assert_eq!(settings.output.save_path, PathBuf::from("docs/"));

        let options = ConversionOptions::from(&settings.conversion);
        assert!(options.remove_translations);
        assert!(!options.include_translations);
    }

    #[test]
    fn include_translations_disables_removal() {
        let settings = Loader::new()
            .set_override("conversion.include_translations", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let options = ConversionOptions::from(&settings.conversion);
        assert!(options.include_translations);
        assert!(!options.remove_translations);
    }

    #[test]
    fn args_override_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "[conversion]\nkeep_links = false\ncss_selector = \".doc\"\n\n[output]\nsave_path = \"from-file\"\n",
        )
        .unwrap();

        let args = ConvertArgs {
            out: Some(PathBuf::from("from-args")),
            config: Some(path),
            ..Default::default()
        };
        let settings = Loader::new().with_args(&args).unwrap().build().unwrap();
        assert!(!settings.conversion.keep_links);
        assert_eq!(settings.conversion.selector(), Some(".doc"));
        assert_eq!(settings.output.save_path, PathBuf::from("from-args"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let args = ConvertArgs {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..Default::default()
        };
        assert!(Loader::new().with_args(&args).unwrap().build().is_err());
    }

    #[test]
    fn optional_file_layers_under_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("pagedown.toml");
        fs::write(&present, "[conversion]\nkeep_links = false\n\n[output]\nsave_path = \"local\"\n").unwrap();

        let settings = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .with_optional_file(&present)
            .set_override("output.save_path", "cli")
            .unwrap()
            .build()
            .unwrap();
        assert!(!settings.conversion.keep_links);
        assert_eq!(settings.output.save_path, PathBuf::from("cli"));
    }
}
