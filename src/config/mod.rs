#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::render::{OutputFormat, RenderOptions};
use crate::core::session::SessionOptions;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

/// File name of the catalog looked up when no path is configured.
pub const DEFAULT_CATALOG_FILE: &str = "career_data.json";

/// Fully resolved settings: command line over settings file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub catalog_path: PathBuf,
    pub format: OutputFormat,
    pub hyperlinks: bool,
    pub show_footer: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            format: OutputFormat::default(),
            // 只有輸出到終端機時才預設啟用 OSC 8 超連結
            hyperlinks: io::stdout().is_terminal(),
            show_footer: true,
        }
    }
}

impl PlannerConfig {
    /// Applies a settings file on top of the defaults.
    pub fn with_settings(settings: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            catalog_path: settings.catalog_path().unwrap_or(defaults.catalog_path),
            format: settings.display.format.unwrap_or(defaults.format),
            hyperlinks: settings.display.hyperlinks.unwrap_or(defaults.hyperlinks),
            show_footer: settings.display.show_footer.unwrap_or(defaults.show_footer),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.format,
            hyperlinks: self.hyperlinks,
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            render: self.render_options(),
            show_footer: self.show_footer,
        }
    }
}

impl Validate for PlannerConfig {
    fn validate(&self) -> Result<()> {
        validate_path("catalog path", &self.catalog_path.to_string_lossy())
    }
}

/// `career_data.json` beside the executable, else in the current directory.
pub fn default_catalog_path() -> PathBuf {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CATALOG_FILE)));

    match beside_exe {
        Some(path) if path.exists() => path,
        _ => std::env::current_dir()
            .map(|dir| dir.join(DEFAULT_CATALOG_FILE))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG_FILE)),
    }
}
