use crate::config::{PlannerConfig, TomlConfig};
use crate::core::render::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_extension, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "career-planner")]
#[command(about = "AI career planner for engineers: pick a job role and get its roadmap")]
pub struct CliConfig {
    /// Path to the role catalog (JSON with a top-level `IT_Roles` list)
    #[arg(long, env = "CAREER_PLANNER_DATA")]
    pub data: Option<PathBuf>,

    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the roadmap for this role and exit
    #[arg(short, long)]
    pub role: Option<String>,

    /// Print the available role names and exit
    #[arg(long)]
    pub list: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print links as plain URLs instead of terminal hyperlinks
    #[arg(long)]
    pub no_hyperlinks: bool,

    /// Omit the "Data loaded from" footer
    #[arg(long)]
    pub no_footer: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    /// 合併命令列參數、設定檔與預設值
    pub fn resolve(&self) -> Result<PlannerConfig> {
        self.validate()?;

        let settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading settings from: {}", path.display());
                let settings = TomlConfig::from_file(path)?;
                settings.validate()?;
                settings
            }
            None => TomlConfig::default(),
        };

        let mut config = PlannerConfig::with_settings(&settings);
        if let Some(data) = &self.data {
            config.catalog_path = data.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.no_hyperlinks {
            config.hyperlinks = false;
        }
        if self.no_footer {
            config.show_footer = false;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_extension("--config", &path.to_string_lossy(), &["toml"])?;
        }
        Ok(())
    }
}
