pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{PlannerConfig, TomlConfig};

pub use crate::adapters::LocalFileSource;
pub use crate::core::{
    catalog::{global_loader, load_catalog, CatalogLoader},
    index::{available_names, selection_options},
    matcher::{find, lookup},
    render::{render, render_view, OutputFormat, RenderOptions, RoadmapView},
    session::{Session, SessionOptions},
};
pub use crate::domain::model::{Catalog, Certification, Course, InterviewPreparation, RoleRecord};
pub use crate::utils::error::{PlannerError, Result};
