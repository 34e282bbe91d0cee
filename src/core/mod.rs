pub mod catalog;
pub mod index;
pub mod matcher;
pub mod render;
pub mod session;

pub use crate::domain::model::{Catalog, RoleRecord};
pub use crate::domain::ports::CatalogSource;
pub use crate::utils::error::Result;
