pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::CostingPipeline;
pub use config::cli::LocalStorage;
pub use config::toml_config::CostConfig;
pub use core::{allocator::allocate, engine::CostingEngine};
pub use utils::error::{CostError, Result};
