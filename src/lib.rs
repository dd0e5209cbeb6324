pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, BillingConfig, CliConfig};
pub use core::{etl::EtlEngine, pipeline::BillingPipeline};
pub use utils::error::{BillingError, Result};
