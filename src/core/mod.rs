pub mod discount;
pub mod etl;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod tally;
pub mod tariff;

pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
