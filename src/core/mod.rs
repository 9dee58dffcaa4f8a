pub mod client;
pub mod query;
pub mod refresher;
pub mod scheduler;

pub use crate::domain::model::{ChartSpec, FilterState, PortfolioSnapshot};
pub use crate::domain::ports::{ChartRenderer, FilterSource, Storage};
pub use crate::utils::error::Result;
