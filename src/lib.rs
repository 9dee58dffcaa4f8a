pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::filters::FileFilterSource;
pub use crate::adapters::html::HtmlRenderer;
pub use crate::adapters::storage::LocalStorage;
pub use crate::config::toml_config::DashboardConfig;
pub use crate::config::CliConfig;
pub use crate::core::client::PortfolioClient;
pub use crate::core::refresher::Refresher;
pub use crate::core::scheduler::RefreshScheduler;
pub use crate::utils::error::{DashboardError, Result};
