pub mod toml_config;

use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::validate_non_empty_string;
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::{
    ApiConfig, DashboardConfig, DashboardInfo, FiltersConfig, RenderConfig, WatchConfig,
};

/// token 未由旗標提供時改讀這個環境變數，只在進入點讀一次
pub const TOKEN_ENV_VAR: &str = "PORTFOLIO_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "portfolio-refresher")]
#[command(about = "Fetch portfolio analytics and render the hours/tasks charts")]
pub struct CliConfig {
    /// TOML 設定檔；提供時優先於其餘旗標
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value = "http://localhost:8000/api/portfolio")]
    pub api_endpoint: String,

    /// 過濾器檔案，每次刷新都會重新讀取
    #[arg(long, default_value = "./filters.toml")]
    pub filters_file: String,

    #[arg(long, default_value = "./charts")]
    pub output_path: String,

    /// Bearer token；未提供時改讀 PORTFOLIO_API_TOKEN
    #[arg(long)]
    pub token: Option<String>,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    /// 監看過濾器檔案，變更時重新刷新
    #[arg(long)]
    pub watch: bool,

    #[arg(long, default_value = "500")]
    pub poll_interval_ms: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 憑證只在這裡解析一次，之後跟著設定走，不再回頭讀環境
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(token) = &self.token {
            validate_non_empty_string("token", token)?;
            return Ok(token.clone());
        }

        std::env::var(TOKEN_ENV_VAR).map_err(|_| DashboardError::MissingConfigError {
            field: "token".to_string(),
        })
    }

    pub fn into_dashboard_config(self) -> Result<DashboardConfig> {
        let token = self.resolve_token()?;

        Ok(DashboardConfig {
            dashboard: DashboardInfo {
                name: "portfolio".to_string(),
                description: None,
                version: None,
            },
            api: ApiConfig {
                endpoint: self.api_endpoint,
                token,
                timeout_seconds: Some(self.timeout_seconds),
            },
            filters: FiltersConfig {
                file: self.filters_file,
            },
            render: RenderConfig {
                output_path: self.output_path,
            },
            watch: Some(WatchConfig {
                enabled: self.watch,
                poll_interval_ms: Some(self.poll_interval_ms),
            }),
        })
    }
}
