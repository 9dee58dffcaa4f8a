use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub dashboard: DashboardInfo,
    pub api: ApiConfig,
    pub filters: FiltersConfig,
    pub render: RenderConfig,
    pub watch: Option<WatchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,
    /// Bearer 憑證。設定檔裡通常寫 ${PORTFOLIO_API_TOKEN}，
    /// 載入時替換一次，之後不再回頭讀環境
    pub token: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    pub enabled: bool,
    pub poll_interval_ms: Option<u64>,
}

impl DashboardConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 先替換環境變數
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PORTFOLIO_API_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds.unwrap_or(30))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.watch
                .as_ref()
                .and_then(|w| w.poll_interval_ms)
                .unwrap_or(500),
        )
    }

    pub fn watch_enabled(&self) -> bool {
        self.watch.as_ref().map(|w| w.enabled).unwrap_or(false)
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.endpoint", &self.api.endpoint)?;

        validation::validate_non_empty_string("api.token", &self.api.token)?;
        // 環境變數沒解析到時，token 仍然是 ${VAR} 的樣子
        if self.api.token.contains("${") {
            return Err(DashboardError::MissingConfigError {
                field: "api.token".to_string(),
            });
        }

        validation::validate_path("filters.file", &self.filters.file)?;
        validation::validate_path("render.output_path", &self.render.output_path)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        if let Some(watch) = &self.watch {
            if let Some(interval) = watch.poll_interval_ms {
                validation::validate_positive_number("watch.poll_interval_ms", interval, 1)?;
            }
        }

        Ok(())
    }
}
