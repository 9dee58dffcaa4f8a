use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 後端 API 的預設圖表高度
pub const DEFAULT_CHART_HEIGHT: u32 = 400;

/// hours 圖表的固定渲染目標
pub const HOURS_CHART_TARGET: &str = "portfolio-hours-chart";

/// tasks 圖表的固定渲染目標
pub const TASKS_CHART_TARGET: &str = "portfolio-tasks-chart";

/// 單次刷新週期的過濾器快照。
/// 每次觸發時從來源重新讀取，建構後不再修改，也不跨週期快取。
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub selected_projects: Vec<String>,
    pub selected_employees: Vec<String>,
    pub chart_height: Option<u32>,
}

impl FilterState {
    /// 圖表高度：未設定或為 0 時退回預設值，其餘原值轉交
    pub fn effective_chart_height(&self) -> u32 {
        match self.chart_height {
            Some(height) if height > 0 => height,
            _ => DEFAULT_CHART_HEIGHT,
        }
    }
}

/// 單一圖表規格（data + layout）。
/// 內容視為不透明，不做任何檢查，原樣轉交渲染端。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub data: Vec<serde_json::Value>,
    pub layout: serde_json::Value,
}

/// `/api/portfolio` 成功回應的內容：恰好兩個圖表規格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub hours_chart: ChartSpec,
    pub tasks_chart: ChartSpec,
}
