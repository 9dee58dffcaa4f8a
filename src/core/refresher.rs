use crate::core::client::PortfolioClient;
use crate::domain::model::{PortfolioSnapshot, HOURS_CHART_TARGET, TASKS_CHART_TARGET};
use crate::domain::ports::{ChartRenderer, FilterSource};
use crate::utils::error::Result;

/// 單一刷新週期的執行者：讀取過濾器 → 請求 → 渲染兩張圖。
/// 過濾器每個週期重新讀取，渲染一定等到兩份規格都到手才開始，
/// 所以失敗的週期不會動到先前已渲染的圖表。
pub struct Refresher<F: FilterSource, R: ChartRenderer> {
    filters: F,
    client: PortfolioClient,
    renderer: R,
}

impl<F: FilterSource, R: ChartRenderer> Refresher<F, R> {
    pub fn new(filters: F, client: PortfolioClient, renderer: R) -> Self {
        Self {
            filters,
            client,
            renderer,
        }
    }

    /// 讀取目前的過濾器並請求最新的 portfolio 快照，不產生渲染副作用
    pub async fn snapshot(&self) -> Result<PortfolioSnapshot> {
        let filters = self.filters.current_filters().await?;
        tracing::debug!(
            "📥 Filters: {} ~ {}, {} projects, {} employees, height {}",
            filters.start_date,
            filters.end_date,
            filters.selected_projects.len(),
            filters.selected_employees.len(),
            filters.effective_chart_height()
        );
        self.client.fetch_portfolio(&filters).await
    }

    /// 渲染兩張圖表，各自完整取代該目標先前的內容
    pub async fn render(&self, snapshot: &PortfolioSnapshot) -> Result<()> {
        self.renderer
            .render(HOURS_CHART_TARGET, &snapshot.hours_chart)
            .await?;
        self.renderer
            .render(TASKS_CHART_TARGET, &snapshot.tasks_chart)
            .await?;
        Ok(())
    }

    /// 完整的刷新週期
    pub async fn refresh(&self) -> Result<()> {
        let snapshot = self.snapshot().await?;
        self.render(&snapshot).await?;
        tracing::info!("✅ Portfolio charts refreshed");
        Ok(())
    }
}
