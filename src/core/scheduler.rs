use crate::core::refresher::Refresher;
use crate::domain::ports::{ChartRenderer, FilterSource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// 最新觸發優先的刷新排程器。
/// 每次觸發都取消仍在進行中的週期，回應到手後再核對一次世代編號，
/// 過期的回應直接丟棄，圖表只會反映最後一次要求的過濾器狀態。
pub struct RefreshScheduler<F, R>
where
    F: FilterSource + 'static,
    R: ChartRenderer + 'static,
{
    refresher: Arc<Refresher<F, R>>,
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    last_failure: Arc<Mutex<Option<String>>>,
}

impl<F, R> RefreshScheduler<F, R>
where
    F: FilterSource + 'static,
    R: ChartRenderer + 'static,
{
    pub fn new(refresher: Refresher<F, R>) -> Self {
        Self {
            refresher: Arc::new(refresher),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
            last_failure: Arc::new(Mutex::new(None)),
        }
    }

    /// 啟動新的刷新週期，取代任何仍在進行中的週期
    pub async fn trigger(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut in_flight = self.in_flight.lock().await;
        if let Some(previous) = in_flight.take() {
            if !previous.is_finished() {
                tracing::debug!("⏭️ Cancelling in-flight refresh cycle");
                previous.abort();
            }
        }

        let refresher = Arc::clone(&self.refresher);
        let counter = Arc::clone(&self.generation);
        let last_failure = Arc::clone(&self.last_failure);
        *in_flight = Some(tokio::spawn(async move {
            run_cycle(refresher, generation, counter, last_failure).await;
        }));
    }

    /// 等待目前的週期結束。被取消的週期以 JoinError 收場，一樣視為已結束。
    pub async fn wait_idle(&self) {
        let handle = self.in_flight.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// 最近一個完成週期的失敗訊息；成功的週期會清掉它
    pub async fn last_failure(&self) -> Option<String> {
        self.last_failure.lock().await.clone()
    }
}

async fn run_cycle<F, R>(
    refresher: Arc<Refresher<F, R>>,
    generation: u64,
    counter: Arc<AtomicU64>,
    last_failure: Arc<Mutex<Option<String>>>,
) where
    F: FilterSource + 'static,
    R: ChartRenderer + 'static,
{
    tracing::debug!("🔄 Refresh cycle {} started", generation);

    let outcome = match refresher.snapshot().await {
        Ok(snapshot) => {
            // 回應返回前已有更新的觸發，這份資料過期了
            if counter.load(Ordering::SeqCst) != generation {
                tracing::debug!("⏭️ Dropping stale response from cycle {}", generation);
                return;
            }
            refresher.render(&snapshot).await
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => {
            *last_failure.lock().await = None;
            tracing::info!("✅ Refresh cycle {} rendered", generation);
        }
        Err(e) => {
            // 週期內的所有失敗收斂成單一記錄，不往外拋
            tracing::error!("❌ Error updating portfolio: {}", e);
            if counter.load(Ordering::SeqCst) == generation {
                *last_failure.lock().await = Some(e.user_friendly_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::PortfolioClient;
    use crate::domain::model::{ChartSpec, FilterState};
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use std::sync::Mutex as StdMutex;

    struct FixedFilters;

    #[async_trait]
    impl FilterSource for FixedFilters {
        async fn current_filters(&self) -> Result<FilterState> {
            Ok(FilterState {
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                selected_projects: Vec::new(),
                selected_employees: Vec::new(),
                chart_height: None,
            })
        }
    }

    #[derive(Clone)]
    struct RecordingRenderer {
        calls: Arc<StdMutex<Vec<String>>>,
    }

    impl RecordingRenderer {
        fn new() -> Self {
            Self {
                calls: Arc::new(StdMutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl ChartRenderer for RecordingRenderer {
        async fn render(&self, target: &str, _spec: &ChartSpec) -> Result<()> {
            self.calls.lock().unwrap().push(target.to_string());
            Ok(())
        }
    }

    fn chart_body() -> serde_json::Value {
        serde_json::json!({
            "hours_chart": {"data": [], "layout": {}},
            "tasks_chart": {"data": [], "layout": {}}
        })
    }

    #[tokio::test]
    async fn test_successful_cycle_clears_last_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/portfolio");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(chart_body());
        });

        let renderer = RecordingRenderer::new();
        let scheduler = RefreshScheduler::new(Refresher::new(
            FixedFilters,
            PortfolioClient::new(server.url("/api/portfolio"), "secret-token"),
            renderer.clone(),
        ));

        scheduler.trigger().await;
        scheduler.wait_idle().await;

        assert_eq!(scheduler.last_failure().await, None);
        assert_eq!(renderer.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_cycle_records_a_single_failure_and_renders_nothing() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/portfolio");
            then.status(500);
        });

        let renderer = RecordingRenderer::new();
        let scheduler = RefreshScheduler::new(Refresher::new(
            FixedFilters,
            PortfolioClient::new(server.url("/api/portfolio"), "secret-token"),
            renderer.clone(),
        ));

        scheduler.trigger().await;
        scheduler.wait_idle().await;

        api_mock.assert();
        let failure = scheduler.last_failure().await.unwrap();
        assert!(failure.contains("HTTP 500"), "Unexpected message: {}", failure);
        assert!(renderer.calls.lock().unwrap().is_empty());
    }
}
