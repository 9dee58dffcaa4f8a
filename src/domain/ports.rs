use crate::domain::model::{ChartSpec, FilterState};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 過濾器來源：頁面上五個控制項的抽象。
/// 每次呼叫都必須重新讀取目前的值，不得快取前一個週期的狀態。
#[async_trait]
pub trait FilterSource: Send + Sync {
    async fn current_filters(&self) -> Result<FilterState>;
}

/// 圖表渲染端。契約是「以這份規格完整取代 target 上的圖表」，
/// 同一個 target 重複渲染必須是等冪的覆寫，不是增量更新。
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    async fn render(&self, target: &str, spec: &ChartSpec) -> Result<()>;
}
