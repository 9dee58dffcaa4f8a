use crate::domain::model::ChartSpec;
use crate::domain::ports::{ChartRenderer, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 把圖表規格寫成內嵌 Plotly.js 的獨立 HTML 頁面。
/// 每個渲染目標對應一個固定檔名，重新渲染時整頁覆寫。
pub struct HtmlRenderer<S: Storage> {
    storage: S,
}

impl<S: Storage> HtmlRenderer<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn render_page(target: &str, spec: &ChartSpec) -> Result<String> {
        let data = serde_json::to_string(&spec.data)?;
        let layout = serde_json::to_string(&spec.layout)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{target}</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
</head>
<body>
    <div id="{target}"></div>
    <script>
        Plotly.newPlot("{target}", {data}, {layout});
    </script>
</body>
</html>
"#
        ))
    }
}

#[async_trait]
impl<S: Storage> ChartRenderer for HtmlRenderer<S> {
    async fn render(&self, target: &str, spec: &ChartSpec) -> Result<()> {
        let page = Self::render_page(target, spec)?;
        let filename = format!("{}.html", target);
        self.storage.write_file(&filename, page.as_bytes()).await?;
        tracing::debug!("📊 Rendered {} ({} bytes)", filename, page.len());
        Ok(())
    }
}
