use crate::domain::model::FilterState;
use crate::domain::ports::FilterSource;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::validate_date;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 過濾器檔案的原始欄位，對應頁面上的五個控制項。
/// 日期先以字串收進來再驗證，多選欄位缺省時是空集合而不是錯誤。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersFile {
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub selected_projects: Vec<String>,
    #[serde(default)]
    pub selected_employees: Vec<String>,
    pub chart_height: Option<u32>,
}

impl FiltersFile {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DashboardError::FilterError {
            message: format!("Invalid filters file: {}", e),
        })
    }

    pub fn into_filter_state(self) -> Result<FilterState> {
        let start_date = validate_date("start_date", &self.start_date)?;
        let end_date = validate_date("end_date", &self.end_date)?;

        Ok(FilterState {
            start_date,
            end_date,
            selected_projects: self.selected_projects,
            selected_employees: self.selected_employees,
            chart_height: self.chart_height,
        })
    }
}

/// 以檔案扮演頁面控制項的角色：每次刷新都重新讀取，不快取上一個週期的值
pub struct FileFilterSource {
    path: PathBuf,
}

impl FileFilterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FilterSource for FileFilterSource {
    async fn current_filters(&self) -> Result<FilterState> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        FiltersFile::from_toml_str(&content)?.into_filter_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_filters_file() {
        let content = r#"
start_date = "2024-01-01"
end_date = "2024-01-31"
selected_projects = ["p1", "p2"]
selected_employees = ["e1"]
chart_height = 500
"#;

        let state = FiltersFile::from_toml_str(content)
            .unwrap()
            .into_filter_state()
            .unwrap();

        assert_eq!(state.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(state.end_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(state.selected_projects, vec!["p1", "p2"]);
        assert_eq!(state.selected_employees, vec!["e1"]);
        assert_eq!(state.effective_chart_height(), 500);
    }

    #[test]
    fn test_missing_selections_default_to_empty_sets() {
        let content = r#"
start_date = "2024-01-01"
end_date = "2024-01-31"
"#;

        let state = FiltersFile::from_toml_str(content)
            .unwrap()
            .into_filter_state()
            .unwrap();

        assert!(state.selected_projects.is_empty());
        assert!(state.selected_employees.is_empty());
        assert_eq!(state.effective_chart_height(), 400);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let content = r#"
start_date = "01/01/2024"
end_date = "2024-01-31"
"#;

        let error = FiltersFile::from_toml_str(content)
            .unwrap()
            .into_filter_state()
            .unwrap_err();

        assert!(matches!(error, DashboardError::InvalidValueError { .. }));
    }

    #[test]
    fn test_garbage_toml_is_a_filter_error() {
        let error = FiltersFile::from_toml_str("start_date = [not toml").unwrap_err();
        assert!(matches!(error, DashboardError::FilterError { .. }));
    }

    #[tokio::test]
    async fn test_file_source_reads_fresh_values_on_every_call() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "start_date = \"2024-01-01\"\nend_date = \"2024-01-31\""
        )
        .unwrap();
        file.flush().unwrap();

        let source = FileFilterSource::new(file.path());

        let first = source.current_filters().await.unwrap();
        assert!(first.selected_projects.is_empty());

        // 改寫檔案後，下一個週期必須看到新的狀態
        std::fs::write(
            file.path(),
            "start_date = \"2024-02-01\"\nend_date = \"2024-02-29\"\nselected_projects = [\"p9\"]\n",
        )
        .unwrap();

        let second = source.current_filters().await.unwrap();
        assert_eq!(second.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(second.selected_projects, vec!["p9"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let source = FileFilterSource::new("/nonexistent/filters.toml");
        let error = source.current_filters().await.unwrap_err();
        assert!(matches!(error, DashboardError::IoError(_)));
    }
}
