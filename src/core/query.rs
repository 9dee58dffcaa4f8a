use crate::domain::model::FilterState;

/// 將過濾器狀態編碼為查詢參數。
/// 純量各佔一組 key/value；多選集合以重複 key 編碼
/// （selected_projects=a&selected_projects=b），不是分隔字串。
/// 空集合時整個 key 省略，不會出現空字串項目。
pub fn filter_query_params(filters: &FilterState) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("start_date", filters.start_date.format("%Y-%m-%d").to_string()),
        ("end_date", filters.end_date.format("%Y-%m-%d").to_string()),
        ("chart_height", filters.effective_chart_height().to_string()),
    ];

    for project in &filters.selected_projects {
        if project.trim().is_empty() {
            continue;
        }
        params.push(("selected_projects", project.clone()));
    }

    for employee in &filters.selected_employees {
        if employee.trim().is_empty() {
            continue;
        }
        params.push(("selected_employees", employee.clone()));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filters(
        projects: &[&str],
        employees: &[&str],
        chart_height: Option<u32>,
    ) -> FilterState {
        FilterState {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            selected_projects: projects.iter().map(|p| p.to_string()).collect(),
            selected_employees: employees.iter().map(|e| e.to_string()).collect(),
            chart_height,
        }
    }

    fn values_for<'a>(params: &'a [(&'static str, String)], key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_empty_selections_omit_keys_and_height_defaults() {
        // start=2024-01-01, end=2024-01-31, projects=[], employees=["e1"], height 未設定
        let params = filter_query_params(&filters(&[], &["e1"], None));

        assert_eq!(values_for(&params, "start_date"), vec!["2024-01-01"]);
        assert_eq!(values_for(&params, "end_date"), vec!["2024-01-31"]);
        assert_eq!(values_for(&params, "chart_height"), vec!["400"]);
        assert!(values_for(&params, "selected_projects").is_empty());
        assert_eq!(values_for(&params, "selected_employees"), vec!["e1"]);
    }

    #[test]
    fn test_each_selection_becomes_a_repeated_key() {
        let params = filter_query_params(&filters(&["p1", "p2", "p3"], &["e1", "e2"], Some(500)));

        assert_eq!(values_for(&params, "selected_projects"), vec!["p1", "p2", "p3"]);
        assert_eq!(values_for(&params, "selected_employees"), vec!["e1", "e2"]);
        assert_eq!(values_for(&params, "chart_height"), vec!["500"]);
    }

    #[test]
    fn test_zero_height_falls_back_to_default() {
        let params = filter_query_params(&filters(&[], &[], Some(0)));
        assert_eq!(values_for(&params, "chart_height"), vec!["400"]);
    }

    #[test]
    fn test_blank_ids_are_skipped() {
        let params = filter_query_params(&filters(&["p1", "  ", ""], &[""], None));

        assert_eq!(values_for(&params, "selected_projects"), vec!["p1"]);
        assert!(values_for(&params, "selected_employees").is_empty());
    }
}
