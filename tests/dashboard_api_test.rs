// ==========================================
// DashboardApi 集成测试
// ==========================================
// 测试目标: 快照 + 页面目录 → 本地化页面视图
// 覆盖: 导航 / 降级模式 / 单问题失败隔离 / 自定义目录 / JSON 输出
// ==========================================


use std::io::Write;
use std::sync::Arc;
use supermarket_sales::api::{ApiError, ChartData, QuestionOutcome};
use supermarket_sales::app::{AppState, SalesSnapshot, SnapshotSource};
use supermarket_sales::config::DashboardConfig;
use supermarket_sales::domain::sale::DqReport;
use supermarket_sales::logging;
use test_helpers::{csv_row, sales, write_temp_csv};

fn config(locale: &str) -> DashboardConfig {
    DashboardConfig {
        locale: locale.to_string(),
        preview_rows: 3,
        ..DashboardConfig::default()
    }
}

/// 由 CSV 构建应用状态
fn state_from_csv(locale: &str, lines: &[String]) -> (tempfile::NamedTempFile, AppState) {
    let file = write_temp_csv(lines).expect("写入临时文件失败");
    let config = DashboardConfig {
        data_path: Some(file.path().to_path_buf()),
        ..config(locale)
    };
    let state = AppState::new(config);
    (file, state)
}

fn sample_rows() -> Vec<String> {
    vec![
        csv_row("750-67-8428", "A", "Yangon", 548.9715, "1/5/2019", "13:08"),
        csv_row("226-31-3081", "C", "Naypyitaw", 80.22, "3/8/2019", "10:29"),
        csv_row("631-41-3108", "A", "Yangon", 340.5255, "3/3/2019", "13:23"),
        csv_row("123-19-1176", "A", "Yangon", 489.048, "1/27/2019", "20:33"),
        csv_row("373-73-7910", "A", "Yangon", 634.3785, "2/8/2019", "10:37"),
        csv_row("699-14-3026", "C", "Naypyitaw", 627.6165, "3/25/2019", "18:30"),
        csv_row("355-53-5943", "A", "Yangon", 433.692, "2/25/2019", "14:36"),
        csv_row("315-22-5665", "C", "Naypyitaw", 772.38, "2/24/2019", "11:38"),
        csv_row("665-32-9167", "A", "Yangon", 76.146, "1/10/2019", "17:15"),
        csv_row("692-92-5582", "B", "Mandalay", 172.746, "2/20/2019", "13:27"),
        csv_row("351-62-0822", "B", "Mandalay", 60.816, "2/6/2019", "18:07"),
        csv_row("529-56-3974", "B", "Mandalay", 107.142, "3/9/2019", "17:03"),
    ]
}

#[test]
fn test_navigation_menu_is_localized() {
    logging::init_test();

    let (_file, state) = state_from_csv("pt-BR", &sample_rows());
    let pt: Vec<String> = state
        .dashboard_api
        .list_pages()
        .into_iter()
        .map(|p| p.title)
        .collect();

    let (_file, state) = state_from_csv("en", &sample_rows());
    let en: Vec<String> = state
        .dashboard_api
        .list_pages()
        .into_iter()
        .map(|p| p.title)
        .collect();

    assert_eq!(pt.len(), 6);
    assert_eq!(en.len(), 6);
    assert_ne!(pt, en);
}

#[test]
fn test_home_page_overview() {
    logging::init_test();

    let (_file, state) = state_from_csv("en", &sample_rows());
    let view = state.dashboard_api.render_page("home").expect("首页应存在");

    assert!(view.notices.is_empty());
    let overview = view.overview.expect("首页应有概览");
    assert_eq!(overview.record_count, 12);
    assert_eq!(overview.dq_summary.success, 12);
    assert_eq!(overview.preview.rows.len(), 3);
    assert_eq!(overview.preview.rows[0][0], "750-67-8428");
    assert!(overview.record_count_label.contains("12"));
}

#[test]
fn test_sales_page_summary_sentences() {
    logging::init_test();

    let (_file, state) = state_from_csv("en", &sample_rows());
    let view = state.dashboard_api.render_page("sales").expect("页面应存在");

    assert_eq!(view.questions.len(), 5);
    for question in &view.questions {
        match &question.outcome {
            QuestionOutcome::Answered { summary, .. } => {
                let summary = summary.as_deref().unwrap_or_default();
                assert!(!summary.contains("%{"), "模板占位符未替换: {}", summary);
            }
            QuestionOutcome::Failed { detail, .. } => {
                panic!("问题 {} 不应失败: {}", question.id, detail)
            }
        }
    }
}

#[test]
fn test_render_is_deterministic() {
    let (_file, state) = state_from_csv("pt-BR", &sample_rows());
    let first = state.dashboard_api.render_all();
    let second = state.dashboard_api.render_all();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_page_is_not_found() {
    let (_file, state) = state_from_csv("en", &sample_rows());
    let result = state.dashboard_api.render_page("inventory");
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test]
fn test_degraded_mode_is_navigable() {
    logging::init_test();

    let config = DashboardConfig {
        data_path: Some("no_such_dir/supermarket_sales.xlsx".into()),
        placeholder_rows: 60,
        ..config("en")
    };
    let state = AppState::new(config);

    assert!(state.snapshot.is_degraded());
    for page in state.dashboard_api.list_pages() {
        let view = state
            .dashboard_api
            .render_page(&page.id)
            .expect("降级模式下所有页面都应可渲染");
        assert_eq!(view.notices.len(), 1, "页面 {} 应提示降级模式", page.id);
    }
}

#[test]
fn test_failing_question_does_not_blank_page() {
    logging::init_test();

    // 自定义目录: 第一个问题对文本字段求和（类型不匹配），第二个问题正常
    let catalog_json = r#"{
        "pages": [
            {
                "id": "sales",
                "kind": "questions",
                "questions": [
                    {
                        "id": "gross_income_by_branch",
                        "analysis": {"type": "aggregate", "group_by": ["branch"], "target": "city", "reduction": "sum"}
                    },
                    {
                        "id": "mean_total_by_branch",
                        "analysis": {"type": "aggregate", "group_by": ["branch"], "target": "total", "reduction": "mean",
                                     "order": {"by": "value", "direction": "desc"}},
                        "chart": {"kind": "bar"},
                        "summary": {"format": {"kind": "currency", "decimals": 2}}
                    }
                ]
            }
        ]
    }"#;
    let mut catalog_file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("创建临时文件失败");
    catalog_file
        .write_all(catalog_json.as_bytes())
        .expect("写入目录失败");

    let snapshot = SalesSnapshot::build(
        sales(&[("A", 10.0), ("A", 20.0), ("B", 30.0)]),
        SnapshotSource::File {
            path: "memory".to_string(),
        },
        DqReport::default(),
        "en",
    );
    let config = DashboardConfig {
        catalog_path: Some(catalog_file.path().to_path_buf()),
        ..config("en")
    };
    let state = AppState::with_snapshot(config, Arc::new(snapshot));

    let view = state.dashboard_api.render_page("sales").expect("页面应存在");
    assert_eq!(view.questions.len(), 2);
    assert!(!view.questions[0].is_answered());

    match &view.questions[1].outcome {
        QuestionOutcome::Answered {
            table,
            chart,
            summary,
        } => {
            assert_eq!(table.rows[0][0], "B");
            assert_eq!(table.rows[0][1], "$ 30.00");
            assert!(summary.as_deref().unwrap_or_default().contains("B"));
            match chart.as_ref().map(|c| &c.data) {
                Some(ChartData::Categories { points }) => assert_eq!(points.len(), 2),
                other => panic!("unexpected chart: {:?}", other),
            }
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_page_view_serializes_to_json() {
    let (_file, state) = state_from_csv("zh-CN", &sample_rows());
    let views = state.dashboard_api.render_all();
    let json = serde_json::to_value(&views).expect("序列化失败");

    let pages = json.as_array().expect("应为数组");
    assert_eq!(pages.len(), 6);
    assert_eq!(pages[0]["id"], "home");
    assert_eq!(pages[0]["locale"], "zh-CN");
    assert!(pages[1]["questions"][0]["outcome"]["status"].is_string());
}
