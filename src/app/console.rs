// ==========================================
// 超市销售数据看板 - 控制台渲染
// ==========================================
// 职责: 将已本地化的页面视图排版为纯文本（菜单 / 表格 / 图表摘要 / 结论）
// 红线: 不做任何计算与翻译之外的数据加工，文本均来自 PageView
// ==========================================

use crate::api::dto::{
    ChartData, ChartView, OverviewView, PageEntry, PageView, QuestionOutcome, QuestionView,
    TableView,
};
use crate::i18n;

/// 横向条形图的最大宽度（字符）
const BAR_WIDTH: usize = 40;

/// 表格单元格的最大显示宽度
const MAX_CELL_WIDTH: usize = 28;

/// 渲染导航菜单
pub fn render_menu(locale: &str, pages: &[PageEntry]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", i18n::t_in(locale, "app.title")));
    output.push_str(&format!("{}\n", i18n::t_in(locale, "app.menu")));
    for (index, page) in pages.iter().enumerate() {
        output.push_str(&format!("  {}. {} ({})\n", index + 1, page.title, page.id));
    }
    output
}

/// 渲染单个页面
pub fn render_page(view: &PageView) -> String {
    let mut output = String::new();

    output.push_str(&heading(&view.title, '='));

    for notice in &view.notices {
        output.push_str(&format!("! {}\n", notice));
    }
    if !view.notices.is_empty() {
        output.push('\n');
    }

    if let Some(overview) = &view.overview {
        output.push_str(&render_overview(&view.locale, overview));
    }

    if !view.questions.is_empty() {
        output.push_str(&format!("{}\n\n", i18n::t_in(&view.locale, "app.questions")));
        for question in &view.questions {
            output.push_str(&render_question(&view.locale, question));
        }

        let summaries: Vec<&str> = view
            .questions
            .iter()
            .filter_map(|q| match &q.outcome {
                QuestionOutcome::Answered {
                    summary: Some(s), ..
                } => Some(s.as_str()),
                _ => None,
            })
            .collect();
        if !summaries.is_empty() {
            output.push_str(&format!("{}\n", i18n::t_in(&view.locale, "app.answers")));
            for summary in summaries {
                output.push_str(&format!("- {}\n", summary));
            }
            output.push('\n');
        }
    }

    output
}

fn render_overview(locale: &str, overview: &OverviewView) -> String {
    let mut section = String::new();
    section.push_str(&format!("{}\n\n", overview.intro));
    section.push_str(&format!("{} ({})\n", overview.record_count_label, overview.source));

    let dq = &overview.dq_summary;
    if dq.total_rows > 0 {
        section.push_str(&format!(
            "DQ: {}/{} ok, {} blocked, {} warning, {} conflict\n",
            dq.success, dq.total_rows, dq.blocked, dq.warning, dq.conflict
        ));
    }
    section.push('\n');

    section.push_str(&format!("{}\n", i18n::t_in(locale, "app.dataset_sample")));
    section.push_str(&render_table(&overview.preview));
    section.push('\n');
    section
}

fn render_question(locale: &str, question: &QuestionView) -> String {
    let mut section = heading(&question.title, '-');

    match &question.outcome {
        QuestionOutcome::Answered { table, chart, .. } => {
            section.push_str(&render_table(table));
            if let Some(chart) = chart {
                section.push('\n');
                section.push_str(&render_chart(locale, chart));
            }
        }
        QuestionOutcome::Failed { notice, .. } => {
            section.push_str(&format!("! {}\n", notice));
        }
    }

    section.push('\n');
    section
}

fn heading(title: &str, underline: char) -> String {
    let width = title.chars().count().max(3);
    format!(
        "{}\n{}\n",
        title,
        std::iter::repeat(underline).take(width).collect::<String>()
    )
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut out: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    out.push('…');
    out
}

/// 定宽文本表格
pub fn render_table(table: &TableView) -> String {
    let columns: Vec<String> = table.columns.iter().map(|c| truncate(c)).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| truncate(c)).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(0);
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        format!("| {} |\n", padded.join(" | "))
    };

    let mut output = format_row(&columns);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&format!("|-{}-|\n", rule.join("-|-")));
    for row in &rows {
        output.push_str(&format_row(row));
    }
    output
}

/// 图表文本摘要（类目数据画横向条形）
pub fn render_chart(locale: &str, chart: &ChartView) -> String {
    let mut output = format!(
        "[{}: {:?}] {} × {}\n",
        i18n::t_in(locale, "app.chart"),
        chart.kind,
        chart.x_label,
        chart.y_label
    );

    match &chart.data {
        ChartData::Categories { points } => {
            let max = points.iter().map(|p| p.value.abs()).fold(0.0_f64, f64::max);
            let label_width = points
                .iter()
                .map(|p| p.label.chars().count())
                .max()
                .unwrap_or(0);
            for point in points {
                let len = if max > 0.0 {
                    ((point.value.abs() / max) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                let pad = label_width.saturating_sub(point.label.chars().count());
                output.push_str(&format!(
                    "  {}{} {} {:.2}\n",
                    point.label,
                    " ".repeat(pad),
                    "█".repeat(len),
                    point.value
                ));
            }
        }
        ChartData::Grouped { groups, series } => {
            for s in series {
                let values: Vec<String> = groups
                    .iter()
                    .zip(&s.values)
                    .map(|(g, v)| match v {
                        Some(v) => format!("{}={:.2}", g, v),
                        None => format!("{}=-", g),
                    })
                    .collect();
                output.push_str(&format!("  {}: {}\n", s.name, values.join(", ")));
            }
        }
        ChartData::Points { points } => {
            output.push_str(&format!("  n = {}\n", points.len()));
        }
        ChartData::Bins { bins } => {
            let max = bins.iter().map(|b| b.count).max().unwrap_or(0);
            for bin in bins {
                let len = if max > 0 { bin.count * BAR_WIDTH / max } else { 0 };
                output.push_str(&format!(
                    "  [{:>8.2}, {:>8.2}) {} {}\n",
                    bin.lower,
                    bin.upper,
                    "█".repeat(len),
                    bin.count
                ));
            }
        }
        ChartData::Distributions { groups } => {
            for group in groups {
                let min = group.values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = group.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if group.values.is_empty() {
                    output.push_str(&format!("  {}: n = 0\n", group.label));
                } else {
                    output.push_str(&format!(
                        "  {}: n = {}, min = {:.2}, max = {:.2}\n",
                        group.label,
                        group.values.len(),
                        min,
                        max
                    ));
                }
            }
        }
    }

    output
}
