// ==========================================
// 超市销售数据看板 - 看板 API
// ==========================================
// 职责: 按页面目录对快照执行业务问题，组装本地化页面视图
// 数据流: SalesSnapshot → aggregate → rank → extreme → 结论 / 图表 / 表格
// 错误策略:
// - 未知页面 → ApiError::NotFound
// - 单个问题失败 → 页面内失败提示，其余问题照常渲染
// ==========================================

use crate::api::dto::{
    CategoryPoint, ChartData, ChartView, Distribution, OverviewView, PageEntry, PageView,
    QuestionOutcome, QuestionView, Series, TableView,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::summary::{
    failure_notice, field_label, format_answer, format_value, reduction_label, summarize_row,
};
use crate::app::snapshot::{SalesSnapshot, SnapshotSource};
use crate::config::page_catalog::{
    Analysis, ChartKind, ChartSpec, PageCatalog, PageKind, PageSpec, QuestionSpec, ValueFormat,
};
use crate::domain::field::{Field, FieldValue};
use crate::engine::aggregator::{aggregate, AggregationResult, GroupKey};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::ranker::{extreme, rank};
use crate::engine::stats;
use crate::i18n;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// 表格数值的默认格式
const TABLE_FORMAT: ValueFormat = ValueFormat::Fixed { decimals: 2 };

/// 渲染参数
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub locale: String,
    pub preview_rows: usize,
    pub histogram_bins: usize,
}

// ==========================================
// DashboardApi
// ==========================================
pub struct DashboardApi {
    snapshot: Arc<SalesSnapshot>,
    catalog: Arc<PageCatalog>,
    settings: RenderSettings,
}

impl DashboardApi {
    /// 创建看板 API
    ///
    /// # 参数
    /// - snapshot: 只读销售快照
    /// - catalog: 页面目录
    /// - settings: 渲染参数（语言 / 预览行数 / 直方图区间数）
    pub fn new(
        snapshot: Arc<SalesSnapshot>,
        catalog: Arc<PageCatalog>,
        settings: RenderSettings,
    ) -> Self {
        Self {
            snapshot,
            catalog,
            settings,
        }
    }

    pub fn locale(&self) -> &str {
        &self.settings.locale
    }

    /// 导航菜单
    pub fn list_pages(&self) -> Vec<PageEntry> {
        self.catalog
            .pages
            .iter()
            .map(|page| PageEntry {
                id: page.id.clone(),
                title: i18n::t_in(self.locale(), &page.title_key()),
            })
            .collect()
    }

    /// 渲染单个页面
    ///
    /// # 返回
    /// - Err(NotFound): 页面 id 不在目录中
    #[instrument(skip(self), fields(locale = %self.settings.locale))]
    pub fn render_page(&self, page_id: &str) -> ApiResult<PageView> {
        let page = self
            .catalog
            .page(page_id)
            .ok_or_else(|| ApiError::NotFound(format!("页面 {}", page_id)))?;

        let view = self.render(page);
        debug!(
            questions = view.questions.len(),
            failed = view.questions.iter().filter(|q| !q.is_answered()).count(),
            "页面渲染完成"
        );
        Ok(view)
    }

    /// 渲染全部页面（按目录顺序）
    pub fn render_all(&self) -> Vec<PageView> {
        self.catalog.pages.iter().map(|p| self.render(p)).collect()
    }

    fn render(&self, page: &PageSpec) -> PageView {
        let locale = self.locale();

        let overview = match page.kind {
            PageKind::Overview => Some(self.overview(page)),
            PageKind::Questions => None,
        };

        let questions = page
            .questions
            .iter()
            .map(|q| self.answer_question(&page.id, q))
            .collect();

        PageView {
            id: page.id.clone(),
            title: i18n::t_in(locale, &page.title_key()),
            locale: locale.to_string(),
            notices: self.page_notices(),
            overview,
            questions,
        }
    }

    /// 页面级提示
    fn page_notices(&self) -> Vec<String> {
        let locale = self.locale();
        let mut notices = Vec::new();

        if let SnapshotSource::Placeholder { reason } = self.snapshot.source() {
            notices.push(i18n::t_with_args_in(
                locale,
                "app.degraded",
                &[("reason", reason.as_str())],
            ));
        }

        let failed_rows = {
            let mut rows: Vec<usize> = self
                .snapshot
                .derivation_failures()
                .iter()
                .filter_map(|e| match e {
                    EngineError::Parse { row, .. } => Some(*row),
                    _ => None,
                })
                .collect();
            rows.sort_unstable();
            rows.dedup();
            rows.len()
        };
        if failed_rows > 0 {
            notices.push(i18n::t_with_args_in(
                locale,
                "app.derivation_failures",
                &[("count", failed_rows.to_string().as_str())],
            ));
        }

        notices
    }

    fn overview(&self, page: &PageSpec) -> OverviewView {
        let locale = self.locale();
        let columns: Vec<Field> = Field::SOURCE_COLUMNS
            .iter()
            .chain(Field::DERIVED_COLUMNS.iter())
            .copied()
            .collect();

        let preview = TableView {
            columns: columns.iter().map(|f| field_label(locale, *f)).collect(),
            rows: self
                .snapshot
                .records()
                .iter()
                .take(self.settings.preview_rows)
                .map(|r| columns.iter().map(|f| f.value(r).to_string()).collect())
                .collect(),
        };

        let source = match self.snapshot.source() {
            SnapshotSource::File { path } => path.clone(),
            SnapshotSource::Placeholder { .. } => "placeholder".to_string(),
        };

        OverviewView {
            intro: i18n::t_in(locale, &page.intro_key()),
            source,
            record_count: self.snapshot.len(),
            record_count_label: i18n::t_with_args_in(
                locale,
                "app.rows",
                &[("count", self.snapshot.len().to_string().as_str())],
            ),
            dq_summary: self.snapshot.dq_report().summary.clone(),
            preview,
        }
    }

    /// 回答单个问题（失败 → 本地化失败提示）
    pub fn answer_question(&self, page_id: &str, question: &QuestionSpec) -> QuestionView {
        let locale = self.locale();
        let outcome = match self.evaluate(page_id, question) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(page = page_id, question = %question.id, error = %e, "问题计算失败");
                QuestionOutcome::Failed {
                    notice: failure_notice(locale, &e),
                    detail: e.to_string(),
                }
            }
        };

        QuestionView {
            id: question.id.clone(),
            title: i18n::t_in(locale, &question.title_key(page_id)),
            outcome,
        }
    }

    fn evaluate(&self, page_id: &str, question: &QuestionSpec) -> EngineResult<QuestionOutcome> {
        match &question.analysis {
            Analysis::Aggregate {
                group_by,
                target,
                reduction,
                order,
            } => {
                let mut result = aggregate(self.snapshot.records(), group_by, *target, *reduction)?;
                if let Some(order) = order {
                    result = rank(&result, order.by, order.direction);
                }

                let summary = match &question.summary {
                    Some(spec) => {
                        let row = extreme(&result, spec.by, spec.direction)?;
                        Some(summarize_row(
                            self.locale(),
                            &question.summary_key(page_id),
                            &row,
                            spec.format,
                        ))
                    }
                    None => None,
                };

                let format = question.summary.map(|s| s.format).unwrap_or(TABLE_FORMAT);
                Ok(QuestionOutcome::Answered {
                    table: self.aggregate_table(&result, format),
                    chart: question
                        .chart
                        .map(|chart| self.aggregate_chart(&result, chart)),
                    summary,
                })
            }
            Analysis::Correlation { x, y } => self.correlation(page_id, question, *x, *y),
        }
    }

    fn correlation(
        &self,
        page_id: &str,
        question: &QuestionSpec,
        x: Field,
        y: Field,
    ) -> EngineResult<QuestionOutcome> {
        let locale = self.locale();
        let pairs: Vec<(f64, f64)> = self
            .snapshot
            .records()
            .iter()
            .filter_map(|r| Some((x.value(r).as_f64()?, y.value(r).as_f64()?)))
            .collect();

        let r = stats::pearson(&pairs)?;
        let format = question
            .summary
            .map(|s| s.format)
            .unwrap_or(ValueFormat::Fixed { decimals: 4 });

        let pair_label = format!("{} × {}", field_label(locale, x), field_label(locale, y));
        let summary = question.summary.map(|spec| {
            format_answer(
                locale,
                &question.summary_key(page_id),
                &pair_label,
                r,
                spec.format,
            )
        });

        let chart = question.chart.map(|chart| ChartView {
            kind: chart.kind,
            x_label: field_label(locale, x),
            y_label: field_label(locale, y),
            data: ChartData::Points { points: pairs },
        });

        Ok(QuestionOutcome::Answered {
            table: TableView {
                columns: vec![
                    field_label(locale, x),
                    field_label(locale, y),
                    i18n::t_in(locale, "reductions.correlation"),
                ],
                rows: vec![vec![
                    field_label(locale, x),
                    field_label(locale, y),
                    format_value(locale, r, format),
                ]],
            },
            chart,
            summary,
        })
    }

    fn value_header(&self, result: &AggregationResult) -> String {
        let locale = self.locale();
        format!(
            "{} ({})",
            reduction_label(locale, result.reduction),
            field_label(locale, result.target)
        )
    }

    fn aggregate_table(&self, result: &AggregationResult, format: ValueFormat) -> TableView {
        let locale = self.locale();
        let mut columns: Vec<String> = result
            .group_by
            .iter()
            .map(|f| field_label(locale, *f))
            .collect();
        columns.push(self.value_header(result));

        let rows = result
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<String> = row.key.parts().iter().map(|v| v.to_string()).collect();
                cells.push(format_value(locale, row.value, format));
                cells
            })
            .collect();

        TableView { columns, rows }
    }

    fn aggregate_chart(&self, result: &AggregationResult, chart: ChartSpec) -> ChartView {
        let locale = self.locale();
        let x_label = result
            .group_by
            .iter()
            .map(|f| field_label(locale, *f))
            .collect::<Vec<_>>()
            .join(" / ");
        let y_label = self.value_header(result);

        let data = match chart.kind {
            ChartKind::GroupedBar if result.group_by.len() == 2 => grouped_series(result),
            ChartKind::Histogram => {
                let field = chart.field.unwrap_or(result.target);
                let values: Vec<f64> = self
                    .snapshot
                    .records()
                    .iter()
                    .filter_map(|r| field.value(r).as_f64())
                    .collect();
                return ChartView {
                    kind: chart.kind,
                    x_label: field_label(locale, field),
                    y_label: i18n::t_in(locale, "reductions.frequency"),
                    data: ChartData::Bins {
                        bins: stats::histogram(&values, self.settings.histogram_bins),
                    },
                };
            }
            ChartKind::Violin => self.distributions(result, chart.field.unwrap_or(result.target)),
            _ => ChartData::Categories {
                points: result
                    .rows
                    .iter()
                    .map(|row| CategoryPoint {
                        label: row.key.to_string(),
                        value: row.value,
                    })
                    .collect(),
            },
        };

        ChartView {
            kind: chart.kind,
            x_label,
            y_label,
            data,
        }
    }

    /// 各分组的原始取值分布（与聚合结果行顺序一致）
    fn distributions(&self, result: &AggregationResult, field: Field) -> ChartData {
        let mut values_by_key: HashMap<GroupKey, Vec<f64>> = HashMap::new();
        for record in self.snapshot.records() {
            let key = GroupKey(result.group_by.iter().map(|f| f.value(record)).collect());
            if let Some(v) = field.value(record).as_f64() {
                values_by_key.entry(key).or_default().push(v);
            }
        }

        ChartData::Distributions {
            groups: result
                .rows
                .iter()
                .map(|row| Distribution {
                    label: row.key.to_string(),
                    values: values_by_key.remove(&row.key).unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// 二级分组 → groups × series 矩阵（均保持首次出现顺序）
fn grouped_series(result: &AggregationResult) -> ChartData {
    let mut groups: Vec<FieldValue> = Vec::new();
    let mut series_names: Vec<FieldValue> = Vec::new();
    for row in &result.rows {
        if let [group, series] = row.key.parts() {
            if !groups.contains(group) {
                groups.push(group.clone());
            }
            if !series_names.contains(series) {
                series_names.push(series.clone());
            }
        }
    }

    let series = series_names
        .iter()
        .map(|name| Series {
            name: name.to_string(),
            values: groups
                .iter()
                .map(|group| result.value_of(&[group.clone(), name.clone()]))
                .collect(),
        })
        .collect();

    ChartData::Grouped {
        groups: groups.iter().map(|g| g.to_string()).collect(),
        series,
    }
}
