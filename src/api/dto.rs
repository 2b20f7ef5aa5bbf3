// ==========================================
// 超市销售数据看板 - API 数据传输对象
// ==========================================
// 职责: 页面视图结构（表格 / 图表描述 / 结论 / 失败提示）
// 说明: 所有文本均已按请求语言本地化，渲染端只负责排版
// ==========================================

use crate::config::page_catalog::ChartKind;
use crate::domain::sale::DqSummary;
use crate::engine::stats::HistogramBin;
use serde::Serialize;

/// 导航菜单项
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageEntry {
    pub id: String,
    pub title: String,
}

/// 单页视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub id: String,
    pub title: String,
    pub locale: String,
    /// 页面级提示（降级模式 / 派生失败）
    pub notices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<OverviewView>,
    pub questions: Vec<QuestionView>,
}

/// 首页概览
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub intro: String,
    pub source: String,
    pub record_count: usize,
    pub record_count_label: String,
    pub dq_summary: DqSummary,
    pub preview: TableView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub title: String,
    pub outcome: QuestionOutcome,
}

impl QuestionView {
    pub fn is_answered(&self) -> bool {
        matches!(self.outcome, QuestionOutcome::Answered { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuestionOutcome {
    Answered {
        table: TableView,
        #[serde(skip_serializing_if = "Option::is_none")]
        chart: Option<ChartView>,
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },
    /// 本问题失败，页面其余问题照常渲染
    Failed { notice: String, detail: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    /// 类目 → 数值
    Categories { points: Vec<CategoryPoint> },
    /// 二级分组：groups × series 矩阵（缺失组合为 None）
    Grouped {
        groups: Vec<String>,
        series: Vec<Series>,
    },
    /// 散点
    Points { points: Vec<(f64, f64)> },
    /// 直方图
    Bins { bins: Vec<HistogramBin> },
    /// 分组原始分布（小提琴图）
    Distributions { groups: Vec<Distribution> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub label: String,
    pub values: Vec<f64>,
}
