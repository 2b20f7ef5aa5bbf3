// ==========================================
// 超市销售数据看板 - 页面目录
// ==========================================
// 职责: 页面 / 业务问题 / 分析口径 / 图表 / 结论模板的声明式配置
// 默认目录: 首页 + 销售 / 客户 / 满意度 / 税费与利润 / 时间趋势（共 19 个问题）
// 自定义: JSON 文件整体替换默认目录
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::field::Field;
use crate::engine::{Direction, RankBy, Reduction};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

// ==========================================
// 分析口径
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Analysis {
    /// 分组聚合（可选排序）
    Aggregate {
        group_by: Vec<Field>,
        target: Field,
        reduction: Reduction,
        #[serde(default)]
        order: Option<Order>,
    },
    /// 两个数值字段的 Pearson 相关系数
    Correlation { x: Field, y: Field },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub by: RankBy,
    pub direction: Direction,
}

// ==========================================
// 图表
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    BarH,
    GroupedBar,
    Line,
    Scatter,
    Histogram,
    Treemap,
    Violin,
    Lollipop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    /// 直方图的取值字段；小提琴图的分布字段（默认取分析目标字段）
    #[serde(default)]
    pub field: Option<Field>,
}

// ==========================================
// 结论模板
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueFormat {
    /// 货币（本地化符号与分隔符）
    Currency { decimals: usize },
    /// 整数（千分位）
    Integer,
    /// 定点小数
    Fixed { decimals: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummarySpec {
    #[serde(default = "default_summary_by")]
    pub by: RankBy,
    #[serde(default = "default_summary_direction")]
    pub direction: Direction,
    pub format: ValueFormat,
}

fn default_summary_by() -> RankBy {
    RankBy::Value
}

fn default_summary_direction() -> Direction {
    Direction::Desc
}

// ==========================================
// 问题 / 页面 / 目录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub id: String,
    pub analysis: Analysis,
    #[serde(default)]
    pub chart: Option<ChartSpec>,
    #[serde(default)]
    pub summary: Option<SummarySpec>,
}

impl QuestionSpec {
    /// 问题标题 i18n 键
    pub fn title_key(&self, page_id: &str) -> String {
        format!("questions.{}.{}.title", page_id, self.id)
    }

    /// 结论模板 i18n 键
    pub fn summary_key(&self, page_id: &str) -> String {
        format!("questions.{}.{}.summary", page_id, self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// 首页: 简介 + 数据预览
    Overview,
    /// 业务问题页
    Questions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub id: String,
    pub kind: PageKind,
    #[serde(default)]
    pub questions: Vec<QuestionSpec>,
}

impl PageSpec {
    pub fn title_key(&self) -> String {
        format!("pages.{}.title", self.id)
    }

    pub fn intro_key(&self) -> String {
        format!("pages.{}.intro", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCatalog {
    pub pages: Vec<PageSpec>,
}

impl PageCatalog {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let catalog: PageCatalog =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        catalog.validate()?;
        debug!(path = %path.display(), pages = catalog.pages.len(), "页面目录加载完成");
        Ok(catalog)
    }

    /// 加载自定义目录，失败或未指定时使用默认目录
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            None => Self::default(),
            Some(p) => Self::load(p).unwrap_or_else(|e| {
                warn!(error = %e, "页面目录无效，使用默认目录");
                Self::default()
            }),
        }
    }

    /// 校验: 至少一个页面；页面 id 唯一；页内问题 id 唯一；首页不带问题
    pub fn validate(&self) -> ConfigResult<()> {
        if self.pages.is_empty() {
            return Err(ConfigError::InvalidCatalog("页面列表为空".to_string()));
        }

        let mut page_ids = HashSet::new();
        for page in &self.pages {
            if !page_ids.insert(page.id.as_str()) {
                return Err(ConfigError::InvalidCatalog(format!("重复页面: {}", page.id)));
            }
            if page.kind == PageKind::Overview && !page.questions.is_empty() {
                return Err(ConfigError::InvalidCatalog(format!(
                    "首页不应包含问题: {}",
                    page.id
                )));
            }

            let mut question_ids = HashSet::new();
            for question in &page.questions {
                if !question_ids.insert(question.id.as_str()) {
                    return Err(ConfigError::InvalidCatalog(format!(
                        "重复问题: {}.{}",
                        page.id, question.id
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn page(&self, id: &str) -> Option<&PageSpec> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.pages.iter().map(|p| p.questions.len()).sum()
    }
}

// ==========================================
// 默认目录
// ==========================================
fn aggregate(group_by: &[Field], target: Field, reduction: Reduction, order: Option<Order>) -> Analysis {
    Analysis::Aggregate {
        group_by: group_by.to_vec(),
        target,
        reduction,
        order,
    }
}

fn by_value(direction: Direction) -> Option<Order> {
    Some(Order {
        by: RankBy::Value,
        direction,
    })
}

fn chart(kind: ChartKind) -> Option<ChartSpec> {
    Some(ChartSpec { kind, field: None })
}

fn highest(format: ValueFormat) -> Option<SummarySpec> {
    Some(SummarySpec {
        by: RankBy::Value,
        direction: Direction::Desc,
        format,
    })
}

fn question(
    id: &str,
    analysis: Analysis,
    chart: Option<ChartSpec>,
    summary: Option<SummarySpec>,
) -> QuestionSpec {
    QuestionSpec {
        id: id.to_string(),
        analysis,
        chart,
        summary,
    }
}

const CURRENCY: ValueFormat = ValueFormat::Currency { decimals: 2 };
const INTEGER: ValueFormat = ValueFormat::Integer;

impl Default for PageCatalog {
    fn default() -> Self {
        use ChartKind::*;
        use Direction::*;
        use Field::*;

        let sales = vec![
            question(
                "gross_income_by_branch",
                aggregate(&[Branch], GrossIncome, Reduction::Sum, None),
                chart(Bar),
                highest(CURRENCY),
            ),
            question(
                "mean_total_by_branch",
                aggregate(&[Branch], Total, Reduction::Mean, by_value(Desc)),
                chart(Bar),
                highest(CURRENCY),
            ),
            question(
                "quantity_by_product_line",
                aggregate(&[ProductLine], Quantity, Reduction::Sum, by_value(Desc)),
                chart(Bar),
                highest(INTEGER),
            ),
            question(
                "transactions_by_weekday",
                aggregate(&[DayOfWeek], InvoiceId, Reduction::Count, by_value(Desc)),
                chart(Bar),
                highest(INTEGER),
            ),
            question(
                "revenue_by_month",
                aggregate(&[Month], Total, Reduction::Sum, by_value(Desc)),
                chart(Line),
                highest(CURRENCY),
            ),
        ];

        let customers = vec![
            question(
                "purchases_by_branch_gender",
                aggregate(&[Branch, Gender], InvoiceId, Reduction::Count, None),
                chart(GroupedBar),
                highest(INTEGER),
            ),
            question(
                "mean_total_by_customer_type",
                aggregate(&[CustomerType], Total, Reduction::Mean, None),
                chart(Bar),
                highest(CURRENCY),
            ),
            question(
                "mean_total_by_city",
                aggregate(&[City], Total, Reduction::Mean, None),
                chart(Bar),
                highest(CURRENCY),
            ),
            question(
                "payment_usage",
                aggregate(&[Payment], InvoiceId, Reduction::Count, None),
                chart(Treemap),
                highest(INTEGER),
            ),
            question(
                "mean_total_by_payment",
                aggregate(&[Payment], Total, Reduction::Mean, None),
                chart(Violin),
                highest(CURRENCY),
            ),
        ];

        let satisfaction = vec![
            question(
                "mean_rating",
                aggregate(&[], Rating, Reduction::Mean, None),
                Some(ChartSpec {
                    kind: Histogram,
                    field: Some(Rating),
                }),
                highest(ValueFormat::Fixed { decimals: 2 }),
            ),
            question(
                "rating_vs_total",
                Analysis::Correlation { x: Total, y: Rating },
                chart(Scatter),
                highest(ValueFormat::Fixed { decimals: 4 }),
            ),
            question(
                "rating_by_product_line",
                aggregate(&[ProductLine], Rating, Reduction::Mean, by_value(Desc)),
                chart(Lollipop),
                highest(ValueFormat::Fixed { decimals: 2 }),
            ),
        ];

        let taxes = vec![
            question(
                "tax_by_city",
                aggregate(&[City], Tax, Reduction::Sum, by_value(Desc)),
                chart(Lollipop),
                highest(CURRENCY),
            ),
            question(
                "gross_income_by_product_line",
                aggregate(&[ProductLine], GrossIncome, Reduction::Sum, by_value(Desc)),
                chart(BarH),
                highest(CURRENCY),
            ),
            question(
                "ticket_by_city",
                aggregate(&[City], Total, Reduction::Mean, by_value(Asc)),
                chart(BarH),
                highest(CURRENCY),
            ),
        ];

        let temporal = vec![
            question(
                "gross_income_by_month",
                aggregate(&[Month], GrossIncome, Reduction::Mean, by_value(Desc)),
                chart(Bar),
                highest(CURRENCY),
            ),
            question(
                "total_stddev_by_hour",
                aggregate(
                    &[Hour],
                    Total,
                    Reduction::StdDev,
                    Some(Order {
                        by: RankBy::Key,
                        direction: Asc,
                    }),
                ),
                chart(Line),
                highest(CURRENCY),
            ),
            question(
                "transactions_by_weekday",
                aggregate(&[DayOfWeek], InvoiceId, Reduction::Count, by_value(Desc)),
                chart(Bar),
                highest(INTEGER),
            ),
        ];

        let page = |id: &str, kind: PageKind, questions: Vec<QuestionSpec>| PageSpec {
            id: id.to_string(),
            kind,
            questions,
        };

        PageCatalog {
            pages: vec![
                page("home", PageKind::Overview, Vec::new()),
                page("sales", PageKind::Questions, sales),
                page("customers", PageKind::Questions, customers),
                page("satisfaction", PageKind::Questions, satisfaction),
                page("taxes", PageKind::Questions, taxes),
                page("temporal", PageKind::Questions, temporal),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_default_catalog_shape() {
        let catalog = PageCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.pages.len(), 6);
        assert_eq!(catalog.question_count(), 19);
        assert_eq!(catalog.pages[0].kind, PageKind::Overview);
        assert!(catalog.page("temporal").is_some());
        assert!(catalog.page("missing").is_none());
    }

    #[test]
    fn test_default_catalog_chart_kinds() {
        let catalog = PageCatalog::default();
        let kind_of = |page: &str, id: &str| {
            catalog
                .page(page)
                .and_then(|p| p.questions.iter().find(|q| q.id == id))
                .and_then(|q| q.chart)
                .map(|c| c.kind)
        };
        assert_eq!(kind_of("sales", "revenue_by_month"), Some(ChartKind::Line));
        assert_eq!(kind_of("taxes", "tax_by_city"), Some(ChartKind::Lollipop));
        assert_eq!(
            kind_of("taxes", "gross_income_by_product_line"),
            Some(ChartKind::BarH)
        );
    }

    #[test]
    fn test_default_catalog_has_translations() {
        let catalog = PageCatalog::default();
        for locale in ["pt-BR", "en", "zh-CN"] {
            for page in &catalog.pages {
                let mut keys = vec![page.title_key()];
                for q in &page.questions {
                    keys.push(q.title_key(&page.id));
                    keys.push(q.summary_key(&page.id));
                }
                for key in keys {
                    let text = crate::i18n::t_in(locale, &key);
                    assert!(!text.contains(&key), "{} 缺少 {}", locale, key);
                }
            }
        }
    }

    #[test]
    fn test_load_custom_catalog() {
        let json = r#"{
            "pages": [
                {"id": "home", "kind": "overview"},
                {"id": "sales", "kind": "questions", "questions": [
                    {
                        "id": "gross_income_by_branch",
                        "analysis": {"type": "aggregate", "group_by": ["branch"], "target": "gross_income", "reduction": "sum"},
                        "chart": {"kind": "bar"},
                        "summary": {"format": {"kind": "currency", "decimals": 2}}
                    },
                    {
                        "id": "total_stddev_by_hour",
                        "analysis": {"type": "aggregate", "group_by": ["hour"], "target": "total", "reduction": "stddev",
                                     "order": {"by": "key", "direction": "asc"}}
                    }
                ]}
            ]
        }"#;
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", json).unwrap();

        let catalog = PageCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.question_count(), 2);

        let sales = catalog.page("sales").unwrap();
        let summary = sales.questions[0].summary.unwrap();
        assert_eq!(summary.by, RankBy::Value);
        assert_eq!(summary.direction, Direction::Desc);
        assert!(matches!(
            sales.questions[1].analysis,
            Analysis::Aggregate {
                reduction: Reduction::StdDev,
                order: Some(Order { by: RankBy::Key, direction: Direction::Asc }),
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_page_rejected() {
        let catalog = PageCatalog {
            pages: vec![
                PageSpec {
                    id: "home".to_string(),
                    kind: PageKind::Overview,
                    questions: Vec::new(),
                },
                PageSpec {
                    id: "home".to_string(),
                    kind: PageKind::Questions,
                    questions: Vec::new(),
                },
            ],
        };
        assert!(matches!(catalog.validate(), Err(ConfigError::InvalidCatalog(_))));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let catalog = PageCatalog::load_or_default(Some(Path::new("no_such_catalog.json")));
        assert_eq!(catalog, PageCatalog::default());
    }

    #[test]
    fn test_default_catalog_survives_json() {
        let catalog = PageCatalog::default();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: PageCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }
}
