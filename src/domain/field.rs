// ==========================================
// 超市销售数据看板 - 字段选择器
// ==========================================
// 职责: 以枚举替代按列名字符串访问，非法字段在编译期即被拒绝
// 说明: Field::value 是聚合/排序/图表读取记录的唯一入口
// ==========================================

use crate::domain::sale::SaleRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// ==========================================
// Field - 源字段 + 派生字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    InvoiceId,
    Branch,
    City,
    CustomerType,
    Gender,
    ProductLine,
    UnitPrice,
    Quantity,
    Tax,
    Total,
    Cogs,
    GrossMarginPct,
    GrossIncome,
    Rating,
    Payment,
    DateRaw,
    TimeRaw,
    // ===== 派生字段 =====
    Date,
    DayOfWeek,
    Month,
    Hour,
}

impl Field {
    /// 原始表格展示用列顺序
    pub const SOURCE_COLUMNS: [Field; 17] = [
        Field::InvoiceId,
        Field::Branch,
        Field::City,
        Field::CustomerType,
        Field::Gender,
        Field::ProductLine,
        Field::UnitPrice,
        Field::Quantity,
        Field::Tax,
        Field::Total,
        Field::DateRaw,
        Field::TimeRaw,
        Field::Payment,
        Field::Cogs,
        Field::GrossMarginPct,
        Field::GrossIncome,
        Field::Rating,
    ];

    /// 派生后表格展示用列顺序
    pub const DERIVED_COLUMNS: [Field; 4] =
        [Field::Date, Field::DayOfWeek, Field::Month, Field::Hour];

    /// i18n 键名（与 serde 名称一致）
    pub fn key(&self) -> &'static str {
        match self {
            Field::InvoiceId => "invoice_id",
            Field::Branch => "branch",
            Field::City => "city",
            Field::CustomerType => "customer_type",
            Field::Gender => "gender",
            Field::ProductLine => "product_line",
            Field::UnitPrice => "unit_price",
            Field::Quantity => "quantity",
            Field::Tax => "tax",
            Field::Total => "total",
            Field::Cogs => "cogs",
            Field::GrossMarginPct => "gross_margin_pct",
            Field::GrossIncome => "gross_income",
            Field::Rating => "rating",
            Field::Payment => "payment",
            Field::DateRaw => "date_raw",
            Field::TimeRaw => "time_raw",
            Field::Date => "date",
            Field::DayOfWeek => "day_of_week",
            Field::Month => "month",
            Field::Hour => "hour",
        }
    }

    /// 是否为数值字段（可参与 sum/mean/stddev）
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::UnitPrice
                | Field::Quantity
                | Field::Tax
                | Field::Total
                | Field::Cogs
                | Field::GrossMarginPct
                | Field::GrossIncome
                | Field::Rating
                | Field::Hour
        )
    }

    /// 读取记录中该字段的值
    pub fn value(&self, record: &SaleRecord) -> FieldValue {
        match self {
            Field::InvoiceId => FieldValue::Text(record.invoice_id.clone()),
            Field::Branch => FieldValue::Text(record.branch.clone()),
            Field::City => FieldValue::Text(record.city.clone()),
            Field::CustomerType => FieldValue::Text(record.customer_type.to_string()),
            Field::Gender => FieldValue::Text(record.gender.to_string()),
            Field::ProductLine => FieldValue::Text(record.product_line.to_string()),
            Field::UnitPrice => FieldValue::Decimal(record.unit_price),
            Field::Quantity => FieldValue::Integer(i64::from(record.quantity)),
            Field::Tax => FieldValue::from_decimal(record.tax),
            Field::Total => FieldValue::from_decimal(record.total),
            Field::Cogs => FieldValue::from_decimal(record.cogs),
            Field::GrossMarginPct => FieldValue::from_decimal(record.gross_margin_pct),
            Field::GrossIncome => FieldValue::from_decimal(record.gross_income),
            Field::Rating => FieldValue::from_decimal(record.rating),
            Field::Payment => FieldValue::Text(record.payment.to_string()),
            Field::DateRaw => FieldValue::Text(record.date_raw.clone()),
            Field::TimeRaw => FieldValue::Text(record.time_raw.clone()),
            Field::Date => record
                .derived
                .date
                .map(FieldValue::Date)
                .unwrap_or(FieldValue::Missing),
            Field::DayOfWeek => record
                .derived
                .day_of_week
                .clone()
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Missing),
            Field::Month => record
                .derived
                .month_name
                .clone()
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Missing),
            Field::Hour => record
                .derived
                .hour
                .map(|h| FieldValue::Integer(i64::from(h)))
                .unwrap_or(FieldValue::Missing),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ==========================================
// FieldValue - 单元格值
// ==========================================
// Decimal 按位比较/哈希，保证可作为分组键
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Decimal(f64),
    Date(NaiveDate),
    Text(String),
    Missing,
}

impl FieldValue {
    fn from_decimal(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => FieldValue::Decimal(v),
            _ => FieldValue::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// 数值视图；文本/日期返回 None
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Integer(_) | FieldValue::Decimal(_) => 1,
            FieldValue::Date(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }

    /// 全序比较（排序用）: Missing < 数值 < 日期 < 文本
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.rank().cmp(&b.rank()),
            },
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Decimal(a), FieldValue::Decimal(b)) => a.to_bits() == b.to_bits(),
            (FieldValue::Date(a), FieldValue::Date(b)) => a == b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Missing, FieldValue::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            FieldValue::Integer(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            FieldValue::Decimal(v) => {
                1u8.hash(state);
                v.to_bits().hash(state);
            }
            FieldValue::Date(d) => d.hash(state),
            FieldValue::Text(s) => s.hash(state),
            FieldValue::Missing => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Decimal(v) => write!(f, "{}", v),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Missing => Ok(()),
        }
    }
}
