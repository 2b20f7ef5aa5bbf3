// ==========================================
// 超市销售数据看板 - 交易记录领域模型
// ==========================================
// 职责: 原始行记录 / 类型化交易记录 / 派生字段 / DQ 报告
// 用途: 导入层写入,引擎层只读
// ==========================================

use crate::domain::types::{CustomerType, Gender, PaymentMethod, ProductLine};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RawSaleRecord - 字段映射后的中间结构
// ==========================================
// 所有字段可空，由清洗/DQ 阶段决定是否阻断
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSaleRecord {
    // ===== 主键 =====
    pub invoice_id: Option<String>,

    // ===== 维度 =====
    pub branch: Option<String>,
    pub city: Option<String>,
    pub customer_type: Option<String>,
    pub gender: Option<String>,
    pub product_line: Option<String>,
    pub payment: Option<String>,

    // ===== 度量 =====
    pub unit_price: Option<f64>,
    pub quantity: Option<i64>,
    pub tax: Option<f64>,
    pub total: Option<f64>,
    pub cogs: Option<f64>,
    pub gross_margin_pct: Option<f64>,
    pub gross_income: Option<f64>,
    pub rating: Option<f64>,

    // ===== 时间（保留源文本，派生阶段解析）=====
    pub date_raw: Option<String>,
    pub time_raw: Option<String>,

    // ===== 元信息 =====
    pub row_number: usize,
}

// ==========================================
// DerivedFields - 派生时间字段
// ==========================================
// 红线: 仅由 date_raw / time_raw + 日历语言决定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFields {
    pub date: Option<NaiveDate>,         // 归一化日期
    pub day_of_week: Option<String>,     // 星期名称（本地化）
    pub month_name: Option<String>,      // 月份名称（本地化）
    pub hour: Option<u32>,               // 小时 (0-23)
}

// ==========================================
// SaleRecord - 一笔交易
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub invoice_id: String,              // 发票号（唯一）
    pub branch: String,                  // 分店
    pub city: String,                    // 城市
    pub customer_type: CustomerType,     // 客户类型
    pub gender: Gender,                  // 性别
    pub product_line: ProductLine,       // 产品线
    pub unit_price: f64,                 // 单价 (> 0)
    pub quantity: u32,                   // 数量 (> 0)
    pub tax: Option<f64>,                // 税额 (Tax 5%)
    pub total: Option<f64>,              // 含税总额
    pub cogs: Option<f64>,               // 销货成本
    pub gross_margin_pct: Option<f64>,   // 毛利率 (%)
    pub gross_income: Option<f64>,       // 毛收入
    pub rating: Option<f64>,             // 评分 (0-10)
    pub payment: PaymentMethod,          // 支付方式
    pub date_raw: String,                // 日期源文本
    pub time_raw: String,                // 时间源文本
    pub derived: DerivedFields,          // 派生字段（Field Deriver 写入）
    pub row_number: usize,               // 源文件行号
}

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DqLevel {
    Error,    // 错误（阻断该行）
    Warning,  // 警告（允许导入）
    Info,     // 提示（仅记录）
    Conflict, // 冲突（重复发票号，阻断该行）
}

impl DqLevel {
    /// 该级别是否阻断行
    pub fn is_blocking(&self) -> bool {
        matches!(self, DqLevel::Error | DqLevel::Conflict)
    }
}

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,
    pub invoice_id: Option<String>,
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize, // 总行数
    pub success: usize,    // 成功导入
    pub blocked: usize,    // 阻断（ERROR）
    pub warning: usize,    // 警告（WARNING）
    pub conflict: usize,   // 冲突（CONFLICT）
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
}
