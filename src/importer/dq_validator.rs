// ==========================================
// 超市销售数据看板 - 数据质量校验器实现
// ==========================================
// 职责: DQ 校验 + DQ 报告生成
// 级别:
//   ERROR    - 发票号缺失 / 维度缺失 / 枚举取值未知 / 单价或数量非正（阻断该行）
//   CONFLICT - 发票号重复（阻断后出现的行）
//   WARNING  - 评分越界 / 度量缺失（允许导入）
// ==========================================

use crate::domain::sale::{DqLevel, DqReport, DqSummary, DqViolation, RawSaleRecord};
use crate::domain::types::{CustomerType, Gender, PaymentMethod, ProductLine};
use crate::importer::sales_importer_trait::DqValidator as DqValidatorTrait;
use std::collections::HashSet;

pub struct DqValidator {
    rating_range: (f64, f64), // 评分允许区间（闭区间）
}

impl DqValidator {
    pub fn new(rating_range: (f64, f64)) -> Self {
        Self { rating_range }
    }

    fn violation(
        record: &RawSaleRecord,
        level: DqLevel,
        field: &str,
        message: String,
    ) -> DqViolation {
        DqViolation {
            row_number: record.row_number,
            invoice_id: record.invoice_id.clone(),
            level,
            field: field.to_string(),
            message,
        }
    }

    /// 封闭枚举字段：缺失或取值未知均为 ERROR
    fn check_closed_set(
        record: &RawSaleRecord,
        field: &str,
        value: Option<&str>,
        is_known: impl Fn(&str) -> bool,
        violations: &mut Vec<DqViolation>,
    ) {
        match value {
            None => violations.push(Self::violation(
                record,
                DqLevel::Error,
                field,
                format!("{} 缺失", field),
            )),
            Some(v) if !is_known(v) => violations.push(Self::violation(
                record,
                DqLevel::Error,
                field,
                format!("未知取值: {}", v),
            )),
            Some(_) => {}
        }
    }
}

impl Default for DqValidator {
    fn default() -> Self {
        Self::new((0.0, 10.0))
    }
}

impl DqValidatorTrait for DqValidator {
    /// 校验主键（invoice_id 非空且唯一）
    fn validate_primary_key(&self, records: &[RawSaleRecord]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen_ids = HashSet::new();

        for record in records {
            let Some(id) = record.invoice_id.as_ref() else {
                violations.push(Self::violation(
                    record,
                    DqLevel::Error,
                    "invoice_id",
                    "发票号缺失".to_string(),
                ));
                continue;
            };

            if !seen_ids.insert(id.clone()) {
                violations.push(Self::violation(
                    record,
                    DqLevel::Conflict,
                    "invoice_id",
                    format!("重复发票号: {}", id),
                ));
            }
        }

        violations
    }

    /// 校验必填字段
    fn validate_required_fields(&self, record: &RawSaleRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        if record.branch.is_none() {
            violations.push(Self::violation(
                record,
                DqLevel::Error,
                "branch",
                "分店缺失".to_string(),
            ));
        }
        if record.city.is_none() {
            violations.push(Self::violation(
                record,
                DqLevel::Error,
                "city",
                "城市缺失".to_string(),
            ));
        }

        Self::check_closed_set(
            record,
            "customer_type",
            record.customer_type.as_deref(),
            |v| CustomerType::from_source(v).is_some(),
            &mut violations,
        );
        Self::check_closed_set(
            record,
            "gender",
            record.gender.as_deref(),
            |v| Gender::from_source(v).is_some(),
            &mut violations,
        );
        Self::check_closed_set(
            record,
            "product_line",
            record.product_line.as_deref(),
            |v| ProductLine::from_source(v).is_some(),
            &mut violations,
        );
        Self::check_closed_set(
            record,
            "payment",
            record.payment.as_deref(),
            |v| PaymentMethod::from_source(v).is_some(),
            &mut violations,
        );

        if record.unit_price.is_none() {
            violations.push(Self::violation(
                record,
                DqLevel::Error,
                "unit_price",
                "单价缺失".to_string(),
            ));
        }
        if record.quantity.is_none() {
            violations.push(Self::violation(
                record,
                DqLevel::Error,
                "quantity",
                "数量缺失".to_string(),
            ));
        }

        // 度量缺失：聚合时跳过，不阻断
        for (field, value) in [
            ("total", record.total),
            ("tax", record.tax),
            ("rating", record.rating),
        ] {
            if value.is_none() {
                violations.push(Self::violation(
                    record,
                    DqLevel::Warning,
                    field,
                    format!("{} 缺失，聚合时跳过", field),
                ));
            }
        }

        // 日期/时间缺失：派生字段将为空
        if record.date_raw.is_none() || record.time_raw.is_none() {
            violations.push(Self::violation(
                record,
                DqLevel::Info,
                "date,time",
                "日期或时间缺失，派生字段为空".to_string(),
            ));
        }

        violations
    }

    /// 校验数值范围
    fn validate_ranges(&self, record: &RawSaleRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        if let Some(price) = record.unit_price {
            if price <= 0.0 {
                violations.push(Self::violation(
                    record,
                    DqLevel::Error,
                    "unit_price",
                    format!("单价 <= 0: {:.2}", price),
                ));
            }
        }

        if let Some(quantity) = record.quantity {
            if quantity <= 0 || quantity > i64::from(u32::MAX) {
                violations.push(Self::violation(
                    record,
                    DqLevel::Error,
                    "quantity",
                    format!("数量越界: {}", quantity),
                ));
            }
        }

        if let Some(rating) = record.rating {
            let (min, max) = self.rating_range;
            if rating < min || rating > max {
                violations.push(Self::violation(
                    record,
                    DqLevel::Warning,
                    "rating",
                    format!("评分越界 ({:.1} 不在 [{:.1}, {:.1}])", rating, min, max),
                ));
            }
        }

        for (field, value) in [("tax", record.tax), ("total", record.total)] {
            if let Some(v) = value {
                if v < 0.0 {
                    violations.push(Self::violation(
                        record,
                        DqLevel::Warning,
                        field,
                        format!("{} 为负数: {:.2}", field, v),
                    ));
                }
            }
        }

        violations
    }

    /// 生成 DQ 报告
    ///
    /// success = 总行数 - 被阻断的行数（同一行多条阻断违规只计一次）
    fn generate_dq_report(&self, total_rows: usize, violations: Vec<DqViolation>) -> DqReport {
        let blocked_rows: HashSet<usize> = violations
            .iter()
            .filter(|v| v.level.is_blocking())
            .map(|v| v.row_number)
            .collect();

        let count_level = |level: DqLevel| violations.iter().filter(|v| v.level == level).count();

        DqReport {
            summary: DqSummary {
                total_rows,
                success: total_rows.saturating_sub(blocked_rows.len()),
                blocked: count_level(DqLevel::Error),
                warning: count_level(DqLevel::Warning),
                conflict: count_level(DqLevel::Conflict),
            },
            violations,
        }
    }
}
