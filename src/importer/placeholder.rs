// ==========================================
// 超市销售数据看板 - 占位数据生成
// ==========================================
// 职责: 数据源不可用时生成确定性的合成交易表（降级模式）
// 红线: 不使用随机数，同样的行数 → 同样的表
// ==========================================

use crate::domain::sale::{DerivedFields, SaleRecord};
use crate::domain::types::{CustomerType, Gender, PaymentMethod, ProductLine};
use chrono::{Duration, NaiveDate};
use tracing::debug;

/// 默认占位行数
pub const DEFAULT_PLACEHOLDER_ROWS: usize = 100;

const BRANCHES: [(&str, &str); 3] = [("A", "Yangon"), ("B", "Mandalay"), ("C", "Naypyitaw")];

/// 税率 5%
const TAX_RATE: f64 = 0.05;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 生成占位交易表
///
/// # 参数
/// - rows: 行数
///
/// # 返回
/// 未派生时间字段的交易记录（日期从 2023-01-01 起逐日递增）
pub fn placeholder_records(rows: usize) -> Vec<SaleRecord> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();

    let records: Vec<SaleRecord> = (0..rows)
        .map(|i| {
            let (branch, city) = BRANCHES[i % BRANCHES.len()];
            let unit_price = round2(10.0 + ((i * 37) % 90) as f64 + 0.49);
            let quantity = 1 + ((i * 7) % 9) as u32;
            let cogs = round2(unit_price * f64::from(quantity));
            let tax = round2(cogs * TAX_RATE);
            let minutes = 10 * 60 + (i * 17) % (11 * 60);

            SaleRecord {
                invoice_id: format!("PH-{:04}", i + 1),
                branch: branch.to_string(),
                city: city.to_string(),
                customer_type: CustomerType::ALL[i % CustomerType::ALL.len()],
                gender: Gender::ALL[(i / 2) % Gender::ALL.len()],
                product_line: ProductLine::ALL[(i * 5) % ProductLine::ALL.len()],
                unit_price,
                quantity,
                tax: Some(tax),
                total: Some(round2(cogs + tax)),
                cogs: Some(cogs),
                gross_margin_pct: Some(4.761904762),
                gross_income: Some(tax),
                rating: Some(4.0 + ((i * 13) % 61) as f64 / 10.0),
                payment: PaymentMethod::ALL[(i / 3) % PaymentMethod::ALL.len()],
                date_raw: (start + Duration::days(i as i64))
                    .format("%Y-%m-%d")
                    .to_string(),
                time_raw: format!("{:02}:{:02}", minutes / 60, minutes % 60),
                derived: DerivedFields::default(),
                row_number: i + 2,
            }
        })
        .collect();

    debug!(rows = records.len(), "占位数据生成完成");
    records
}
