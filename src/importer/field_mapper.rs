// ==========================================
// 超市销售数据看板 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射 + 类型转换
// 列名匹配: 忽略大小写、空白与标点（"Tax 5%" ≡ "tax5"）
// ==========================================

use crate::domain::sale::RawSaleRecord;
use crate::importer::data_cleaner::is_null_marker;
use crate::importer::error::{DataSourceError, ImportResult};
use crate::importer::sales_importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

/// 标准列 → 可接受的源列名（已归一化）
const COLUMN_ALIASES: &[(&str, &[&str])] = &[
    ("Invoice ID", &["invoiceid", "invoice", "invoiceno"]),
    ("Branch", &["branch"]),
    ("City", &["city"]),
    ("Customer type", &["customertype", "customer"]),
    ("Gender", &["gender"]),
    ("Product line", &["productline", "product"]),
    ("Unit price", &["unitprice", "price"]),
    ("Quantity", &["quantity", "qty"]),
    ("Tax 5%", &["tax5", "tax"]),
    ("Total", &["total"]),
    ("Date", &["date"]),
    ("Time", &["time"]),
    ("Payment", &["payment", "paymentmethod"]),
    ("cogs", &["cogs"]),
    ("gross margin percentage", &["grossmarginpercentage", "grossmargin"]),
    ("gross income", &["grossincome"]),
    ("Rating", &["rating"]),
];

/// 缺失即无法导入的列
const REQUIRED_COLUMNS: &[&str] = &[
    "Invoice ID",
    "Branch",
    "City",
    "Customer type",
    "Gender",
    "Product line",
    "Unit price",
    "Quantity",
    "Total",
    "Date",
    "Time",
    "Payment",
];

/// 列名归一化
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

fn aliases_of(column: &str) -> &'static [&'static str] {
    COLUMN_ALIASES
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_raw_sale(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawSaleRecord> {
        let row: HashMap<String, &str> = row
            .iter()
            .map(|(k, v)| (normalize_header(k), v.as_str()))
            .collect();

        Ok(RawSaleRecord {
            // 主键
            invoice_id: self.get_string(&row, "Invoice ID"),

            // 维度
            branch: self.get_string(&row, "Branch"),
            city: self.get_string(&row, "City"),
            customer_type: self.get_string(&row, "Customer type"),
            gender: self.get_string(&row, "Gender"),
            product_line: self.get_string(&row, "Product line"),
            payment: self.get_string(&row, "Payment"),

            // 度量
            unit_price: self.parse_f64(&row, "Unit price", row_number)?,
            quantity: self.parse_quantity(&row, row_number)?,
            tax: self.parse_f64(&row, "Tax 5%", row_number)?,
            total: self.parse_f64(&row, "Total", row_number)?,
            cogs: self.parse_f64(&row, "cogs", row_number)?,
            gross_margin_pct: self.parse_f64(&row, "gross margin percentage", row_number)?,
            gross_income: self.parse_f64(&row, "gross income", row_number)?,
            rating: self.parse_f64(&row, "Rating", row_number)?,

            // 时间源文本
            date_raw: self.get_string(&row, "Date"),
            time_raw: self.get_string(&row, "Time"),

            row_number,
        })
    }

    fn missing_required_columns(&self, headers: &[String]) -> Vec<&'static str> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| {
                !aliases_of(column)
                    .iter()
                    .any(|alias| normalized.iter().any(|h| h == alias))
            })
            .collect()
    }
}

impl FieldMapper {
    /// 提取字符串字段，按别名顺序取第一个非空值
    fn get_string(&self, row: &HashMap<String, &str>, column: &str) -> Option<String> {
        for alias in aliases_of(column) {
            if let Some(v) = row.get(*alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 提取数值字段文本，空值占位（nan / N/A / ...）视为缺失
    fn get_numeric_text(&self, row: &HashMap<String, &str>, column: &str) -> Option<String> {
        self.get_string(row, column).filter(|v| !is_null_marker(v))
    }

    /// 解析浮点数（允许千分位逗号与货币符号）
    fn parse_f64(
        &self,
        row: &HashMap<String, &str>,
        column: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_numeric_text(row, column) {
            None => Ok(None),
            Some(value) => {
                let cleaned: String = value
                    .chars()
                    .filter(|c| !matches!(c, ',' | '$' | ' '))
                    .collect();
                cleaned
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(Some)
                    .ok_or_else(|| DataSourceError::TypeConversionError {
                        row: row_number,
                        field: column.to_string(),
                        message: format!("无法解析为浮点数: {}", value),
                    })
            }
        }
    }

    /// 解析数量（整数；Excel 单元格可能带 ".0"）
    fn parse_quantity(
        &self,
        row: &HashMap<String, &str>,
        row_number: usize,
    ) -> ImportResult<Option<i64>> {
        let Some(value) = self.get_numeric_text(row, "Quantity") else {
            return Ok(None);
        };

        if let Ok(q) = value.parse::<i64>() {
            return Ok(Some(q));
        }

        match value.parse::<f64>() {
            Ok(q) if q.is_finite() && q.fract() == 0.0 => Ok(Some(q as i64)),
            _ => Err(DataSourceError::TypeConversionError {
                row: row_number,
                field: "Quantity".to_string(),
                message: format!("无法解析为整数: {}", value),
            }),
        }
    }
}
