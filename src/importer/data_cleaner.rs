// ==========================================
// 超市销售数据看板 - 数据清洗器实现
// ==========================================
// 职责: TRIM / UPPER / NULL 标准化
// 说明: 只做文本层面的规整，取值合法性交给 DqValidator
// ==========================================

use crate::domain::sale::RawSaleRecord;
use crate::importer::sales_importer_trait::DataCleaner as DataCleanerTrait;

/// 视为空值的占位文本（比较前已转小写）
const NULL_MARKERS: &[&str] = &["nan", "null", "none", "n/a", "na", "-"];

/// 是否为空值占位文本
pub(crate) fn is_null_marker(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || NULL_MARKERS.contains(&trimmed.to_lowercase().as_str())
}

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            if is_null_marker(&v) {
                None
            } else {
                Some(v.trim().to_string())
            }
        })
    }

    fn clean_record(&self, record: &mut RawSaleRecord) {
        record.invoice_id = self.clean_field(record.invoice_id.take(), false);
        record.branch = self.clean_field(record.branch.take(), true);
        record.city = self.clean_field(record.city.take(), false);
        record.customer_type = self.clean_field(record.customer_type.take(), false);
        record.gender = self.clean_field(record.gender.take(), false);
        record.product_line = self.clean_field(record.product_line.take(), false);
        record.payment = self.clean_field(record.payment.take(), false);
        record.date_raw = self.clean_field(record.date_raw.take(), false);
        record.time_raw = self.clean_field(record.time_raw.take(), false);
    }
}

impl DataCleaner {
    /// TRIM (+ UPPER) 后做 NULL 标准化，并压缩内部连续空白
    fn clean_field(&self, value: Option<String>, uppercase: bool) -> Option<String> {
        self.normalize_null(value.map(|v| {
            let cleaned = self.clean_text(&v, uppercase);
            cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
        }))
    }
}
