// ==========================================
// 超市销售数据看板 - 字段派生服务
// ==========================================
// 职责: date / day_of_week / month_name / hour 派生
// 规则:
// - 派生结果只依赖 date_raw / time_raw 与日历语言
// - 单条记录解析失败 → 该记录对应派生字段置空，批次继续（部分失败容忍）
// - 幂等: 重复派生不改变结果
// ==========================================

use crate::domain::field::Field;
use crate::domain::sale::{DerivedFields, SaleRecord};
use crate::engine::calendar::{self, CalendarNames};
use crate::engine::error::{EngineError, EngineResult};
use chrono::Datelike;
use tracing::{debug, info, warn};

/// 派生结果
#[derive(Debug, Clone)]
pub struct DerivationOutcome {
    pub records: Vec<SaleRecord>,
    /// 被吸收的单条记录解析错误（均为 EngineError::Parse）
    pub failures: Vec<EngineError>,
}

pub struct FieldDeriver {
    names: CalendarNames,
}

impl FieldDeriver {
    /// 创建派生服务
    ///
    /// # 参数
    /// - locale: 星期/月份名称使用的语言（如 "pt-BR" / "en"）
    pub fn new(locale: &str) -> Self {
        Self {
            names: CalendarNames::for_locale(locale),
        }
    }

    pub fn locale(&self) -> &str {
        self.names.locale()
    }

    /// 批量派生
    pub fn derive(&self, records: Vec<SaleRecord>) -> DerivationOutcome {
        let mut failures = Vec::new();
        let records: Vec<SaleRecord> = records
            .into_iter()
            .map(|mut record| {
                failures.extend(self.derive_record(&mut record));
                record
            })
            .collect();

        if failures.is_empty() {
            debug!(records = records.len(), locale = self.locale(), "字段派生完成");
        } else {
            info!(
                records = records.len(),
                failures = failures.len(),
                locale = self.locale(),
                "字段派生完成（部分记录派生字段缺失）"
            );
        }

        DerivationOutcome { records, failures }
    }

    /// 单条记录派生，返回被吸收的解析错误
    pub fn derive_record(&self, record: &mut SaleRecord) -> Vec<EngineError> {
        let mut failures = Vec::new();
        let mut derived = DerivedFields::default();

        match self.derive_date(record) {
            Ok(date) => {
                derived.day_of_week = Some(self.names.weekday_name(date.weekday()).to_string());
                derived.month_name = Some(self.names.month_name(date).to_string());
                derived.date = Some(date);
            }
            Err(e) => {
                warn!(error = %e, "日期无法识别，时间派生字段置空");
                failures.push(e);
            }
        }

        match self.derive_hour(record) {
            Ok(hour) => derived.hour = Some(hour),
            Err(e) => {
                warn!(error = %e, "时间无法识别，hour 置空");
                failures.push(e);
            }
        }

        record.derived = derived;
        failures
    }

    /// 派生归一化日期
    pub fn derive_date(&self, record: &SaleRecord) -> EngineResult<chrono::NaiveDate> {
        calendar::parse_date(&record.date_raw).ok_or_else(|| EngineError::Parse {
            row: record.row_number,
            field: Field::DateRaw,
            value: record.date_raw.clone(),
        })
    }

    /// 派生小时
    pub fn derive_hour(&self, record: &SaleRecord) -> EngineResult<u32> {
        calendar::parse_time(&record.time_raw)
            .map(calendar::hour_of)
            .ok_or_else(|| EngineError::Parse {
                row: record.row_number,
                field: Field::TimeRaw,
                value: record.time_raw.clone(),
            })
    }
}
