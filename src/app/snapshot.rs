// ==========================================
// 超市销售数据看板 - 销售数据快照
// ==========================================
// 职责: 启动时构建一次的只读交易表（导入 + 派生），通过 Arc 显式传递
// 红线: 构建后不再修改；数据源不可用时以占位数据降级，不中断进程
// ==========================================

use crate::domain::sale::{DqReport, SaleRecord};
use crate::engine::derivation::FieldDeriver;
use crate::engine::error::EngineError;
use crate::importer::error::DataSourceError;
use crate::importer::placeholder::placeholder_records;
use crate::importer::sales_importer::SalesImporterImpl;
use crate::importer::sales_importer_trait::SalesImporter;
use serde::Serialize;
use std::path::Path;
use tracing::{error, info, warn};

/// 数据来源
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotSource {
    /// 真实数据文件
    File { path: String },
    /// 降级模式占位数据（reason: 数据源错误描述）
    Placeholder { reason: String },
}

#[derive(Debug, Clone)]
pub struct SalesSnapshot {
    records: Vec<SaleRecord>,
    source: SnapshotSource,
    dq_report: DqReport,
    derivation_failures: Vec<EngineError>,
    locale: String,
}

/// 快照构建参数
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    pub locale: String,
    pub rating_range: (f64, f64),
    pub placeholder_rows: usize,
}

impl SalesSnapshot {
    /// 从数据文件构建快照
    ///
    /// 导入失败（DataSourceError）→ 记录错误并使用占位数据（降级模式）
    pub fn load(path: &Path, options: &SnapshotOptions) -> Self {
        let importer = SalesImporterImpl::with_defaults(options.rating_range);
        match importer.import_file(path) {
            Ok(outcome) => {
                info!(
                    source = %outcome.source,
                    records = outcome.records.len(),
                    "销售数据加载完成"
                );
                Self::build(
                    outcome.records,
                    SnapshotSource::File {
                        path: outcome.source,
                    },
                    outcome.dq_report,
                    &options.locale,
                )
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "销售数据加载失败");
                Self::degraded(&e, options)
            }
        }
    }

    /// 降级快照（占位数据）
    pub fn degraded(cause: &DataSourceError, options: &SnapshotOptions) -> Self {
        warn!(
            rows = options.placeholder_rows,
            "进入降级模式，使用占位数据"
        );
        Self::build(
            placeholder_records(options.placeholder_rows),
            SnapshotSource::Placeholder {
                reason: cause.to_string(),
            },
            DqReport::default(),
            &options.locale,
        )
    }

    /// 由已导入记录构建快照（执行字段派生）
    pub fn build(
        records: Vec<SaleRecord>,
        source: SnapshotSource,
        dq_report: DqReport,
        locale: &str,
    ) -> Self {
        let outcome = FieldDeriver::new(locale).derive(records);
        Self {
            records: outcome.records,
            source,
            dq_report,
            derivation_failures: outcome.failures,
            locale: locale.to_string(),
        }
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &SnapshotSource {
        &self.source
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.source, SnapshotSource::Placeholder { .. })
    }

    pub fn dq_report(&self) -> &DqReport {
        &self.dq_report
    }

    pub fn derivation_failures(&self) -> &[EngineError] {
        &self.derivation_failures
    }

    /// 派生字段所用的日历语言
    pub fn locale(&self) -> &str {
        &self.locale
    }
}
