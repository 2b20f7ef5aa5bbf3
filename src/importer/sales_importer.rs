// ==========================================
// 超市销售数据看板 - 销售数据导入器实现
// ==========================================
// 流程:
//   1. 解析文件（Excel / CSV）
//   2. 检查必需列
//   3. 字段映射（类型转换失败 → DQ ERROR）
//   4. 数据清洗
//   5. DQ 校验（主键 / 必填 / 范围）
//   6. 转换为 SaleRecord（跳过被阻断的行）
// ==========================================

use crate::domain::sale::{DerivedFields, DqLevel, DqViolation, RawSaleRecord, SaleRecord};
use crate::domain::types::{CustomerType, Gender, PaymentMethod, ProductLine};
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::dq_validator::DqValidator as DqValidatorImpl;
use crate::importer::error::{DataSourceError, ImportResult};
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::sales_importer_trait::{
    DataCleaner, DqValidator, FieldMapper, FileParser, ImportOutcome, ParsedSheet, SalesImporter,
};
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

// ==========================================
// SalesImporterImpl - 导入器实现
// ==========================================
pub struct SalesImporterImpl {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    dq_validator: Box<dyn DqValidator>,
}

impl SalesImporterImpl {
    /// 创建导入器
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    /// - data_cleaner: 数据清洗器
    /// - dq_validator: DQ 校验器
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
        dq_validator: Box<dyn DqValidator>,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            data_cleaner,
            dq_validator,
        }
    }

    /// 使用默认组件创建导入器
    ///
    /// # 参数
    /// - rating_range: 评分允许区间
    pub fn with_defaults(rating_range: (f64, f64)) -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(FieldMapperImpl),
            Box::new(DataCleanerImpl),
            Box::new(DqValidatorImpl::new(rating_range)),
        )
    }

    /// 转换为 SaleRecord（枚举取值已在 DQ 阶段校验）
    fn convert_to_sale_record(record: RawSaleRecord) -> Option<SaleRecord> {
        Some(SaleRecord {
            customer_type: CustomerType::from_source(record.customer_type.as_deref()?)?,
            gender: Gender::from_source(record.gender.as_deref()?)?,
            product_line: ProductLine::from_source(record.product_line.as_deref()?)?,
            payment: PaymentMethod::from_source(record.payment.as_deref()?)?,
            unit_price: record.unit_price?,
            quantity: u32::try_from(record.quantity?).ok()?,
            invoice_id: record.invoice_id?,
            branch: record.branch?,
            city: record.city?,
            tax: record.tax,
            total: record.total,
            cogs: record.cogs,
            gross_margin_pct: record.gross_margin_pct,
            gross_income: record.gross_income,
            rating: record.rating,
            date_raw: record.date_raw.unwrap_or_default(),
            time_raw: record.time_raw.unwrap_or_default(),
            derived: DerivedFields::default(),
            row_number: record.row_number,
        })
    }
}

impl SalesImporter for SalesImporterImpl {
    #[instrument(skip(self, file_path), fields(file = %file_path.display()))]
    fn import_file(&self, file_path: &Path) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let source = file_path.display().to_string();
        info!("开始导入销售数据");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let ParsedSheet { headers, rows } = self.file_parser.parse_to_raw_records(file_path)?;
        let total_rows = rows.len();
        info!(total_rows, "文件解析完成");

        if rows.is_empty() {
            return Err(DataSourceError::NoUsableRows(source));
        }

        // === 步骤 2: 检查必需列 ===
        debug!("步骤 2: 检查必需列");
        let missing = self.field_mapper.missing_required_columns(&headers);
        if !missing.is_empty() {
            return Err(DataSourceError::MissingColumns(missing.join(", ")));
        }

        // === 步骤 3: 字段映射 ===
        debug!("步骤 3: 字段映射");
        let mut violations: Vec<DqViolation> = Vec::new();
        let mut raw_records = Vec::with_capacity(total_rows);
        for (idx, row) in rows.iter().enumerate() {
            // 第 1 行为表头
            let row_number = idx + 2;
            match self.field_mapper.map_to_raw_sale(row, row_number) {
                Ok(record) => raw_records.push(record),
                Err(e) => {
                    warn!(row_number, error = %e, "字段映射失败");
                    let field = match &e {
                        DataSourceError::TypeConversionError { field, .. } => field.clone(),
                        _ => String::new(),
                    };
                    violations.push(DqViolation {
                        row_number,
                        invoice_id: None,
                        level: DqLevel::Error,
                        field,
                        message: e.to_string(),
                    });
                }
            }
        }
        debug!(mapped = raw_records.len(), "字段映射完成");

        // === 步骤 4: 数据清洗 ===
        debug!("步骤 4: 数据清洗");
        for record in &mut raw_records {
            self.data_cleaner.clean_record(record);
        }

        // === 步骤 5: DQ 校验 ===
        debug!("步骤 5: DQ 校验");
        violations.extend(self.dq_validator.validate_primary_key(&raw_records));
        for record in &raw_records {
            violations.extend(self.dq_validator.validate_required_fields(record));
            violations.extend(self.dq_validator.validate_ranges(record));
        }

        let blocked_rows: HashSet<usize> = violations
            .iter()
            .filter(|v| v.level.is_blocking())
            .map(|v| v.row_number)
            .collect();

        // === 步骤 6: 转换为 SaleRecord ===
        debug!("步骤 6: 转换为 SaleRecord");
        let records: Vec<SaleRecord> = raw_records
            .into_iter()
            .filter(|r| !blocked_rows.contains(&r.row_number))
            .filter_map(Self::convert_to_sale_record)
            .collect();

        let dq_report = self.dq_validator.generate_dq_report(total_rows, violations);
        info!(
            total_rows,
            success = records.len(),
            blocked = dq_report.summary.blocked,
            conflict = dq_report.summary.conflict,
            warning = dq_report.summary.warning,
            "DQ 校验完成"
        );

        if records.is_empty() {
            return Err(DataSourceError::NoUsableRows(source));
        }

        let elapsed = start_time.elapsed();
        info!(elapsed_ms = elapsed.as_millis() as u64, "导入完成");

        Ok(ImportOutcome {
            source,
            records,
            dq_report,
            elapsed,
        })
    }
}
