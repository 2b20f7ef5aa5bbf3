// ==========================================
// 超市销售数据看板 - 销售数据导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 解析 → 字段映射 → 清洗 → DQ 校验 → 类型化记录
// ==========================================

use crate::domain::sale::{DqReport, DqViolation, RawSaleRecord, SaleRecord};
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub source: String,           // 源文件路径
    pub records: Vec<SaleRecord>, // 通过校验的记录（保持源文件顺序）
    pub dq_report: DqReport,      // DQ 报告
    pub elapsed: std::time::Duration,
}

// ==========================================
// ParsedSheet - 解析结果（表头 + 数据行）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSheet {
    pub headers: Vec<String>,                // 源表头（保持列顺序）
    pub rows: Vec<HashMap<String, String>>, // 数据行（列名 → 单元格文本）
}

// ==========================================
// SalesImporter Trait
// ==========================================
// 用途: 导入主接口
// 实现者: SalesImporterImpl
pub trait SalesImporter {
    /// 从文件导入交易记录（按扩展名选择 Excel / CSV）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 类型化记录 + DQ 报告
    /// - Err(DataSourceError): 文件缺失、格式不支持、无法解析、缺少必需列
    ///
    /// # 说明
    /// - 单行问题不会导致失败，记入 DQ 报告并阻断该行
    /// - 返回记录尚未派生时间字段（由 FieldDeriver 负责）
    fn import_file(&self, file_path: &Path) -> ImportResult<ImportOutcome>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: ExcelParser, CsvParser
pub trait FileParser {
    /// 解析文件为表头 + 原始行记录（HashMap<列名, 值>），跳过全空行
    ///
    /// # 说明
    /// - 表头独立返回，短行不影响必需列检查
    /// - Excel 日期/时间单元格输出为 ISO 文本
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<ParsedSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait FieldMapper {
    /// 将原始行记录映射为 RawSaleRecord
    ///
    /// # 返回
    /// - Err(TypeConversionError): 数值列无法解析
    fn map_to_raw_sale(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawSaleRecord>;

    /// 表头缺失的必需列（返回标准列名）
    fn missing_required_columns(&self, headers: &[String]) -> Vec<&'static str>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2）
// 实现者: DataCleaner
pub trait DataCleaner {
    /// 清洗文本字段（TRIM，可选 UPPER）
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    /// 标准化 NULL 值（空字符串/空白/NaN 标记 → None）
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 就地清洗一条记录
    fn clean_record(&self, record: &mut RawSaleRecord);
}

// ==========================================
// DqValidator Trait
// ==========================================
// 用途: 数据质量校验接口（阶段 3）
// 实现者: DqValidator
pub trait DqValidator {
    /// 校验主键（invoice_id 非空且唯一）
    fn validate_primary_key(&self, records: &[RawSaleRecord]) -> Vec<DqViolation>;

    /// 校验必填字段与封闭枚举取值
    fn validate_required_fields(&self, record: &RawSaleRecord) -> Vec<DqViolation>;

    /// 校验数值范围
    fn validate_ranges(&self, record: &RawSaleRecord) -> Vec<DqViolation>;

    /// 生成 DQ 报告
    fn generate_dq_report(&self, total_rows: usize, violations: Vec<DqViolation>) -> DqReport;
}
