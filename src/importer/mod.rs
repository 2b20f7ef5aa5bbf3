// ==========================================
// 超市销售数据看板 - 导入层
// ==========================================
// 职责: 外部表格数据 → 类型化交易记录 + DQ 报告
// 支持: Excel, CSV；数据源不可用时提供占位数据
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod placeholder;
pub mod sales_importer;
pub mod sales_importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use error::{DataSourceError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use placeholder::{placeholder_records, DEFAULT_PLACEHOLDER_ROWS};
pub use sales_importer::SalesImporterImpl;

// 重导出 Trait 接口
pub use sales_importer_trait::{
    DataCleaner, DqValidator, FieldMapper, FileParser, ImportOutcome, ParsedSheet, SalesImporter,
};
