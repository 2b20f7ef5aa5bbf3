// ==========================================
// 超市销售数据看板 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 数据源整体不可用 → DataSourceError（可通过占位数据降级恢复）
//       单行问题不走错误通道，记入 DQ 报告
// ==========================================

use thiserror::Error;

/// 数据源错误类型
#[derive(Error, Debug)]
pub enum DataSourceError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 结构错误 =====
    #[error("缺少必需列: {0}")]
    MissingColumns(String),

    #[error("文件无有效数据行: {0}")]
    NoUsableRows(String),

    // ===== 行级错误（由导入器转为 DQ ERROR，不中断导入）=====
    #[error("类型转换失败（行 {row}，字段 {field}）: {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for DataSourceError {
    fn from(err: std::io::Error) -> Self {
        DataSourceError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for DataSourceError {
    fn from(err: csv::Error) -> Self {
        DataSourceError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for DataSourceError {
    fn from(err: calamine::Error) -> Self {
        DataSourceError::ExcelParseError(err.to_string())
    }
}

pub type ImportResult<T> = Result<T, DataSourceError>;
