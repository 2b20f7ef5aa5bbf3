// ==========================================
// 超市销售数据看板 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 传播策略:
// - Parse: 单条记录级，派生阶段吸收（该记录派生字段置空）
// - TypeMismatch / InsufficientData / EmptyResult: 单个问题级，上抛到页面渲染
// ==========================================

use crate::domain::field::Field;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("解析失败 (行 {row}, 字段 {field}): 无法识别 {value:?}")]
    Parse {
        row: usize,
        field: Field,
        value: String,
    },

    #[error("类型不匹配: 字段 {field} 非数值，无法执行 {reduction}")]
    TypeMismatch { field: Field, reduction: String },

    #[error("数据不足: 分组 [{key}] 仅有 {count} 个有效值，至少需要 {required} 个")]
    InsufficientData {
        key: String,
        count: usize,
        required: usize,
    },

    #[error("结果为空: {0}")]
    EmptyResult(String),
}

impl EngineError {
    /// i18n 失败提示键
    pub fn notice_key(&self) -> &'static str {
        match self {
            EngineError::Parse { .. } => "notice.parse",
            EngineError::TypeMismatch { .. } => "notice.type_mismatch",
            EngineError::InsufficientData { .. } => "notice.insufficient_data",
            EngineError::EmptyResult(_) => "notice.empty_result",
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
