// ==========================================
// 超市销售数据看板 - 领域层
// ==========================================
// 职责: 交易记录、封闭枚举、字段选择器、DQ 报告
// ==========================================

pub mod field;
pub mod sale;
pub mod types;

// 重导出核心类型
pub use field::{Field, FieldValue};
pub use sale::{DerivedFields, DqLevel, DqReport, DqSummary, DqViolation, RawSaleRecord, SaleRecord};
pub use types::{CustomerType, Gender, PaymentMethod, ProductLine};
