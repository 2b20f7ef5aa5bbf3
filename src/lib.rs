// ==========================================
// 超市销售数据看板 - 核心库
// ==========================================
// 技术栈: Rust + calamine/csv + rust-i18n
// 系统定位: 只读描述性分析（字段派生 → 分组聚合 → 排序 → 结论）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 交易记录与字段
pub mod domain;

// 引擎层 - 派生 / 聚合 / 排序
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 看板配置与页面目录
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 页面视图
pub mod api;

// 应用层 - 状态组装与控制台渲染
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CustomerType, Gender, PaymentMethod, ProductLine};

// 领域实体
pub use domain::{Field, FieldValue, SaleRecord};

// 引擎
pub use engine::{
    aggregate, extreme, rank, top, AggregateRow, AggregationResult, Direction, EngineError,
    FieldDeriver, GroupKey, RankBy, Reduction,
};

// API
pub use api::{ApiError, DashboardApi, PageView};

// 应用
pub use app::{AppState, SalesSnapshot};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "超市销售数据看板";
