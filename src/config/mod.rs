// ==========================================
// 超市销售数据看板 - 配置层
// ==========================================
// 职责: 看板运行配置 + 页面目录
// 来源: JSON 文件 / 环境变量 / 命令行（逐级覆写）
// ==========================================

pub mod dashboard_config;
pub mod error;
pub mod page_catalog;

// 重导出核心类型
pub use dashboard_config::{config_keys, env_vars, DashboardConfig};
pub use error::{ConfigError, ConfigResult};
pub use page_catalog::{
    Analysis, ChartKind, ChartSpec, Order, PageCatalog, PageKind, PageSpec, QuestionSpec,
    SummarySpec, ValueFormat,
};
