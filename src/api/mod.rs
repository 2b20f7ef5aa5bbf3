// ==========================================
// 超市销售数据看板 - API 层
// ==========================================
// 职责: 提供页面级看板接口，供控制台 / JSON 输出调用
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;
pub mod summary;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, RenderSettings};
pub use dto::{
    CategoryPoint, ChartData, ChartView, Distribution, OverviewView, PageEntry, PageView,
    QuestionOutcome, QuestionView, Series, TableView,
};
pub use error::{ApiError, ApiResult};
