// ==========================================
// 超市销售数据看板 - 应用层
// ==========================================
// 职责: 组装快照 / 页面目录 / API，提供控制台渲染
// ==========================================

pub mod console;
pub mod snapshot;
pub mod state;

// 重导出
pub use snapshot::{SalesSnapshot, SnapshotOptions, SnapshotSource};
pub use state::AppState;
