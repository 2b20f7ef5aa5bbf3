// ==========================================
// 超市销售数据看板 - 引擎层
// ==========================================
// 职责: 字段派生 → 分组聚合 → 排序选取，全部为纯函数
// 数据流: Loader → FieldDeriver → aggregate → rank/top/extreme → 展示
// ==========================================

pub mod aggregator;
pub mod calendar;
pub mod derivation;
pub mod error;
pub mod ranker;
pub mod stats;

// 重导出核心类型
pub use aggregator::{aggregate, AggregateRow, AggregationResult, GroupKey, Reduction};
pub use calendar::CalendarNames;
pub use derivation::{DerivationOutcome, FieldDeriver};
pub use error::{EngineError, EngineResult};
pub use ranker::{extreme, rank, top, Direction, RankBy};
pub use stats::HistogramBin;
