// ==========================================
// 超市销售数据看板 - 排序与选取
// ==========================================
// 职责: rank（稳定排序）/ top / extreme（极值行）
// 规则:
// - rank 为稳定排序，相等元素保持原相对顺序 → 幂等
// - extreme(desc) 取第一个最大值行，与 top(rank(desc), 1) 一致
// - extreme 在空结果上返回 EmptyResult
// ==========================================

use crate::engine::aggregator::{AggregateRow, AggregationResult};
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 排序依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBy {
    Key,   // 分组键
    Value, // 归约值
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Asc,
    Desc,
}

fn compare_rows(a: &AggregateRow, b: &AggregateRow, by: RankBy) -> Ordering {
    match by {
        RankBy::Value => a.value.total_cmp(&b.value),
        RankBy::Key => {
            for (x, y) in a.key.parts().iter().zip(b.key.parts()) {
                let ord = x.compare(y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.key.parts().len().cmp(&b.key.parts().len())
        }
    }
}

fn directed(ord: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    }
}

/// 稳定排序
pub fn rank(result: &AggregationResult, by: RankBy, direction: Direction) -> AggregationResult {
    let mut rows = result.rows.clone();
    rows.sort_by(|a, b| directed(compare_rows(a, b, by), direction));
    result.with_rows(rows)
}

/// 前 n 行（不足 n 行时返回全部）
pub fn top(result: &AggregationResult, n: usize) -> Vec<AggregateRow> {
    result.rows.iter().take(n).cloned().collect()
}

/// 极值行
///
/// # 返回
/// - Ok(AggregateRow): desc → 第一个最大值行；asc → 第一个最小值行
/// - Err(EmptyResult): 结果为空
pub fn extreme(
    result: &AggregationResult,
    by: RankBy,
    direction: Direction,
) -> EngineResult<AggregateRow> {
    let mut best: Option<&AggregateRow> = None;
    for row in &result.rows {
        best = match best {
            None => Some(row),
            // 严格更优才替换，保证取第一个
            Some(current) if directed(compare_rows(row, current, by), direction) == Ordering::Less => {
                Some(row)
            }
            keep => keep,
        };
    }

    best.cloned().ok_or_else(|| {
        EngineError::EmptyResult(format!(
            "{}({}) 按 {:?} 分组无数据",
            result.reduction,
            result.target,
            result.group_by
        ))
    })
}
