// ==========================================
// 超市销售数据看板 - 分组聚合器
// ==========================================
// 职责: 按分组键分区，对目标字段执行 sum / mean / count / stddev
// 规则:
// - 每个出现过的分组键恰好一行，顺序为首次出现顺序（排序由 Ranker 负责）
// - 空输入 → 空结果（不是错误）
// - 分组键含缺失值的记录不参与分区
// - count 忽略目标字段，返回分区大小
// - sum / mean / stddev 要求目标字段为数值，缺失值跳过
// - stddev 为样本标准差 (n-1)，有效值 < 2 → InsufficientData
// ==========================================

use crate::domain::field::{Field, FieldValue};
use crate::domain::sale::SaleRecord;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::stats;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

// ==========================================
// Reduction - 归约方式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    Sum,
    Mean,
    Count,
    #[serde(rename = "stddev")]
    StdDev,
}

impl Reduction {
    pub fn key(&self) -> &'static str {
        match self {
            Reduction::Sum => "sum",
            Reduction::Mean => "mean",
            Reduction::Count => "count",
            Reduction::StdDev => "stddev",
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ==========================================
// GroupKey - 分组键（字段值元组）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey(pub Vec<FieldValue>);

impl GroupKey {
    pub fn parts(&self) -> &[FieldValue] {
        &self.0
    }

    /// 单字段分组时的唯一取值
    pub fn first(&self) -> Option<&FieldValue> {
        self.0.first()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join(" / "))
    }
}

// ==========================================
// AggregateRow / AggregationResult
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: GroupKey,
    pub value: f64,
    /// 分区记录数
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub group_by: Vec<Field>,
    pub target: Field,
    pub reduction: Reduction,
    pub rows: Vec<AggregateRow>,
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 按分组键取值
    pub fn value_of(&self, key: &[FieldValue]) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.key.parts() == key)
            .map(|row| row.value)
    }

    /// 以新的行序列替换（保留元信息）
    pub fn with_rows(&self, rows: Vec<AggregateRow>) -> Self {
        Self {
            group_by: self.group_by.clone(),
            target: self.target,
            reduction: self.reduction,
            rows,
        }
    }
}

// 分区累加器
struct Partition {
    key: GroupKey,
    size: usize,
    values: Vec<f64>,
}

/// 分组聚合
///
/// # 参数
/// - records: 交易记录
/// - group_by: 分组字段元组（空元组 → 全体记录一个分区）
/// - target: 目标字段
/// - reduction: 归约方式
///
/// # 返回
/// - Ok(AggregationResult): 每个分组键一行
/// - Err(TypeMismatch): 非数值目标字段执行 sum/mean/stddev
/// - Err(InsufficientData): mean 无有效值 / stddev 有效值 < 2
pub fn aggregate(
    records: &[SaleRecord],
    group_by: &[Field],
    target: Field,
    reduction: Reduction,
) -> EngineResult<AggregationResult> {
    let mut result = AggregationResult {
        group_by: group_by.to_vec(),
        target,
        reduction,
        rows: Vec::new(),
    };

    if records.is_empty() {
        return Ok(result);
    }

    if reduction != Reduction::Count && !target.is_numeric() {
        return Err(EngineError::TypeMismatch {
            field: target,
            reduction: reduction.to_string(),
        });
    }

    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut partitions: Vec<Partition> = Vec::new();
    let mut dropped = 0usize;

    for record in records {
        let key: Vec<FieldValue> = group_by.iter().map(|f| f.value(record)).collect();
        if key.iter().any(FieldValue::is_missing) {
            dropped += 1;
            continue;
        }
        let key = GroupKey(key);

        let idx = match index.get(&key) {
            Some(&idx) => idx,
            None => {
                partitions.push(Partition {
                    key: key.clone(),
                    size: 0,
                    values: Vec::new(),
                });
                index.insert(key, partitions.len() - 1);
                partitions.len() - 1
            }
        };

        let partition = &mut partitions[idx];
        partition.size += 1;
        if reduction != Reduction::Count {
            if let Some(v) = target.value(record).as_f64() {
                partition.values.push(v);
            }
        }
    }

    if dropped > 0 {
        debug!(
            dropped,
            group_by = ?group_by,
            "分组键缺失的记录未参与聚合"
        );
    }

    for partition in partitions {
        let value = reduce(&partition, reduction)?;
        result.rows.push(AggregateRow {
            key: partition.key,
            value,
            size: partition.size,
        });
    }

    Ok(result)
}

fn reduce(partition: &Partition, reduction: Reduction) -> EngineResult<f64> {
    let insufficient = |required: usize| EngineError::InsufficientData {
        key: partition.key.to_string(),
        count: partition.values.len(),
        required,
    };

    match reduction {
        Reduction::Count => Ok(partition.size as f64),
        Reduction::Sum => Ok(partition.values.iter().sum()),
        Reduction::Mean => stats::mean(&partition.values).ok_or_else(|| insufficient(1)),
        Reduction::StdDev => {
            stats::sample_std_dev(&partition.values).ok_or_else(|| insufficient(2))
        }
    }
}
