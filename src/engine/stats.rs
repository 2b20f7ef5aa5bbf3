// ==========================================
// 超市销售数据看板 - 描述性统计
// ==========================================
// 职责: 均值 / 样本标准差 / 等宽直方图 / Pearson 相关系数
// 说明: 输入为已剔除缺失值的数值序列
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// 算术平均；空序列返回 None
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 样本标准差（n-1 分母）；少于 2 个值返回 None
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

// ==========================================
// HistogramBin - 直方图区间
// ==========================================
// 区间左闭右开，最后一个区间右闭
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// 等宽直方图
///
/// # 规则
/// - 空输入 → 空结果
/// - 全部取值相等 → 单个区间
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: finite.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        result[idx].count += 1;
    }

    result
}

/// Pearson 相关系数
///
/// # 参数
/// - pairs: (x, y) 成对观测值
///
/// # 返回
/// - Err(InsufficientData): 少于 2 对，或任一变量方差为 0
pub fn pearson(pairs: &[(f64, f64)]) -> EngineResult<f64> {
    let insufficient = || EngineError::InsufficientData {
        key: "correlation".to_string(),
        count: pairs.len(),
        required: 2,
    };

    if pairs.len() < 2 {
        return Err(insufficient());
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Err(insufficient());
    }

    Ok(cov / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_std_dev() {
        // 10, 20, 30 → 样本标准差 10
        let sd = sample_std_dev(&[10.0, 20.0, 30.0]).unwrap();
        assert!((sd - 10.0).abs() < 1e-9);
        assert_eq!(sample_std_dev(&[42.0]), None);
    }

    #[test]
    fn test_histogram_counts_all_values() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64 / 10.0).collect();
        let bins = histogram(&values, 10);

        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[9].upper, 10.0);
        // 最大值落入最后一个区间
        assert!(bins[9].count >= 1);
    }

    #[test]
    fn test_histogram_degenerate() {
        assert!(histogram(&[], 10).is_empty());
        let single = histogram(&[5.0, 5.0, 5.0], 10);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].count, 3);
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let pairs = vec![(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        assert!((pearson(&pairs).unwrap() - 1.0).abs() < 1e-12);

        let inverse = vec![(1.0, 3.0), (2.0, 2.0), (3.0, 1.0)];
        assert!((pearson(&inverse).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_insufficient() {
        assert!(matches!(
            pearson(&[(1.0, 1.0)]),
            Err(EngineError::InsufficientData { .. })
        ));
        assert!(matches!(
            pearson(&[(1.0, 1.0), (1.0, 2.0)]),
            Err(EngineError::InsufficientData { .. })
        ));
    }
}
