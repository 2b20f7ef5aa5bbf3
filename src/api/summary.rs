// ==========================================
// 超市销售数据看板 - 结论文本与数值格式化
// ==========================================
// 职责: 由极值行 + 语言 + 数值格式生成自然语言结论；本地化数值；失败提示
// 红线: 纯函数，无随机、无时钟
// ==========================================

use crate::config::page_catalog::ValueFormat;
use crate::domain::field::Field;
use crate::engine::aggregator::{AggregateRow, Reduction};
use crate::engine::error::EngineError;
use crate::i18n;

/// 本地化数字格式
struct NumberStyle {
    thousands_sep: String,
    decimal_sep: String,
    currency: String,
}

impl NumberStyle {
    fn for_locale(locale: &str) -> Self {
        Self {
            thousands_sep: i18n::t_in(locale, "format.thousands_sep"),
            decimal_sep: i18n::t_in(locale, "format.decimal_sep"),
            currency: i18n::t_in(locale, "format.currency"),
        }
    }
}

fn group_thousands(digits: &str, sep: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * sep.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(c);
    }
    out
}

/// 按语言格式化数字（千分位 + 小数分隔符）
///
/// # 示例
/// - ("en", 1234.5, 2) → "1,234.50"
/// - ("pt-BR", 1234.5, 2) → "1.234,50"
pub fn format_number(locale: &str, value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let style = NumberStyle::for_locale(locale);

    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    // 四舍五入后为 0 时不带负号
    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, &style.thousands_sep));
    if let Some(frac) = frac_part {
        out.push_str(&style.decimal_sep);
        out.push_str(frac);
    }
    out
}

/// 按数值格式渲染
pub fn format_value(locale: &str, value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::Currency { decimals } => format!(
            "{} {}",
            NumberStyle::for_locale(locale).currency,
            format_number(locale, value, decimals)
        ),
        ValueFormat::Integer => format_number(locale, value.round(), 0),
        ValueFormat::Fixed { decimals } => format_number(locale, value, decimals),
    }
}

/// 生成结论句
///
/// # 参数
/// - locale: 语言
/// - template_key: 结论模板 i18n 键（占位符 %{key} / %{value}）
/// - key: 分组键文本
/// - value: 数值
/// - format: 数值格式
pub fn format_answer(
    locale: &str,
    template_key: &str,
    key: &str,
    value: f64,
    format: ValueFormat,
) -> String {
    let value = format_value(locale, value, format);
    i18n::t_with_args_in(locale, template_key, &[("key", key), ("value", value.as_str())])
}

/// 由极值行生成结论句
pub fn summarize_row(
    locale: &str,
    template_key: &str,
    row: &AggregateRow,
    format: ValueFormat,
) -> String {
    format_answer(locale, template_key, &row.key.to_string(), row.value, format)
}

/// 字段显示名
pub fn field_label(locale: &str, field: Field) -> String {
    i18n::t_in(locale, &format!("fields.{}", field.key()))
}

/// 归约显示名
pub fn reduction_label(locale: &str, reduction: Reduction) -> String {
    i18n::t_in(locale, &format!("reductions.{}", reduction.key()))
}

/// 问题失败提示
pub fn failure_notice(locale: &str, error: &EngineError) -> String {
    let reason = match error {
        EngineError::TypeMismatch { field, .. } => i18n::t_with_args_in(
            locale,
            error.notice_key(),
            &[("field", field_label(locale, *field).as_str())],
        ),
        EngineError::InsufficientData {
            key,
            count,
            required,
        } => {
            let detail = if key.is_empty() {
                format!("{}/{}", count, required)
            } else {
                format!("{}: {}/{}", key, count, required)
            };
            i18n::t_with_args_in(locale, error.notice_key(), &[("detail", detail.as_str())])
        }
        EngineError::Parse { .. } | EngineError::EmptyResult(_) => {
            i18n::t_in(locale, error.notice_key())
        }
    };
    i18n::t_with_args_in(locale, "notice.failed", &[("reason", reason.as_str())])
}
