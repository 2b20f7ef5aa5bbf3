// ==========================================
// 超市销售数据看板 - 日历工具
// ==========================================
// 职责: 日期/时间源文本解析 + 本地化星期/月份名称
// 支持: M/D/YYYY, YYYY-MM-DD, ISO 日期时间, DD/MM/YYYY
// Excel 日期/时间单元格由 ExcelParser 预先转为 ISO 文本，裸数字不视为日期
// ==========================================

use crate::i18n;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%H:%M:%S%.f", "%I:%M:%S %p", "%I:%M %p"];

/// 解析日期源文本
///
/// # 返回
/// - Some(NaiveDate): 识别成功
/// - None: 无法识别（调用方记为 ParseError）
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    // 带时区的 RFC 3339
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// 解析时间源文本
///
/// 兼容完整日期时间（取时间部分）
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(value, fmt) {
            return Some(time);
        }
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.time())
}

/// 小时 (0-23)
pub fn hour_of(time: NaiveTime) -> u32 {
    time.hour()
}

// ==========================================
// CalendarNames - 本地化星期/月份名称表
// ==========================================
// 每个语言构建一次，派生阶段按下标查表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarNames {
    locale: String,
    weekdays: Vec<String>, // 周一 .. 周日
    months: Vec<String>,   // 1 月 .. 12 月
}

const WEEKDAY_KEYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const MONTH_KEYS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

impl CalendarNames {
    /// 从 i18n 资源构建指定语言的名称表
    pub fn for_locale(locale: &str) -> Self {
        let weekdays = WEEKDAY_KEYS
            .iter()
            .map(|k| i18n::t_in(locale, &format!("calendar.weekday.{}", k)))
            .collect();
        let months = MONTH_KEYS
            .iter()
            .map(|k| i18n::t_in(locale, &format!("calendar.month.{}", k)))
            .collect();

        Self {
            locale: locale.to_string(),
            weekdays,
            months,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &str {
        &self.weekdays[weekday.num_days_from_monday() as usize]
    }

    pub fn month_name(&self, date: NaiveDate) -> &str {
        &self.months[date.month0() as usize]
    }
}
