// ==========================================
// 超市销售数据看板 - 看板配置
// ==========================================
// 职责: 配置加载、环境变量覆写、默认数据路径解析
// 优先级: 命令行 > 环境变量 > 配置文件 > 默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::i18n;
use crate::importer::placeholder::DEFAULT_PLACEHOLDER_ROWS;
use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 默认数据文件名（按顺序查找）
pub const DEFAULT_DATA_FILES: [&str; 2] = ["supermarket_sales.xlsx", "supermarket_sales.csv"];

/// 平台数据目录下的应用子目录
const APP_DATA_DIR: &str = "supermarket-sales";

// ==========================================
// DashboardConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 数据文件路径（未指定时按默认规则查找）
    pub data_path: Option<PathBuf>,
    /// 界面语言
    pub locale: String,
    /// 首页预览行数
    pub preview_rows: usize,
    /// 直方图区间数
    pub histogram_bins: usize,
    /// 降级模式占位数据行数
    pub placeholder_rows: usize,
    /// 评分允许区间（闭区间）
    pub rating_range: (f64, f64),
    /// 自定义页面目录（JSON）
    pub catalog_path: Option<PathBuf>,
    /// 日志格式
    pub log_format: LogFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            locale: i18n::DEFAULT_LOCALE.to_string(),
            preview_rows: 10,
            histogram_bins: 10,
            placeholder_rows: DEFAULT_PLACEHOLDER_ROWS,
            rating_range: (0.0, 10.0),
            catalog_path: None,
            log_format: LogFormat::Text,
        }
    }
}

impl DashboardConfig {
    /// 从 JSON 文件加载
    ///
    /// # 返回
    /// - Err(ReadError): 文件不可读
    /// - Err(ParseError): JSON 无效
    /// - Err(InvalidValue): 取值越界
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: DashboardConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        debug!(path = %path.display(), "配置文件加载完成");
        Ok(config)
    }

    /// 加载配置文件，失败时回退默认值并记录警告
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            None => Self::default(),
            Some(p) => Self::load(p).unwrap_or_else(|e| {
                warn!(error = %e, "配置文件无效，使用默认配置");
                Self::default()
            }),
        }
    }

    /// 应用环境变量覆写
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// 应用覆写（lookup: 环境变量名 → 值）
    ///
    /// 无效值记录警告并忽略
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(env_vars::DATA) {
            if !path.trim().is_empty() {
                self.data_path = Some(PathBuf::from(path));
            }
        }

        if let Some(locale) = lookup(env_vars::LOCALE) {
            if i18n::is_supported(&locale) {
                self.locale = locale;
            } else {
                warn!(locale = %locale, "不支持的语言，忽略环境变量");
            }
        }

        if let Some(rows) = lookup(env_vars::PREVIEW_ROWS) {
            match rows.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.preview_rows = n,
                _ => warn!(value = %rows, "预览行数无效，忽略环境变量"),
            }
        }

        if let Some(format) = lookup(env_vars::LOG_FORMAT) {
            match format.parse::<LogFormat>() {
                Ok(f) => self.log_format = f,
                Err(_) => warn!(value = %format, "日志格式无效，忽略环境变量"),
            }
        }
    }

    /// 校验取值
    pub fn validate(&self) -> ConfigResult<()> {
        if !i18n::is_supported(&self.locale) {
            return Err(invalid(config_keys::LOCALE, &self.locale));
        }
        if self.preview_rows == 0 {
            return Err(invalid(config_keys::PREVIEW_ROWS, "0"));
        }
        if self.histogram_bins == 0 {
            return Err(invalid(config_keys::HISTOGRAM_BINS, "0"));
        }
        if self.placeholder_rows == 0 {
            return Err(invalid(config_keys::PLACEHOLDER_ROWS, "0"));
        }
        let (min, max) = self.rating_range;
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(invalid(
                config_keys::RATING_RANGE,
                &format!("[{}, {}]", min, max),
            ));
        }
        Ok(())
    }

    /// 解析数据文件路径
    ///
    /// 顺序: 显式路径 → 当前目录默认文件 → 平台数据目录默认文件
    /// 均不存在时返回当前目录下的 xlsx 路径（由导入阶段报告文件缺失）
    pub fn resolve_data_path(&self) -> PathBuf {
        self.resolve_data_path_in(Path::new("."), dirs::data_dir().as_deref())
    }

    /// 在指定工作目录/数据目录下解析数据文件路径
    pub fn resolve_data_path_in(&self, cwd: &Path, data_dir: Option<&Path>) -> PathBuf {
        if let Some(path) = &self.data_path {
            return path.clone();
        }

        let mut candidates: Vec<PathBuf> = DEFAULT_DATA_FILES.iter().map(|f| cwd.join(f)).collect();
        if let Some(dir) = data_dir {
            candidates.extend(DEFAULT_DATA_FILES.iter().map(|f| dir.join(APP_DATA_DIR).join(f)));
        }

        candidates
            .into_iter()
            .find(|p| p.exists())
            .unwrap_or_else(|| cwd.join(DEFAULT_DATA_FILES[0]))
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

// ==========================================
// 配置键 / 环境变量
// ==========================================
pub mod config_keys {
    pub const DATA_PATH: &str = "data_path";
    pub const LOCALE: &str = "locale";
    pub const PREVIEW_ROWS: &str = "preview_rows";
    pub const HISTOGRAM_BINS: &str = "histogram_bins";
    pub const PLACEHOLDER_ROWS: &str = "placeholder_rows";
    pub const RATING_RANGE: &str = "rating_range";
    pub const CATALOG_PATH: &str = "catalog_path";
    pub const LOG_FORMAT: &str = "log_format";
}

pub mod env_vars {
    pub const DATA: &str = "SUPERMARKET_SALES_DATA";
    pub const LOCALE: &str = "SUPERMARKET_SALES_LOCALE";
    pub const PREVIEW_ROWS: &str = "SUPERMARKET_SALES_PREVIEW_ROWS";
    pub const LOG_FORMAT: &str = "SUPERMARKET_SALES_LOG_FORMAT";
}
