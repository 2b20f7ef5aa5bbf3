// ==========================================
// 超市销售数据看板 - 配置层错误类型
// ==========================================
// 说明: 配置/页面目录文件不可读或无效时，调用方回退到默认值并记录警告
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置项无效: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("页面目录无效: {0}")]
    InvalidCatalog(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
