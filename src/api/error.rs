// ==========================================
// 超市销售数据看板 - API层错误类型
// ==========================================
// 职责: 统一 API 边界错误，转换各层错误为可读消息
// 说明: 单个问题的引擎错误不走此通道，在页面内渲染为失败提示
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::EngineError;
use crate::importer::error::DataSourceError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("数据源错误: {0}")]
    DataSource(String),

    #[error("计算错误: {0}")]
    Engine(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("输出序列化失败: {0}")]
    Serialization(String),
}

impl From<DataSourceError> for ApiError {
    fn from(err: DataSourceError) -> Self {
        ApiError::DataSource(err.to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { key, value } => {
                ApiError::InvalidInput(format!("{} = {}", key, value))
            }
            other => ApiError::Config(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data_source_error() {
        let err: ApiError = DataSourceError::FileNotFound("a.xlsx".to_string()).into();
        assert!(matches!(err, ApiError::DataSource(ref m) if m.contains("a.xlsx")));
    }

    #[test]
    fn test_from_config_invalid_value() {
        let err: ApiError = ConfigError::InvalidValue {
            key: "locale".to_string(),
            value: "xx".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::InvalidInput(ref m) if m == "locale = xx"));
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::NotFound("页面 reports".to_string());
        assert_eq!(err.to_string(), "资源未找到: 页面 reports");
    }
}
