use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用程序统一错误类型
/// 看板流水线中所有可能出现的错误，除“状态码无法识别”外均终止本次请求
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    /// 通用错误，包含错误消息
    #[error("通用错误: {message}")]
    Generic { message: String },

    /// 输入/输出错误
    #[error("IO错误: {message} (Kind: {kind})")]
    IoError { message: String, kind: String },

    /// 数据库访问错误
    #[error("持久化错误: {message}")]
    PersistenceError { message: String },

    /// 配置相关错误
    ///
    /// **业务含义**: 固定的状态标签、颜色、传感器、设备枚举彼此不一致
    /// （例如某个状态标签没有配置颜色）。只会在启动阶段出现，请求阶段不可恢复。
    #[error("配置错误: {message}")]
    ConfigurationError { message: String },

    /// 资源未找到错误（未注册的设备或设备数据表不存在）
    #[error("资源未找到: {resource_type} - {message}")]
    NotFoundError {
        resource_type: String,
        message: String,
    },

    /// 数据表结构错误，缺少必需的列
    #[error("数据结构错误: 设备 {device_id} 缺少列 {column}")]
    SchemaError { device_id: String, column: String },

    /// 选择条件错误（传感器或状态过滤超出枚举范围）
    #[error("选择条件无效: {field} = {value}")]
    InvalidSelectionError { field: String, value: String },

    /// JSON序列化/反序列化错误
    #[error("JSON序列化/反序列化错误: {message}")]
    JsonError { message: String },
}

impl AppError {
    /// 创建通用错误
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// 创建IO错误
    pub fn io_error(message: impl Into<String>, kind_str: impl Into<String>) -> Self {
        Self::IoError {
            message: message.into(),
            kind: kind_str.into(),
        }
    }

    /// 创建持久化错误
    pub fn persistence_error(message: impl Into<String>) -> Self {
        Self::PersistenceError {
            message: message.into(),
        }
    }

    /// 创建配置错误
    pub fn configuration_error(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// 创建资源未找到错误
    pub fn not_found_error(resource_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFoundError {
            resource_type: resource_type.into(),
            message: message.into(),
        }
    }

    /// 创建数据结构错误
    ///
    /// **使用示例**:
    /// ```rust
    /// use dashboard_lib::AppError;
    /// let err = AppError::schema_error("oht_12", "CT3");
    /// assert_eq!(err.error_code(), "SCHEMA_ERROR");
    /// ```
    pub fn schema_error(device_id: impl Into<String>, column: impl Into<String>) -> Self {
        Self::SchemaError {
            device_id: device_id.into(),
            column: column.into(),
        }
    }

    /// 创建选择条件错误
    pub fn invalid_selection_error(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSelectionError {
            field: field.into(),
            value: value.into(),
        }
    }

    /// 创建JSON序列化错误
    pub fn json_error(message: impl Into<String>) -> Self {
        Self::JsonError {
            message: message.into(),
        }
    }

    /// 获取错误的简短描述
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Generic { .. } => "GENERIC",
            AppError::IoError { .. } => "IO_ERROR",
            AppError::PersistenceError { .. } => "PERSISTENCE_ERROR",
            AppError::ConfigurationError { .. } => "CONFIGURATION_ERROR",
            AppError::NotFoundError { .. } => "NOT_FOUND_ERROR",
            AppError::SchemaError { .. } => "SCHEMA_ERROR",
            AppError::InvalidSelectionError { .. } => "INVALID_SELECTION_ERROR",
            AppError::JsonError { .. } => "JSON_ERROR",
        }
    }

    /// 展示层用来代替图表显示的提示文本
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFoundError { .. } => "该设备没有数据".to_string(),
            AppError::SchemaError { device_id, column } => {
                format!("数据完整性错误: 设备 {} 的数据缺少 {} 列", device_id, column)
            }
            AppError::InvalidSelectionError { field, value } => {
                format!("无效的选择: {} 不支持 {}", field, value)
            }
            AppError::ConfigurationError { message } => format!("看板配置错误: {}", message),
            other => other.to_string(),
        }
    }
}

/// 标准 I/O 错误到 AppError 的转换
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError { message: err.to_string(), kind: format!("{:?}", err.kind()) }
    }
}

/// serde_json 错误到 AppError 的转换
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError { message: err.to_string() }
    }
}

/// 数据库错误统一包装为持久化错误
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::PersistenceError { message: err.to_string() }
    }
}

/// 配置文件解析错误
impl From<::config::ConfigError> for AppError {
    fn from(err: ::config::ConfigError) -> Self {
        AppError::ConfigurationError { message: err.to_string() }
    }
}

/// 字符串错误到 AppError 的转换（通用错误）
impl From<String> for AppError {
    fn from(err_msg: String) -> Self {
        Self::Generic { message: err_msg }
    }
}

/// &str 错误到 AppError 的转换（通用错误）
impl From<&str> for AppError {
    fn from(err_msg: &str) -> Self {
        Self::Generic { message: err_msg.to_string() }
    }
}

/// 应用程序结果类型别名
pub type AppResult<T> = Result<T, AppError>;
