use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::device_registry::{DeviceRegistry, DEFAULT_DEVICES};
use crate::domain::state_classifier::{default_color, StateClassifier};
use crate::domain::chart_builder::ChartBuilder;
use crate::logging::parse_level;
use crate::models::chart::BoxAnnotation;
use crate::models::enums::StateLabel;
use crate::utils::error::{AppError, AppResult};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";
/// 环境变量前缀，例如 `DASHBOARD__DATA_SOURCE__DATABASE_PATH`
pub const ENV_PREFIX: &str = "DASHBOARD";
/// 按列表解析的环境变量键
const DEVICES_KEY: &str = "data_source.devices";

/// 应用程序主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 应用程序基本设置
    pub app_settings: AppSettings,
    /// 数据源配置
    pub data_source: DataSourceConfig,
    /// 看板显示配置
    pub dashboard: DashboardConfig,
    /// 日志配置
    pub logging_config: LoggingConfig,
}

/// 应用程序基本设置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// 应用程序名称
    pub app_name: String,
    /// 运行环境 (development, testing, production)
    pub environment: String,
}

/// 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    /// SQLite 数据库文件路径，每台设备一张表
    pub database_path: PathBuf,
    /// 以只读方式打开数据库
    pub read_only: bool,
    /// 已注册的设备（同时是表名）
    pub devices: Vec<String>,
}

/// 看板显示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 状态标签 -> 颜色，四个状态必须全部配置
    pub state_colors: BTreeMap<String, String>,
    /// 箱线图统计标注: none / mean / mean_and_std_dev
    pub box_annotation: BoxAnnotation,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (error, warn, info, debug, trace, off)
    pub log_level: String,
    /// 是否启用控制台输出
    pub console_output: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: "SensorStateDashboard".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("sensor_data.db"),
            read_only: true,
            devices: DEFAULT_DEVICES.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl DataSourceConfig {
    /// sqlx 使用的连接串
    pub fn database_url(&self) -> String {
        let mode = if self.read_only { "ro" } else { "rwc" };
        format!("sqlite://{}?mode={}", self.database_path.to_string_lossy(), mode)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            state_colors: StateLabel::ALL
                .into_iter()
                .map(|label| (label.as_str().to_string(), default_color(label).to_string()))
                .collect(),
            box_annotation: BoxAnnotation::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            console_output: true,
        }
    }
}

impl AppConfig {
    /// 按配置构造设备清单
    pub fn device_registry(&self) -> AppResult<DeviceRegistry> {
        DeviceRegistry::new(&self.data_source.devices)
    }

    /// 按配置构造状态分类器
    pub fn state_classifier(&self) -> AppResult<StateClassifier> {
        StateClassifier::from_palette(&self.dashboard.state_colors)
    }

    /// 按配置构造图表构建器（配色 + 统计标注）
    pub fn chart_builder(&self) -> AppResult<ChartBuilder> {
        Ok(ChartBuilder::new(self.state_classifier()?).with_annotation(self.dashboard.box_annotation))
    }
}

/// 配置管理器
/// 负责加载和校验应用程序配置：配置文件（可选）+ 环境变量覆盖
pub struct ConfigManager {
    config: AppConfig,
    config_file_path: PathBuf,
    /// 替代进程环境变量的覆盖项，None 时读取真实环境
    env_overrides: Option<::config::Map<String, String>>,
}

impl ConfigManager {
    /// 创建新的配置管理器
    pub fn new(config_file_path: PathBuf) -> Self {
        Self {
            config: AppConfig::default(),
            config_file_path,
            env_overrides: None,
        }
    }

    /// 用给定的变量表代替进程环境变量
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_overrides = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// 环境变量源；设备清单用逗号分隔，例如 `DASHBOARD__DATA_SOURCE__DEVICES=oht_12,agv_12`
    fn environment_source(&self) -> ::config::Environment {
        ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key(DEVICES_KEY)
            .source(self.env_overrides.clone())
    }

    /// 从文件和环境变量加载配置，文件不存在时使用默认值
    pub fn load(&mut self) -> AppResult<()> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(self.config_file_path.as_path()).required(false))
            .add_source(self.environment_source())
            .build()?;

        self.config = settings
            .try_deserialize::<AppConfig>()
            .map_err(|e| AppError::configuration_error(format!("解析配置文件失败: {}", e)))?;

        log::debug!("配置加载完成: {:?}", self.config_file_path);
        Ok(())
    }

    /// 获取配置的只读引用
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取配置的可变引用
    pub fn get_config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// 验证配置的有效性
    ///
    /// 设备清单、状态配色、日志级别任何一项不一致都是启动期的 `ConfigurationError`
    pub fn validate_config(&self) -> AppResult<()> {
        let valid_environments = ["development", "testing", "production"];
        if !valid_environments.contains(&self.config.app_settings.environment.as_str()) {
            return Err(AppError::configuration_error(format!(
                "无效的环境配置: {}，有效值: {:?}",
                self.config.app_settings.environment, valid_environments
            )));
        }

        if self.config.data_source.database_path.as_os_str().is_empty() {
            return Err(AppError::configuration_error("数据库路径不能为空"));
        }

        self.config.device_registry()?;
        self.config.state_classifier()?;
        parse_level(&self.config.logging_config.log_level)?;

        Ok(())
    }

    /// 重置为默认配置
    pub fn reset_to_default(&mut self) {
        self.config = AppConfig::default();
    }
}

/// 加载并校验配置
pub fn load_config(config_path: Option<PathBuf>) -> AppResult<AppConfig> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config_manager = ConfigManager::new(config_path);
    config_manager.load()?;
    config_manager.validate_config()?;
    Ok(config_manager.config)
}
