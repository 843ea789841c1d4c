//! OHT/AGV 传感器状态分布看板 - 核心库
//!
//! 选择设备、传感器和状态过滤后，读取设备历史读数、按健康状态分组，
//! 生成每个状态一条箱线图序列的图表描述。

pub mod models;
pub mod utils;
pub mod logging;
pub mod domain;
pub mod services;
pub mod infrastructure;

use std::sync::Arc;

// 重新导出常用类型，方便使用
pub use models::*;
pub use utils::{AppError, AppResult, AppConfig};
pub use domain::{ChartBuilder, DeviceRegistry, StateClassifier};
pub use services::{BaseService, DashboardService, IDataSource};
pub use infrastructure::{InMemoryDataSource, SqliteDataSource};

/// 按配置连接 SQLite 数据源并组装看板服务
///
/// 配置不一致（设备清单、配色）时返回 `ConfigurationError`，数据库不可用时返回持久化错误。
pub async fn build_dashboard_service(config: &AppConfig) -> AppResult<DashboardService> {
    let registry = config.device_registry()?;
    let chart_builder = config.chart_builder()?;

    let source = SqliteDataSource::connect(&config.data_source, registry).await?;
    source.health_check().await?;
    log::info!("{} 健康检查通过", source.service_name());

    Ok(DashboardService::with_chart_builder(Arc::new(source), chart_builder))
}
