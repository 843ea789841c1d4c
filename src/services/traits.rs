/// 服务层基础trait定义
/// 提供数据源接口规范，支持依赖注入和测试

use async_trait::async_trait;

use crate::models::structs::{DeviceId, Reading};
use crate::utils::error::AppResult;

/// 基础服务trait
#[async_trait]
pub trait BaseService: Send + Sync {
    /// 服务名称
    fn service_name(&self) -> &'static str;

    /// 健康检查
    async fn health_check(&self) -> AppResult<()>;
}

/// 设备读数数据源
///
/// 连接池、重试、超时都由实现自己负责；对看板来说只是一次
/// 要么返回全部读数、要么失败的调用。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IDataSource: Send + Sync {
    /// 已注册、可查询的设备
    fn devices(&self) -> Vec<DeviceId>;

    /// 读取某设备的全部历史读数，保持数据源的自然行顺序
    ///
    /// - 未注册的设备: `NotFoundError`
    /// - 缺少 `state` 列或任一传感器列: `SchemaError`
    async fn fetch_device(&self, device_id: &DeviceId) -> AppResult<Vec<Reading>>;
}
