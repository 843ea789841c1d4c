//! 内存数据源，用于测试和演示

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::device_registry::DeviceRegistry;
use crate::models::structs::{DeviceId, Reading};
use crate::services::traits::{BaseService, IDataSource};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    registry: DeviceRegistry,
    tables: HashMap<DeviceId, Vec<Reading>>,
}

impl InMemoryDataSource {
    pub fn new(registry: DeviceRegistry) -> Self {
        Self {
            registry,
            tables: HashMap::new(),
        }
    }

    /// 设置某设备的读数，便于链式构造
    pub fn with_table(mut self, device_id: impl Into<DeviceId>, readings: Vec<Reading>) -> Self {
        self.insert_table(device_id, readings);
        self
    }

    pub fn insert_table(&mut self, device_id: impl Into<DeviceId>, readings: Vec<Reading>) {
        self.tables.insert(device_id.into(), readings);
    }
}

#[async_trait]
impl BaseService for InMemoryDataSource {
    fn service_name(&self) -> &'static str {
        "InMemoryDataSource"
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl IDataSource for InMemoryDataSource {
    fn devices(&self) -> Vec<DeviceId> {
        self.registry.devices().to_vec()
    }

    async fn fetch_device(&self, device_id: &DeviceId) -> AppResult<Vec<Reading>> {
        self.registry.ensure_registered(device_id)?;
        self.tables.get(device_id).cloned().ok_or_else(|| {
            AppError::not_found_error("device", format!("设备 {} 的数据表不存在", device_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::SensorChannel;

    #[tokio::test]
    async fn test_fetch_registered_device() {
        let source = InMemoryDataSource::new(DeviceRegistry::default()).with_table(
            "oht_12",
            vec![Reading::new(Some(0)).with_value(SensorChannel::Ntc, 25.0)],
        );
        assert!(source.health_check().await.is_ok());

        let readings = source.fetch_device(&DeviceId::new("oht_12")).await.unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].value(SensorChannel::Ntc), Some(25.0));
    }

    #[tokio::test]
    async fn test_unregistered_or_missing_table_is_not_found() {
        let source = InMemoryDataSource::new(DeviceRegistry::default())
            .with_table("oht_99", vec![Reading::new(Some(0))]);

        // 表存在但设备未注册
        let err = source.fetch_device(&DeviceId::new("oht_99")).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND_ERROR");

        // 设备已注册但没有表
        let err = source.fetch_device(&DeviceId::new("agv_16")).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND_ERROR");
    }
}
