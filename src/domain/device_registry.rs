//! 已注册设备清单
//!
//! 只有清单中的设备可以被查询，设备名同时用作数据表名。

use crate::models::structs::DeviceId;
use crate::utils::error::{AppError, AppResult};

/// 原看板中可选的设备
pub const DEFAULT_DEVICES: [&str; 10] = [
    "oht_12", "oht_13", "oht_14", "oht_15", "oht_16",
    "agv_12", "agv_13", "agv_14", "agv_15", "agv_16",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRegistry {
    devices: Vec<DeviceId>,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self {
            devices: DEFAULT_DEVICES.iter().map(|name| DeviceId::new(*name)).collect(),
        }
    }
}

impl DeviceRegistry {
    /// 按配置构造；清单为空、名称非法或重复都属于配置错误
    pub fn new<I, S>(names: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut devices: Vec<DeviceId> = Vec::new();
        for name in names {
            let device = DeviceId::new(name.as_ref().trim());
            if !device.is_valid_identifier() {
                return Err(AppError::configuration_error(format!(
                    "设备名只能包含字母、数字和下划线: '{}'",
                    name.as_ref()
                )));
            }
            if devices.contains(&device) {
                return Err(AppError::configuration_error(format!("设备重复注册: {}", device)));
            }
            devices.push(device);
        }
        if devices.is_empty() {
            return Err(AppError::configuration_error("设备清单不能为空"));
        }
        Ok(Self { devices })
    }

    pub fn devices(&self) -> &[DeviceId] {
        &self.devices
    }

    pub fn contains(&self, device_id: &DeviceId) -> bool {
        self.devices.contains(device_id)
    }

    /// 未注册的设备返回 `NotFoundError`
    pub fn ensure_registered(&self, device_id: &DeviceId) -> AppResult<()> {
        if self.contains(device_id) {
            Ok(())
        } else {
            Err(AppError::not_found_error(
                "device",
                format!("设备 {} 未注册", device_id),
            ))
        }
    }
}
