use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use crate::models::enums::{SensorChannel, StateFilter, StateLabel, VehicleKind};
use crate::utils::error::AppResult;

/// 设备标识（即数据表名），例如 `oht_12`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 车辆类型
    pub fn kind(&self) -> VehicleKind {
        VehicleKind::from_device_name(&self.0)
    }

    /// 设备名只能包含字母、数字和下划线，保证可以安全地作为表名
    pub fn is_valid_identifier(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl Display for DeviceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// 一条读数中各传感器通道的值，按 [`SensorChannel::index`] 存放
///
/// `None` 表示该单元格为空或不是数字。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelValues([Option<f64>; 5]);

impl ChannelValues {
    pub fn get(&self, channel: SensorChannel) -> Option<f64> {
        self.0[channel.index()]
    }

    pub fn set(&mut self, channel: SensorChannel, value: Option<f64>) {
        self.0[channel.index()] = value;
    }
}

/// 设备时间序列中的一行
///
/// 由数据源产生，取回后不再修改。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reading {
    /// 数值状态码，缺失或无法解析时为 None
    pub state: Option<i64>,
    /// 各传感器通道的值
    pub channels: ChannelValues,
    /// 其它列，原样透传（文本形式）
    pub extra: BTreeMap<String, Option<String>>,
}

impl Reading {
    pub fn new(state: Option<i64>) -> Self {
        Self {
            state,
            ..Default::default()
        }
    }

    /// 设置某个通道的值，便于链式构造
    pub fn with_value(mut self, channel: SensorChannel, value: f64) -> Self {
        self.channels.set(channel, Some(value));
        self
    }

    /// 附加一列透传数据
    pub fn with_extra(mut self, column: impl Into<String>, value: Option<String>) -> Self {
        self.extra.insert(column.into(), value);
        self
    }

    pub fn value(&self, channel: SensorChannel) -> Option<f64> {
        self.channels.get(channel)
    }
}

/// 展示层提交的原始选择（全部是字符串）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub device: String,
    pub sensor: String,
    pub state: String,
}

impl SelectionRequest {
    pub fn new(device: impl Into<String>, sensor: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            sensor: sensor.into(),
            state: state.into(),
        }
    }

    /// 校验传感器与状态过滤，设备是否已注册由数据源判断
    pub fn parse(&self) -> AppResult<Selection> {
        let sensor = self.sensor.parse::<SensorChannel>()?;
        let state_filter = self.state.parse::<StateFilter>()?;
        Ok(Selection {
            device_id: DeviceId::new(self.device.trim()),
            sensor,
            state_filter,
        })
    }
}

/// 一次看板查询的完整选择条件，每次交互重新构造
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub device_id: DeviceId,
    pub sensor: SensorChannel,
    pub state_filter: StateFilter,
}

/// 按状态分组后的某一传感器的值
///
/// 四个状态始终都存在，没有数据的状态为空序列；组内顺序与数据源行顺序一致。
/// 空单元格以 NaN 占位，保证组大小等于该状态的行数。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedSeries {
    groups: [Vec<f64>; 4],
    /// 因状态码无法识别而被排除的行数
    excluded: usize,
}

impl GroupedSeries {
    pub(crate) fn push(&mut self, label: StateLabel, value: f64) {
        self.groups[label.index()].push(value);
    }

    pub(crate) fn mark_excluded(&mut self) {
        self.excluded += 1;
    }

    pub fn get(&self, label: StateLabel) -> &[f64] {
        &self.groups[label.index()]
    }

    /// 按规范顺序遍历（包括空组）
    pub fn iter(&self) -> impl Iterator<Item = (StateLabel, &[f64])> + '_ {
        StateLabel::ALL
            .into_iter()
            .map(move |label| (label, self.get(label)))
    }

    /// 所有组的值总数
    pub fn total_len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded
    }

    pub fn into_groups(self) -> [Vec<f64>; 4] {
        self.groups
    }
}
