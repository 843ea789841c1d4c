//! # 模型枚举类型模块
//!
//! ## 业务作用
//! 本模块定义了看板中使用的封闭枚举：
//! - **状态标签**: 四个有序的健康状态（정상/관심/주의/위험）
//! - **传感器通道**: NTC、CT1..CT4
//! - **状态过滤**: 全部或单一状态
//! - **车辆类型**: OHT / AGV
//!
//! 所有枚举都提供与字符串的双向转换，未知字符串统一返回 `InvalidSelectionError`。

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::utils::error::AppError;

/// 健康状态标签
///
/// 与数值状态码一一对应：0=정상, 1=관심, 2=주의, 3=위험。
/// 变体的声明顺序即为规范顺序，分组和图表都按 [`StateLabel::ALL`] 遍历。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StateLabel {
    /// 正常
    #[serde(rename = "정상")]
    Normal,
    /// 关注
    #[serde(rename = "관심")]
    Attention,
    /// 注意
    #[serde(rename = "주의")]
    Caution,
    /// 危险
    #[serde(rename = "위험")]
    Danger,
}

impl StateLabel {
    /// 规范顺序
    pub const ALL: [StateLabel; 4] = [
        StateLabel::Normal,
        StateLabel::Attention,
        StateLabel::Caution,
        StateLabel::Danger,
    ];

    /// 状态码到标签，超出 {0,1,2,3} 返回 None
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(StateLabel::Normal),
            1 => Some(StateLabel::Attention),
            2 => Some(StateLabel::Caution),
            3 => Some(StateLabel::Danger),
            _ => None,
        }
    }

    /// 对应的数值状态码
    pub fn code(self) -> i64 {
        match self {
            StateLabel::Normal => 0,
            StateLabel::Attention => 1,
            StateLabel::Caution => 2,
            StateLabel::Danger => 3,
        }
    }

    /// 在规范顺序中的位置
    pub fn index(self) -> usize {
        self.code() as usize
    }

    /// 看板上显示的标签
    pub fn as_str(self) -> &'static str {
        match self {
            StateLabel::Normal => "정상",
            StateLabel::Attention => "관심",
            StateLabel::Caution => "주의",
            StateLabel::Danger => "위험",
        }
    }

    /// 英文名称，配置文件和命令行里也可以使用
    pub fn english_name(self) -> &'static str {
        match self {
            StateLabel::Normal => "normal",
            StateLabel::Attention => "attention",
            StateLabel::Caution => "caution",
            StateLabel::Danger => "danger",
        }
    }

    /// 按标签名查找，同时接受韩文标签与英文名称
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        StateLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == name || label.english_name().eq_ignore_ascii_case(name))
    }
}

impl Display for StateLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StateLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateLabel::from_name(s).ok_or_else(|| AppError::invalid_selection_error("state", s))
    }
}

/// 传感器通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensorChannel {
    #[serde(rename = "NTC")]
    Ntc,
    #[serde(rename = "CT1")]
    Ct1,
    #[serde(rename = "CT2")]
    Ct2,
    #[serde(rename = "CT3")]
    Ct3,
    #[serde(rename = "CT4")]
    Ct4,
}

impl SensorChannel {
    /// 系统已知的全部通道，同时也是数据表中必须存在的列
    pub const ALL: [SensorChannel; 5] = [
        SensorChannel::Ntc,
        SensorChannel::Ct1,
        SensorChannel::Ct2,
        SensorChannel::Ct3,
        SensorChannel::Ct4,
    ];

    /// 数据表中的列名
    pub fn column_name(self) -> &'static str {
        match self {
            SensorChannel::Ntc => "NTC",
            SensorChannel::Ct1 => "CT1",
            SensorChannel::Ct2 => "CT2",
            SensorChannel::Ct3 => "CT3",
            SensorChannel::Ct4 => "CT4",
        }
    }

    pub fn index(self) -> usize {
        match self {
            SensorChannel::Ntc => 0,
            SensorChannel::Ct1 => 1,
            SensorChannel::Ct2 => 2,
            SensorChannel::Ct3 => 3,
            SensorChannel::Ct4 => 4,
        }
    }

    /// 列名匹配（不区分大小写）
    pub fn from_column(name: &str) -> Option<Self> {
        let name = name.trim();
        SensorChannel::ALL
            .into_iter()
            .find(|channel| channel.column_name().eq_ignore_ascii_case(name))
    }
}

impl Display for SensorChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl FromStr for SensorChannel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorChannel::from_column(s).ok_or_else(|| AppError::invalid_selection_error("sensor", s))
    }
}

/// 状态过滤条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StateFilter {
    /// 全部状态
    #[default]
    All,
    /// 只保留某一个状态
    Only(StateLabel),
}

impl StateFilter {
    /// 下拉框中的全部选项，顺序与原看板一致
    pub fn options() -> Vec<StateFilter> {
        std::iter::once(StateFilter::All)
            .chain(StateLabel::ALL.into_iter().map(StateFilter::Only))
            .collect()
    }

    /// 标签是否通过过滤
    pub fn accepts(self, label: StateLabel) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::Only(wanted) => wanted == label,
        }
    }
}

impl Display for StateFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StateFilter::All => write!(f, "all"),
            StateFilter::Only(label) => write!(f, "{}", label),
        }
    }
}

impl FromStr for StateFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed == "전체" {
            return Ok(StateFilter::All);
        }
        StateLabel::from_name(trimmed)
            .map(StateFilter::Only)
            .ok_or_else(|| AppError::invalid_selection_error("state", s))
    }
}

/// 车辆类型，由设备名前缀决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    /// 天车（Overhead Hoist Transport）
    Oht,
    /// 自动导引车（Automated Guided Vehicle）
    Agv,
    /// 其它命名的设备
    Other,
}

impl VehicleKind {
    pub fn from_device_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.starts_with("oht") {
            VehicleKind::Oht
        } else if lower.starts_with("agv") {
            VehicleKind::Agv
        } else {
            VehicleKind::Other
        }
    }
}

impl Display for VehicleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VehicleKind::Oht => "OHT",
            VehicleKind::Agv => "AGV",
            VehicleKind::Other => "Other",
        };
        write!(f, "{}", s)
    }
}
