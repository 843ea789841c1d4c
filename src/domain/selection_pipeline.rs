//! 选择流水线
//!
//! 打标签 → 按状态过滤 → 按状态分组取出单一传感器的值。纯函数，不修改输入。

use crate::domain::state_classifier::label_of;
use crate::models::enums::{SensorChannel, StateFilter};
use crate::models::structs::{GroupedSeries, Reading};
use crate::utils::error::AppResult;

/// 对读数做选择与分组
///
/// - 状态码无法识别的行不进入任何分组，只计入 [`GroupedSeries::excluded_count`]
/// - 过滤条件不是 `All` 时只保留对应状态的行
/// - 组内顺序与输入顺序一致；传感器单元格为空时以 NaN 占位
/// - 四个状态在结果中始终存在
pub fn select(readings: &[Reading], sensor: SensorChannel, filter: StateFilter) -> GroupedSeries {
    let mut grouped = GroupedSeries::default();

    for reading in readings {
        let Some(label) = label_of(reading.state) else {
            grouped.mark_excluded();
            continue;
        };
        if !filter.accepts(label) {
            continue;
        }
        grouped.push(label, reading.value(sensor).unwrap_or(f64::NAN));
    }

    log::debug!(
        "选择完成: 传感器={}, 过滤={}, 保留={}, 排除={}",
        sensor,
        filter,
        grouped.total_len(),
        grouped.excluded_count()
    );
    grouped
}

/// 字符串形式的选择条件
///
/// 传感器或状态过滤不在枚举范围内时返回 `InvalidSelectionError`，此时不会读取任何数据。
pub fn select_by_name(readings: &[Reading], sensor: &str, filter: &str) -> AppResult<GroupedSeries> {
    let sensor = sensor.parse::<SensorChannel>()?;
    let filter = filter.parse::<StateFilter>()?;
    Ok(select(readings, sensor, filter))
}
