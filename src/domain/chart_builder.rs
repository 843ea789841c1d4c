//! 图表构建器
//!
//! 把分组结果转换为声明式的箱线图描述：每个状态一条序列，
//! 顺序、颜色固定，空序列也照常输出，保证不同过滤条件下的布局一致。

use crate::domain::state_classifier::StateClassifier;
use crate::domain::statistics::summarize;
use crate::models::chart::{BoxAnnotation, BoxSeries, ChartSpec};
use crate::models::enums::SensorChannel;
use crate::models::structs::{DeviceId, GroupedSeries};

/// 图例标题
pub const LEGEND_TITLE: &str = "상태별 분류";
/// X 轴标题
pub const X_AXIS_TITLE: &str = "State";

/// 图表标题
pub fn chart_title(sensor: SensorChannel, device_id: &DeviceId) -> String {
    format!("State별 {} 값 분포 - {}", sensor, device_id)
}

/// Y 轴标题
pub fn y_axis_title(sensor: SensorChannel) -> String {
    format!("{} 값", sensor)
}

#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    classifier: StateClassifier,
    annotation: BoxAnnotation,
}

impl ChartBuilder {
    /// 默认标注均值和标准差
    pub fn new(classifier: StateClassifier) -> Self {
        Self {
            classifier,
            annotation: BoxAnnotation::default(),
        }
    }

    pub fn with_annotation(mut self, annotation: BoxAnnotation) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn annotation(&self) -> BoxAnnotation {
        self.annotation
    }

    /// 构建图表描述，总是输出四条序列
    pub fn build(&self, grouped: &GroupedSeries, sensor: SensorChannel, device_id: &DeviceId) -> ChartSpec {
        let series = grouped
            .iter()
            .map(|(label, values)| BoxSeries {
                name: label,
                color: self.classifier.color_of(label).to_string(),
                values: values.to_vec(),
                annotation: self.annotation,
                statistics: summarize(values),
            })
            .collect();

        ChartSpec {
            title: chart_title(sensor, device_id),
            x_axis_title: X_AXIS_TITLE.to_string(),
            y_axis_title: y_axis_title(sensor),
            legend_title: LEGEND_TITLE.to_string(),
            series,
        }
    }
}
