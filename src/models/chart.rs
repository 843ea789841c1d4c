//! 图表描述模型
//!
//! 只描述“画什么”，不负责绘制。展示层拿到 [`ChartSpec`] 后自行渲染。

use serde::{Deserialize, Serialize};

use crate::models::enums::StateLabel;

/// 箱线图上的统计标注，可在 `[dashboard]` 配置中用 `box_annotation` 指定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxAnnotation {
    /// 不标注
    None,
    /// 标注均值
    Mean,
    /// 标注均值和标准差
    #[default]
    MeanAndStdDev,
}

/// 一组值的汇总统计，只统计有限值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStatistics {
    pub count: usize,
    pub mean: f64,
    /// 样本标准差，少于两个值时为 None
    pub std_dev: Option<f64>,
    pub min: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub max: f64,
}

/// 某一状态的分布序列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSeries {
    pub name: StateLabel,
    pub color: String,
    pub values: Vec<f64>,
    pub annotation: BoxAnnotation,
    /// 没有有限值时为 None（空序列也照常输出）
    pub statistics: Option<SeriesStatistics>,
}

impl BoxSeries {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 声明式图表描述
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub legend_title: String,
    /// 固定四条，按状态规范顺序排列
    pub series: Vec<BoxSeries>,
}

impl ChartSpec {
    pub fn series_for(&self, label: StateLabel) -> Option<&BoxSeries> {
        self.series.iter().find(|s| s.name == label)
    }
}
