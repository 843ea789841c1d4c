//! 看板服务
//!
//! 每次选择变化都完整跑一遍：校验选择 → 读取设备数据 → 选择分组 → 构建图表。
//! 服务本身只持有不可变状态，可同时服务多个会话。

use std::sync::Arc;

use crate::domain::chart_builder::ChartBuilder;
use crate::domain::selection_pipeline::select;
use crate::domain::state_classifier::StateClassifier;
use crate::models::chart::ChartSpec;
use crate::models::enums::{SensorChannel, StateFilter};
use crate::models::structs::{DeviceId, Selection, SelectionRequest};
use crate::services::traits::IDataSource;
use crate::utils::error::AppResult;

pub struct DashboardService {
    data_source: Arc<dyn IDataSource>,
    chart_builder: ChartBuilder,
}

impl DashboardService {
    pub fn new(data_source: Arc<dyn IDataSource>, classifier: StateClassifier) -> Self {
        Self::with_chart_builder(data_source, ChartBuilder::new(classifier))
    }

    pub fn with_chart_builder(data_source: Arc<dyn IDataSource>, chart_builder: ChartBuilder) -> Self {
        Self {
            data_source,
            chart_builder,
        }
    }

    /// 设备下拉框选项
    pub fn device_options(&self) -> Vec<DeviceId> {
        self.data_source.devices()
    }

    /// 传感器下拉框选项
    pub fn sensor_options(&self) -> Vec<SensorChannel> {
        SensorChannel::ALL.to_vec()
    }

    /// 状态下拉框选项
    pub fn state_filter_options(&self) -> Vec<StateFilter> {
        StateFilter::options()
    }

    /// 处理展示层提交的原始选择
    ///
    /// 传感器或状态过滤无效时直接返回 `InvalidSelectionError`，不会访问数据源。
    pub async fn render(&self, request: &SelectionRequest) -> AppResult<ChartSpec> {
        let selection = request.parse().map_err(|e| {
            log::warn!("选择条件无效: {:?} - {}", request, e);
            e
        })?;
        self.render_selection(&selection).await
    }

    /// 处理已校验的选择
    pub async fn render_selection(&self, selection: &Selection) -> AppResult<ChartSpec> {
        crate::log_user_operation!(
            "查看设备 {} 的 {} 分布, 状态过滤={}",
            selection.device_id,
            selection.sensor,
            selection.state_filter
        );

        let readings = self.data_source.fetch_device(&selection.device_id).await?;
        let grouped = select(&readings, selection.sensor, selection.state_filter);

        if grouped.excluded_count() > 0 {
            crate::log_data_quality!(
                "设备 {} 有 {} 条读数的状态码无法识别，已排除",
                selection.device_id,
                grouped.excluded_count()
            );
        }

        Ok(self
            .chart_builder
            .build(&grouped, selection.sensor, &selection.device_id))
    }
}
