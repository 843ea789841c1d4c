//! 图表描述导出为 Plotly figure JSON
//!
//! 版式与原看板一致：标题居中、白色背景、浅灰网格线、箱线图标注均值和标准差。

use serde_json::{json, Value};

use crate::models::chart::{BoxAnnotation, BoxSeries, ChartSpec};
use crate::utils::error::AppResult;

fn box_trace(series: &BoxSeries) -> Value {
    let boxmean = match series.annotation {
        BoxAnnotation::MeanAndStdDev => json!("sd"),
        BoxAnnotation::Mean => json!(true),
        BoxAnnotation::None => json!(false),
    };
    // NaN 占位输出为 null，Plotly 会跳过
    let y: Vec<Option<f64>> = series
        .values
        .iter()
        .map(|v| v.is_finite().then_some(*v))
        .collect();

    json!({
        "type": "box",
        "y": y,
        "name": series.name.as_str(),
        "marker": { "color": series.color },
        "boxmean": boxmean,
        "hoverinfo": "y",
    })
}

/// 转换为 Plotly figure（`data` + `layout`）
pub fn to_plotly_figure(spec: &ChartSpec) -> Value {
    let data: Vec<Value> = spec.series.iter().map(box_trace).collect();

    json!({
        "data": data,
        "layout": {
            "title": {
                "text": spec.title,
                "x": 0.5,
                "xanchor": "center",
                "font": { "size": 20 },
            },
            "xaxis": {
                "title": spec.x_axis_title,
                "title_font": { "size": 16 },
                "tickfont": { "size": 14 },
            },
            "yaxis": {
                "title": spec.y_axis_title,
                "title_font": { "size": 16 },
                "tickfont": { "size": 14 },
                "gridcolor": "lightgrey",
            },
            "legend": {
                "title": spec.legend_title,
                "font": { "size": 14 },
            },
            "plot_bgcolor": "white",
            "margin": { "l": 40, "r": 40, "t": 60, "b": 40 },
        },
    })
}

/// 序列化为格式化的 JSON 文本
pub fn to_plotly_json(spec: &ChartSpec) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&to_plotly_figure(spec))?)
}
