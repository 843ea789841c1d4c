// 看板命令行入口：dashboard <设备> <传感器> [状态]
// 成功时输出 Plotly figure JSON，失败时输出展示层提示文本

use anyhow::Context;
use dashboard_lib::infrastructure::to_plotly_json;
use dashboard_lib::logging::init_logger;
use dashboard_lib::utils::load_config;
use dashboard_lib::{build_dashboard_service, SelectionRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = load_config(None).context("加载看板配置失败")?;
    init_logger(&config.logging_config)?;
    let service = build_dashboard_service(&config).await?;

    if args.len() < 2 {
        let devices: Vec<String> = service.device_options().iter().map(|d| d.to_string()).collect();
        let sensors: Vec<String> = service.sensor_options().iter().map(|s| s.to_string()).collect();
        let states: Vec<String> = service.state_filter_options().iter().map(|s| s.to_string()).collect();
        eprintln!("用法: dashboard <设备> <传感器> [状态]");
        eprintln!("  设备: {}", devices.join(", "));
        eprintln!("  传感器: {}", sensors.join(", "));
        eprintln!("  状态: {}", states.join(", "));
        std::process::exit(2);
    }

    let state = args.get(2).map(String::as_str).unwrap_or("all");
    let request = SelectionRequest::new(args[0].as_str(), args[1].as_str(), state);

    match service.render(&request).await {
        Ok(spec) => {
            println!("{}", to_plotly_json(&spec)?);
            Ok(())
        }
        Err(e) => {
            log::error!("[{}] {}", e.error_code(), e);
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
