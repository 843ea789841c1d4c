//! 检查所有已注册设备的数据表结构

use dashboard_lib::logging::init_logger;
use dashboard_lib::utils::load_config;
use dashboard_lib::{BaseService, SqliteDataSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config(None)?;
    init_logger(&config.logging_config)?;

    let registry = config.device_registry()?;
    let source = SqliteDataSource::connect(&config.data_source, registry.clone()).await?;
    source.health_check().await?;

    println!("🔍 检查设备数据表: {:?}", config.data_source.database_path);

    let mut failures = 0;
    for device in registry.devices() {
        match source.inspect_table(device).await {
            Ok(layout) => {
                let columns: Vec<&str> = layout.column_names().collect();
                println!("   ✅ {} ({}) | 列: {}", device, device.kind(), columns.join(", "));
            }
            Err(e) => {
                failures += 1;
                println!("   ❌ {} ({}) | [{}] {}", device, device.kind(), e.error_code(), e);
            }
        }
    }

    println!(
        "\n📊 共 {} 台设备，{} 台异常",
        registry.devices().len(),
        failures
    );
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
