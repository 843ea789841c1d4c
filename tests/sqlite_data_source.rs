use std::path::Path;
use std::sync::Arc;

use dashboard_lib::utils::config::DataSourceConfig;
use dashboard_lib::{
    BaseService, DashboardService, DeviceId, DeviceRegistry, IDataSource, SelectionRequest,
    SensorChannel, SqliteDataSource, StateClassifier, StateLabel,
};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use tempfile::TempDir;

/// 在临时目录中创建设备数据库，state 列按原系统以文本保存
async fn create_fixture_db(dir: &Path) -> DatabaseConnection {
    let _ = env_logger::builder().is_test(true).try_init();

    let db_path = dir.join("sensor_data.db");
    let db = Database::connect(format!("sqlite://{}?mode=rwc", db_path.to_string_lossy()))
        .await
        .expect("connect fixture db");

    db.execute_unprepared(
        r#"CREATE TABLE "oht_12" (
            "index" INTEGER,
            "time" TEXT,
            "state" TEXT,
            "NTC" REAL,
            "CT1" REAL,
            "CT2" REAL,
            "CT3" REAL,
            "CT4" REAL
        );"#,
    )
    .await
    .expect("create oht_12");
    db.execute_unprepared(
        r#"INSERT INTO "oht_12" VALUES
            (0, '2024-05-01 10:00:00', '0', 31.5, 10, 1.0, 2.0, 3.0),
            (1, '2024-05-01 10:00:01', '1', 32.0, 20, 1.1, 2.1, 3.1),
            (2, '2024-05-01 10:00:02', '9', 99.0, 99, 9.9, 9.9, 9.9),
            (3, '2024-05-01 10:00:03', '0', 31.0, 30, 1.2, NULL, 3.2),
            (4, '2024-05-01 10:00:04', '3', 40.0, 'bad', 1.3, 2.3, 3.3);"#,
    )
    .await
    .expect("insert oht_12");

    // 缺少 CT4 列
    db.execute_unprepared(
        r#"CREATE TABLE "agv_12" ("state" TEXT, "NTC" REAL, "CT1" REAL, "CT2" REAL, "CT3" REAL);"#,
    )
    .await
    .expect("create agv_12");

    db
}

async fn fixture_source(dir: &TempDir) -> SqliteDataSource {
    let db = create_fixture_db(dir.path()).await;
    SqliteDataSource::with_connection(db, DeviceRegistry::default())
}

#[tokio::test]
async fn test_fetch_device_decodes_rows_in_source_order() {
    let dir = TempDir::new().unwrap();
    let source = fixture_source(&dir).await;

    let readings = source.fetch_device(&DeviceId::new("oht_12")).await.unwrap();
    assert_eq!(readings.len(), 5);

    let states: Vec<Option<i64>> = readings.iter().map(|r| r.state).collect();
    assert_eq!(states, vec![Some(0), Some(1), Some(9), Some(0), Some(3)]);

    let ct1: Vec<Option<f64>> = readings.iter().map(|r| r.value(SensorChannel::Ct1)).collect();
    assert_eq!(ct1, vec![Some(10.0), Some(20.0), Some(99.0), Some(30.0), None]);
    assert_eq!(readings[3].value(SensorChannel::Ct3), None);
    assert_eq!(readings[0].value(SensorChannel::Ntc), Some(31.5));

    // 其它列原样透传
    assert_eq!(
        readings[1].extra.get("time"),
        Some(&Some("2024-05-01 10:00:01".to_string()))
    );
    assert!(readings[0].extra.contains_key("index"));
}

#[tokio::test]
async fn test_unregistered_device_is_not_found() {
    let dir = TempDir::new().unwrap();
    let source = fixture_source(&dir).await;

    let err = source.fetch_device(&DeviceId::new("oht_99")).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND_ERROR");
}

#[tokio::test]
async fn test_registered_device_without_table_is_not_found() {
    let dir = TempDir::new().unwrap();
    let source = fixture_source(&dir).await;

    let err = source.fetch_device(&DeviceId::new("agv_16")).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND_ERROR");
}

#[tokio::test]
async fn test_missing_sensor_column_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let source = fixture_source(&dir).await;

    let err = source.fetch_device(&DeviceId::new("agv_12")).await.unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_ERROR");
    assert!(err.to_string().contains("CT4"));
}

#[tokio::test]
async fn test_dashboard_over_sqlite_source() {
    let dir = TempDir::new().unwrap();
    let source = fixture_source(&dir).await;
    let service = DashboardService::new(Arc::new(source), StateClassifier::default());

    let spec = service
        .render(&SelectionRequest::new("oht_12", "CT1", "all"))
        .await
        .unwrap();
    assert_eq!(spec.series.len(), 4);
    assert_eq!(spec.series_for(StateLabel::Normal).unwrap().values, vec![10.0, 30.0]);
    assert_eq!(spec.series_for(StateLabel::Attention).unwrap().values, vec![20.0]);
    assert!(spec.series_for(StateLabel::Caution).unwrap().values.is_empty());

    // 非数字单元格保留为占位，不参与统计
    let danger = spec.series_for(StateLabel::Danger).unwrap();
    assert_eq!(danger.values.len(), 1);
    assert!(danger.values[0].is_nan());
    assert!(danger.statistics.is_none());

    let err = service
        .render(&SelectionRequest::new("agv_12", "NTC", "all"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_ERROR");
}

#[tokio::test]
async fn test_connect_read_only_from_config() {
    let dir = TempDir::new().unwrap();
    let fixture = create_fixture_db(dir.path()).await;
    drop(fixture);

    let config = DataSourceConfig {
        database_path: dir.path().join("sensor_data.db"),
        read_only: true,
        devices: vec!["oht_12".to_string()],
    };
    let registry = DeviceRegistry::new(&config.devices).unwrap();
    let source = SqliteDataSource::connect(&config, registry).await.unwrap();

    assert!(source.health_check().await.is_ok());
    assert_eq!(source.devices(), vec![DeviceId::new("oht_12")]);
    assert_eq!(source.fetch_device(&DeviceId::new("oht_12")).await.unwrap().len(), 5);

    // 清单之外的设备即使有表也不能查询
    let err = source.fetch_device(&DeviceId::new("agv_12")).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND_ERROR");
}

#[tokio::test]
async fn test_real_values_are_read_without_precision_loss() {
    let dir = TempDir::new().unwrap();
    let source = fixture_source(&dir).await;

    let db = source.get_database_connection();
    db.execute_unprepared(
        r#"CREATE TABLE "oht_13" ("state" INTEGER, "NTC" REAL, "CT1" REAL, "CT2" REAL, "CT3" REAL, "CT4" REAL, "note");"#,
    )
    .await
    .unwrap();
    db.execute_unprepared(
        r#"INSERT INTO "oht_13" VALUES
            (2, 0.1 + 0.2, 1.0 / 3.0, 2.0 / 7.0, 2.5, 100.0 / 3.0, 0.1 + 0.2),
            (1.0, 36.6, 7, NULL, 'x', 1e300, NULL);"#,
    )
    .await
    .unwrap();

    let readings = source.fetch_device(&DeviceId::new("oht_13")).await.unwrap();
    assert_eq!(readings.len(), 2);

    let first = &readings[0];
    assert_eq!(first.state, Some(2));
    assert_eq!(first.value(SensorChannel::Ntc), Some(0.1 + 0.2));
    assert_eq!(first.value(SensorChannel::Ct1), Some(1.0 / 3.0));
    assert_eq!(first.value(SensorChannel::Ct2), Some(2.0 / 7.0));
    assert_eq!(first.value(SensorChannel::Ct4), Some(100.0 / 3.0));
    assert_eq!(
        first.extra.get("note"),
        Some(&Some("0.30000000000000004".to_string()))
    );

    // INTEGER 列里的 1.0 按整数保存
    let second = &readings[1];
    assert_eq!(second.state, Some(1));
    assert_eq!(second.value(SensorChannel::Ct1), Some(7.0));
    assert_eq!(second.value(SensorChannel::Ct2), None);
    assert_eq!(second.value(SensorChannel::Ct3), None);
    assert_eq!(second.value(SensorChannel::Ct4), Some(1e300));
    assert_eq!(second.extra.get("note"), Some(&None));

    // 分组后的数值与库中一致
    let service = DashboardService::new(Arc::new(source), StateClassifier::default());
    let spec = service
        .render(&SelectionRequest::new("oht_13", "NTC", "주의"))
        .await
        .unwrap();
    assert_eq!(spec.series_for(StateLabel::Caution).unwrap().values, vec![0.1 + 0.2]);
}
