// 文件: src/infrastructure/sqlite_data_source.rs
// 基于 SeaORM 原生语句读取 SQLite 中的设备读数：每台设备一张表，表名即设备名

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, QueryResult, Statement};

use crate::domain::device_registry::DeviceRegistry;
use crate::models::enums::SensorChannel;
use crate::models::structs::{DeviceId, Reading};
use crate::services::traits::{BaseService, IDataSource};
use crate::utils::config::DataSourceConfig;
use crate::utils::error::{AppError, AppResult};

/// 状态码所在的列
pub const STATE_COLUMN: &str = "state";

/// 数据表中各列的用途
#[derive(Debug, Clone, PartialEq, Eq)]
enum ColumnRole {
    State,
    Sensor(SensorChannel),
    PassThrough,
}

/// 设备数据表的列布局
#[derive(Debug, Clone)]
pub struct TableLayout {
    columns: Vec<(String, ColumnRole)>,
}

impl TableLayout {
    /// 根据 `PRAGMA table_info` 得到的列名归类，并检查必需列是否齐全
    pub fn from_columns(device_id: &DeviceId, column_names: Vec<String>) -> AppResult<Self> {
        let columns: Vec<(String, ColumnRole)> = column_names
            .into_iter()
            .map(|name| {
                let role = if name.eq_ignore_ascii_case(STATE_COLUMN) {
                    ColumnRole::State
                } else if let Some(channel) = SensorChannel::from_column(&name) {
                    ColumnRole::Sensor(channel)
                } else {
                    ColumnRole::PassThrough
                };
                (name, role)
            })
            .collect();

        if !columns.iter().any(|(_, role)| *role == ColumnRole::State) {
            return Err(AppError::schema_error(device_id.as_str(), STATE_COLUMN));
        }
        for channel in SensorChannel::ALL {
            if !columns.iter().any(|(_, role)| *role == ColumnRole::Sensor(channel)) {
                return Err(AppError::schema_error(device_id.as_str(), channel.column_name()));
            }
        }

        Ok(Self { columns })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// 每列同时取原值和存储类型 `typeof(...)`，列别名按位置编号
    pub fn select_sql(&self, table: &str) -> String {
        let select_list = self
            .columns
            .iter()
            .enumerate()
            .map(|(position, (name, _))| {
                let quoted = quote_identifier(name);
                format!(
                    "{} AS \"{}\", typeof({}) AS \"{}\"",
                    quoted,
                    value_alias(position),
                    quoted,
                    storage_alias(position)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("SELECT {} FROM {}", select_list, quote_identifier(table))
    }

    /// 解码一行；返回读数和无法解析的传感器单元格数量
    fn decode_row(&self, row: &QueryResult) -> AppResult<(Reading, usize)> {
        let mut reading = Reading::default();
        let mut bad_cells = 0;

        for (position, (name, role)) in self.columns.iter().enumerate() {
            let cell = read_cell(row, position)?;
            match role {
                ColumnRole::State => reading.state = cell.state_code(),
                ColumnRole::Sensor(channel) => {
                    let value = cell.sensor_value();
                    if !matches!(cell, SqlCell::Null) && value.is_none() {
                        bad_cells += 1;
                    }
                    reading.channels.set(*channel, value);
                }
                ColumnRole::PassThrough => {
                    reading.extra.insert(name.clone(), cell.into_text());
                }
            }
        }

        Ok((reading, bad_cells))
    }
}

fn value_alias(position: usize) -> String {
    format!("c{}", position)
}

fn storage_alias(position: usize) -> String {
    format!("t{}", position)
}

/// 按 SQLite 存储类型取出的单元格
#[derive(Debug, Clone, PartialEq)]
enum SqlCell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob,
}

impl SqlCell {
    fn state_code(&self) -> Option<i64> {
        match self {
            SqlCell::Integer(code) => Some(*code),
            SqlCell::Real(value) if value.is_finite() && value.fract() == 0.0 => Some(*value as i64),
            SqlCell::Text(raw) => parse_state_code(raw),
            _ => None,
        }
    }

    fn sensor_value(&self) -> Option<f64> {
        match self {
            SqlCell::Integer(value) => Some(*value as f64),
            SqlCell::Real(value) => value.is_finite().then_some(*value),
            SqlCell::Text(raw) => parse_sensor_value(raw),
            SqlCell::Null | SqlCell::Blob => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            SqlCell::Null | SqlCell::Blob => None,
            SqlCell::Integer(value) => Some(value.to_string()),
            SqlCell::Real(value) => Some(value.to_string()),
            SqlCell::Text(raw) => Some(raw),
        }
    }
}

/// REAL 按 f64 原样读取，避免经文本转换丢失精度
fn read_cell(row: &QueryResult, position: usize) -> AppResult<SqlCell> {
    let storage: String = row.try_get("", &storage_alias(position))?;
    let column = value_alias(position);
    let cell = match storage.as_str() {
        "null" => SqlCell::Null,
        "integer" => SqlCell::Integer(row.try_get("", &column)?),
        "real" => SqlCell::Real(row.try_get("", &column)?),
        "text" => SqlCell::Text(row.try_get("", &column)?),
        _ => SqlCell::Blob,
    };
    Ok(cell)
}

/// 标识符加双引号，内部的双引号转义
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// 解析状态码；接受 "2" 和 "2.0" 这种整数值，其它返回 None
pub fn parse_state_code(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(code) = raw.parse::<i64>() {
        return Some(code);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Some(value as i64),
        _ => None,
    }
}

/// 解析传感器数值
pub fn parse_sensor_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 基于 SQLite 的设备读数数据源
pub struct SqliteDataSource {
    db_conn: DatabaseConnection,
    registry: DeviceRegistry,
}

impl SqliteDataSource {
    /// 按配置连接数据库
    pub async fn connect(config: &DataSourceConfig, registry: DeviceRegistry) -> AppResult<Self> {
        let db_url = config.database_url();
        let conn = Database::connect(&db_url).await.map_err(|db_err| {
            AppError::persistence_error(format!("连接数据库失败 {}: {}", db_url, db_err))
        })?;
        log::info!(
            "已连接设备数据库 {:?}，注册设备 {} 台",
            config.database_path,
            registry.devices().len()
        );
        Ok(Self::with_connection(conn, registry))
    }

    /// 使用已有连接
    pub fn with_connection(db_conn: DatabaseConnection, registry: DeviceRegistry) -> Self {
        Self { db_conn, registry }
    }

    pub fn get_database_connection(&self) -> &DatabaseConnection {
        &self.db_conn
    }

    /// 读取设备表的列名，表不存在时返回空列表
    pub async fn table_columns(&self, device_id: &DeviceId) -> AppResult<Vec<String>> {
        let backend = self.db_conn.get_database_backend();
        let sql = format!("PRAGMA table_info({});", quote_identifier(device_id.as_str()));
        let rows = self
            .db_conn
            .query_all(Statement::from_string(backend, sql))
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String>("", "name").map_err(AppError::from))
            .collect()
    }

    /// 检查设备表结构
    ///
    /// - 未注册的设备或表不存在: `NotFoundError`
    /// - 缺少 `state` 或任一传感器列: `SchemaError`
    pub async fn inspect_table(&self, device_id: &DeviceId) -> AppResult<TableLayout> {
        self.registry.ensure_registered(device_id)?;

        let columns = self.table_columns(device_id).await?;
        if columns.is_empty() {
            return Err(AppError::not_found_error(
                "device",
                format!("设备 {} 的数据表不存在", device_id),
            ));
        }
        TableLayout::from_columns(device_id, columns)
    }
}

#[async_trait]
impl BaseService for SqliteDataSource {
    fn service_name(&self) -> &'static str {
        "SqliteDataSource"
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db_conn.ping().await.map_err(|db_err| {
            AppError::persistence_error(format!("数据库健康检查失败: {}", db_err))
        })?;
        log::debug!("数据库连接健康。");
        Ok(())
    }
}

#[async_trait]
impl IDataSource for SqliteDataSource {
    fn devices(&self) -> Vec<DeviceId> {
        self.registry.devices().to_vec()
    }

    async fn fetch_device(&self, device_id: &DeviceId) -> AppResult<Vec<Reading>> {
        let layout = self.inspect_table(device_id).await?;

        let backend = self.db_conn.get_database_backend();
        let rows = self
            .db_conn
            .query_all(Statement::from_string(
                backend,
                layout.select_sql(device_id.as_str()),
            ))
            .await
            .map_err(|e| AppError::persistence_error(format!("读取设备 {} 数据失败: {}", device_id, e)))?;

        let mut readings = Vec::with_capacity(rows.len());
        let mut bad_cells = 0;
        for row in &rows {
            let (reading, bad) = layout.decode_row(row)?;
            bad_cells += bad;
            readings.push(reading);
        }

        if bad_cells > 0 {
            crate::log_data_quality!(
                "设备 {} 有 {} 个传感器单元格不是数字，按空值处理",
                device_id,
                bad_cells
            );
        }
        log::debug!("设备 {} 读取 {} 条读数", device_id, readings.len());
        Ok(readings)
    }
}
