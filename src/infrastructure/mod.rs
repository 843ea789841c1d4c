//! 基础设施层：数据源实现与图表导出

pub mod sqlite_data_source;
pub mod memory_data_source;
pub mod plotly_export;

pub use sqlite_data_source::{SqliteDataSource, TableLayout};
pub use memory_data_source::InMemoryDataSource;
pub use plotly_export::{to_plotly_figure, to_plotly_json};
