//! 领域层模块
//!
//! 状态分类、选择流水线、图表构建都是不依赖存储的纯函数

pub mod state_classifier;
pub mod selection_pipeline;
pub mod statistics;
pub mod chart_builder;
pub mod device_registry;

pub use state_classifier::{label_of, StateClassifier};
pub use selection_pipeline::{select, select_by_name};
pub use chart_builder::ChartBuilder;
pub use device_registry::DeviceRegistry;
