/// 服务层模块
///
/// - traits: 数据源等外部协作者的接口
/// - dashboard_service: 单次看板请求的编排

/// 服务层基础trait定义
pub mod traits;

/// 看板服务
pub mod dashboard_service;

pub use traits::{BaseService, IDataSource};
pub use dashboard_service::DashboardService;
