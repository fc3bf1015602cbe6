// ==========================================
// 涂料生产配比计算系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供前端/调用方使用
// ==========================================

pub mod error;
pub mod mix_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use mix_api::MixApi;
