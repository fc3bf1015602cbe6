// ==========================================
// 涂料生产配比计算系统 - 引擎层
// ==========================================
// 职责: 实现配比计算业务规则,纯内存计算
// 红线: 引擎不做 I/O, 所有校验必须输出 reason
// ==========================================

pub mod correction;
pub mod orchestrator;
pub mod proportion;
pub mod ratio_normalizer;
pub mod stock_resolver;
pub mod unit_converter;
pub mod validation;

// 重导出核心引擎
pub use correction::{CorrectionEngine, CorrectionError, CorrectionOutcome};
pub use orchestrator::MixCalculator;
pub use proportion::ProportionCalculator;
pub use ratio_normalizer::RatioNormalizer;
pub use stock_resolver::{ResolvedStock, StockResolver};
pub use unit_converter::UnitConverter;
pub use validation::{ValidationAggregator, ValidationLimits};
