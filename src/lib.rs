// ==========================================
// 涂料生产配比计算系统 - 核心库
// ==========================================
// 系统定位: 决策支持系统 (人工最终控制权)
// 引擎职责: 按目标体积把配方等比拆解到每个原料组分,
//           含称量误差的修正传播与可提交性校验
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CorrectionRole, MeasureType, MeasureUnit, ValidationCode, WeightBasis};

// 领域实体
pub use domain::{
    CalculatedComponent, CalculationResult, CorrectionDetail, CorrectionSession, Formula,
    FormulaComponent, ItemSnapshot, Measure, NormalizedComponent, ProductionOrder, Totals,
    ValidationIssue, ValidationReport,
};

// 引擎
pub use engine::{
    CorrectionEngine, MixCalculator, ProportionCalculator, RatioNormalizer, StockResolver,
    UnitConverter, ValidationAggregator, ValidationLimits,
};

// API
pub use api::{ApiError, ApiResult, MixApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "涂料生产配比计算系统";

// ==========================================
// 预编译检查
// ==========================================
