// ==========================================
// 涂料生产配比计算系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、换算辅助方法
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod calculation;
pub mod formula;
pub mod item;
pub mod types;

// 重导出核心类型
pub use calculation::{
    CalculatedComponent, CalculationResult, CorrectionDetail, CorrectionSession,
    ProductionOrder, Totals, ValidationIssue, ValidationReport,
};
pub use formula::{Formula, FormulaComponent, NormalizedComponent};
pub use item::{ItemSnapshot, Measure};
pub use types::{CorrectionRole, MeasureType, MeasureUnit, ValidationCode, WeightBasis};
