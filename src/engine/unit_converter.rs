// ==========================================
// 涂料生产配比计算系统 - 单位换算引擎
// ==========================================
// 职责: 重量/体积/密度三域之间的数值换算,
//       全部下游计算的唯一数值口径来源
// 红线: 降级换算必须显式输出 WeightBasis,不允许静默近似
// ==========================================

use crate::domain::item::ItemSnapshot;
use crate::domain::types::WeightBasis;
use tracing::warn;

// ==========================================
// UnitConverter - 单位换算引擎
// ==========================================
pub struct UnitConverter {
    // 无状态引擎,不需要注入依赖
}

impl UnitConverter {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 计算物料的单位重量 (克/单位)
    ///
    /// 解析顺序:
    /// 1. 有重量计量 → 直接换算为克 (Measured)
    /// 2. 仅有体积计量 → 毫升 × 配方密度 (EstimatedFromVolume,
    ///    物料自身密度未知,配方密度是可得的最优估计)
    /// 3. 无任何计量 → 1 克/单位 (UnitFallback, 显式降级)
    ///
    /// # 参数
    /// - `item`: 物料快照
    /// - `formula_density`: 配方密度 (g/ml)
    ///
    /// # 返回
    /// (克/单位, 推导依据)
    pub fn weight_per_unit(&self, item: &ItemSnapshot, formula_density: f64) -> (f64, WeightBasis) {
        if let Some(grams) = item.weight_measure_grams() {
            return (grams, WeightBasis::Measured);
        }

        if let Some(milliliters) = item.volume_measure_milliliters() {
            return (
                milliliters * formula_density,
                WeightBasis::EstimatedFromVolume,
            );
        }

        warn!(
            item_id = %item.item_id,
            "物料无重量/体积计量,单位重量按 1g/单位 兜底"
        );
        (1.0, WeightBasis::UnitFallback)
    }

    /// 推导物料密度 (g/ml)
    ///
    /// 同时存在重量和体积计量时: 重量克数 / 体积毫升数;
    /// 否则取配方密度作为估计
    ///
    /// # 参数
    /// - `item`: 物料快照
    /// - `formula_density`: 配方密度 (g/ml)
    pub fn item_density(&self, item: &ItemSnapshot, formula_density: f64) -> f64 {
        match (item.weight_measure_grams(), item.volume_measure_milliliters()) {
            (Some(grams), Some(milliliters)) if milliliters > 0.0 => grams / milliliters,
            _ => formula_density,
        }
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new()
    }
}
