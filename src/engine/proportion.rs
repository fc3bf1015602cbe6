// ==========================================
// 涂料生产配比计算系统 - 比例分配引擎
// ==========================================
// 职责: 按归一化配比把目标体积分配到每个组分,
//       产出目标重量/体积/成本/库存判定
// 输入: 配方 + 归一化组分 + 目标体积 + 库存解析结果
// 输出: CalculatedComponent 列表 (按配比降序, 稳定排序)
// ==========================================

use crate::domain::calculation::CalculatedComponent;
use crate::domain::formula::{Formula, NormalizedComponent};
use crate::engine::stock_resolver::ResolvedStock;
use crate::engine::unit_converter::UnitConverter;
use tracing::debug;

// ==========================================
// ProportionCalculator - 比例分配引擎
// ==========================================
pub struct ProportionCalculator {
    converter: UnitConverter,
}

impl ProportionCalculator {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            converter: UnitConverter::new(),
        }
    }

    /// 计算每个组分的目标量
    ///
    /// 逐组分算法:
    /// 1. 总重量 = 目标体积 × 配方密度
    /// 2. 组分重量 = 总重量 × 配比 / 100
    /// 3. 组分体积 = 目标体积 × 配比 / 100
    ///    (体积直接按目标体积分配,与重量口径仅因同一配比而一致)
    /// 4. 单位重量/库存折算经 UnitConverter
    /// 5. 克单价 = 单价 / 单位重量 (单位重量为 0 时取 0), 成本 = 克单价 × 组分重量
    /// 6. has_stock = 库存折算重量 ≥ 组分重量
    ///    (修正模式下由编排器按修正目标重新判定)
    ///
    /// # 参数
    /// - `formula`: 配方 (取密度)
    /// - `normalized`: 归一化组分
    /// - `desired_volume_ml`: 目标体积 (ml)
    /// - `stock`: 库存解析结果
    ///
    /// # 返回
    /// 组分结果列表, 配比降序, 同配比按声明顺序
    pub fn compute(
        &self,
        formula: &Formula,
        normalized: &[NormalizedComponent],
        desired_volume_ml: f64,
        stock: &ResolvedStock,
    ) -> Vec<CalculatedComponent> {
        let total_weight_g = desired_volume_ml * formula.density;

        let mut components: Vec<CalculatedComponent> = normalized
            .iter()
            .map(|c| self.compute_component(formula, c, desired_volume_ml, total_weight_g, stock))
            .collect();

        // 稳定排序: 配比降序, 同配比保持声明顺序
        // (normalized 本身按 seq_no 有序, sort_by 是稳定排序)
        components.sort_by(|a, b| {
            b.ratio_pct
                .partial_cmp(&a.ratio_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            formula_id = %formula.formula_id,
            desired_volume_ml,
            total_weight_g,
            component_count = components.len(),
            "比例分配完成"
        );

        components
    }

    /// 单组分计算
    fn compute_component(
        &self,
        formula: &Formula,
        normalized: &NormalizedComponent,
        desired_volume_ml: f64,
        total_weight_g: f64,
        stock: &ResolvedStock,
    ) -> CalculatedComponent {
        let weight_g = total_weight_g * normalized.ratio_pct / 100.0;
        let volume_ml = desired_volume_ml * normalized.ratio_pct / 100.0;

        // 解析阶段保证每个被引用物料必有条目 (缺失为占位)
        let item = stock
            .snapshot(&normalized.item_id)
            .cloned()
            .unwrap_or_else(|| {
                crate::domain::item::ItemSnapshot::not_found_placeholder(&normalized.item_id)
            });

        let (weight_per_unit_g, weight_basis) =
            self.converter.weight_per_unit(&item, formula.density);
        let unit_density = self.converter.item_density(&item, formula.density);

        let stock_available_g = item.quantity_on_hand * weight_per_unit_g;

        // 克单价守卫: 单位重量为 0 时成本记 0,避免除零
        let price_per_gram = if weight_per_unit_g > 0.0 {
            item.unit_price / weight_per_unit_g
        } else {
            0.0
        };
        let cost = price_per_gram * weight_g;

        let price_per_liter_share = if desired_volume_ml > 0.0 {
            cost / (desired_volume_ml / 1000.0)
        } else {
            0.0
        };

        CalculatedComponent {
            component_id: normalized.component_id.clone(),
            item_id: normalized.item_id.clone(),
            item_name: item.name.clone(),
            ratio_pct: normalized.ratio_pct,
            weight_g,
            volume_ml,
            unit_density,
            weight_basis,
            cost,
            price_per_liter_share,
            has_stock: stock_available_g >= weight_g,
            stock_available_g,
            item_found: stock.is_found(&normalized.item_id),
            correction: None,
        }
    }
}

impl Default for ProportionCalculator {
    fn default() -> Self {
        Self::new()
    }
}
