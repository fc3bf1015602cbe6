// ==========================================
// 涂料生产配比计算系统 - 引擎编排器
// ==========================================
// 用途: 协调归一化/库存解析/比例分配/误差修正/校验聚合
//       五个引擎的执行顺序,组装一次完整计算结果
// 红线: 纯函数式 —— 同样的 (配方, 快照, 体积, 修正会话)
//       必得同样的结果; 无 I/O, 无共享可变状态, 整体重算
// ==========================================

use crate::domain::calculation::{CalculationResult, CorrectionSession, Totals};
use crate::domain::formula::Formula;
use crate::domain::item::ItemSnapshot;
use crate::engine::correction::{CorrectionEngine, CorrectionError};
use crate::engine::proportion::ProportionCalculator;
use crate::engine::ratio_normalizer::RatioNormalizer;
use crate::engine::stock_resolver::StockResolver;
use crate::engine::validation::{ValidationAggregator, ValidationLimits};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// MixCalculator - 配比计算编排器
// ==========================================
pub struct MixCalculator {
    normalizer: RatioNormalizer,
    resolver: StockResolver,
    proportion: ProportionCalculator,
    correction: CorrectionEngine,
    validator: ValidationAggregator,
}

impl MixCalculator {
    /// 构造函数 (默认校验边界)
    pub fn new() -> Self {
        Self::with_limits(ValidationLimits::default())
    }

    /// 指定校验边界的构造函数
    pub fn with_limits(limits: ValidationLimits) -> Self {
        Self {
            normalizer: RatioNormalizer::new(),
            resolver: StockResolver::new(),
            proportion: ProportionCalculator::new(),
            correction: CorrectionEngine::new(),
            validator: ValidationAggregator::with_limits(limits),
        }
    }

    /// 执行一次完整配比计算
    ///
    /// 数据流: 归一化 → 库存解析 → 比例分配 →
    ///         [可选] 误差修正 → 校验聚合 → 结果组装
    ///
    /// 修正会话输入不合法时不中断: 保留基础结果,
    /// 原因折入校验问题列表 (引擎对预期坏输入永不panic)
    ///
    /// # 参数
    /// - `formula`: 配方
    /// - `items`: 库存快照集 (只读, 允许缺失/过期)
    /// - `desired_volume_ml`: 目标体积 (ml)
    /// - `session`: 修正会话 (可选)
    ///
    /// # 返回
    /// CalculationResult: 组分列表 + 汇总 + 校验报告
    pub fn calculate(
        &self,
        formula: &Formula,
        items: &[ItemSnapshot],
        desired_volume_ml: f64,
        session: Option<&CorrectionSession>,
    ) -> CalculationResult {
        info!(
            formula_id = %formula.formula_id,
            desired_volume_ml,
            component_count = formula.components.len(),
            correction_mode = session.is_some(),
            "开始配比计算"
        );

        // 步骤1: 配比归一化
        let normalized = self.normalizer.normalize(&formula.components);

        // 步骤2: 库存解析
        let stock = self.resolver.resolve(&formula.components, items);

        // 步骤3: 比例分配
        let mut components =
            self.proportion
                .compute(formula, &normalized, desired_volume_ml, &stock);

        // 步骤4: 误差修正 (可选)
        let mut error_ratio = None;
        let mut correction_error: Option<CorrectionError> = None;
        if let Some(session) = session {
            match self.correction.apply(&mut components, session) {
                Ok(outcome) => {
                    debug!(
                        error_ratio = outcome.error_ratio,
                        production_weight_g = outcome.production_weight_g,
                        "误差修正已应用"
                    );
                    error_ratio = Some(outcome.error_ratio);
                }
                Err(err) => {
                    debug!(error = %err, "修正输入不合法,保留基础结果");
                    correction_error = Some(err);
                }
            }
        }

        // 步骤5: 校验聚合
        let validation = self.validator.validate(
            formula,
            desired_volume_ml,
            &components,
            &stock.missing_item_ids,
            correction_error.as_ref(),
        );

        // 步骤6: 汇总组装
        let total_weight_g: f64 = components.iter().map(|c| c.weight_g).sum();
        let total_volume_ml: f64 = components.iter().map(|c| c.volume_ml).sum();
        let total_cost: f64 = components.iter().map(|c| c.cost).sum();
        let price_per_liter = if desired_volume_ml > 0.0 {
            total_cost / (desired_volume_ml / 1000.0)
        } else {
            0.0
        };
        let ratio_sum: f64 = components.iter().map(|c| c.ratio_pct).sum();

        let totals = Totals {
            total_weight_g,
            total_volume_ml,
            total_cost,
            price_per_liter,
            ratio_sum,
            is_valid: validation.is_valid,
        };

        info!(
            formula_id = %formula.formula_id,
            total_weight_g,
            total_cost,
            is_valid = validation.is_valid,
            issue_count = validation.issues.len(),
            "配比计算完成"
        );

        CalculationResult {
            calculation_id: Uuid::new_v4().to_string(),
            formula_id: formula.formula_id.clone(),
            desired_volume_ml,
            components,
            totals,
            validation,
            error_ratio,
            calculated_at: Utc::now(),
        }
    }
}

impl Default for MixCalculator {
    fn default() -> Self {
        Self::new()
    }
}
