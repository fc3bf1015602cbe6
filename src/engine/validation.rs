// ==========================================
// 涂料生产配比计算系统 - 校验聚合引擎
// ==========================================
// 职责: 对已派生的组分结果做全局不变量检查,
//       输出单一 pass/fail 结论 + 逐条可解释原因
// 红线: 每个失败谓词必须给出独立的用户可读原因;
//       提交阻断在 API 层执行 (问题列表清空前禁止投产)
// ==========================================

use crate::domain::calculation::{CalculatedComponent, ValidationIssue, ValidationReport};
use crate::domain::formula::Formula;
use crate::domain::types::ValidationCode;
use crate::engine::correction::CorrectionError;
use crate::i18n;
use serde_json::json;
use tracing::debug;

// ==========================================
// ValidationLimits - 校验边界配置
// ==========================================
#[derive(Debug, Clone)]
pub struct ValidationLimits {
    pub ratio_tolerance: f64,         // 配比之和容差: ±0.1
    pub density_min: f64,             // 密度下界: 0.5 g/ml
    pub density_max: f64,             // 密度上界: 3.0 g/ml
    pub max_volume_ml: f64,           // 目标体积上限: 100 L
    pub max_total_weight_g: f64,      // 总重量上限: 300 kg
    pub max_component_weight_g: f64,  // 单组分重量上限: 50 kg
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            ratio_tolerance: 0.1,
            density_min: 0.5,
            density_max: 3.0,
            max_volume_ml: 100_000.0,
            max_total_weight_g: 300_000.0,
            max_component_weight_g: 50_000.0,
        }
    }
}

// ==========================================
// ValidationAggregator - 校验聚合引擎
// ==========================================
pub struct ValidationAggregator {
    limits: ValidationLimits,
}

impl ValidationAggregator {
    /// 构造函数 (默认边界)
    pub fn new() -> Self {
        Self {
            limits: ValidationLimits::default(),
        }
    }

    /// 指定边界的构造函数
    pub fn with_limits(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// 执行全局校验
    ///
    /// 谓词 (逐一可见):
    /// - ratio_is_valid: |Σratio − 100| ≤ 容差 (零组分配方按合法处理)
    /// - density_is_valid: 密度在 [0.5, 3.0]
    /// - volume_is_valid: 0 < 目标体积 ≤ 100000 ml
    /// - weight_is_valid: 0 < 总重量 ≤ 300000 g
    /// - has_excessive_weights: 存在单组分 > 50000 g
    /// - all_in_stock: 所有组分库存足额 (修正模式下已按修正目标判定)
    /// - is_valid = 以上谓词的合取
    ///
    /// 此外把缺失物料与欠量修正输入折入问题列表 (提交阻断口径)
    ///
    /// # 参数
    /// - `formula`: 配方
    /// - `desired_volume_ml`: 目标体积
    /// - `components`: 组分结果 (修正模式下已写入修正明细)
    /// - `missing_item_ids`: 快照集中缺失的物料ID
    /// - `correction_error`: 修正输入错误 (如有)
    pub fn validate(
        &self,
        formula: &Formula,
        desired_volume_ml: f64,
        components: &[CalculatedComponent],
        missing_item_ids: &[String],
        correction_error: Option<&CorrectionError>,
    ) -> ValidationReport {
        let mut issues = Vec::new();

        let ratio_sum: f64 = components.iter().map(|c| c.ratio_pct).sum();
        let total_weight_g: f64 = components.iter().map(|c| c.weight_g).sum();

        // 配比之和: 零组分配方合法 (空结果), 谓词按通过处理
        let ratio_is_valid =
            components.is_empty() || (ratio_sum - 100.0).abs() <= self.limits.ratio_tolerance;
        if !ratio_is_valid {
            issues.push(self.issue(
                ValidationCode::InvalidRatioSum,
                "validation.invalid_ratio_sum",
                &[("sum", &format!("{ratio_sum:.2}"))],
                json!({ "ratio_sum": ratio_sum, "tolerance": self.limits.ratio_tolerance }),
            ));
        }

        let density_is_valid = formula.density >= self.limits.density_min
            && formula.density <= self.limits.density_max;
        if !density_is_valid {
            issues.push(self.issue(
                ValidationCode::InvalidDensity,
                "validation.invalid_density",
                &[("density", &format!("{:.2}", formula.density))],
                json!({
                    "density": formula.density,
                    "min": self.limits.density_min,
                    "max": self.limits.density_max
                }),
            ));
        }

        let volume_is_valid =
            desired_volume_ml > 0.0 && desired_volume_ml <= self.limits.max_volume_ml;
        if !volume_is_valid {
            issues.push(self.issue(
                ValidationCode::InvalidVolume,
                "validation.invalid_volume",
                &[("volume", &format!("{desired_volume_ml:.0}"))],
                json!({ "desired_volume_ml": desired_volume_ml, "max_ml": self.limits.max_volume_ml }),
            ));
        }

        let weight_is_valid =
            total_weight_g > 0.0 && total_weight_g <= self.limits.max_total_weight_g;
        if !weight_is_valid {
            issues.push(self.issue(
                ValidationCode::InvalidTotalWeight,
                "validation.invalid_total_weight",
                &[("weight", &format!("{total_weight_g:.0}"))],
                json!({ "total_weight_g": total_weight_g, "max_g": self.limits.max_total_weight_g }),
            ));
        }

        let excessive: Vec<&CalculatedComponent> = components
            .iter()
            .filter(|c| c.weight_g > self.limits.max_component_weight_g)
            .collect();
        let has_excessive_weights = !excessive.is_empty();
        for component in &excessive {
            issues.push(self.issue(
                ValidationCode::ExcessiveComponentWeight,
                "validation.excessive_component_weight",
                &[
                    ("weight", &format!("{:.0}", component.weight_g)),
                    ("limit", &format!("{:.0}", self.limits.max_component_weight_g)),
                ],
                json!({
                    "component_id": component.component_id,
                    "item_id": component.item_id,
                    "weight_g": component.weight_g
                }),
            ));
        }

        let out_of_stock: Vec<&CalculatedComponent> =
            components.iter().filter(|c| !c.has_stock).collect();
        let all_in_stock = out_of_stock.is_empty();
        if !all_in_stock {
            issues.push(self.issue(
                ValidationCode::InsufficientStock,
                "validation.insufficient_stock",
                &[("count", &out_of_stock.len().to_string())],
                json!({
                    "components": out_of_stock
                        .iter()
                        .map(|c| json!({
                            "component_id": c.component_id,
                            "item_id": c.item_id,
                            "required_g": c.required_weight_g(),
                            "available_g": c.stock_available_g
                        }))
                        .collect::<Vec<_>>()
                }),
            ));
        }

        // 缺失物料: 不中断计算,但逐条进问题列表阻断提交
        for item_id in missing_item_ids {
            issues.push(self.issue(
                ValidationCode::ItemNotFound,
                "validation.item_not_found",
                &[("item_id", item_id)],
                json!({ "item_id": item_id }),
            ));
        }

        // 修正输入错误: 修正未应用,每个变体都必须折入问题列表
        // (静默丢弃会让未修正结果以 is_valid=true 通过投产阻断)
        match correction_error {
            Some(CorrectionError::UnderMeasured {
                expected_g,
                measured_g,
            }) => {
                issues.push(self.issue(
                    ValidationCode::UnderMeasuredCorrection,
                    "validation.under_measured_correction",
                    &[
                        ("measured", &format!("{measured_g:.0}")),
                        ("expected", &format!("{expected_g:.0}")),
                    ],
                    json!({ "expected_g": expected_g, "measured_g": measured_g }),
                ));
            }
            Some(CorrectionError::ComponentNotFound(component_id)) => {
                issues.push(self.issue(
                    ValidationCode::InvalidCorrectionInput,
                    "validation.correction_component_not_found",
                    &[("component_id", component_id)],
                    json!({ "component_id": component_id }),
                ));
            }
            Some(CorrectionError::ZeroExpectedWeight(component_id)) => {
                issues.push(self.issue(
                    ValidationCode::InvalidCorrectionInput,
                    "validation.correction_zero_expected",
                    &[("component_id", component_id)],
                    json!({ "component_id": component_id }),
                ));
            }
            None => {}
        }

        let is_valid = ratio_is_valid
            && density_is_valid
            && volume_is_valid
            && weight_is_valid
            && !has_excessive_weights
            && all_in_stock;

        debug!(
            formula_id = %formula.formula_id,
            is_valid,
            issue_count = issues.len(),
            "校验聚合完成"
        );

        ValidationReport {
            ratio_is_valid,
            density_is_valid,
            volume_is_valid,
            weight_is_valid,
            has_excessive_weights,
            all_in_stock,
            is_valid,
            issues,
        }
    }

    /// 构造单条校验问题 (i18n 文案 + 结构化上下文)
    fn issue(
        &self,
        code: ValidationCode,
        message_key: &str,
        args: &[(&str, &str)],
        details: serde_json::Value,
    ) -> ValidationIssue {
        ValidationIssue {
            code,
            message: i18n::t_with_args(message_key, args),
            details: Some(details),
        }
    }
}

impl Default for ValidationAggregator {
    fn default() -> Self {
        Self::new()
    }
}
