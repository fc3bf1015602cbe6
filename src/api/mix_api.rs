// ==========================================
// 涂料生产配比计算系统 - 配比计算 API
// ==========================================
// 职责: 对外暴露预览计算与投产确认两个入口
// 红线: 人工最终控制权 —— 引擎只产出建议,
//       投产必须由调用方显式确认且校验问题清零
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::calculation::{CalculationResult, CorrectionSession, ProductionOrder};
use crate::domain::formula::Formula;
use crate::domain::item::ItemSnapshot;
use crate::engine::correction::CorrectionError;
use crate::engine::orchestrator::MixCalculator;
use tracing::{info, warn};

// ==========================================
// MixApi - 配比计算 API
// ==========================================
pub struct MixApi {
    calculator: MixCalculator,
}

impl MixApi {
    /// 创建新的 MixApi 实例
    pub fn new() -> Self {
        Self {
            calculator: MixCalculator::new(),
        }
    }

    // ==========================================
    // 预览接口
    // ==========================================

    /// 预览配比计算
    ///
    /// 修正会话在入口处先行校验: 欠量 (实测 < 目标) 直接拒绝,
    /// 不进入计算 —— 欠量是硬校验错误,不允许静默缩放
    ///
    /// # 参数
    /// - `formula`: 配方
    /// - `items`: 库存快照集
    /// - `desired_volume_ml`: 目标体积 (ml)
    /// - `session`: 修正会话 (可选)
    ///
    /// # 返回
    /// - Ok(CalculationResult): 计算结果 (含校验报告,可能 is_valid=false)
    /// - Err(ApiError): 输入本身不合法 (体积非有限数、欠量修正等)
    pub fn preview(
        &self,
        formula: &Formula,
        items: &[ItemSnapshot],
        desired_volume_ml: f64,
        session: Option<&CorrectionSession>,
    ) -> ApiResult<CalculationResult> {
        if !desired_volume_ml.is_finite() {
            return Err(ApiError::InvalidInput(format!(
                "目标体积必须是有限数值: {}",
                desired_volume_ml
            )));
        }

        // 修正会话的硬校验在入口处拒绝 (需要先算一次基础目标取 expected)
        if let Some(session) = session {
            // 组分存在性在配方上判定 (计算结果与配方组分一一对应)
            if formula.component(&session.error_component_id).is_none() {
                return Err(ApiError::NotFound(format!(
                    "误差来源组分(component_id={})不存在",
                    session.error_component_id
                )));
            }

            let base = self
                .calculator
                .calculate(formula, items, desired_volume_ml, None);
            let expected_g = base
                .components
                .iter()
                .find(|c| c.component_id == session.error_component_id)
                .map(|c| c.weight_g)
                .unwrap_or(0.0);

            // 目标重量为零时误差比无定义 (0配比组分也会走到这里)
            if expected_g <= 0.0 {
                warn!(
                    component_id = %session.error_component_id,
                    "误差来源组分目标重量为零,修正在入口处被拒绝"
                );
                return Err(CorrectionError::ZeroExpectedWeight(
                    session.error_component_id.clone(),
                )
                .into());
            }
            if session.measured_weight_g < expected_g {
                warn!(
                    component_id = %session.error_component_id,
                    expected_g,
                    measured_g = session.measured_weight_g,
                    "欠量修正在入口处被拒绝"
                );
                return Err(ApiError::UnderMeasuredCorrection {
                    expected_g,
                    measured_g: session.measured_weight_g,
                });
            }
        }

        Ok(self
            .calculator
            .calculate(formula, items, desired_volume_ml, session))
    }

    // ==========================================
    // 投产接口
    // ==========================================

    /// 确认投产
    ///
    /// 阻断条件: 校验总结论为 false, 或问题列表非空
    /// (缺失物料等问题即便不影响六谓词也阻断提交)
    ///
    /// # 参数
    /// - `result`: 预览计算结果
    ///
    /// # 返回
    /// - Ok(ProductionOrder): 投产指令 (修正模式下重量已整体缩放)
    /// - Err(ApiError::ValidationFailed): 逐条原因
    pub fn start_production(&self, result: &CalculationResult) -> ApiResult<ProductionOrder> {
        if !result.validation.is_valid || !result.validation.issues.is_empty() {
            let reason = result
                .validation
                .issues
                .iter()
                .map(|issue| issue.message.clone())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(
                formula_id = %result.formula_id,
                issue_count = result.validation.issues.len(),
                "投产被阻断"
            );
            return Err(ApiError::ValidationFailed {
                reason,
                issues: result.validation.issues.clone(),
            });
        }

        let order = ProductionOrder {
            formula_id: result.formula_id.clone(),
            weight_g: result.production_weight_g(),
        };

        info!(
            formula_id = %order.formula_id,
            weight_g = order.weight_g,
            corrected = result.error_ratio.is_some(),
            "投产指令已生成"
        );

        Ok(order)
    }
}

impl Default for MixApi {
    fn default() -> Self {
        Self::new()
    }
}
