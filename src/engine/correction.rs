// ==========================================
// 涂料生产配比计算系统 - 误差修正引擎
// ==========================================
// 职责: 某组分实际称量偏离目标后,按误差比重导其余全部组分
// 难点: 必须把"已发生的物理投料"(不可逆) 与"回溯重算的目标"
//       对账 —— 已投料组分只欠差额,未投料组分欠完整修正量,
//       差额方向写错 = 真实的物料浪费或欠产
// 红线: 欠量 (实测 < 目标) 不允许按比例放大修正,必须拒绝
// ==========================================

use crate::domain::calculation::{CalculatedComponent, CorrectionDetail, CorrectionSession};
use crate::domain::types::CorrectionRole;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

// ==========================================
// CorrectionError - 修正输入错误
// ==========================================
// 属于"预期内的坏输入",调用方转换为校验问题,引擎不panic
#[derive(Debug, Error)]
pub enum CorrectionError {
    #[error("误差来源组分不存在: component_id={0}")]
    ComponentNotFound(String),

    #[error("误差来源组分目标重量为零,无法计算误差比: component_id={0}")]
    ZeroExpectedWeight(String),

    #[error("实测重量({measured_g}g)小于目标重量({expected_g}g),欠量无法通过放大修正")]
    UnderMeasured { expected_g: f64, measured_g: f64 },
}

// ==========================================
// CorrectionOutcome - 修正结果摘要
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionOutcome {
    pub error_ratio: f64,         // 误差比 (实测/目标, ≥ 1)
    pub production_weight_g: f64, // 投产重量 = 基础总重 × 误差比
}

// ==========================================
// CorrectionEngine - 误差修正引擎
// ==========================================
pub struct CorrectionEngine {
    // 无状态引擎,不需要注入依赖
}

impl CorrectionEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 应用误差修正
    ///
    /// 算法:
    /// 1. expected = 误差来源组分的修正前目标重量
    /// 2. error_ratio = 实测 / expected (实测 < expected 直接拒绝)
    /// 3. 每个组分: corrected_weight = weight × error_ratio,
    ///    corrected_volume = volume × error_ratio
    /// 4. 归类:
    ///    - 误差来源组分: 实测值即事实,原样展示
    ///    - 已投料组分: 只欠差额 corrected − original (带符号,不截断)
    ///    - 未投料组分: 欠完整修正量
    /// 5. 投产重量 = 基础总重 × error_ratio
    ///    (整体缩放,不取逐组分修正值之和,避免累积舍入误差)
    ///
    /// 库存判定同步改按修正目标重新计算
    ///
    /// # 参数
    /// - `components`: 基础计算结果 (就地写入 correction 明细)
    /// - `session`: 修正会话
    ///
    /// # 返回
    /// - `Ok(CorrectionOutcome)`: 修正完成
    /// - `Err(CorrectionError)`: 输入不合法,组件保持未修正状态
    pub fn apply(
        &self,
        components: &mut [CalculatedComponent],
        session: &CorrectionSession,
    ) -> Result<CorrectionOutcome, CorrectionError> {
        let error_component = components
            .iter()
            .find(|c| c.component_id == session.error_component_id)
            .ok_or_else(|| {
                CorrectionError::ComponentNotFound(session.error_component_id.clone())
            })?;

        let expected_g = error_component.weight_g;
        if expected_g <= 0.0 {
            return Err(CorrectionError::ZeroExpectedWeight(
                session.error_component_id.clone(),
            ));
        }
        if session.measured_weight_g < expected_g {
            return Err(CorrectionError::UnderMeasured {
                expected_g,
                measured_g: session.measured_weight_g,
            });
        }

        let error_ratio = session.measured_weight_g / expected_g;
        let base_total_weight_g: f64 = components.iter().map(|c| c.weight_g).sum();

        info!(
            error_component_id = %session.error_component_id,
            expected_g,
            measured_g = session.measured_weight_g,
            error_ratio,
            "开始误差修正传播"
        );

        for component in components.iter_mut() {
            let corrected_weight_g = component.weight_g * error_ratio;
            let corrected_volume_ml = component.volume_ml * error_ratio;

            let (role, additional_weight_g) =
                if component.component_id == session.error_component_id {
                    // 实测值是物理事实; expected × ratio 恰等于实测值
                    (CorrectionRole::ErrorSource, None)
                } else if session.is_dispensed(&component.component_id) {
                    // 操作员已按修正前目标投料,只欠差额
                    (
                        CorrectionRole::Dispensed,
                        Some(corrected_weight_g - component.weight_g),
                    )
                } else {
                    (CorrectionRole::Pending, None)
                };

            debug!(
                component_id = %component.component_id,
                role = %role,
                corrected_weight_g,
                "组分修正完成"
            );

            // 库存判定改按修正目标
            component.has_stock = component.stock_available_g >= corrected_weight_g;
            component.correction = Some(CorrectionDetail {
                role,
                error_ratio,
                corrected_weight_g,
                corrected_volume_ml,
                additional_weight_g,
            });
        }

        Ok(CorrectionOutcome {
            error_ratio,
            production_weight_g: base_total_weight_g * error_ratio,
        })
    }
}

impl Default for CorrectionEngine {
    fn default() -> Self {
        Self::new()
    }
}
