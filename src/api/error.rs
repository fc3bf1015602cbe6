// ==========================================
// 涂料生产配比计算系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,把引擎层错误转换为
//       用户友好的错误消息
// 红线: 所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use crate::domain::calculation::ValidationIssue;
use crate::engine::correction::CorrectionError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因 (可解释性红线)
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 修正模式错误
    // ==========================================
    /// 欠量修正: 实测小于目标,不允许按比例放大
    #[error("欠量修正被拒绝: 实测{measured_g}g < 目标{expected_g}g")]
    UnderMeasuredCorrection { expected_g: f64, measured_g: f64 },

    // ==========================================
    // 投产阻断错误
    // ==========================================
    /// 校验未通过 (带逐条原因)
    #[error("校验未通过,投产被阻断: {reason}")]
    ValidationFailed {
        reason: String,
        issues: Vec<ValidationIssue>,
    },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 CorrectionError 转换
// 目的: 把引擎层的修正输入错误转换为用户友好的业务错误
// ==========================================
impl From<CorrectionError> for ApiError {
    fn from(err: CorrectionError) -> Self {
        match err {
            CorrectionError::UnderMeasured {
                expected_g,
                measured_g,
            } => ApiError::UnderMeasuredCorrection {
                expected_g,
                measured_g,
            },
            CorrectionError::ComponentNotFound(component_id) => {
                ApiError::NotFound(format!("误差来源组分(component_id={})不存在", component_id))
            }
            CorrectionError::ZeroExpectedWeight(component_id) => ApiError::InvalidInput(format!(
                "误差来源组分(component_id={})目标重量为零,无法计算误差比",
                component_id
            )),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
