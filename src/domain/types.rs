// ==========================================
// 涂料生产配比计算系统 - 领域类型定义
// ==========================================
// 红线: 所有校验结果必须输出可解释的 reason
// 序列化格式: SCREAMING_SNAKE_CASE (与前端/导出一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 计量类型 (Measure Type)
// ==========================================
// 物料档案中一条计量记录的维度: 重量 或 体积
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasureType {
    Weight, // 重量计量
    Volume, // 体积计量
}

impl fmt::Display for MeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureType::Weight => write!(f, "WEIGHT"),
            MeasureType::Volume => write!(f, "VOLUME"),
        }
    }
}

// ==========================================
// 计量单位 (Measure Unit)
// ==========================================
// 引擎内部统一换算到 克(g) / 毫升(ml)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasureUnit {
    Gram,       // 克
    Kilogram,   // 千克 (×1000 → g)
    Milliliter, // 毫升
    Liter,      // 升 (×1000 → ml)
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureUnit::Gram => write!(f, "GRAM"),
            MeasureUnit::Kilogram => write!(f, "KILOGRAM"),
            MeasureUnit::Milliliter => write!(f, "MILLILITER"),
            MeasureUnit::Liter => write!(f, "LITER"),
        }
    }
}

// ==========================================
// 重量推导依据 (Weight Basis)
// ==========================================
// 红线: 降级换算必须显式输出,不允许静默近似
// 顺序: Measured 精确 > EstimatedFromVolume 估算 > UnitFallback 兜底
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightBasis {
    Measured,            // 物料有重量计量,精确换算
    EstimatedFromVolume, // 仅有体积计量,按配方密度估算
    UnitFallback,        // 无任何计量,按 1g/单位 兜底
}

impl fmt::Display for WeightBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightBasis::Measured => write!(f, "MEASURED"),
            WeightBasis::EstimatedFromVolume => write!(f, "ESTIMATED_FROM_VOLUME"),
            WeightBasis::UnitFallback => write!(f, "UNIT_FALLBACK"),
        }
    }
}

impl WeightBasis {
    /// 是否为精确换算 (非降级)
    pub fn is_exact(&self) -> bool {
        matches!(self, WeightBasis::Measured)
    }
}

// ==========================================
// 修正角色 (Correction Role)
// ==========================================
// 误差修正模式下每个组分的归类,决定前端展示口径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorrectionRole {
    ErrorSource, // 误差来源组分: 展示实测值(物理事实)
    Dispensed,   // 已投料组分: 只展示差额(可为负)
    Pending,     // 未投料组分: 展示完整修正量
}

impl fmt::Display for CorrectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectionRole::ErrorSource => write!(f, "ERROR_SOURCE"),
            CorrectionRole::Dispensed => write!(f, "DISPENSED"),
            CorrectionRole::Pending => write!(f, "PENDING"),
        }
    }
}

// ==========================================
// 校验结果代码 (Validation Code)
// ==========================================
// 红线: 每个失败谓词对应一个独立代码,禁止笼统失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    InsufficientStock,        // 库存不足
    InvalidVolume,            // 目标体积越界
    InvalidRatioSum,          // 配比之和异常(配方损坏)
    InvalidTotalWeight,       // 总重量越界
    ExcessiveComponentWeight, // 单组分重量超限
    InvalidDensity,           // 配方密度越界
    UnderMeasuredCorrection,  // 实测小于目标,欠量不可修正
    InvalidCorrectionInput,   // 修正会话输入不合法(组分不存在/目标重量为零)
    ItemNotFound,             // 组分引用的物料缺失
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationCode::InsufficientStock => write!(f, "INSUFFICIENT_STOCK"),
            ValidationCode::InvalidVolume => write!(f, "INVALID_VOLUME"),
            ValidationCode::InvalidRatioSum => write!(f, "INVALID_RATIO_SUM"),
            ValidationCode::InvalidTotalWeight => write!(f, "INVALID_TOTAL_WEIGHT"),
            ValidationCode::ExcessiveComponentWeight => {
                write!(f, "EXCESSIVE_COMPONENT_WEIGHT")
            }
            ValidationCode::InvalidDensity => write!(f, "INVALID_DENSITY"),
            ValidationCode::UnderMeasuredCorrection => {
                write!(f, "UNDER_MEASURED_CORRECTION")
            }
            ValidationCode::InvalidCorrectionInput => {
                write!(f, "INVALID_CORRECTION_INPUT")
            }
            ValidationCode::ItemNotFound => write!(f, "ITEM_NOT_FOUND"),
        }
    }
}
