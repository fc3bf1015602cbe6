// ==========================================
// 涂料生产配比计算系统 - 计算结果领域模型
// ==========================================
// 生命周期: 目标体积/配方/修正输入任一变化即整体重算,
// 绝不增量修补,从根上消灭派生状态陈旧一类的缺陷
// ==========================================

use crate::domain::types::{CorrectionRole, ValidationCode, WeightBasis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// CalculatedComponent - 组分计算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatedComponent {
    pub component_id: String,           // 组分ID
    pub item_id: String,                // 物料ID
    pub item_name: String,              // 物料名称 (缺失物料为占位标签)
    pub ratio_pct: f64,                 // 归一化配比 (%)
    pub weight_g: f64,                  // 目标重量 (g)
    pub volume_ml: f64,                 // 目标体积 (ml)
    pub unit_density: f64,              // 物料密度 (g/ml, 无法推导时取配方密度)
    pub weight_basis: WeightBasis,      // 重量推导依据 (降级可观测)
    pub cost: f64,                      // 成本
    pub price_per_liter_share: f64,     // 每升价格中该组分的份额
    pub has_stock: bool,                // 库存是否足额 (修正模式下按修正目标判定)
    pub stock_available_g: f64,         // 可用库存折算重量 (g)
    pub item_found: bool,               // 物料是否存在于快照集
    pub correction: Option<CorrectionDetail>, // 修正明细 (仅修正模式)
}

impl CalculatedComponent {
    /// 库存判定口径: 修正模式下为修正目标,否则为基础目标
    pub fn required_weight_g(&self) -> f64 {
        match &self.correction {
            Some(detail) => detail.required_weight_g(),
            None => self.weight_g,
        }
    }
}

// ==========================================
// CorrectionDetail - 误差修正明细
// ==========================================
// 红线: 差额必须带符号展示,禁止截断为零
// (差额符号决定"补料"还是"已超加",写错方向=真实物料损失)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionDetail {
    pub role: CorrectionRole,           // 组分在修正中的角色
    pub error_ratio: f64,               // 误差比 (实测/目标)
    pub corrected_weight_g: f64,        // 修正后目标重量 (g)
    pub corrected_volume_ml: f64,       // 修正后目标体积 (ml)
    pub additional_weight_g: Option<f64>, // 仍欠差额 (仅已投料组分, 带符号)
}

impl CorrectionDetail {
    /// 修正模式下的库存需求重量
    ///
    /// 误差来源组分已是物理事实(实测值),其余组分按修正目标
    pub fn required_weight_g(&self) -> f64 {
        self.corrected_weight_g
    }
}

// ==========================================
// CorrectionSession - 修正会话 (UI 级短生命周期)
// ==========================================
// 操作员发现称量错误时创建; 关闭修正模式或确认投产即丢弃
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionSession {
    pub error_component_id: String, // 误差来源组分ID
    pub measured_weight_g: f64,     // 实际称得重量 (g)
    #[serde(default)]
    pub dispensed_component_ids: HashSet<String>, // 已投料组分ID集合
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>, // 会话创建时间
}

impl CorrectionSession {
    pub fn new(error_component_id: &str, measured_weight_g: f64) -> Self {
        Self {
            error_component_id: error_component_id.to_string(),
            measured_weight_g,
            dispensed_component_ids: HashSet::new(),
            created_at: Utc::now(),
        }
    }

    /// 标记一个组分为已投料
    pub fn mark_dispensed(mut self, component_id: &str) -> Self {
        self.dispensed_component_ids
            .insert(component_id.to_string());
        self
    }

    /// 组分是否已投料
    pub fn is_dispensed(&self, component_id: &str) -> bool {
        self.dispensed_component_ids.contains(component_id)
    }
}

// ==========================================
// Totals - 汇总 (派生值, 不持久化)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    pub total_weight_g: f64,  // 总重量 (g)
    pub total_volume_ml: f64, // 总体积 (ml)
    pub total_cost: f64,      // 总成本
    pub price_per_liter: f64, // 每升价格
    pub ratio_sum: f64,       // 归一化配比之和 (%)
    pub is_valid: bool,       // 校验总结论
}

// ==========================================
// ValidationIssue - 单条校验问题
// ==========================================
// 红线: 提交阻断必须给出逐条原因,禁止笼统失败
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: ValidationCode,              // 问题代码
    pub message: String,                   // 用户可读原因 (i18n)
    pub details: Option<serde_json::Value>, // 结构化上下文
}

// ==========================================
// ValidationReport - 校验报告
// ==========================================
// 七个谓词逐一可见 + 逐条问题列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ratio_is_valid: bool,         // |Σratio − 100| ≤ 0.1
    pub density_is_valid: bool,       // 0.5 ≤ density ≤ 3.0
    pub volume_is_valid: bool,        // 0 < volume ≤ 100000 ml
    pub weight_is_valid: bool,        // 0 < total ≤ 300000 g
    pub has_excessive_weights: bool,  // 存在单组分 > 50000 g
    pub all_in_stock: bool,           // 所有组分库存足额
    pub is_valid: bool,               // 总结论 (合取)
    pub issues: Vec<ValidationIssue>, // 逐条问题
}

// ==========================================
// CalculationResult - 一次完整计算的输出
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    pub calculation_id: String,              // 计算批次ID
    pub formula_id: String,                  // 配方ID
    pub desired_volume_ml: f64,              // 目标体积 (ml)
    pub components: Vec<CalculatedComponent>, // 组分结果 (按配比降序)
    pub totals: Totals,                      // 汇总
    pub validation: ValidationReport,        // 校验报告
    pub error_ratio: Option<f64>,            // 修正模式下的误差比
    pub calculated_at: DateTime<Utc>,        // 计算时间
}

impl CalculationResult {
    /// 投产重量 (g)
    ///
    /// 修正模式: 基础总重 × 误差比 (整体缩放,避免逐组分修正值
    /// 求和累积舍入误差); 非修正模式: 基础总重
    pub fn production_weight_g(&self) -> f64 {
        match self.error_ratio {
            Some(ratio) => self.totals.total_weight_g * ratio,
            None => self.totals.total_weight_g,
        }
    }
}

// ==========================================
// ProductionOrder - 投产指令
// ==========================================
// 引擎唯一的对外动作载荷,由调用方提交给生产接口
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionOrder {
    pub formula_id: String, // 配方ID
    pub weight_g: f64,      // 投产重量 (g)
}
