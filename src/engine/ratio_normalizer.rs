// ==========================================
// 涂料生产配比计算系统 - 配比归一化引擎
// ==========================================
// 职责: 判定配方配比的口径 (小数 ≈1 / 百分比 ≈100)
//       并统一归一化到百分比口径
// 输入: 原始组分列表
// 输出: NormalizedComponent 列表 (ratio_pct 合计 ≈ 100)
// ==========================================

use crate::domain::formula::{FormulaComponent, NormalizedComponent};
use tracing::{debug, warn};

// 口径判定阈值: 原始配比之和低于此值视为小数口径
//
// 已知风险: 组分极少且配比极小的百分比配方 (如 4% + 5% = 9)
// 会被误判为小数口径。该阈值继承自配方目录的历史数据口径,
// 不在引擎侧擅自修改; 根治方案是在配方记录上显式存储口径标记
const FRACTION_SUM_THRESHOLD: f64 = 10.0;

// 小数口径下配比之和的正常上界; 超过该值仍落入小数分支属可疑区,
// 仅告警观测,不改变行为
const SUSPICIOUS_FRACTION_SUM: f64 = 2.0;

// ==========================================
// RatioNormalizer - 配比归一化引擎
// ==========================================
pub struct RatioNormalizer {
    // 无状态引擎,不需要注入依赖
}

impl RatioNormalizer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 归一化组分配比到百分比口径
    ///
    /// 算法: 求原始配比之和 sum
    /// - `0 < sum < 10`: 视为小数口径 (≈1),每个配比 ×100
    /// - 其他: 视为已是百分比口径,原样透传
    ///
    /// 幂等性: 对已是百分比口径的配方再次归一化是恒等变换
    ///
    /// # 参数
    /// - `components`: 原始组分列表 (保留声明顺序)
    ///
    /// # 返回
    /// 归一化组分列表, ratio_pct 合计 ≈ 100
    pub fn normalize(&self, components: &[FormulaComponent]) -> Vec<NormalizedComponent> {
        let raw_sum: f64 = components.iter().map(|c| c.ratio).sum();
        let is_fractional = raw_sum > 0.0 && raw_sum < FRACTION_SUM_THRESHOLD;
        let scale = if is_fractional { 100.0 } else { 1.0 };

        if is_fractional && raw_sum > SUSPICIOUS_FRACTION_SUM {
            warn!(
                raw_sum,
                "配比之和落入小数口径判定区但明显大于1,可能是被误判的小百分比配方"
            );
        }

        debug!(
            raw_sum,
            is_fractional,
            component_count = components.len(),
            "配比口径判定完成"
        );

        components
            .iter()
            .enumerate()
            .map(|(seq_no, c)| NormalizedComponent {
                component_id: c.component_id.clone(),
                item_id: c.item_id.clone(),
                ratio_pct: c.ratio * scale,
                seq_no,
            })
            .collect()
    }
}

impl Default for RatioNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
