// ==========================================
// 涂料生产配比计算系统 - 配方领域模型
// ==========================================
// 配方 = 整体密度 + 有序组分列表
// 不变量: 密度 ∈ [0.5, 3.0] g/ml; 归一化后配比之和 ≈ 100 (±0.1)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Formula - 配方
// ==========================================
// 来源: 配方目录(外部数据层),引擎只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formula {
    pub formula_id: String,                // 配方ID
    pub name: String,                      // 配方名称
    pub density: f64,                      // 整体密度 (g/ml)
    pub components: Vec<FormulaComponent>, // 组分列表 (声明顺序有业务含义)
}

impl Formula {
    /// 按组分ID查找组分 (修正会话入口校验用)
    pub fn component(&self, component_id: &str) -> Option<&FormulaComponent> {
        self.components
            .iter()
            .find(|c| c.component_id == component_id)
    }
}

// ==========================================
// FormulaComponent - 配方组分
// ==========================================
// ratio 的口径存在歧义: 可能是 0-1 小数,也可能是 0-100 百分比
// 歧义由 RatioNormalizer 判定解决,领域层不做假设
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaComponent {
    pub component_id: String, // 组分ID (配方内唯一)
    pub item_id: String,      // 引用的物料ID
    pub ratio: f64,           // 配比 (口径待归一化判定)
}

// ==========================================
// NormalizedComponent - 归一化后的组分
// ==========================================
// RatioNormalizer 的输出: ratio_pct 统一为百分比口径
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedComponent {
    pub component_id: String, // 组分ID
    pub item_id: String,      // 物料ID
    pub ratio_pct: f64,       // 配比 (百分比口径, 合计 ≈ 100)
    pub seq_no: usize,        // 声明顺序 (稳定排序的次级键)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_formula() -> Formula {
        Formula {
            formula_id: "F001".to_string(),
            name: "白色乳胶漆".to_string(),
            density: 1.2,
            components: vec![
                FormulaComponent {
                    component_id: "C1".to_string(),
                    item_id: "A".to_string(),
                    ratio: 60.0,
                },
                FormulaComponent {
                    component_id: "C2".to_string(),
                    item_id: "B".to_string(),
                    ratio: 40.0,
                },
            ],
        }
    }

    #[test]
    fn test_component_lookup() {
        let formula = sample_formula();
        assert_eq!(formula.component("C2").unwrap().item_id, "B");
        assert!(formula.component("C9").is_none());
    }
}
