// ==========================================
// 涂料生产配比计算系统 - 物料快照领域模型
// ==========================================
// 用途: 成本/库存计算所需的库存只读投影
// 所有权: 调用方按次提供,引擎绝不修改
// ==========================================

use crate::domain::types::{MeasureType, MeasureUnit};
use crate::i18n;
use serde::{Deserialize, Serialize};

// ==========================================
// Measure - 计量记录
// ==========================================
// 一条物料的重量或体积计量 (如 "1桶 = 18 LITER")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measure {
    pub measure_type: MeasureType, // 计量维度
    pub value: f64,                // 数值
    pub unit: MeasureUnit,         // 单位
}

impl Measure {
    /// 换算为克 (仅重量计量有效)
    ///
    /// # 返回
    /// - `Some(克数)`: 重量计量
    /// - `None`: 体积计量或单位不匹配
    pub fn as_grams(&self) -> Option<f64> {
        if self.measure_type != MeasureType::Weight {
            return None;
        }
        match self.unit {
            MeasureUnit::Gram => Some(self.value),
            MeasureUnit::Kilogram => Some(self.value * 1000.0),
            _ => None,
        }
    }

    /// 换算为毫升 (仅体积计量有效)
    ///
    /// # 返回
    /// - `Some(毫升数)`: 体积计量
    /// - `None`: 重量计量或单位不匹配
    pub fn as_milliliters(&self) -> Option<f64> {
        if self.measure_type != MeasureType::Volume {
            return None;
        }
        match self.unit {
            MeasureUnit::Milliliter => Some(self.value),
            MeasureUnit::Liter => Some(self.value * 1000.0),
            _ => None,
        }
    }
}

// ==========================================
// ItemSnapshot - 物料库存快照
// ==========================================
// 红线: 快照缺失/过期属于合法降级输入,不允许崩溃
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub item_id: String,        // 物料ID
    pub name: String,           // 物料名称 (展示用)
    pub quantity_on_hand: f64,  // 在库数量 (按物料自身单位计)
    pub unit_price: f64,        // 单价 (每单位)
    pub measures: Vec<Measure>, // 计量记录列表
}

impl ItemSnapshot {
    /// 第一条重量计量 (克)
    pub fn weight_measure_grams(&self) -> Option<f64> {
        self.measures.iter().find_map(Measure::as_grams)
    }

    /// 第一条体积计量 (毫升)
    pub fn volume_measure_milliliters(&self) -> Option<f64> {
        self.measures.iter().find_map(Measure::as_milliliters)
    }

    /// 缺失物料的占位快照
    ///
    /// 组分引用的物料不在快照集中时使用: 零库存、零单价、无计量,
    /// 名称使用国际化的"未找到"标签 (pt-BR: "não encontrado")
    pub fn not_found_placeholder(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            name: i18n::t("item.not_found"),
            quantity_on_hand: 0.0,
            unit_price: 0.0,
            measures: Vec::new(),
        }
    }
}
