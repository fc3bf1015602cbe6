// ==========================================
// 涂料生产配比计算系统 - 库存解析引擎
// ==========================================
// 职责: 把配方组分映射到物料库存快照
// 红线: 快照缺失属于合法降级输入 —— 缺失物料解析为
//       零库存占位快照并记录缺失ID,绝不中断整体计算
// ==========================================

use crate::domain::formula::FormulaComponent;
use crate::domain::item::ItemSnapshot;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// ResolvedStock - 解析结果
// ==========================================
#[derive(Debug)]
pub struct ResolvedStock {
    // item_id → 快照 (缺失物料为占位快照)
    snapshots: HashMap<String, ItemSnapshot>,
    // 快照集中不存在的物料ID (按组分声明顺序,去重)
    pub missing_item_ids: Vec<String>,
}

impl ResolvedStock {
    /// 按物料ID取快照
    ///
    /// 解析阶段已为所有被引用的物料建立条目 (含占位),
    /// 查不到仅意味着调用方传入了未经解析的物料ID
    pub fn snapshot(&self, item_id: &str) -> Option<&ItemSnapshot> {
        self.snapshots.get(item_id)
    }

    /// 物料是否真实存在于快照集 (非占位)
    pub fn is_found(&self, item_id: &str) -> bool {
        !self.missing_item_ids.iter().any(|id| id == item_id)
    }
}

// ==========================================
// StockResolver - 库存解析引擎
// ==========================================
pub struct StockResolver {
    // 无状态引擎,不需要注入依赖
}

impl StockResolver {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 解析组分引用的全部物料
    ///
    /// # 参数
    /// - `components`: 配方组分列表
    /// - `items`: 调用方提供的库存快照集 (只读)
    ///
    /// # 返回
    /// ResolvedStock: 每个被引用物料一条快照 (缺失为占位) + 缺失ID列表
    pub fn resolve(&self, components: &[FormulaComponent], items: &[ItemSnapshot]) -> ResolvedStock {
        let by_id: HashMap<&str, &ItemSnapshot> = items
            .iter()
            .map(|item| (item.item_id.as_str(), item))
            .collect();

        let mut snapshots = HashMap::new();
        let mut missing_item_ids = Vec::new();

        for component in components {
            if snapshots.contains_key(&component.item_id) {
                continue;
            }
            match by_id.get(component.item_id.as_str()) {
                Some(item) => {
                    snapshots.insert(component.item_id.clone(), (*item).clone());
                }
                None => {
                    warn!(
                        item_id = %component.item_id,
                        component_id = %component.component_id,
                        "组分引用的物料不在快照集中,按零库存占位处理"
                    );
                    snapshots.insert(
                        component.item_id.clone(),
                        ItemSnapshot::not_found_placeholder(&component.item_id),
                    );
                    missing_item_ids.push(component.item_id.clone());
                }
            }
        }

        ResolvedStock {
            snapshots,
            missing_item_ids,
        }
    }
}

impl Default for StockResolver {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn component(component_id: &str, item_id: &str) -> FormulaComponent {
        FormulaComponent {
            component_id: component_id.to_string(),
            item_id: item_id.to_string(),
            ratio: 50.0,
        }
    }

    fn item(item_id: &str) -> ItemSnapshot {
        ItemSnapshot {
            item_id: item_id.to_string(),
            name: format!("物料{}", item_id),
            quantity_on_hand: 5.0,
            unit_price: 10.0,
            measures: Vec::new(),
        }
    }

    #[test]
    fn test_resolve_all_found() {
        let resolver = StockResolver::new();
        let resolved = resolver.resolve(
            &[component("C1", "A"), component("C2", "B")],
            &[item("A"), item("B")],
        );

        assert!(resolved.missing_item_ids.is_empty());
        assert!(resolved.is_found("A"));
        assert_eq!(resolved.snapshot("B").unwrap().quantity_on_hand, 5.0);
    }

    #[test]
    fn test_resolve_missing_item_gets_placeholder() {
        let resolver = StockResolver::new();
        let resolved = resolver.resolve(
            &[component("C1", "A"), component("C2", "X404")],
            &[item("A")],
        );

        assert_eq!(resolved.missing_item_ids, vec!["X404".to_string()]);
        assert!(!resolved.is_found("X404"));

        let placeholder = resolved.snapshot("X404").unwrap();
        assert_eq!(placeholder.quantity_on_hand, 0.0);
        assert_eq!(placeholder.unit_price, 0.0);
    }

    #[test]
    fn test_resolve_duplicate_item_reference_counted_once() {
        // 两个组分引用同一缺失物料: 缺失ID只记一次
        let resolver = StockResolver::new();
        let resolved = resolver.resolve(
            &[component("C1", "X404"), component("C2", "X404")],
            &[],
        );

        assert_eq!(resolved.missing_item_ids.len(), 1);
    }
}
