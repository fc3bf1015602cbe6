// ==========================================
// CorrectionEngine 引擎集成测试
// ==========================================
// 测试目标: 验证称量误差的修正传播与投料状态对账
// 覆盖范围: 基准修正场景/符号正确性/已投料差额/欠量拒绝/库存重判
// ==========================================

use paint_mix_engine::domain::calculation::CorrectionSession;
use paint_mix_engine::domain::formula::{Formula, FormulaComponent};
use paint_mix_engine::domain::item::{ItemSnapshot, Measure};
use paint_mix_engine::domain::types::{CorrectionRole, MeasureType, MeasureUnit, ValidationCode};
use paint_mix_engine::engine::MixCalculator;

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建测试用的配方 (密度1.2, 60/40)
fn create_reference_formula() -> Formula {
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

/// 创建测试用的物料快照
fn create_test_items(qty: f64) -> Vec<ItemSnapshot> {
    ["A", "B"]
        .iter()
        .map(|id| ItemSnapshot {
            item_id: (*id).to_string(),
            name: format!("物料{}", id),
            quantity_on_hand: qty,
            unit_price: 50.0,
            measures: vec![Measure {
                measure_type: MeasureType::Weight,
                value: 1.0,
                unit: MeasureUnit::Kilogram,
            }],
        })
        .collect()
}

// ==========================================
// 测试用例 1: 基准修正场景 (720g → 900g, B 未投料)
// ==========================================

#[test]
fn test_reference_correction_scenario() {
    paint_mix_engine::logging::init_test();
    let calculator = MixCalculator::new();
    // A 期望 720g, 实测 900g, B 尚未投料
    let session = CorrectionSession::new("C1", 900.0);

    let result = calculator.calculate(
        &create_reference_formula(),
        &create_test_items(10.0),
        1000.0,
        Some(&session),
    );

    // 误差比 = 900 / 720 = 1.25
    assert_eq!(result.error_ratio, Some(1.25));

    let a = &result.components[0];
    let a_detail = a.correction.as_ref().unwrap();
    assert_eq!(a_detail.role, CorrectionRole::ErrorSource);
    // 实测值即事实
    assert!((a_detail.corrected_weight_g - 900.0).abs() < 1e-9);

    let b = &result.components[1];
    let b_detail = b.correction.as_ref().unwrap();
    assert_eq!(b_detail.role, CorrectionRole::Pending);
    // B 未投料 → 欠完整修正量 480 × 1.25 = 600g
    assert!((b_detail.corrected_weight_g - 600.0).abs() < 1e-9);
    assert!((b_detail.corrected_volume_ml - 500.0).abs() < 1e-9);
    assert!(b_detail.additional_weight_g.is_none());

    // 投产重量 = 基础总重 × 误差比 = 1200 × 1.25
    assert!((result.production_weight_g() - 1500.0).abs() < 1e-9);
}

// ==========================================
// 测试用例 2: 符号正确性 (误差比 > 1)
// ==========================================

#[test]
fn test_correction_sign_correctness() {
    let formula = Formula {
        formula_id: "F002".to_string(),
        name: "三组分配方".to_string(),
        density: 1.0,
        components: vec![
            FormulaComponent {
                component_id: "C1".to_string(),
                item_id: "A".to_string(),
                ratio: 50.0,
            },
            FormulaComponent {
                component_id: "C2".to_string(),
                item_id: "B".to_string(),
                ratio: 30.0,
            },
            FormulaComponent {
                component_id: "C3".to_string(),
                item_id: "B".to_string(),
                ratio: 20.0,
            },
        ],
    };
    let calculator = MixCalculator::new();
    // C1 期望 500g, 实测 650g; C2 已投料
    let session = CorrectionSession::new("C1", 650.0).mark_dispensed("C2");

    let result =
        calculator.calculate(&formula, &create_test_items(1000.0), 1000.0, Some(&session));

    for component in &result.components {
        let detail = component.correction.as_ref().unwrap();
        match detail.role {
            CorrectionRole::Pending => {
                // 未投料: 修正量 ≥ 原目标
                assert!(detail.corrected_weight_g >= component.weight_g);
                assert!(detail.additional_weight_g.is_none());
            }
            CorrectionRole::Dispensed => {
                // 已投料: 差额 ≥ 0 (误差比 > 1)
                assert!(detail.additional_weight_g.unwrap() >= 0.0);
            }
            CorrectionRole::ErrorSource => {
                assert!((detail.corrected_weight_g - 650.0).abs() < 1e-9);
            }
        }
    }
}

// ==========================================
// 测试用例 3: 误差比恰为 1 时全部差额为零
// ==========================================

#[test]
fn test_error_ratio_one_is_identity() {
    let calculator = MixCalculator::new();
    let session = CorrectionSession::new("C1", 720.0).mark_dispensed("C2");

    let result = calculator.calculate(
        &create_reference_formula(),
        &create_test_items(10.0),
        1000.0,
        Some(&session),
    );

    assert_eq!(result.error_ratio, Some(1.0));
    let b_detail = result.components[1].correction.as_ref().unwrap();
    assert_eq!(b_detail.additional_weight_g.unwrap(), 0.0);
    assert_eq!(b_detail.corrected_weight_g, 480.0);
    assert_eq!(result.production_weight_g(), 1200.0);
}

// ==========================================
// 测试用例 4: 已投料组分只欠差额
// ==========================================

#[test]
fn test_dispensed_component_owes_delta_only() {
    let calculator = MixCalculator::new();
    let session = CorrectionSession::new("C1", 900.0).mark_dispensed("C2");

    let result = calculator.calculate(
        &create_reference_formula(),
        &create_test_items(10.0),
        1000.0,
        Some(&session),
    );

    let b_detail = result.components[1].correction.as_ref().unwrap();
    assert_eq!(b_detail.role, CorrectionRole::Dispensed);
    // 差额 = 480 × 1.25 − 480 = 120g
    assert!((b_detail.additional_weight_g.unwrap() - 120.0).abs() < 1e-9);
    // 修正目标仍完整给出 (600g), 差额只是展示口径
    assert!((b_detail.corrected_weight_g - 600.0).abs() < 1e-9);
}

// ==========================================
// 测试用例 5: 欠量修正拒绝,结果保持基础口径
// ==========================================

#[test]
fn test_under_measured_correction_rejected_with_issue() {
    let calculator = MixCalculator::new();
    // 实测 600 < 期望 720 → 拒绝
    let session = CorrectionSession::new("C1", 600.0);

    let result = calculator.calculate(
        &create_reference_formula(),
        &create_test_items(10.0),
        1000.0,
        Some(&session),
    );

    assert!(result.error_ratio.is_none());
    assert!(result.components.iter().all(|c| c.correction.is_none()));
    assert!(result
        .validation
        .issues
        .iter()
        .any(|i| i.code == ValidationCode::UnderMeasuredCorrection));
    // 投产重量退回基础口径
    assert_eq!(result.production_weight_g(), 1200.0);
}

// ==========================================
// 测试用例 6: 修正后库存按修正目标重判
// ==========================================

#[test]
fn test_stock_revalidated_against_corrected_targets() {
    let calculator = MixCalculator::new();
    // 库存 1单位 = 1000g: 基础需求 A=720 B=480 均足额
    let items = create_test_items(1.0);

    let base = calculator.calculate(&create_reference_formula(), &items, 1000.0, None);
    assert!(base.validation.all_in_stock);

    // 修正后 A 需求 1080g > 1000g → 不足
    let session = CorrectionSession::new("C1", 1080.0);
    let corrected =
        calculator.calculate(&create_reference_formula(), &items, 1000.0, Some(&session));

    assert!(!corrected.components[0].has_stock);
    assert!(!corrected.validation.all_in_stock);
    assert!(!corrected.validation.is_valid);
}
