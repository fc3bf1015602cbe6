// ==========================================
// 配比计算全流程端到端测试
// ==========================================
// 测试目标: 从预览到投产的完整链路
// 覆盖范围: 正常投产/校验阻断/修正后投产重量缩放/入口拒绝
// ==========================================

use paint_mix_engine::api::{ApiError, MixApi};
use paint_mix_engine::domain::calculation::CorrectionSession;
use paint_mix_engine::domain::formula::{Formula, FormulaComponent};
use paint_mix_engine::domain::item::{ItemSnapshot, Measure};
use paint_mix_engine::domain::types::{CorrectionRole, MeasureType, MeasureUnit, ValidationCode};
use paint_mix_engine::engine::MixCalculator;

// ==========================================
// 测试辅助函数
// ==========================================

/// 参考配方: 密度1.2, 两组分 60/40
fn reference_formula() -> Formula {
    Formula {
        formula_id: "F-E2E".to_string(),
        name: "端到端测试配方".to_string(),
        density: 1.2,
        components: vec![
            FormulaComponent {
                component_id: "C1".to_string(),
                item_id: "I1".to_string(),
                ratio: 60.0,
            },
            FormulaComponent {
                component_id: "C2".to_string(),
                item_id: "I2".to_string(),
                ratio: 40.0,
            },
        ],
    }
}

/// 创建指定库存量的物料快照
fn item(item_id: &str, stock_units: f64, unit_weight_kg: f64) -> ItemSnapshot {
    ItemSnapshot {
        item_id: item_id.to_string(),
        name: format!("物料-{}", item_id),
        quantity_on_hand: stock_units,
        unit_price: 12.0,
        measures: vec![Measure {
            measure_type: MeasureType::Weight,
            value: unit_weight_kg,
            unit: MeasureUnit::Kilogram,
        }],
    }
}

fn ample_items() -> Vec<ItemSnapshot> {
    vec![item("I1", 1000.0, 1.0), item("I2", 1000.0, 1.0)]
}

// ==========================================
// 测试用例 1: 正常链路 预览 → 投产
// ==========================================

#[test]
fn test_preview_then_start_production() {
    paint_mix_engine::logging::init_test();
    let api = MixApi::new();
    let formula = reference_formula();
    let items = ample_items();

    let result = api.preview(&formula, &items, 1000.0, None).unwrap();

    // 1000ml × 1.2 = 1200g; 60% = 720g, 40% = 480g
    assert!(result.validation.is_valid);
    assert!(result.validation.issues.is_empty());
    assert_eq!(result.components[0].weight_g, 720.0);
    assert_eq!(result.components[1].weight_g, 480.0);
    assert_eq!(result.totals.total_weight_g, 1200.0);

    let order = api.start_production(&result).unwrap();
    assert_eq!(order.formula_id, "F-E2E");
    assert_eq!(order.weight_g, 1200.0);
}

// ==========================================
// 测试用例 2: 校验不通过时投产被阻断
// ==========================================

#[test]
fn test_production_blocked_on_invalid_result() {
    let api = MixApi::new();
    let mut formula = reference_formula();
    formula.density = 4.0; // 密度越界

    let result = api.preview(&formula, &ample_items(), 1000.0, None).unwrap();
    assert!(!result.validation.is_valid);

    match api.start_production(&result) {
        Err(ApiError::ValidationFailed { reason, issues }) => {
            assert!(!reason.is_empty());
            assert!(!issues.is_empty());
        }
        other => panic!("投产未被阻断: {:?}", other),
    }
}

#[test]
fn test_production_blocked_on_missing_item() {
    // 六谓词可能全真, 但缺失物料问题非空也必须阻断
    let api = MixApi::new();
    let items = vec![item("I1", 1000.0, 1.0)]; // I2 缺失

    let result = api
        .preview(&reference_formula(), &items, 1000.0, None)
        .unwrap();
    assert!(!result.validation.issues.is_empty());
    assert!(api.start_production(&result).is_err());
}

// ==========================================
// 测试用例 3: 修正模式下投产重量整体缩放
// ==========================================

#[test]
fn test_corrected_production_weight_scaled() {
    let api = MixApi::new();
    let formula = reference_formula();
    let items = ample_items();

    // C1 目标 720g, 实测 900g → 误差比 1.25
    let session = CorrectionSession::new("C1", 900.0);
    let result = api
        .preview(&formula, &items, 1000.0, Some(&session))
        .unwrap();

    assert_eq!(result.error_ratio, Some(1.25));

    // C2 未投料 → 全额修正目标 480 × 1.25 = 600g
    let c2 = result
        .components
        .iter()
        .find(|c| c.component_id == "C2")
        .unwrap();
    let detail = c2.correction.as_ref().unwrap();
    assert_eq!(detail.role, CorrectionRole::Pending);
    assert_eq!(detail.corrected_weight_g, 600.0);

    // 投产重量 = 1200 × 1.25 = 1500g
    let order = api.start_production(&result).unwrap();
    assert_eq!(order.weight_g, 1500.0);
}

// ==========================================
// 测试用例 4: 非法入参在入口处拒绝
// ==========================================

#[test]
fn test_preview_rejects_non_finite_volume() {
    let api = MixApi::new();
    let err = api
        .preview(&reference_formula(), &ample_items(), f64::NAN, None)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_preview_rejects_under_measured_correction() {
    let api = MixApi::new();
    // C1 目标 720g, 实测 500g → 欠量, 入口拒绝
    let session = CorrectionSession::new("C1", 500.0);
    let err = api
        .preview(&reference_formula(), &ample_items(), 1000.0, Some(&session))
        .unwrap_err();
    match err {
        ApiError::UnderMeasuredCorrection {
            expected_g,
            measured_g,
        } => {
            assert_eq!(expected_g, 720.0);
            assert_eq!(measured_g, 500.0);
        }
        other => panic!("未按欠量拒绝: {:?}", other),
    }
}

#[test]
fn test_preview_rejects_zero_expected_correction() {
    let api = MixApi::new();
    let mut formula = reference_formula();
    formula.components[0].ratio = 100.0;
    formula.components[1].ratio = 0.0;
    // C2 目标重量为 0, 误差比无定义 → 入口拒绝
    let session = CorrectionSession::new("C2", 50.0);

    let err = api
        .preview(&formula, &ample_items(), 1000.0, Some(&session))
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_failed_correction_blocks_production() {
    // 绕过 API 入口直接经编排器计算: 修正失败的原因
    // 必须落在问题列表里,使投产照样被阻断
    let api = MixApi::new();
    let session = CorrectionSession::new("C-UNKNOWN", 900.0);

    let result = MixCalculator::new().calculate(
        &reference_formula(),
        &ample_items(),
        1000.0,
        Some(&session),
    );

    assert!(result.error_ratio.is_none());
    assert!(result
        .validation
        .issues
        .iter()
        .any(|i| i.code == ValidationCode::InvalidCorrectionInput));
    assert!(api.start_production(&result).is_err());
}

#[test]
fn test_preview_rejects_unknown_error_component() {
    let api = MixApi::new();
    let session = CorrectionSession::new("C-UNKNOWN", 900.0);
    let err = api
        .preview(&reference_formula(), &ample_items(), 1000.0, Some(&session))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
