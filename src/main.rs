// ==========================================
// 涂料生产配比计算系统 - 预览命令行入口
// ==========================================
// 用途: 读取 JSON 请求文件,执行一次配比计算,
//       把结果以 JSON 输出到标准输出
// 请求格式: { formula, items, desired_volume_ml, correction? }
// ==========================================

use anyhow::{bail, Context, Result};
use paint_mix_engine::domain::calculation::CorrectionSession;
use paint_mix_engine::domain::formula::Formula;
use paint_mix_engine::domain::item::ItemSnapshot;
use paint_mix_engine::{logging, MixApi};
use serde::Deserialize;
use std::fs;

// ==========================================
// PreviewRequest - 请求载荷
// ==========================================
#[derive(Debug, Deserialize)]
struct PreviewRequest {
    formula: Formula,
    items: Vec<ItemSnapshot>,
    desired_volume_ml: f64,
    correction: Option<CorrectionSession>,
}

fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 配比预览", paint_mix_engine::APP_NAME);
    tracing::info!("系统版本: {}", paint_mix_engine::VERSION);
    tracing::info!("==================================================");

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => bail!("用法: mix-preview <请求JSON文件>"),
    };

    let raw = fs::read_to_string(&path).with_context(|| format!("无法读取请求文件: {}", path))?;
    let request: PreviewRequest =
        serde_json::from_str(&raw).with_context(|| format!("请求文件JSON解析失败: {}", path))?;

    tracing::info!(
        formula_id = %request.formula.formula_id,
        desired_volume_ml = request.desired_volume_ml,
        item_count = request.items.len(),
        correction_mode = request.correction.is_some(),
        "请求加载完成"
    );

    let api = MixApi::new();
    let result = api
        .preview(
            &request.formula,
            &request.items,
            request.desired_volume_ml,
            request.correction.as_ref(),
        )
        .map_err(|err| anyhow::anyhow!("{err}"))?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.validation.is_valid || !result.validation.issues.is_empty() {
        tracing::warn!(
            issue_count = result.validation.issues.len(),
            "计算完成,但存在校验问题,投产将被阻断"
        );
    }

    Ok(())
}
