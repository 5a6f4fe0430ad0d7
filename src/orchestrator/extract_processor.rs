//! ID 提取任务 - 编排层
//!
//! 加载命名表，委托 IdExtractor 处理 CSV，输出统计

use crate::config::Config;
use crate::services::{ExtractSummary, IdExtractor};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// 运行 ID 提取任务
pub async fn run_extraction(config: &Config) -> Result<ExtractSummary> {
    let nomenclator = Path::new(&config.nomenclator_file);
    let input = Path::new(&config.mesas_file);
    let output = Path::new(&config.extracted_ids_file);

    info!("\n📄 加载 {}...", nomenclator.display());
    let extractor = IdExtractor::from_file(nomenclator)
        .await
        .context("无法加载命名表")?;

    info!("📄 处理 {}...", input.display());
    let summary = extractor
        .run(input, output)
        .await
        .with_context(|| format!("ID 提取失败: {}", input.display()))?;

    info!("✅ 写出 {} 行: {} 个匹配, {} 个未匹配", summary.rows, summary.matched, summary.unmatched());
    info!("完成。生成文件: {}", output.display());

    Ok(summary)
}
