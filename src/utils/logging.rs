/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志，默认级别 info，可通过 RUST_LOG 覆盖
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 打印带标题的分隔横幅
pub fn log_banner(title: &str) {
    info!("{}", "=".repeat(60));
    info!("{}", title);
    info!("{}", "=".repeat(60));
}

/// 记录程序启动信息
///
/// # 参数
/// - `job`: 任务名称
pub fn log_startup(job: &str) {
    log_banner(&format!("🗳️  {} - {}", job, now()));
}

/// 记录抽样估算结果
///
/// # 参数
/// - `ok`: 抽样成功数量
/// - `sampled`: 抽样数量
/// - `total`: 全部投票桌数量
/// - `estimated`: 预计总耗时
pub fn log_estimate(ok: usize, sampled: usize, total: usize, estimated: Duration) {
    let rate = percentage(ok, sampled);
    let projected = if sampled == 0 { 0 } else { total * ok / sampled };

    info!("\n{}", "=".repeat(60));
    info!("📈 估算:");
    info!("{}", "=".repeat(60));
    info!("✅ 抽样成功: {}/{} ({:.1}%)", ok, sampled, rate);
    info!("📊 预计有数据的投票桌: ~{} / {}", projected, total);
    info!("⏱️  预计耗时: ~{:.1} 分钟", minutes(estimated));
    info!("{}\n", "=".repeat(60));
}

/// 记录批处理进度
pub fn log_progress(done: usize, total: usize, ok: usize, remaining: Duration) {
    info!(
        "--- {}/{} ({}%) - ✅: {} ({:.1}%) - ⏱️ {:.1}min ---",
        done,
        total,
        done * 100 / total.max(1),
        ok,
        percentage(ok, done),
        minutes(remaining)
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `total`: 处理总数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `elapsed`: 总耗时
/// - `results_file`: 结果文件路径
/// - `avg_partidos`: 每个投票桌平均政党数（无成功时为 None）
pub fn print_final_stats(
    total: usize,
    success: usize,
    failed: usize,
    elapsed: Duration,
    results_file: &str,
    avg_partidos: Option<usize>,
) {
    info!("\n{}", "=".repeat(60));
    info!("🎉 全部处理完成统计");
    info!("完成时间: {}", now());
    info!("{}", "=".repeat(60));
    info!("📊 处理投票桌: {}", total);
    info!("✅ 成功: {}", success);
    info!("❌ 错误: {}", failed);
    info!("📈 成功率: {}%", if total > 0 { success * 100 / total } else { 0 });
    info!("⏱️  总耗时: {:.1} 分钟", minutes(elapsed));
    info!("💾 结果文件: {}", results_file);
    if let Some(avg) = avg_partidos {
        info!("👥 每个投票桌平均政党数: {}", avg);
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

fn minutes(d: Duration) -> f64 {
    d.as_secs_f64() / 60.0
}

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("a1b2c3d4e5f6g7h8i9", 15), "a1b2c3d4e5f6g7h...");
        assert_eq!(truncate_text("short", 15), "short");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(3, 0), 0.0);
    }
}
