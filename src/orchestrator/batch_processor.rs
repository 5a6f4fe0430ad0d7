//! 批量结果抓取器 - 编排层
//!
//! ## 职责
//!
//! 本模块是结果抓取任务的入口，负责输入加载、抽样估算、确认和全量下载。
//!
//! ## 状态
//!
//! ```text
//! Idle → Sampling → AwaitingConfirmation → Running → Done
//!                              └──────(拒绝)──────→ Done
//! ```
//!
//! - 抽样只做估算，不影响全量结果
//! - 全量下载开始后，单个投票桌的失败不会中止整批
//! - 结果只在最后一次性写出

use crate::config::Config;
use crate::error::ScrapeError;
use crate::models::loaders::{load_json, load_mesas};
use crate::models::mesa::{join_with_structure, JoinReport, JoinedMesa};
use crate::models::structure::StructureIndex;
use crate::services::{ask_confirmation, pick_sample, ResultWriter};
use crate::utils::logging::{self, truncate_text};
use crate::workflow::{FetchFlow, MesaCtx, ProgressTracker, RunAccumulator};
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::BufRead;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// 批处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Sampling,
    AwaitingConfirmation,
    Running,
    Done,
}

impl BatchState {
    pub fn can_transition_to(self, next: BatchState) -> bool {
        use BatchState::*;
        matches!(
            (self, next),
            (Idle, Sampling)
                | (Sampling, AwaitingConfirmation)
                | (AwaitingConfirmation, Running)
                | (AwaitingConfirmation, Done)
                | (Running, Done)
        )
    }
}

/// 一次运行的结局
#[derive(Debug)]
pub enum RunOutcome {
    /// 全量下载完成
    Completed(RunSummary),
    /// 操作员拒绝，未写出任何文件
    Aborted,
}

/// 全量下载统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub errors_written: bool,
}

/// 抽样估算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleReport {
    pub sampled: usize,
    pub success: usize,
    pub elapsed: Duration,
}

impl SampleReport {
    /// 按抽样平均耗时外推全量耗时
    pub fn estimated_duration(&self, total: usize) -> Duration {
        if self.sampled == 0 {
            return Duration::ZERO;
        }
        self.elapsed.mul_f64(total as f64 / self.sampled as f64)
    }
}

/// 结果抓取应用
pub struct FetchApp {
    config: Config,
    flow: FetchFlow,
    state: BatchState,
}

impl FetchApp {
    /// 初始化应用（构建 HTTP 客户端，需要会话 Cookie）
    pub fn initialize(config: Config) -> Result<Self> {
        let flow = FetchFlow::new(&config).context("无法初始化结果客户端")?;
        Ok(Self {
            config,
            flow,
            state: BatchState::Idle,
        })
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// 加载输入文件并连接出可抓取的投票桌
    ///
    /// 没有可用记录时返回前置条件错误，不会发出任何请求
    pub async fn load_inputs(&self, csv_path: &Path, structure_path: &Path) -> Result<JoinReport> {
        info!("\n📄 加载 {}...", csv_path.display());
        let mesas = load_mesas(csv_path).await?;
        info!("✅ CSV 中带参议员 ID 的投票桌: {}", mesas.len());
        if mesas.is_empty() {
            return Err(ScrapeError::NoUsableRecords("CSV 中没有带参议员 ID 的投票桌".into()).into());
        }

        info!("\n📄 加载 {}...", structure_path.display());
        let structure: Value = load_json(structure_path).await?;
        info!("🔗 创建 co -> hash 映射...");
        let index = StructureIndex::scan(&structure);
        info!("✅ 映射包含 {} 个投票桌", index.len());

        let report = join_with_structure(mesas, &index);
        info!("\n📊 完整的投票桌（有哈希）: {}", report.joined.len());
        if !report.missing_hash.is_empty() {
            warn!("⚠️  找不到哈希的投票桌: {}", report.missing_hash.len());
            warn!("   前 5 个: {:?}", &report.missing_hash[..report.missing_hash.len().min(5)]);
        }
        if report.joined.is_empty() {
            return Err(ScrapeError::NoUsableRecords("没有数据完整的投票桌".into()).into());
        }

        Ok(report)
    }

    /// 运行完整流程：抽样 → 确认 → 全量下载 → 保存
    ///
    /// # 参数
    /// - `report`: 连接结果
    /// - `input`: 确认提示的输入流（`auto_confirm` 时不读取）
    pub async fn run<R: BufRead>(&mut self, report: &JoinReport, input: R) -> Result<RunOutcome> {
        log_preview(report);

        self.advance(BatchState::Sampling);
        let sample = pick_sample(&report.joined, self.config.sample_size, &mut rand::thread_rng());
        let sample_report = self.run_sample(&sample).await;
        if sample_report.success == 0 {
            warn!("\n❌ 抽样中没有投票桌成功，请检查 Cookie 或结构文件");
        }
        logging::log_estimate(
            sample_report.success,
            sample_report.sampled,
            report.joined.len(),
            sample_report.estimated_duration(report.joined.len()),
        );

        self.advance(BatchState::AwaitingConfirmation);
        if !self.confirm(report.joined.len(), input)? {
            info!("❌ 已取消");
            self.advance(BatchState::Done);
            return Ok(RunOutcome::Aborted);
        }

        self.advance(BatchState::Running);
        let started = Instant::now();
        let acc = self.run_full(&report.joined).await;

        let writer = ResultWriter::new(&self.config.results_file, &self.config.errors_file);
        let errors_written = writer.persist(&acc.results, &acc.errors).await?;
        self.advance(BatchState::Done);

        logging::print_final_stats(
            report.joined.len(),
            acc.results.len(),
            acc.errors.len(),
            started.elapsed(),
            &self.config.results_file,
            acc.results.average_partidos(),
        );

        Ok(RunOutcome::Completed(RunSummary {
            total: report.joined.len(),
            success: acc.results.len(),
            failed: acc.errors.len(),
            errors_written,
        }))
    }

    /// 对抽样投票桌逐个抓取，只统计成功数量
    pub async fn run_sample(&self, sample: &[JoinedMesa]) -> SampleReport {
        info!("\n=== 测试 {} 个随机投票桌 ===\n", sample.len());
        let started = Instant::now();

        let mut success = 0;
        for (idx, mesa) in sample.iter().enumerate() {
            let outcome = self.flow.run(mesa, MesaCtx::new(idx + 1, sample.len())).await;
            if outcome.is_success() {
                success += 1;
            }
        }

        SampleReport {
            sampled: sample.len(),
            success,
            elapsed: started.elapsed(),
        }
    }

    /// 按输入顺序抓取全部投票桌，任何单条失败都只记录不停止
    pub async fn run_full(&self, mesas: &[JoinedMesa]) -> RunAccumulator {
        let total = mesas.len();
        info!("\n🚀 下载 {} 个投票桌...\n", total);

        let progress = ProgressTracker::start(total, self.config.progress_interval);
        let mut acc = RunAccumulator::new();

        for (idx, mesa) in mesas.iter().enumerate() {
            let done = idx + 1;
            let outcome = self.flow.run(mesa, MesaCtx::new(done, total)).await;
            acc.record(mesa, outcome);

            if progress.should_report(done) {
                logging::log_progress(done, total, acc.results.len(), progress.remaining(done));
            }
        }

        acc
    }

    fn confirm<R: BufRead>(&self, total: usize, input: R) -> Result<bool> {
        if self.config.auto_confirm {
            info!("✓ 已通过 --yes 确认，开始下载全部 {} 个投票桌", total);
            return Ok(true);
        }

        let prompt = format!("¿Descargar TODAS las {} mesas?", total);
        ask_confirmation(input, std::io::stdout(), &prompt).context("无法读取确认输入")
    }

    fn advance(&mut self, next: BatchState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "非法状态转换: {:?} -> {:?}",
            self.state,
            next
        );
        debug!("状态: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

fn log_preview(report: &JoinReport) {
    info!("\n📋 前 3 个投票桌示例:");
    for mesa in report.joined.iter().take(3) {
        info!(
            "  - CO: {}, ID Senador: {}, Hash: {}",
            mesa.co,
            mesa.id_senador,
            truncate_text(&mesa.hash, 15)
        );
    }

    if let Some((min, max)) = report.id_range() {
        info!("\n🔢 参议员 ID 范围: {} 到 {}", min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        use BatchState::*;
        assert!(Idle.can_transition_to(Sampling));
        assert!(Sampling.can_transition_to(AwaitingConfirmation));
        assert!(AwaitingConfirmation.can_transition_to(Running));
        assert!(AwaitingConfirmation.can_transition_to(Done));
        assert!(Running.can_transition_to(Done));

        assert!(!Idle.can_transition_to(Running));
        assert!(!Sampling.can_transition_to(Running));
        assert!(!Done.can_transition_to(Running));
    }

    #[test]
    fn test_estimated_duration() {
        let report = SampleReport {
            sampled: 20,
            success: 10,
            elapsed: Duration::from_secs(4),
        };
        assert_eq!(report.estimated_duration(100), Duration::from_secs(20));

        let empty = SampleReport { sampled: 0, success: 0, elapsed: Duration::ZERO };
        assert_eq!(empty.estimated_duration(100), Duration::ZERO);
    }
}
