//! 单个投票桌抓取流程 - 流程层
//!
//! 流程顺序：
//! 1. 请求结果接口（只请求一次）
//! 2. 打印分类结果
//! 3. 固定间隔休眠（唯一的限速手段）

use crate::clients::ResultsClient;
use crate::config::Config;
use crate::error::Result;
use crate::models::mesa::JoinedMesa;
use crate::models::outcome::{ErrorLog, FetchOutcome, ResultEntry, ResultStore};
use crate::workflow::mesa_ctx::MesaCtx;
use std::time::Duration;
use tracing::{info, warn};

/// 单个投票桌抓取流程
pub struct FetchFlow {
    client: ResultsClient,
    delay: Duration,
}

impl FetchFlow {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: ResultsClient::new(config)?,
            delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    /// 抓取一个投票桌并在之后等待固定间隔
    pub async fn run(&self, mesa: &JoinedMesa, ctx: MesaCtx) -> FetchOutcome {
        let outcome = self.client.fetch_scope_data(&mesa.hash, mesa.id_senador).await;

        if outcome.is_success() {
            info!("{} {}... {}", ctx, mesa, outcome);
        } else {
            warn!("{} {}... {}", ctx, mesa, outcome);
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        outcome
    }
}

/// 一轮抓取的累积结果
#[derive(Debug, Default)]
pub struct RunAccumulator {
    pub results: ResultStore,
    pub errors: ErrorLog,
    attempted: usize,
}

impl RunAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 成功写入结果，其他情况写入错误日志
    pub fn record(&mut self, mesa: &JoinedMesa, outcome: FetchOutcome) {
        self.attempted += 1;
        match outcome.error_kind() {
            None => {
                if let FetchOutcome::Success { data, .. } = outcome {
                    self.results.insert(
                        mesa.co.clone(),
                        ResultEntry {
                            id_senador: mesa.id_senador,
                            hash: mesa.hash.clone(),
                            data,
                        },
                    );
                }
            }
            Some(kind) => self.errors.push(mesa, kind),
        }
    }

    /// 已尝试的投票桌数量；重复的 co 在结果中会被覆盖，但仍各计一次
    pub fn attempted(&self) -> usize {
        self.attempted
    }
}
