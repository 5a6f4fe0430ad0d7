//! # Mesa Scraper
//!
//! 两个顺序运行的批处理任务：
//!
//! 1. **ID 提取**：命名表 JSON + 投票桌 CSV → 每个 co 的中间 ID
//! 2. **结果抓取**：带 ID 的 CSV + 结构 JSON → 逐个投票桌请求结果接口，
//!    写出结果 JSON 和错误 JSON
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 命名表索引、结构扫描、投票桌、抓取结果和累积容器
//! - `models/loaders` - CSV / JSON 读写
//!
//! ### ② 客户端层（Clients）
//! - `ResultsClient` - 结果接口的 HTTP 调用和响应分类
//!
//! ### ③ 业务能力层（Services）
//! - `IdExtractor` - 中间 ID 提取
//! - `ResultWriter` - 结果持久化
//! - 抽样和交互式确认
//!
//! ### ④ 流程层（Workflow）
//! - `FetchFlow` - 单个投票桌：请求 → 分类 → 限速
//!
//! ### ⑤ 编排层（Orchestration）
//! - `FetchApp` - 抽样 → 确认 → 全量下载 → 保存
//! - `run_extraction` - ID 提取任务
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::ResultsClient;
pub use config::Config;
pub use error::{Result, ScrapeError};
pub use models::{FetchOutcome, JoinedMesa, StructureIndex};
pub use orchestrator::{run_extraction, FetchApp, RunOutcome};
pub use utils::logging;
