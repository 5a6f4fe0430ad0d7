//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `extract_processor` - ID 提取任务
//! - 命名表 + 投票桌 CSV → 带中间 ID 的 CSV
//!
//! ### `batch_processor` - 批量结果抓取
//! - 加载输入、连接哈希
//! - 抽样估算、等待确认
//! - 顺序下载全部投票桌、保存结果
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<JoinedMesa>)
//!     ↓
//! workflow::FetchFlow (处理单个投票桌)
//!     ↓
//! clients::ResultsClient (HTTP)
//! ```

pub mod batch_processor;
pub mod extract_processor;

// 重新导出主要类型
pub use batch_processor::{BatchState, FetchApp, RunOutcome, RunSummary, SampleReport};
pub use extract_processor::run_extraction;
