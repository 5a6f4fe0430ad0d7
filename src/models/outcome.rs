//! 抓取结果与累积容器

use crate::models::mesa::JoinedMesa;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// 单次抓取的分类结果
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 200 且 `partidos` 非空
    Success { data: Value, partidos: usize },
    /// 200 但没有可用数据
    EmptyResult(EmptyReason),
    /// 403，通常意味着 Cookie 已过期
    Forbidden,
    /// 其他状态码或网络错误
    OtherError(FailureCause),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    EmptyBody,
    InvalidJson,
    NoPartidos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    Status(u16),
    Transport(String),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    /// 写入错误日志的错误类型；成功时为 None
    pub fn error_kind(&self) -> Option<String> {
        match self {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::EmptyResult(_) => Some("status_or_empty".to_string()),
            FetchOutcome::Forbidden => Some("403_forbidden".to_string()),
            FetchOutcome::OtherError(FailureCause::Status(code)) => Some(format!("status_{}", code)),
            FetchOutcome::OtherError(FailureCause::Transport(_)) => Some("transport_error".to_string()),
        }
    }
}

impl Display for FetchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchOutcome::Success { partidos, .. } => write!(f, "✅ ({} partidos)", partidos),
            FetchOutcome::EmptyResult(EmptyReason::InvalidJson) => write!(f, "❌ JSON inválido"),
            FetchOutcome::EmptyResult(_) => write!(f, "⏭️  Sin partidos"),
            FetchOutcome::Forbidden => write!(f, "❌ 403"),
            FetchOutcome::OtherError(FailureCause::Status(code)) => write!(f, "❌ Status {}", code),
            FetchOutcome::OtherError(FailureCause::Transport(msg)) => write!(f, "❌ {}", msg),
        }
    }
}

/// 结果文件中一个投票桌的条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub id_senador: i64,
    pub hash: String,
    pub data: Value,
}

impl ResultEntry {
    pub fn partidos(&self) -> usize {
        self.data
            .get("partidos")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

/// co → 结果，保持插入顺序；重复的 co 原位覆盖
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct ResultStore {
    entries: IndexMap<String, ResultEntry>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, co: String, entry: ResultEntry) {
        self.entries.insert(co, entry);
    }

    pub fn get(&self, co: &str) -> Option<&ResultEntry> {
        self.entries.get(co)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 每个投票桌的平均政党数（整数除法）
    pub fn average_partidos(&self) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let total: usize = self.entries.values().map(ResultEntry::partidos).sum();
        Some(total / self.entries.len())
    }
}

/// 错误日志中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub co: String,
    pub id_senador: i64,
    pub error: String,
}

/// 追加式错误日志
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mesa: &JoinedMesa, kind: String) {
        self.entries.push(ErrorEntry {
            co: mesa.co.clone(),
            id_senador: mesa.id_senador,
            error: kind,
        });
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
