//! 投票桌处理上下文
//!
//! 封装"我正在处理第几个投票桌"这一信息

use std::fmt::Display;

/// 投票桌处理上下文（仅用于日志显示）
#[derive(Debug, Clone, Copy)]
pub struct MesaCtx {
    /// 当前序号（从1开始）
    pub index: usize,
    /// 本轮总数
    pub total: usize,
}

impl MesaCtx {
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }
}

impl Display for MesaCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}/{}]", self.index, self.total)
    }
}
