use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// 数据完整性错误（范围值无法转换为整数等），整个运行中止
    #[error("数据完整性错误 (co: {code}): 值 '{value}' 无法转换为整数")]
    DataIntegrity { code: String, value: String },

    /// CSV 行格式错误（列数不足）
    #[error("CSV 第 {line} 行格式错误: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// 没有可用的输入记录（前置条件失败）
    #[error("没有可用的记录: {0}")]
    NoUsableRecords(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 文件读写错误
    #[error("文件错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析或序列化错误
    #[error("JSON错误 ({path}): {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// CSV 读写错误
    #[error("CSV错误: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP 客户端构建错误
    #[error("HTTP客户端错误: {0}")]
    Http(#[from] reqwest::Error),
}

// ========== 便捷构造函数 ==========

impl ScrapeError {
    /// 创建文件读写错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }

    /// 创建 JSON 错误
    pub fn json(path: impl Into<String>, source: serde_json::Error) -> Self {
        ScrapeError::Json {
            path: path.into(),
            source,
        }
    }

    /// 创建数据完整性错误
    pub fn data_integrity(code: impl Into<String>, value: impl ToString) -> Self {
        ScrapeError::DataIntegrity {
            code: code.into(),
            value: value.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, ScrapeError>;
