//! 结果写入服务 - 业务能力层
//!
//! 只负责在运行结束时一次性写出结果和错误文件

use crate::error::Result;
use crate::models::loaders::save_json;
use crate::models::outcome::{ErrorLog, ResultStore};
use std::path::PathBuf;
use tracing::{info, warn};

/// 结果写入服务
pub struct ResultWriter {
    results_path: PathBuf,
    errors_path: PathBuf,
}

impl ResultWriter {
    pub fn new(results_path: impl Into<PathBuf>, errors_path: impl Into<PathBuf>) -> Self {
        Self {
            results_path: results_path.into(),
            errors_path: errors_path.into(),
        }
    }

    /// 写出结果；错误日志为空时不写错误文件
    ///
    /// # 返回
    /// 返回是否写出了错误文件
    pub async fn persist(&self, results: &ResultStore, errors: &ErrorLog) -> Result<bool> {
        info!("\n💾 保存 {} 条结果...", results.len());
        save_json(&self.results_path, results).await?;

        if errors.is_empty() {
            return Ok(false);
        }

        save_json(&self.errors_path, errors).await?;
        warn!("⚠️  错误已保存到: {}", self.errors_path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mesa::JoinedMesa;
    use crate::models::outcome::ResultEntry;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_errors_file_only_when_non_empty() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path().join("r.json"), dir.path().join("e.json"));

        let mut results = ResultStore::new();
        results.insert(
            "0101".into(),
            ResultEntry { id_senador: 7, hash: "H".into(), data: json!({"partidos": [{}]}) },
        );

        assert!(!writer.persist(&results, &ErrorLog::new()).await.unwrap());
        assert!(dir.path().join("r.json").exists());
        assert!(!dir.path().join("e.json").exists());

        let mut errors = ErrorLog::new();
        let mesa = JoinedMesa { co: "0102".into(), id_senador: 8, hash: "H2".into() };
        errors.push(&mesa, "403_forbidden".into());

        assert!(writer.persist(&results, &errors).await.unwrap());
        let saved: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("e.json")).unwrap()).unwrap();
        assert_eq!(saved[0]["error"], "403_forbidden");

        let saved: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("r.json")).unwrap()).unwrap();
        assert_eq!(saved["0101"]["id_senador"], 7);
        assert_eq!(saved["0101"]["hash"], "H");
    }
}
