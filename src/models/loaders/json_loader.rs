use crate::error::{Result, ScrapeError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载并反序列化
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read(path)
        .await
        .map_err(|e| ScrapeError::io(path.display().to_string(), e))?;

    serde_json::from_slice(&content).map_err(|e| ScrapeError::json(path.display().to_string(), e))
}

/// 以缩进格式写出 JSON（UTF-8，不转义非 ASCII 字符）
pub async fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_vec_pretty(value)
        .map_err(|e| ScrapeError::json(path.display().to_string(), e))?;

    fs::write(path, content)
        .await
        .map_err(|e| ScrapeError::io(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        save_json(&path, &json!({"co": "Bahía Blanca"})).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Bahía Blanca"));
        let loaded: Value = load_json(&path).await.unwrap();
        assert_eq!(loaded["co"], "Bahía Blanca");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_json::<Value>(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Io { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_json::<Value>(&path).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Json { .. }));
    }
}
