//! ID 提取服务 - 业务能力层
//!
//! 命名表 + 投票桌 CSV → 每个 co 的两个中间 ID

use crate::error::Result;
use crate::models::loaders::{load_json, read_code_column, write_extracted};
use crate::models::nomenclature::{ExtractedRecord, Nomenclator, NomenclatureIndex};
use std::path::Path;
use tracing::{debug, info};

/// 提取统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub rows: usize,
    pub matched: usize,
}

impl ExtractSummary {
    pub fn unmatched(&self) -> usize {
        self.rows - self.matched
    }
}

/// ID 提取服务
pub struct IdExtractor {
    index: NomenclatureIndex,
}

impl IdExtractor {
    pub fn new(nomenclator: Nomenclator) -> Self {
        Self {
            index: NomenclatureIndex::build(nomenclator),
        }
    }

    /// 从命名表文件创建
    pub async fn from_file(path: &Path) -> Result<Self> {
        let nomenclator: Nomenclator = load_json(path).await?;
        let extractor = Self::new(nomenclator);
        info!("✓ 命名表索引: {} 个 co", extractor.index.len());
        Ok(extractor)
    }

    /// 按输入顺序解析所有 co；任何范围值无法转换为整数都会中止
    pub fn extract<I, S>(&self, codes: I) -> Result<Vec<ExtractedRecord>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes
            .into_iter()
            .map(|code| {
                let record = self.index.resolve(code.as_ref())?;
                debug!("{:?}", record);
                Ok(record)
            })
            .collect()
    }

    /// 读取 CSV、解析并写出结果文件
    ///
    /// # 参数
    /// - `input`: 投票桌 CSV（co 在第二列）
    /// - `output`: 输出 CSV
    pub async fn run(&self, input: &Path, output: &Path) -> Result<ExtractSummary> {
        let codes = read_code_column(input).await?;
        let records = self.extract(&codes)?;

        write_extracted(output, &records).await?;

        Ok(ExtractSummary {
            rows: records.len(),
            matched: records.iter().filter(|r| r.is_matched()).count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extractor() -> IdExtractor {
        IdExtractor::new(
            serde_json::from_value(json!({
                "amb": [{"ambitos": [
                    {"co": "0101", "r": [900, 100, 300, 200]},
                    {"co": "0102", "r": [1, 2]}
                ]}]
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_extract_preserves_order() {
        let records = extractor().extract(["0102", "0101", "9999"]).unwrap();

        assert_eq!(records[0], ExtractedRecord::unmatched("0102"));
        assert_eq!(records[1].id2_intermedio, Some(200));
        assert_eq!(records[1].id3_intermedio, Some(300));
        assert_eq!(records[2], ExtractedRecord::unmatched("9999"));
    }

    #[tokio::test]
    async fn test_run_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mesas.csv");
        std::fs::write(&input, "id,co\n1,0101\n2,0102\n3,0103\n").unwrap();

        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        let summary = extractor().run(&input, &first).await.unwrap();
        extractor().run(&input, &second).await.unwrap();

        assert_eq!(summary, ExtractSummary { rows: 3, matched: 1 });
        assert_eq!(summary.unmatched(), 2);
        assert_eq!(
            std::fs::read_to_string(&first).unwrap(),
            std::fs::read_to_string(&second).unwrap()
        );
    }
}
