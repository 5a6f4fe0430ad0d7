//! 地区命名表（nomenclator）
//!
//! `amb[*].ambitos[*]` 扁平化后按 `co` 建立索引

use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// 命名表文档
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Nomenclator {
    #[serde(default)]
    pub amb: Vec<AmbitoBlock>,
}

/// 一个范围块
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmbitoBlock {
    #[serde(default)]
    pub ambitos: Vec<Ambito>,
}

/// 单个地区记录
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ambito {
    #[serde(default)]
    pub co: Option<String>,
    /// ID 范围，期望正好 4 个元素
    #[serde(default)]
    pub r: Option<Vec<Value>>,
}

/// co → 地区记录 的索引
#[derive(Debug, Default)]
pub struct NomenclatureIndex {
    by_code: HashMap<String, Ambito>,
}

impl NomenclatureIndex {
    /// 扁平化所有块并建立索引；重复的 co 以最后出现的为准
    pub fn build(nomenclator: Nomenclator) -> Self {
        let by_code = nomenclator
            .amb
            .into_iter()
            .flat_map(|block| block.ambitos)
            .filter_map(|ambito| match ambito.co.as_deref() {
                Some(co) if !co.is_empty() => Some((co.to_string(), ambito)),
                _ => None,
            })
            .collect();

        Self { by_code }
    }

    pub fn get(&self, code: &str) -> Option<&Ambito> {
        self.by_code.get(code)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// 为一个 co 解析出两个中间 ID
    ///
    /// 未找到 co 或范围长度不为 4 时两个 ID 都为空；
    /// 范围值无法转换为整数时返回数据完整性错误
    pub fn resolve(&self, code: &str) -> Result<ExtractedRecord> {
        let range = match self.get(code).and_then(|a| a.r.as_ref()) {
            Some(r) if r.len() == 4 => r,
            _ => return Ok(ExtractedRecord::unmatched(code)),
        };

        let mut ids = range
            .iter()
            .map(|v| coerce_int(v).ok_or_else(|| ScrapeError::data_integrity(code, v)))
            .collect::<Result<Vec<i64>>>()?;
        ids.sort_unstable();

        Ok(ExtractedRecord {
            co: code.to_string(),
            id2_intermedio: Some(ids[1]),
            id3_intermedio: Some(ids[2]),
        })
    }
}

/// 提取结果，对应输出 CSV 的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub co: String,
    pub id2_intermedio: Option<i64>,
    pub id3_intermedio: Option<i64>,
}

impl ExtractedRecord {
    pub fn unmatched(code: &str) -> Self {
        Self {
            co: code.to_string(),
            id2_intermedio: None,
            id3_intermedio: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.id2_intermedio.is_some()
    }
}

/// 整数、浮点（向零截断）或整数字符串
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn index(doc: Value) -> NomenclatureIndex {
        NomenclatureIndex::build(serde_json::from_value(doc).unwrap())
    }

    #[test]
    fn test_middle_values_independent_of_order() {
        let idx = index(json!({
            "amb": [{"ambitos": [
                {"co": "A", "r": [40, 10, 30, 20]},
                {"co": "B", "r": [10, 20, 30, 40]},
                {"co": "C", "r": ["30", 40, "20", 10]}
            ]}]
        }));

        for code in ["A", "B", "C"] {
            let rec = idx.resolve(code).unwrap();
            assert_eq!(rec.id2_intermedio, Some(20), "co {}", code);
            assert_eq!(rec.id3_intermedio, Some(30), "co {}", code);
        }
    }

    #[test]
    fn test_unknown_code_and_wrong_length() {
        let idx = index(json!({
            "amb": [{"ambitos": [{"co": "A", "r": [1, 2, 3]}, {"co": "B"}]}]
        }));

        assert_eq!(idx.resolve("A").unwrap(), ExtractedRecord::unmatched("A"));
        assert_eq!(idx.resolve("B").unwrap(), ExtractedRecord::unmatched("B"));
        assert_eq!(idx.resolve("Z").unwrap(), ExtractedRecord::unmatched("Z"));
    }

    #[test]
    fn test_last_seen_code_wins() {
        let idx = index(json!({
            "amb": [
                {"ambitos": [{"co": "A", "r": [1, 2, 3, 4]}]},
                {"ambitos": [{"co": "A", "r": [5, 6, 7, 8]}, {"r": [0, 0, 0, 0]}, {"co": ""}]}
            ]
        }));

        assert_eq!(idx.len(), 1);
        let rec = idx.resolve("A").unwrap();
        assert_eq!((rec.id2_intermedio, rec.id3_intermedio), (Some(6), Some(7)));
    }

    #[test]
    fn test_non_numeric_range_is_fatal() {
        let idx = index(json!({"amb": [{"ambitos": [{"co": "A", "r": [1, "x", 3, 4]}]}]}));

        let err = idx.resolve("A").unwrap_err();
        assert!(matches!(err, ScrapeError::DataIntegrity { ref code, .. } if code == "A"));
    }

    #[test]
    fn test_float_values_truncate() {
        let idx = index(json!({"amb": [{"ambitos": [{"co": "A", "r": [1.9, 2.5, 3.2, 4.0]}]}]}));

        let rec = idx.resolve("A").unwrap();
        assert_eq!((rec.id2_intermedio, rec.id3_intermedio), (Some(2), Some(3)));
    }

    #[test]
    fn test_missing_amb_is_empty() {
        let idx = index(json!({}));
        assert!(idx.is_empty());
    }
}
