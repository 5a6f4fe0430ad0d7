use crate::models::structure::StructureIndex;
use std::fmt::Display;

/// 从提取结果 CSV 中读到的投票桌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MesaRecord {
    pub co: String,
    pub id_senador: i64,
}

/// 已匹配到哈希、可以抓取的投票桌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedMesa {
    pub co: String,
    pub id_senador: i64,
    pub hash: String,
}

impl Display for JoinedMesa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (ID:{})", self.co, self.id_senador)
    }
}

/// 连接结果
#[derive(Debug, Default, Clone)]
pub struct JoinReport {
    /// 按 CSV 顺序排列的可抓取投票桌
    pub joined: Vec<JoinedMesa>,
    /// 在结构文档中找不到哈希的 co
    pub missing_hash: Vec<String>,
}

impl JoinReport {
    /// id_senador 的最小值和最大值
    pub fn id_range(&self) -> Option<(i64, i64)> {
        let min = self.joined.iter().map(|m| m.id_senador).min()?;
        let max = self.joined.iter().map(|m| m.id_senador).max()?;
        Some((min, max))
    }
}

/// 为每条 CSV 记录查找哈希，找不到的单独收集
pub fn join_with_structure(records: Vec<MesaRecord>, structure: &StructureIndex) -> JoinReport {
    let mut report = JoinReport::default();

    for record in records {
        match structure.hash_for(&record.co) {
            Some(hash) => report.joined.push(JoinedMesa {
                hash: hash.to_string(),
                co: record.co,
                id_senador: record.id_senador,
            }),
            None => report.missing_hash.push(record.co),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mesa(co: &str, id: i64) -> MesaRecord {
        MesaRecord {
            co: co.to_string(),
            id_senador: id,
        }
    }

    #[test]
    fn test_join_keeps_order_and_collects_missing() {
        let structure = StructureIndex::scan(&json!([
            {"l": 70, "co": "B", "c": "HB"},
            {"l": 70, "co": "A", "c": "HA"}
        ]));

        let report = join_with_structure(
            vec![mesa("A", 1), mesa("X", 2), mesa("B", 3)],
            &structure,
        );

        let codes: Vec<_> = report.joined.iter().map(|m| m.co.as_str()).collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert_eq!(report.joined[0].hash, "HA");
        assert_eq!(report.missing_hash, vec!["X".to_string()]);
        assert_eq!(report.id_range(), Some((1, 3)));
    }

    #[test]
    fn test_empty_join() {
        let report = join_with_structure(vec![mesa("A", 1)], &StructureIndex::default());
        assert!(report.joined.is_empty());
        assert_eq!(report.id_range(), None);
    }
}
