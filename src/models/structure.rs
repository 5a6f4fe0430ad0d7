//! 结构文档扫描
//!
//! 结构文档是任意嵌套的对象/数组树，`l == 70` 的节点代表一个投票桌，
//! 其 `co` 为投票桌代码，`c` 为查询结果用的哈希。

use serde_json::Value;
use std::collections::HashMap;

/// 投票桌节点的层级标记
pub const MESA_LEVEL: i64 = 70;

/// co → 哈希 的映射
#[derive(Debug, Default, Clone)]
pub struct StructureIndex {
    hashes: HashMap<String, String>,
}

impl StructureIndex {
    /// 深度优先（先序、文档顺序）扫描整棵树
    ///
    /// 使用显式栈，嵌套深度不受调用栈限制。
    /// 同一个 co 出现多次时保留最后访问到的哈希。
    pub fn scan(root: &Value) -> Self {
        let mut hashes = HashMap::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            match node {
                Value::Object(map) => {
                    if let Some((co, hash)) = mesa_entry(node) {
                        hashes.insert(co.to_string(), hash.to_string());
                    }
                    stack.extend(map.values().rev());
                }
                Value::Array(items) => stack.extend(items.iter().rev()),
                _ => {}
            }
        }

        Self { hashes }
    }

    pub fn hash_for(&self, code: &str) -> Option<&str> {
        self.hashes.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

fn mesa_entry(node: &Value) -> Option<(&str, &str)> {
    if !is_mesa_level(node.get("l")?) {
        return None;
    }
    let co = node.get("co")?.as_str().filter(|s| !s.is_empty())?;
    let hash = node.get("c")?.as_str().filter(|s| !s.is_empty())?;
    Some((co, hash))
}

fn is_mesa_level(level: &Value) -> bool {
    match level.as_i64() {
        Some(l) => l == MESA_LEVEL,
        None => level.as_f64() == Some(MESA_LEVEL as f64),
    }
}
