use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::text::strip_whitespace;

/// 知识点名称变体到详情描述的映射
///
/// 按插入顺序保存条目，同一个键只保留首次写入的值，
/// 模糊匹配阶段按插入顺序扫描，保证结果确定。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct DetailLookup {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl DetailLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入键值，键已存在时忽略，返回是否写入成功
    pub fn insert_if_absent(&mut self, key: &str, detail: &str) -> bool {
        let key = key.trim();
        if key.is_empty() || self.index.contains_key(key) {
            return false;
        }
        self.index.insert(key.to_string(), self.entries.len());
        self.entries.push((key.to_string(), detail.to_string()));
        true
    }

    /// 同时写入原始键与去空白后的键
    pub fn insert_with_normalized(&mut self, key: &str, detail: &str) {
        self.insert_if_absent(key, detail);
        self.insert_if_absent(&strip_whitespace(key), detail);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 按名称查找知识点详情
    ///
    /// 依次尝试：精确匹配、去空白精确匹配、逐键相等扫描、双向包含、忽略大小写的双向包含。
    /// 任一阶段命中即返回。
    pub fn lookup(&self, query: &str) -> Option<&str> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(detail) = self.get(trimmed) {
            return Some(detail);
        }

        let stripped = strip_whitespace(trimmed);
        if let Some(detail) = self.get(&stripped) {
            return Some(detail);
        }

        if let Some((_, detail)) = self.iter().find(|(key, _)| *key == trimmed) {
            return Some(detail);
        }

        if let Some((_, detail)) = self
            .iter()
            .find(|(key, _)| key.contains(trimmed) || trimmed.contains(key))
        {
            return Some(detail);
        }

        let lowered = trimmed.to_lowercase();
        self.iter()
            .find(|(key, _)| {
                let key = key.to_lowercase();
                key.contains(&lowered) || lowered.contains(&key)
            })
            .map(|(_, detail)| detail)
    }
}

impl From<Vec<(String, String)>> for DetailLookup {
    fn from(entries: Vec<(String, String)>) -> Self {
        let mut lookup = DetailLookup::new();
        for (key, detail) in entries {
            lookup.insert_if_absent(&key, &detail);
        }
        lookup
    }
}

impl From<DetailLookup> for Vec<(String, String)> {
    fn from(lookup: DetailLookup) -> Self {
        lookup.entries
    }
}
