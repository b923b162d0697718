use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Memory元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryMetadata {
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub data_sizes: HashMap<String, usize>,
    pub total_size: usize,
}

impl Default for MemoryMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            last_updated: now,
            data_sizes: HashMap::new(),
            total_size: 0,
        }
    }
}

/// 流水线各阶段共享的作用域化存储
#[derive(Debug, Default)]
pub struct Memory {
    data: HashMap<String, Value>,
    metadata: MemoryMetadata,
}

fn full_key(scope: &str, key: &str) -> String {
    format!("{}:{}", scope, key)
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 存储数据到指定作用域和键，已有数据会被覆盖
    pub fn store<T>(&mut self, scope: &str, key: &str, data: T) -> Result<()>
    where
        T: Serialize,
    {
        let full_key = full_key(scope, key);
        let serialized = serde_json::to_value(data)?;
        let data_size = serialized.to_string().len();

        if let Some(old_size) = self.metadata.data_sizes.insert(full_key.clone(), data_size) {
            self.metadata.total_size -= old_size;
        }
        self.metadata.total_size += data_size;
        self.metadata.last_updated = Utc::now();

        self.data.insert(full_key, serialized);
        Ok(())
    }

    /// 从指定作用域和键获取数据，类型不匹配时返回None
    pub fn get<T>(&self, scope: &str, key: &str) -> Option<T>
    where
        T: for<'a> Deserialize<'a>,
    {
        self.data
            .get(&full_key(scope, key))
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// 列出指定作用域的所有键
    pub fn list_keys(&self, scope: &str) -> Vec<String> {
        let prefix = format!("{}:", scope);
        let mut keys: Vec<String> = self
            .data
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .collect();
        keys.sort();
        keys
    }

    /// 按作用域统计数据大小
    pub fn get_usage_stats(&self) -> HashMap<String, usize> {
        let mut stats = HashMap::new();
        for (key, size) in &self.metadata.data_sizes {
            let scope = key.split(':').next().unwrap_or("unknown").to_string();
            *stats.entry(scope).or_insert(0) += size;
        }
        stats
    }

    pub fn total_size(&self) -> usize {
        self.metadata.total_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get() {
        let mut memory = Memory::new();
        memory.store("preprocess", "summary", "概览").unwrap();

        assert_eq!(memory.list_keys("preprocess"), vec!["summary"]);
        assert_eq!(
            memory.get::<String>("preprocess", "summary"),
            Some("概览".to_string())
        );
        assert_eq!(memory.get::<u32>("preprocess", "summary"), None);
        assert_eq!(memory.get::<String>("planning", "summary"), None);
    }

    #[test]
    fn test_overwrite_updates_size() {
        let mut memory = Memory::new();
        memory.store("s", "k", "aaaa").unwrap();
        let first = memory.total_size();
        memory.store("s", "k", "a").unwrap();
        assert!(memory.total_size() < first);
        assert_eq!(memory.get_usage_stats().get("s"), Some(&memory.total_size()));
    }

    #[test]
    fn test_list_keys_by_scope() {
        let mut memory = Memory::new();
        memory.store("compose", "tasks", 1).unwrap();
        memory.store("compose", "questions", 2).unwrap();
        memory.store("planning", "blueprint", 3).unwrap();

        assert_eq!(memory.list_keys("compose"), vec!["questions", "tasks"]);
        assert_eq!(memory.list_keys("planning"), vec!["blueprint"]);
    }
}
