use anyhow::Result;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;

use crate::config::CacheConfig;

/// 缓存管理器，按 分类/提示词哈希 保存模型提取结果
pub struct CacheManager {
    config: CacheConfig,
    stats: CacheStats,
}

/// 缓存条目
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: u64,
    /// prompt的MD5哈希值，用于缓存键的生成和验证
    pub prompt_hash: String,
}

/// 缓存命中统计
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
}

impl CacheStats {
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl CacheManager {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            stats: CacheStats::default(),
        }
    }

    /// 生成prompt的MD5哈希
    pub fn hash_prompt(&self, prompt: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(prompt.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 获取缓存文件路径
    fn get_cache_path(&self, category: &str, hash: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(category)
            .join(format!("{}.json", hash))
    }

    /// 检查缓存是否过期
    fn is_expired(&self, timestamp: u64) -> bool {
        let expire_seconds = self.config.expire_hours * 3600;
        now_secs().saturating_sub(timestamp) > expire_seconds
    }

    /// 获取缓存，读取或解析失败均视为未命中
    pub async fn get<T>(&self, category: &str, prompt: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        if !self.config.enabled {
            return Ok(None);
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        if !cache_path.exists() {
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
            return Ok(None);
        }

        let content = match fs::read_to_string(&cache_path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("缓存读取失败 {}: {}", cache_path.display(), e);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                return Ok(None);
            }
        };

        match serde_json::from_str::<CacheEntry<T>>(&content) {
            Ok(entry) if self.is_expired(entry.timestamp) => {
                let _ = fs::remove_file(&cache_path).await;
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
            Ok(entry) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(entry.data))
            }
            Err(e) => {
                tracing::warn!("缓存反序列化失败 {}: {}", cache_path.display(), e);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    /// 设置缓存
    pub async fn set<T>(&self, category: &str, prompt: &str, data: T) -> Result<()>
    where
        T: Serialize,
    {
        if !self.config.enabled {
            return Ok(());
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        // 确保目录存在
        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let entry = CacheEntry {
            data,
            timestamp: now_secs(),
            prompt_hash: hash,
        };

        let content = serde_json::to_string_pretty(&entry)?;
        fs::write(&cache_path, content).await?;
        self.stats.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(dir: &TempDir, enabled: bool) -> CacheManager {
        CacheManager::new(CacheConfig {
            enabled,
            cache_dir: dir.path().to_path_buf(),
            expire_hours: 1,
        })
    }

    #[test]
    fn test_hash_prompt_is_stable() {
        let dir = TempDir::new().unwrap();
        let cache = manager(&dir, true);
        assert_eq!(cache.hash_prompt("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let cache = manager(&dir, true);

        assert_eq!(cache.get::<String>("question", "p").await.unwrap(), None);
        cache.set("question", "p", "结果".to_string()).await.unwrap();
        assert_eq!(
            cache.get::<String>("question", "p").await.unwrap(),
            Some("结果".to_string())
        );
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().writes(), 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_is_noop() {
        let dir = TempDir::new().unwrap();
        let cache = manager(&dir, false);

        cache.set("question", "p", 1u32).await.unwrap();
        assert_eq!(cache.get::<u32>("question", "p").await.unwrap(), None);
        assert_eq!(cache.stats().writes(), 0);
    }

    #[tokio::test]
    async fn test_expired_entry_is_removed() {
        let dir = TempDir::new().unwrap();
        let cache = manager(&dir, true);
        let hash = cache.hash_prompt("old");
        let path = dir.path().join("question").join(format!("{}.json", hash));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let entry = CacheEntry {
            data: 7u32,
            timestamp: 0,
            prompt_hash: hash,
        };
        std::fs::write(&path, serde_json::to_string(&entry).unwrap()).unwrap();

        assert_eq!(cache.get::<u32>("question", "old").await.unwrap(), None);
        assert!(!path.exists());
    }
}
