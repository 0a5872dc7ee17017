use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

/// 按键缓存：每个键独立遵循读取直通约定。
///
/// 条目只有"缺失"和"完整值"两种状态。取数失败不落缓存；
/// 写路径在变更成功后按键或整体失效。
pub struct KeyedCache<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for KeyedCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> KeyedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// 命中返回缓存值，未命中执行 fetch 并在成功时写入该键。
    pub async fn get_or_fetch<E, F, Fut>(&self, key: &K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(cached) = self.cached(key) {
            return Ok(cached);
        }

        let value = fetch().await?;
        self.store(key.clone(), value.clone());
        Ok(value)
    }

    /// 取数结果为 None（记录不存在）时不写缓存，直接透传
    pub async fn get_or_fetch_optional<E, F, Fut>(&self, key: &K, fetch: F) -> Result<Option<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<V>, E>>,
    {
        if let Some(cached) = self.cached(key) {
            return Ok(Some(cached));
        }

        match fetch().await? {
            Some(value) => {
                self.store(key.clone(), value.clone());
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// 失效单个键，其余条目不受影响
    pub fn invalidate(&self, key: &K) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    /// 清空全部条目
    pub fn invalidate_all(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn cached(&self, key: &K) -> Option<V> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn store(&self, key: K, value: V) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn each_key_is_fetched_once_and_then_served_from_cache() {
        let cache: KeyedCache<i64, Vec<String>> = KeyedCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        for _ in 0..2 {
            for class_id in [1_i64, 2_i64] {
                let calls = calls.clone();
                let courses = cache
                    .get_or_fetch(&class_id, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, String>(vec![format!("course-of-class-{}", class_id)])
                    })
                    .await
                    .unwrap();
                assert_eq!(courses, vec![format!("course-of-class-{}", class_id)]);
            }
        }

        // 两个键各取数一次
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidating_one_key_leaves_other_entries_cached() {
        let cache: KeyedCache<i64, Vec<String>> = KeyedCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        for class_id in [1_i64, 2_i64] {
            let calls = calls.clone();
            cache
                .get_or_fetch(&class_id, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(vec!["old".to_string()])
                })
                .await
                .unwrap();
        }

        cache.invalidate(&1);

        let refetched = {
            let calls = calls.clone();
            cache
                .get_or_fetch(&1, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(vec!["new".to_string()])
                })
                .await
                .unwrap()
        };
        assert_eq!(refetched, vec!["new".to_string()]);

        let untouched = {
            let calls = calls.clone();
            cache
                .get_or_fetch(&2, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(vec!["should-not-run".to_string()])
                })
                .await
                .unwrap()
        };
        assert_eq!(untouched, vec!["old".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn invalidate_all_clears_every_entry() {
        let cache: KeyedCache<i64, Vec<String>> = KeyedCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        for class_id in [1_i64, 2_i64] {
            let calls = calls.clone();
            cache
                .get_or_fetch(&class_id, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(vec!["old".to_string()])
                })
                .await
                .unwrap();
        }

        cache.invalidate_all();

        for class_id in [1_i64, 2_i64] {
            let calls = calls.clone();
            cache
                .get_or_fetch(&class_id, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(vec!["new".to_string()])
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn missing_record_is_not_cached() {
        let cache: KeyedCache<i64, String> = KeyedCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            let found = cache
                .get_or_fetch_optional(&99, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<Option<String>, String>(None)
                })
                .await
                .unwrap();
            assert!(found.is_none());
        }

        // 未找到不落缓存，每次读取都重新取数
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn found_record_is_cached_after_first_fetch() {
        let cache: KeyedCache<i64, String> = KeyedCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            let found = cache
                .get_or_fetch_optional(&7, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(Some("Classroom A101".to_string()))
                })
                .await
                .unwrap();
            assert_eq!(found.as_deref(), Some("Classroom A101"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_entry_absent() {
        let cache: KeyedCache<i64, String> = KeyedCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        let attempt = {
            let calls = calls.clone();
            cache
                .get_or_fetch(&1, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<String, _>("backing store unreachable".to_string())
                })
                .await
        };
        assert!(attempt.is_err());

        let recovered = {
            let calls = calls.clone();
            cache
                .get_or_fetch(&1, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>("recovered".to_string())
                })
                .await
                .unwrap()
        };
        assert_eq!(recovered, "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
