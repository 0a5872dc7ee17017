use std::future::Future;
use std::sync::{PoisonError, RwLock};

/// 整集缓存：槽位要么为空，要么保存一份完整集合，不存在部分状态。
///
/// 读取直通：命中直接返回，未命中执行注入的取数闭包，成功才写入。
/// 取数失败不落缓存，下一次读取会重新取数。
/// 写路径由调用方在变更成功后调用 [`invalidate`](Self::invalidate)。
pub struct CollectionCache<T> {
    slot: RwLock<Option<T>>,
}

impl<T> Default for CollectionCache<T> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }
}

impl<T: Clone> CollectionCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 命中返回缓存值，未命中执行 fetch 并在成功时写入。
    ///
    /// 锁不跨 await 持有。并发未命中会各自取数，取数幂等时无害，后写覆盖。
    pub async fn get_or_fetch<E, F, Fut>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.cached() {
            return Ok(cached);
        }

        let value = fetch().await?;
        self.store(value.clone());
        Ok(value)
    }

    /// 无条件写入，启动预热用
    pub fn set(&self, value: T) {
        self.store(value);
    }

    /// 清空槽位，下一次读取必然重新取数
    pub fn invalidate(&self) {
        *self
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn cached(&self) -> Option<T> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, value: T) {
        *self
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::Barrier;

    fn settings_fixture(logo: &str) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("site_logo".to_string(), logo.to_string());
        map.insert("hotline".to_string(), "1900 1234".to_string());
        map
    }

    #[tokio::test]
    async fn first_read_fetches_then_hits_serve_from_cache() {
        let cache = CollectionCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            let result: Result<_, String> = cache
                .get_or_fetch(|| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(settings_fixture("logo-v1.png"))
                })
                .await;
            assert_eq!(
                result.unwrap().get("site_logo").map(String::as_str),
                Some("logo-v1.png")
            );
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_empty_and_next_read_retries() {
        let cache: CollectionCache<HashMap<String, String>> = CollectionCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        let attempt = {
            let calls = calls.clone();
            cache
                .get_or_fetch(|| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<HashMap<String, String>, _>("backing store unreachable".to_string())
                })
                .await
        };
        assert!(attempt.is_err());

        // 失败不落缓存，重试再次走取数并成功
        let retried = {
            let calls = calls.clone();
            cache
                .get_or_fetch(|| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(settings_fixture("logo-v1.png"))
                })
                .await
        };
        assert!(retried.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch_of_new_value() {
        let cache = CollectionCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        let first = {
            let calls = calls.clone();
            cache
                .get_or_fetch(|| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(settings_fixture("logo-v1.png"))
                })
                .await
                .unwrap()
        };
        assert_eq!(first.get("site_logo").map(String::as_str), Some("logo-v1.png"));

        // 模拟一次成功的写操作：失效后读取到新值
        cache.invalidate();

        let second = {
            let calls = calls.clone();
            cache
                .get_or_fetch(|| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(settings_fixture("logo-v2.png"))
                })
                .await
                .unwrap()
        };
        assert_eq!(second.get("site_logo").map(String::as_str), Some("logo-v2.png"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn set_overwrites_slot_without_fetching() {
        let cache = CollectionCache::new();
        cache.set(settings_fixture("warmup.png"));

        let calls = Arc::new(AtomicU32::new(0));
        let value = {
            let calls = calls.clone();
            cache
                .get_or_fetch(|| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(settings_fixture("never-used.png"))
                })
                .await
                .unwrap()
        };

        assert_eq!(value.get("site_logo").map(String::as_str), Some("warmup.png"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_misses_fetch_independently() {
        let cache = Arc::new(CollectionCache::new());
        let calls = Arc::new(AtomicU32::new(0));
        let barrier = Arc::new(Barrier::new(2));

        let mut handles = Vec::new();
        for _ in 0..2 {
            let cache = cache.clone();
            let calls = calls.clone();
            let barrier = barrier.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        // 两个任务都进入取数后才返回，确保双双未命中
                        barrier.wait().await;
                        Ok::<_, String>(settings_fixture("racy.png"))
                    })
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // 无去重：两次未命中各自取数，后写覆盖
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let calls_after = calls.clone();
        let cached = cache
            .get_or_fetch(|| async move {
                calls_after.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(settings_fixture("should-not-run.png"))
            })
            .await
            .unwrap();
        assert_eq!(cached.get("site_logo").map(String::as_str), Some("racy.png"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
