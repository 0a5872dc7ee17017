// 缓存模块
// 参考数据的进程内缓存：读取直通，写入成功后失效

mod collection;
mod keyed;

pub use collection::CollectionCache;
pub use keyed::KeyedCache;
