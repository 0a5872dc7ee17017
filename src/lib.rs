use config::Config;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

pub mod cache;
pub mod config;
pub mod mailer;
pub mod middleware;
pub mod seed;
pub mod utils;

pub mod routes;

use cache::{CollectionCache, KeyedCache};
use mailer::Mailer;
use routes::classroom::model::Classroom;
use routes::course::model::CourseDetail;

/// 参考数据缓存，由组合根创建并通过 AppState 注入各处理器
#[derive(Default)]
pub struct Caches {
    /// 全部设置项，key -> value
    pub settings: CollectionCache<HashMap<String, String>>,
    /// 教室完整列表
    pub classroom_list: CollectionCache<Vec<Classroom>>,
    /// 按ID缓存的单个教室
    pub classroom_by_id: KeyedCache<i64, Classroom>,
    /// 按教室ID缓存的课程列表
    pub courses_by_class: KeyedCache<i64, Vec<CourseDetail>>,
}

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub caches: Arc<Caches>,
    pub mailer: Mailer,
}
