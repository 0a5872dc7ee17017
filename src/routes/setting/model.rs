use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSettingRequest {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingRequest {
    pub value: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setting: Option<Setting>,
}

impl Setting {
    /// 取全部设置为 key -> value 映射，缓存的就是这份完整快照
    pub async fn fetch_map(pool: &PgPool) -> Result<HashMap<String, String>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Setting>("SELECT key, value FROM settings")
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(|s| (s.key, s.value)).collect())
    }

    /// 已存在同名 key 时返回 false
    pub async fn create(pool: &PgPool, key: &str, value: &str) -> Result<bool, sqlx::Error> {
        let done =
            sqlx::query("INSERT INTO settings (key, value) VALUES ($1, $2) ON CONFLICT (key) DO NOTHING")
                .bind(key)
                .bind(value)
                .execute(pool)
                .await?;

        Ok(done.rows_affected() > 0)
    }

    pub async fn update(pool: &PgPool, key: &str, value: &str) -> Result<bool, sqlx::Error> {
        let done = sqlx::query("UPDATE settings SET value = $2 WHERE key = $1")
            .bind(key)
            .bind(value)
            .execute(pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let done = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }
}
