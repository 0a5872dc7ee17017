use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: i64,
    pub faculty_name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculties: Option<Vec<Faculty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<Faculty>,
}

impl Faculty {
    pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Faculty>, sqlx::Error> {
        let query = r#"
            SELECT id, faculty_name, description, image_url, created_at, updated_at
            FROM faculties
            ORDER BY id
        "#;

        sqlx::query_as::<_, Faculty>(query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Faculty>, sqlx::Error> {
        let query = r#"
            SELECT id, faculty_name, description, image_url, created_at, updated_at
            FROM faculties
            WHERE id = $1
        "#;

        sqlx::query_as::<_, Faculty>(query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
