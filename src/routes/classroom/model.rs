use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: i64,
    pub classroom_name: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomRequest {
    pub classroom_name: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classrooms: Option<Vec<Classroom>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom: Option<Classroom>,
}

impl Classroom {
    pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Classroom>, sqlx::Error> {
        let query = r#"
            SELECT id, classroom_name, description, capacity, image_url, created_at, updated_at
            FROM classrooms
            ORDER BY id
        "#;

        sqlx::query_as::<_, Classroom>(query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Classroom>, sqlx::Error> {
        let query = r#"
            SELECT id, classroom_name, description, capacity, image_url, created_at, updated_at
            FROM classrooms
            WHERE id = $1
        "#;

        sqlx::query_as::<_, Classroom>(query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, req: &ClassroomRequest) -> Result<Classroom, sqlx::Error> {
        let query = r#"
            INSERT INTO classrooms (classroom_name, description, capacity, image_url, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, classroom_name, description, capacity, image_url, created_at, updated_at
        "#;

        sqlx::query_as::<_, Classroom>(query)
            .bind(&req.classroom_name)
            .bind(&req.description)
            .bind(req.capacity)
            .bind(&req.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        req: &ClassroomRequest,
    ) -> Result<Option<Classroom>, sqlx::Error> {
        let query = r#"
            UPDATE classrooms
            SET classroom_name = $2, description = $3, capacity = $4, image_url = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, classroom_name, description, capacity, image_url, created_at, updated_at
        "#;

        sqlx::query_as::<_, Classroom>(query)
            .bind(id)
            .bind(&req.classroom_name)
            .bind(&req.description)
            .bind(req.capacity)
            .bind(&req.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let done = sqlx::query("DELETE FROM classrooms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }
}
