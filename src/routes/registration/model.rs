use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// 报名记录连同教室、课程名称的展开形态
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDto {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub classroom_id: i64,
    pub classroom_name: String,
    pub course_id: i32,
    pub course_name: String,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub classroom_id: i64,
    pub course_id: i32,
    pub note: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrations: Option<Vec<RegistrationDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<RegistrationDto>,
}

const REGISTRATION_SELECT: &str = r#"
    SELECT r.id, r.full_name, r.email, r.phone_number,
           r.classroom_id, COALESCE(cl.classroom_name, 'N/A') AS classroom_name,
           r.course_id, COALESCE(co.name, 'N/A') AS course_name,
           r.note, r.created_at, r.updated_at
    FROM registrations r
    LEFT JOIN classrooms cl ON cl.id = r.classroom_id
    LEFT JOIN courses co ON co.id = r.course_id
"#;

impl RegistrationDto {
    pub async fn fetch_all(pool: &PgPool) -> Result<Vec<RegistrationDto>, sqlx::Error> {
        let query = format!("{} ORDER BY r.id", REGISTRATION_SELECT);

        sqlx::query_as::<_, RegistrationDto>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: i64,
    ) -> Result<Option<RegistrationDto>, sqlx::Error> {
        let query = format!("{} WHERE r.id = $1", REGISTRATION_SELECT);

        sqlx::query_as::<_, RegistrationDto>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// 插入后按ID重查一次，拿到连表后的完整形态
    pub async fn create(
        pool: &PgPool,
        req: &RegistrationRequest,
    ) -> Result<RegistrationDto, sqlx::Error> {
        let query = r#"
            INSERT INTO registrations (full_name, email, phone_number, classroom_id, course_id, note, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING id
        "#;

        let id: i64 = sqlx::query_scalar(query)
            .bind(&req.full_name)
            .bind(&req.email)
            .bind(&req.phone_number)
            .bind(req.classroom_id)
            .bind(req.course_id)
            .bind(&req.note)
            .fetch_one(pool)
            .await?;

        match Self::find_by_id(pool, id).await? {
            Some(dto) => Ok(dto),
            None => Err(sqlx::Error::RowNotFound),
        }
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let done = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }
}
