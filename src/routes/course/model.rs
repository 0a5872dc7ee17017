use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::routes::classroom::model::Classroom;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub duration: i32,
    pub tuition: i64,
    pub class_id: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 线上返回的课程形态，按需携带所属教室
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: i32,
    pub name: String,
    pub duration: i32,
    pub tuition: i64,
    pub class_id: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom: Option<Classroom>,
}

impl From<Course> for CourseDetail {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            duration: course.duration,
            tuition: course.tuition,
            class_id: course.class_id,
            created_at: course.created_at,
            updated_at: course.updated_at,
            classroom: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub name: String,
    pub duration: i32,
    pub tuition: i64,
    pub class_id: i64,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<CourseDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseDetail>,
}

impl Course {
    pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = r#"
            SELECT id, name, duration, tuition, class_id, created_at, updated_at
            FROM courses
            ORDER BY id
        "#;

        sqlx::query_as::<_, Course>(query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Course>, sqlx::Error> {
        let query = r#"
            SELECT id, name, duration, tuition, class_id, created_at, updated_at
            FROM courses
            WHERE id = $1
        "#;

        sqlx::query_as::<_, Course>(query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// 单个课程连同所属教室
    pub async fn find_detail(pool: &PgPool, id: i32) -> Result<Option<CourseDetail>, sqlx::Error> {
        let Some(course) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let classroom = Classroom::find_by_id(pool, course.class_id).await?;
        let mut detail = CourseDetail::from(course);
        detail.classroom = classroom;
        Ok(Some(detail))
    }

    /// 某教室下的全部课程，教室信息只查一次后挂到每条课程上
    pub async fn fetch_by_class(
        pool: &PgPool,
        class_id: i64,
    ) -> Result<Vec<CourseDetail>, sqlx::Error> {
        let query = r#"
            SELECT id, name, duration, tuition, class_id, created_at, updated_at
            FROM courses
            WHERE class_id = $1
            ORDER BY id
        "#;

        let courses = sqlx::query_as::<_, Course>(query)
            .bind(class_id)
            .fetch_all(pool)
            .await?;

        let classroom = Classroom::find_by_id(pool, class_id).await?;
        Ok(courses
            .into_iter()
            .map(|course| {
                let mut detail = CourseDetail::from(course);
                detail.classroom = classroom.clone();
                detail
            })
            .collect())
    }

    pub async fn create(pool: &PgPool, req: &CourseRequest) -> Result<Course, sqlx::Error> {
        let query = r#"
            INSERT INTO courses (name, duration, tuition, class_id, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, name, duration, tuition, class_id, created_at, updated_at
        "#;

        sqlx::query_as::<_, Course>(query)
            .bind(&req.name)
            .bind(req.duration)
            .bind(req.tuition)
            .bind(req.class_id)
            .fetch_one(pool)
            .await
    }

    /// 更新成功时返回新行和旧的 class_id，调用方据此失效两个键
    pub async fn update(
        pool: &PgPool,
        id: i32,
        req: &CourseRequest,
    ) -> Result<Option<(Course, i64)>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let query = r#"
            UPDATE courses
            SET name = $2, duration = $3, tuition = $4, class_id = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, duration, tuition, class_id, created_at, updated_at
        "#;

        let updated = sqlx::query_as::<_, Course>(query)
            .bind(id)
            .bind(&req.name)
            .bind(req.duration)
            .bind(req.tuition)
            .bind(req.class_id)
            .fetch_one(pool)
            .await?;

        Ok(Some((updated, existing.class_id)))
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let done = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }
}
