use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::AppState;

use super::model::{Course, CourseDetail, CourseRequest, CourseResponse};

#[axum::debug_handler]
pub async fn get_all_courses(State(state): State<AppState>) -> impl IntoResponse {
    match Course::fetch_all(&state.pool).await {
        Ok(courses) => (
            StatusCode::OK,
            Json(CourseResponse {
                success: true,
                message: "Courses retrieved successfully".to_string(),
                courses: Some(courses.into_iter().map(CourseDetail::from).collect()),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(CourseResponse {
                success: false,
                message: format!("Error retrieving courses: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Course::find_detail(&state.pool, id).await {
        Ok(Some(course)) => (
            StatusCode::OK,
            Json(CourseResponse {
                success: true,
                message: "Course retrieved successfully".to_string(),
                course: Some(course),
                ..Default::default()
            }),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(CourseResponse {
                success: false,
                message: format!("Course with id '{}' not found", id),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(CourseResponse {
                success: false,
                message: format!("Error retrieving course: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn get_courses_by_class_id(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> impl IntoResponse {
    let pool = state.pool.clone();
    match state
        .caches
        .courses_by_class
        .get_or_fetch(&class_id, || async move {
            Course::fetch_by_class(&pool, class_id).await
        })
        .await
    {
        Ok(courses) => (
            StatusCode::OK,
            Json(CourseResponse {
                success: true,
                message: "Courses retrieved successfully".to_string(),
                courses: Some(courses),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(CourseResponse {
                success: false,
                message: format!("Error retrieving courses: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CourseRequest>,
) -> impl IntoResponse {
    match Course::create(&state.pool, &req).await {
        Ok(course) => {
            // 新课程可能落在任何教室下，按键缓存整体失效
            state.caches.courses_by_class.invalidate_all();
            tracing::info!("Course '{}' created with id {}", course.name, course.id);
            (
                StatusCode::CREATED,
                Json(CourseResponse {
                    success: true,
                    message: "Course created successfully".to_string(),
                    course: Some(CourseDetail::from(course)),
                    ..Default::default()
                }),
            )
        }
        Err(e) => {
            let status = if e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(CourseResponse {
                    success: false,
                    message: format!("Error creating course: {}", e),
                    ..Default::default()
                }),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<CourseRequest>,
) -> impl IntoResponse {
    match Course::update(&state.pool, id, &req).await {
        Ok(Some((course, old_class_id))) => {
            // 课程可能换了教室，旧键和新键都要失效
            state.caches.courses_by_class.invalidate(&old_class_id);
            state.caches.courses_by_class.invalidate(&course.class_id);
            tracing::info!("Course {} updated", id);
            (
                StatusCode::OK,
                Json(CourseResponse {
                    success: true,
                    message: "Course updated successfully".to_string(),
                    course: Some(CourseDetail::from(course)),
                    ..Default::default()
                }),
            )
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(CourseResponse {
                success: false,
                message: format!("Course with id '{}' not found", id),
                ..Default::default()
            }),
        ),
        Err(e) => {
            let status = if e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(CourseResponse {
                    success: false,
                    message: format!("Error updating course: {}", e),
                    ..Default::default()
                }),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Course::delete(&state.pool, id).await {
        Ok(true) => {
            state.caches.courses_by_class.invalidate_all();
            tracing::info!("Course {} deleted", id);
            (
                StatusCode::OK,
                Json(CourseResponse {
                    success: true,
                    message: "Course deleted successfully".to_string(),
                    ..Default::default()
                }),
            )
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(CourseResponse {
                success: false,
                message: format!("Course with id '{}' not found", id),
                ..Default::default()
            }),
        ),
        Err(e) => {
            // 已有报名记录引用该课程时由外键约束拦下
            let status = if e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(CourseResponse {
                    success: false,
                    message: format!("Error deleting course: {}", e),
                    ..Default::default()
                }),
            )
        }
    }
}
