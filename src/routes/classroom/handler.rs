use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::AppState;

use super::model::{Classroom, ClassroomRequest, ClassroomResponse};

#[axum::debug_handler]
pub async fn get_all_classrooms(State(state): State<AppState>) -> impl IntoResponse {
    let pool = state.pool.clone();
    match state
        .caches
        .classroom_list
        .get_or_fetch(|| async move { Classroom::fetch_all(&pool).await })
        .await
    {
        Ok(classrooms) => (
            StatusCode::OK,
            Json(ClassroomResponse {
                success: true,
                message: "Classrooms retrieved successfully".to_string(),
                classrooms: Some(classrooms),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ClassroomResponse {
                success: false,
                message: format!("Error retrieving classrooms: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn get_classroom_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let pool = state.pool.clone();
    match state
        .caches
        .classroom_by_id
        .get_or_fetch_optional(&id, || async move { Classroom::find_by_id(&pool, id).await })
        .await
    {
        Ok(Some(classroom)) => (
            StatusCode::OK,
            Json(ClassroomResponse {
                success: true,
                message: "Classroom retrieved successfully".to_string(),
                classroom: Some(classroom),
                ..Default::default()
            }),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ClassroomResponse {
                success: false,
                message: format!("Classroom with id '{}' not found", id),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ClassroomResponse {
                success: false,
                message: format!("Error retrieving classroom: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn create_classroom(
    State(state): State<AppState>,
    Json(req): Json<ClassroomRequest>,
) -> impl IntoResponse {
    if req.classroom_name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ClassroomResponse {
                success: false,
                message: "Classroom name cannot be empty".to_string(),
                ..Default::default()
            }),
        );
    }

    match Classroom::create(&state.pool, &req).await {
        Ok(classroom) => {
            invalidate_classroom_caches(&state);
            tracing::info!("Classroom '{}' created with id {}", classroom.classroom_name, classroom.id);
            (
                StatusCode::CREATED,
                Json(ClassroomResponse {
                    success: true,
                    message: "Classroom created successfully".to_string(),
                    classroom: Some(classroom),
                    ..Default::default()
                }),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ClassroomResponse {
                success: false,
                message: format!("Error creating classroom: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn update_classroom(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ClassroomRequest>,
) -> impl IntoResponse {
    match Classroom::update(&state.pool, id, &req).await {
        Ok(Some(classroom)) => {
            invalidate_classroom_caches(&state);
            tracing::info!("Classroom {} updated", id);
            (
                StatusCode::OK,
                Json(ClassroomResponse {
                    success: true,
                    message: "Classroom updated successfully".to_string(),
                    classroom: Some(classroom),
                    ..Default::default()
                }),
            )
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ClassroomResponse {
                success: false,
                message: format!("Classroom with id '{}' not found", id),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ClassroomResponse {
                success: false,
                message: format!("Error updating classroom: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn delete_classroom(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match Classroom::delete(&state.pool, id).await {
        Ok(true) => {
            invalidate_classroom_caches(&state);
            // 教室没了，挂在它下面的课程列表缓存也一并失效
            state.caches.courses_by_class.invalidate(&id);
            tracing::info!("Classroom {} deleted", id);
            (
                StatusCode::OK,
                Json(ClassroomResponse {
                    success: true,
                    message: "Classroom deleted successfully".to_string(),
                    ..Default::default()
                }),
            )
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ClassroomResponse {
                success: false,
                message: format!("Classroom with id '{}' not found", id),
                ..Default::default()
            }),
        ),
        Err(e) => {
            // 仍被课程引用时外键约束会拦下删除
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
                Json(ClassroomResponse {
                    success: false,
                    message: format!("Error deleting classroom: {}", e),
                    ..Default::default()
                }),
            )
        }
    }
}

// 变更成功后的统一失效：列表整槽清空，按ID条目全清
fn invalidate_classroom_caches(state: &AppState) {
    state.caches.classroom_list.invalidate();
    state.caches.classroom_by_id.invalidate_all();
}
