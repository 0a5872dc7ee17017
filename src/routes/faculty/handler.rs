use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::AppState;

use super::model::{Faculty, FacultyResponse};

#[axum::debug_handler]
pub async fn get_all_faculties(State(state): State<AppState>) -> impl IntoResponse {
    match Faculty::fetch_all(&state.pool).await {
        Ok(faculties) => (
            StatusCode::OK,
            Json(FacultyResponse {
                success: true,
                message: "Faculties retrieved successfully".to_string(),
                faculties: Some(faculties),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FacultyResponse {
                success: false,
                message: format!("Error retrieving faculties: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn get_faculty_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match Faculty::find_by_id(&state.pool, id).await {
        Ok(Some(faculty)) => (
            StatusCode::OK,
            Json(FacultyResponse {
                success: true,
                message: "Faculty retrieved successfully".to_string(),
                faculty: Some(faculty),
                ..Default::default()
            }),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(FacultyResponse {
                success: false,
                message: format!("Faculty with id '{}' not found", id),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FacultyResponse {
                success: false,
                message: format!("Error retrieving faculty: {}", e),
                ..Default::default()
            }),
        ),
    }
}
