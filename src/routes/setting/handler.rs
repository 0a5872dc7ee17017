use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::AppState;

use super::model::{CreateSettingRequest, Setting, SettingResponse, UpdateSettingRequest};

#[axum::debug_handler]
pub async fn get_all_settings(State(state): State<AppState>) -> impl IntoResponse {
    let pool = state.pool.clone();
    match state
        .caches
        .settings
        .get_or_fetch(|| async move { Setting::fetch_map(&pool).await })
        .await
    {
        Ok(settings) => (
            StatusCode::OK,
            Json(SettingResponse {
                success: true,
                message: "Settings retrieved successfully".to_string(),
                settings: Some(settings),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SettingResponse {
                success: false,
                message: format!("Error retrieving settings: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn get_setting_by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    if key.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(SettingResponse {
                success: false,
                message: "Key cannot be empty".to_string(),
                ..Default::default()
            }),
        );
    }

    let pool = state.pool.clone();
    let settings = match state
        .caches
        .settings
        .get_or_fetch(|| async move { Setting::fetch_map(&pool).await })
        .await
    {
        Ok(settings) => settings,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SettingResponse {
                    success: false,
                    message: format!("Error retrieving setting: {}", e),
                    ..Default::default()
                }),
            );
        }
    };

    match settings.get(&key) {
        Some(value) => (
            StatusCode::OK,
            Json(SettingResponse {
                success: true,
                message: "Setting retrieved successfully".to_string(),
                setting: Some(Setting {
                    key: key.clone(),
                    value: value.clone(),
                }),
                ..Default::default()
            }),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(SettingResponse {
                success: false,
                message: format!("Setting with key '{}' not found", key),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn create_setting(
    State(state): State<AppState>,
    Json(req): Json<CreateSettingRequest>,
) -> impl IntoResponse {
    if req.key.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(SettingResponse {
                success: false,
                message: "Key cannot be empty".to_string(),
                ..Default::default()
            }),
        );
    }

    match Setting::create(&state.pool, &req.key, &req.value).await {
        Ok(true) => {
            // 写成功才失效，下一次读取会重新取完整集合
            state.caches.settings.invalidate();
            tracing::info!("Setting '{}' created", req.key);
            (
                StatusCode::CREATED,
                Json(SettingResponse {
                    success: true,
                    message: "Setting created successfully".to_string(),
                    setting: Some(Setting {
                        key: req.key,
                        value: req.value,
                    }),
                    ..Default::default()
                }),
            )
        }
        Ok(false) => (
            StatusCode::BAD_REQUEST,
            Json(SettingResponse {
                success: false,
                message: format!("Setting with key '{}' already exists", req.key),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SettingResponse {
                success: false,
                message: format!("Error creating setting: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn update_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<UpdateSettingRequest>,
) -> impl IntoResponse {
    match Setting::update(&state.pool, &key, &req.value).await {
        Ok(true) => {
            state.caches.settings.invalidate();
            tracing::info!("Setting '{}' updated", key);
            (
                StatusCode::OK,
                Json(SettingResponse {
                    success: true,
                    message: "Setting updated successfully".to_string(),
                    setting: Some(Setting {
                        key,
                        value: req.value,
                    }),
                    ..Default::default()
                }),
            )
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(SettingResponse {
                success: false,
                message: format!("Setting with key '{}' not found", key),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SettingResponse {
                success: false,
                message: format!("Error updating setting: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    match Setting::delete(&state.pool, &key).await {
        Ok(true) => {
            state.caches.settings.invalidate();
            tracing::info!("Setting '{}' deleted", key);
            (
                StatusCode::OK,
                Json(SettingResponse {
                    success: true,
                    message: "Setting deleted successfully".to_string(),
                    ..Default::default()
                }),
            )
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(SettingResponse {
                success: false,
                message: format!("Setting with key '{}' not found", key),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SettingResponse {
                success: false,
                message: format!("Error deleting setting: {}", e),
                ..Default::default()
            }),
        ),
    }
}
